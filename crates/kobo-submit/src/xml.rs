//! Wire serialization of submission documents.
//!
//! Element names, nesting and namespace declarations must match the
//! receiving OpenRosa service exactly; `Individual` is a repeat group
//! that sits beside `household`, not inside it.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{ACKNOWLEDGEMENT, SubmissionDocument};

/// OpenRosa XForms namespace.
pub const OPENROSA_XFORMS_NS: &str = "http://openrosa.org/xforms";

/// OpenRosa JavaRosa namespace.
pub const OPENROSA_JAVAROSA_NS: &str = "http://openrosa.org/javarosa";

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serialize one document into its UTF-8 XML wire form.
pub fn serialize(document: &SubmissionDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("data");
    root.push_attribute(("id", document.submission_id()));
    root.push_attribute(("xmlns:orx", OPENROSA_XFORMS_NS));
    root.push_attribute(("xmlns:jr", OPENROSA_JAVAROSA_NS));
    writer.write_event(Event::Start(root))?;

    let date = document.date_text();
    write_text_element(&mut writer, "start", &date)?;
    write_text_element(&mut writer, "end", &date)?;
    write_text_element(&mut writer, "today", &date)?;

    writer.write_event(Event::Start(BytesStart::new("intro")))?;
    write_text_element(&mut writer, "acknowledgement", ACKNOWLEDGEMENT)?;
    writer.write_event(Event::End(BytesEnd::new("intro")))?;

    writer.write_event(Event::Start(BytesStart::new("household")))?;
    for (name, value) in document.household() {
        write_text_element(&mut writer, name, value)?;
    }
    write_text_element(&mut writer, "other_members", document.other_members())?;
    write_text_element(&mut writer, "HHSize", &document.hh_size().to_string())?;
    writer.write_event(Event::End(BytesEnd::new("household")))?;

    for individual in document.individuals() {
        writer.write_event(Event::Start(BytesStart::new("Individual")))?;
        for (name, value) in individual {
            write_text_element(&mut writer, name, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("Individual")))?;
    }

    writer.write_event(Event::Start(BytesStart::new("meta")))?;
    write_text_element(&mut writer, "instanceID", document.instance_id())?;
    writer.write_event(Event::End(BytesEnd::new("meta")))?;

    writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(writer.into_inner())
}

//! Submission document assembly.
//!
//! A `DocumentBuilder` collects one household row and its member rows,
//! then freezes into an immutable `SubmissionDocument`. All three date
//! fields come from a single date captured when the builder is created,
//! so they can never disagree within one document.

use chrono::{Local, NaiveDate};
use kobo_model::{ModelError, Record, Result, normalize_cell};
use uuid::Uuid;

/// Household section fields, in document order.
pub const HOUSEHOLD_FIELDS: [&str; 5] = ["FID", "HName", "HSex", "HAge", "HLocation"];

/// Individual (repeat group) fields, in document order.
pub const INDIVIDUAL_FIELDS: [&str; 5] = [
    "FID",
    "Individual_FullName",
    "Individual_Sex",
    "Individual_Age",
    "Relationship",
];

/// Fixed acknowledgement marker in the intro group.
pub const ACKNOWLEDGEMENT: &str = "OK";

/// Where `meta/instanceID` values come from.
///
/// The collection tool historically reuses the project UUID for every
/// submission in a run; that remains the default for wire
/// compatibility. `PerSubmission` generates a fresh v4 UUID per
/// document instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstanceIdSource {
    #[default]
    ProjectUuid,
    PerSubmission,
}

impl InstanceIdSource {
    pub fn next(self, project_uuid: &str) -> String {
        match self {
            Self::ProjectUuid => project_uuid.to_string(),
            Self::PerSubmission => Uuid::new_v4().to_string(),
        }
    }
}

/// One immutable, fully-assembled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDocument {
    submission_id: String,
    instance_id: String,
    date: NaiveDate,
    household: Vec<(String, String)>,
    individuals: Vec<Vec<(String, String)>>,
}

impl SubmissionDocument {
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// ISO date text used for `start`, `end` and `today`.
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn household(&self) -> &[(String, String)] {
        &self.household
    }

    pub fn individuals(&self) -> &[Vec<(String, String)>] {
        &self.individuals
    }

    /// Declared household size: member rows plus the household head.
    pub fn hh_size(&self) -> usize {
        self.individuals.len() + 1
    }

    /// Enumerated text flag for whether any member rows exist.
    pub fn other_members(&self) -> &'static str {
        if self.individuals.is_empty() {
            "No"
        } else {
            "Yes"
        }
    }
}

/// Mutable assembly for one submission document.
#[derive(Debug)]
pub struct DocumentBuilder {
    submission_id: String,
    instance_id: String,
    date: NaiveDate,
    household: Option<Vec<(String, String)>>,
    individuals: Vec<Vec<(String, String)>>,
}

impl DocumentBuilder {
    /// Start a builder dated with the current local date.
    pub fn new(submission_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self::with_date(submission_id, instance_id, Local::now().date_naive())
    }

    /// Start a builder with an explicit date. The batch captures the
    /// date once per document; tests use this for determinism.
    pub fn with_date(
        submission_id: impl Into<String>,
        instance_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            instance_id: instance_id.into(),
            date,
            household: None,
            individuals: Vec::new(),
        }
    }

    /// Set the household section from the parent row.
    ///
    /// Fails when a schema field is missing from the row, naming the
    /// field and row.
    pub fn household(&mut self, parent: &Record) -> Result<&mut Self> {
        self.household = Some(collect_fields(parent, &HOUSEHOLD_FIELDS)?);
        Ok(self)
    }

    /// Append one individual section from a member row.
    pub fn individual(&mut self, child: &Record) -> Result<&mut Self> {
        self.individuals.push(collect_fields(child, &INDIVIDUAL_FIELDS)?);
        Ok(self)
    }

    /// Freeze into an immutable document.
    pub fn freeze(self) -> Result<SubmissionDocument> {
        let household = self
            .household
            .ok_or_else(|| ModelError::Message("document has no household section".to_string()))?;
        Ok(SubmissionDocument {
            submission_id: self.submission_id,
            instance_id: self.instance_id,
            date: self.date,
            household,
            individuals: self.individuals,
        })
    }
}

fn collect_fields(record: &Record, fields: &[&str]) -> Result<Vec<(String, String)>> {
    fields
        .iter()
        .map(|name| {
            let value = record.field(name)?;
            Ok(((*name).to_string(), normalize_cell(value)))
        })
        .collect()
}

/// Build one submission document for a parent row and its matched
/// member rows, dated with the current local date.
pub fn build_document(
    parent: &Record,
    children: &[Record],
    submission_id: &str,
    instance_id: &str,
) -> Result<SubmissionDocument> {
    build_document_with_date(
        parent,
        children,
        submission_id,
        instance_id,
        Local::now().date_naive(),
    )
}

/// Build with an explicit date; individual sections preserve `children`
/// order.
pub fn build_document_with_date(
    parent: &Record,
    children: &[Record],
    submission_id: &str,
    instance_id: &str,
    date: NaiveDate,
) -> Result<SubmissionDocument> {
    let mut builder = DocumentBuilder::with_date(submission_id, instance_id, date);
    builder.household(parent)?;
    for child in children {
        builder.individual(child)?;
    }
    builder.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(fid: &str) -> Record {
        Record::new(
            1,
            vec![
                ("FID".to_string(), fid.to_string()),
                ("HName".to_string(), "Doe".to_string()),
                ("HSex".to_string(), "M".to_string()),
                ("HAge".to_string(), "40".to_string()),
                ("HLocation".to_string(), "X".to_string()),
            ],
        )
    }

    fn child(row: usize, name: &str) -> Record {
        Record::new(
            row,
            vec![
                ("FID".to_string(), "1".to_string()),
                ("Individual_FullName".to_string(), name.to_string()),
                ("Individual_Sex".to_string(), "F".to_string()),
                ("Individual_Age".to_string(), "12".to_string()),
                ("Relationship".to_string(), "Daughter".to_string()),
            ],
        )
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn no_children_means_size_one_and_no_flag() {
        let document =
            build_document_with_date(&parent("1"), &[], "proj", "proj", test_date()).unwrap();
        assert_eq!(document.hh_size(), 1);
        assert_eq!(document.other_members(), "No");
        assert!(document.individuals().is_empty());
    }

    #[test]
    fn n_children_means_size_n_plus_one_in_order() {
        let children = vec![child(1, "First"), child(2, "Second")];
        let document =
            build_document_with_date(&parent("1"), &children, "proj", "proj", test_date())
                .unwrap();
        assert_eq!(document.hh_size(), 3);
        assert_eq!(document.other_members(), "Yes");
        let names: Vec<&str> = document
            .individuals()
            .iter()
            .map(|cells| cells[1].1.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn missing_household_field_fails_loudly() {
        let incomplete = Record::new(4, vec![("FID".to_string(), "1".to_string())]);
        let error =
            build_document_with_date(&incomplete, &[], "proj", "proj", test_date()).unwrap_err();
        assert_eq!(error.to_string(), "missing required field HName on row 4");
    }

    #[test]
    fn missing_individual_field_fails_loudly() {
        let bad_child = Record::new(2, vec![("FID".to_string(), "1".to_string())]);
        let error = build_document_with_date(
            &parent("1"),
            &[bad_child],
            "proj",
            "proj",
            test_date(),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "missing required field Individual_FullName on row 2"
        );
    }

    #[test]
    fn builder_requires_household_before_freeze() {
        let builder = DocumentBuilder::with_date("proj", "proj", test_date());
        assert!(builder.freeze().is_err());
    }

    #[test]
    fn instance_id_source_default_reuses_project_uuid() {
        assert_eq!(InstanceIdSource::ProjectUuid.next("abc"), "abc");
        let first = InstanceIdSource::PerSubmission.next("abc");
        let second = InstanceIdSource::PerSubmission.next("abc");
        assert_ne!(first, "abc");
        assert_ne!(first, second);
    }

    #[test]
    fn field_values_are_normalized_text() {
        let mut cells = parent("1").cells().to_vec();
        cells[1].1 = "  Doe ".to_string();
        let padded = Record::new(1, cells);
        let document =
            build_document_with_date(&padded, &[], "proj", "proj", test_date()).unwrap();
        assert_eq!(document.household()[1], ("HName".to_string(), "Doe".to_string()));
    }
}

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use kobo_submit::{BatchSummary, DispatchStatus};

pub fn print_summary(summary: &BatchSummary) {
    println!("Dispatched: {}", summary.outcomes.len());
    println!("Delivered:  {}", summary.delivered());
    println!("Failed:     {}", summary.failed());
    println!("Skipped:    {}", summary.skipped.len());
    if summary.planned > 0 {
        println!("Planned (dry run): {}", summary.planned);
    }

    let mut rows: Vec<(String, &str, String)> = Vec::new();
    for outcome in &summary.outcomes {
        match &outcome.status {
            DispatchStatus::Delivered { status, body } if !outcome.is_success() => {
                rows.push((
                    outcome.parent_key.clone(),
                    "http",
                    format!("{status} {body}"),
                ));
            }
            DispatchStatus::Failed { error } => {
                rows.push((outcome.parent_key.clone(), "transport", error.clone()));
            }
            DispatchStatus::Delivered { .. } => {}
        }
    }
    for failure in &summary.skipped {
        rows.push((failure.parent_key.clone(), "build", failure.error.clone()));
    }
    if rows.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Household"),
        header_cell("Failure"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for (key, kind, detail) in rows {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(kind).fg(Color::Red),
            Cell::new(detail),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

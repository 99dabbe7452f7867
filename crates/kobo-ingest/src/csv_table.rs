//! CSV table reading into named-field records.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use kobo_model::{Record, normalize_cell};

/// A CSV file read into headers plus row records.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Read a CSV file with a first-row header into records.
///
/// Fully-empty rows are dropped; short rows are padded with empty
/// cells so every record carries the full column set. Row numbers are
/// 1-based over the kept data rows.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header: {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();
    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result.with_context(|| format!("read record: {}", path.display()))?;
        let cells: Vec<String> = raw.iter().map(normalize_cell).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        let row = records.len() + 1;
        let named: Vec<(String, String)> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = cells.get(idx).cloned().unwrap_or_default();
                (header.clone(), value)
            })
            .collect();
        records.push(Record::new(row, named));
    }
    Ok(CsvTable { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("  Individual   Age "), "Individual Age");
        assert_eq!(normalize_header("\u{feff}FID"), "FID");
    }
}

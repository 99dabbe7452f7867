//! Row records and the canonical text conversion applied to cells.

use crate::error::{ModelError, Result};

/// Strip a UTF-8 BOM and surrounding whitespace from a raw cell value.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Canonical form of a key used for parent/child matching.
///
/// Spreadsheet exports routinely float-format integer identifiers
/// ("1" in one sheet, "1.0" in another). Values that parse as a finite
/// number with an integral value are rendered as their integer decimal
/// form; everything else compares as exact trimmed text. Note that
/// zero-padded identifiers ("007") are numeric and canonicalize to "7".
pub fn canonical_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            return format!("{}", value as i64);
        }
    }
    trimmed.to_string()
}

/// One row from a tabular source, with cells in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based data row number within its source, for diagnostics.
    pub row: usize,
    cells: Vec<(String, String)>,
}

impl Record {
    pub fn new(row: usize, cells: Vec<(String, String)>) -> Self {
        Self { row, cells }
    }

    /// Cells in column order.
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// Look up a cell by column name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a required cell, failing loudly when the column is absent.
    ///
    /// An empty value is still a present value; only a missing column is
    /// an error.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| ModelError::MissingField {
            field: name.to_string(),
            row: self.row,
        })
    }

    /// Canonical key for the given column, if present.
    pub fn key(&self, column: &str) -> Result<String> {
        Ok(canonical_key(self.field(column)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cell_strips_bom_and_whitespace() {
        assert_eq!(normalize_cell("\u{feff} FID "), "FID");
        assert_eq!(normalize_cell("  value  "), "value");
    }

    #[test]
    fn canonical_key_integer_forms_match() {
        assert_eq!(canonical_key("1"), "1");
        assert_eq!(canonical_key("1.0"), "1");
        assert_eq!(canonical_key(" 1 "), "1");
        assert_eq!(canonical_key("007"), "7");
    }

    #[test]
    fn canonical_key_text_is_exact() {
        assert_eq!(canonical_key("A12"), "A12");
        assert_ne!(canonical_key("A12"), canonical_key("a12"));
        assert_eq!(canonical_key("1.5"), "1.5");
    }

    #[test]
    fn field_missing_names_field_and_row() {
        let record = Record::new(3, vec![("FID".to_string(), "1".to_string())]);
        let error = record.field("HName").unwrap_err();
        assert_eq!(
            error.to_string(),
            "missing required field HName on row 3"
        );
    }

    #[test]
    fn field_present_but_empty_is_not_an_error() {
        let record = Record::new(1, vec![("HName".to_string(), String::new())]);
        assert_eq!(record.field("HName").unwrap(), "");
    }
}

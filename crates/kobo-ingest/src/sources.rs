//! Child-source loading with missing-file tolerance.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use kobo_model::ChildSourceConfig;

use crate::csv_table::read_csv_table;
use crate::matcher::ChildIndex;

/// Load every configured child source into one foreign-key index.
///
/// Each source is read once, before the batch loop. A source whose
/// file does not exist is logged and skipped; it contributes zero
/// rows and never fails the run. A readable source missing the
/// foreign-key column is an error: matching against it would be
/// meaningless.
pub fn load_child_index(
    sources: &[ChildSourceConfig],
    child_id_column: &str,
) -> Result<ChildIndex> {
    let mut index = ChildIndex::default();
    for source in sources {
        if !source.path.is_file() {
            warn!(
                source = %source.name,
                path = %source.path.display(),
                "child source does not exist, skipping"
            );
            continue;
        }
        let table = read_csv_table(&source.path)
            .with_context(|| format!("load child source {}", source.name))?;
        let row_count = table.records.len();
        for record in table.records {
            let key = record
                .key(child_id_column)
                .with_context(|| format!("child source {}", source.name))?;
            index.insert(key, record);
        }
        debug!(
            source = %source.name,
            rows = row_count,
            "indexed child source"
        );
    }
    Ok(index)
}

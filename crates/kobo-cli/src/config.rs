//! Configuration file loading.
//!
//! An unreadable or malformed configuration is fatal to the whole
//! run; no submissions are attempted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use kobo_model::SubmissionConfig;

/// Load a JSON submission configuration from disk.
pub fn load_config(path: &Path) -> Result<SubmissionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let config: SubmissionConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn loads_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(
            br#"{
                "parent_data_path": "households.csv",
                "parent_id_column": "FID",
                "child_id_column": "FID",
                "project_uuid": "proj",
                "api_token": "secret"
            }"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.parent_id_column, "FID");
        assert_eq!(config.concurrency, 5);
    }

    #[test]
    fn unreadable_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let error = load_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(error.to_string().contains("read config"));
    }

    #[test]
    fn malformed_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let error = load_config(&path).unwrap_err();
        assert!(error.to_string().contains("parse config"));
    }
}

//! Submission run configuration, deserialized from a JSON file.

use std::path::PathBuf;

use serde::Deserialize;

/// Default KoBoCat submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://kobocat.unhcr.org/api/v1/submissions";

/// Default number of concurrent in-flight dispatches.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// One named child-member table source.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildSourceConfig {
    /// Display name used in logs when the source is missing.
    pub name: String,
    pub path: PathBuf,
}

/// Configuration for one bulk submission run.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// Path to the household (parent) table.
    pub parent_data_path: PathBuf,
    /// Column holding the household identifier in the parent table.
    pub parent_id_column: String,
    /// Foreign-key column referencing the household in child tables.
    pub child_id_column: String,
    /// Project UUID, reused as document id and instance id by default.
    pub project_uuid: String,
    /// API credential sent as `Authorization: Token <value>`.
    pub api_token: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub child_data_paths: Vec<ChildSourceConfig>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_config() {
        let json = r#"{
            "parent_data_path": "households.csv",
            "parent_id_column": "FID",
            "child_id_column": "FID",
            "project_uuid": "a1b2c3d4",
            "api_token": "secret",
            "endpoint": "https://example.org/api/v1/submissions",
            "concurrency": 8,
            "child_data_paths": [
                {"name": "Members", "path": "members.csv"}
            ]
        }"#;
        let config: SubmissionConfig = serde_json::from_str(json).expect("parse config");
        assert_eq!(config.endpoint, "https://example.org/api/v1/submissions");
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.child_data_paths.len(), 1);
        assert_eq!(config.child_data_paths[0].name, "Members");
    }

    #[test]
    fn endpoint_and_concurrency_default() {
        let json = r#"{
            "parent_data_path": "households.csv",
            "parent_id_column": "FID",
            "child_id_column": "FID",
            "project_uuid": "a1b2c3d4",
            "api_token": "secret"
        }"#;
        let config: SubmissionConfig = serde_json::from_str(json).expect("parse config");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert!(config.child_data_paths.is_empty());
    }

    #[test]
    fn rejects_missing_required_key() {
        let json = r#"{"parent_data_path": "households.csv"}"#;
        let result: std::result::Result<SubmissionConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}

pub mod config;
pub mod error;
pub mod record;

pub use config::{ChildSourceConfig, DEFAULT_CONCURRENCY, DEFAULT_ENDPOINT, SubmissionConfig};
pub use error::{ModelError, Result};
pub use record::{Record, canonical_key, normalize_cell};

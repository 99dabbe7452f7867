//! CLI library components for the KoBo bulk submission tool.

pub mod config;
pub mod logging;

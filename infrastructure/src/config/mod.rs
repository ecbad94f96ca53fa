//! Configuration loading.

pub mod file_config;
pub mod loader;

pub use file_config::{ConfigIssue, FileBotConfig, FileConfig, FileQuizConfig, Severity};
pub use loader::ConfigLoader;

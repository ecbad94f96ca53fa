//! Infrastructure layer for cappello
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading and the rand-backed
//! randomness adapters.

pub mod config;
pub mod platform;
pub mod random;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, FileQuizConfig, Severity};
pub use platform::{ConsolePlatform, LedgerEntry};
pub use random::{SeededRngSource, ThreadRngSource};

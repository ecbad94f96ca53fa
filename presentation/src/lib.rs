//! Presentation layer for cappello
//!
//! This crate contains the CLI definition and the simulation REPL that
//! stands in for the chat platform's event stream.

pub mod cli;
pub mod repl;

// Re-export commonly used types
pub use cli::Cli;
pub use repl::SortingRepl;

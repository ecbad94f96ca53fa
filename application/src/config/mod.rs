//! Application configuration types.

pub mod quiz_params;

pub use quiz_params::QuizParams;

//! Use cases.

pub mod handle_interaction;

pub use handle_interaction::{HandleEventError, HandleInteractionUseCase};

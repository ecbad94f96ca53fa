//! Application layer for cappello
//!
//! This crate contains the session store, port definitions, and the quiz
//! orchestrator use case. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod store;
pub mod use_cases;

// Re-export commonly used types
pub use config::QuizParams;
pub use ports::{
    presenter::{ButtonView, MessageView, PresenterError, QuizPresenter},
    role_gateway::{RoleGateway, RoleGatewayError},
};
pub use store::{SessionStore, StoreAnswer};
pub use use_cases::handle_interaction::{HandleEventError, HandleInteractionUseCase};

//! Port definitions (interfaces to external collaborators).
//!
//! Ports define what the application layer needs from the platform;
//! adapters in the infrastructure layer implement them.

pub mod presenter;
pub mod role_gateway;

pub use presenter::{ButtonView, MessageView, PresenterError, QuizPresenter};
pub use role_gateway::{RoleGateway, RoleGatewayError};

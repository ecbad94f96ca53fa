//! Presentation sink port.
//!
//! The core decides *what* to show (message text plus the set of selectable
//! options) and hands it to this port; rendering mechanics belong to the
//! platform adapter.

use async_trait::async_trait;
use cappello_domain::UserId;
use thiserror::Error;

/// Errors from the presentation collaborator.
#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("quiz channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("render failed: {0}")]
    RenderFailed(String),
}

/// One selectable option under a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    /// Payload delivered back when pressed (see `ButtonAction`).
    pub custom_id: String,
    pub label: String,
}

impl ButtonView {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
        }
    }
}

/// Message text plus its buttons, as the core wants it shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub content: String,
    pub buttons: Vec<ButtonView>,
}

impl MessageView {
    pub fn new(content: impl Into<String>, buttons: Vec<ButtonView>) -> Self {
        Self {
            content: content.into(),
            buttons,
        }
    }

    /// A message with no options (verdicts, plain notices).
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }
}

/// Where quiz messages go.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait QuizPresenter: Send + Sync {
    /// Post the quiz invite addressed to `user` in the quiz channel.
    async fn post_invite(&self, user: &UserId, message: MessageView)
    -> Result<(), PresenterError>;

    /// Render the current question for `owner`, replacing the previous one.
    async fn show_question(
        &self,
        owner: &UserId,
        message: MessageView,
    ) -> Result<(), PresenterError>;

    /// Render the final narrative sequence, clearing the buttons.
    async fn show_verdict(
        &self,
        owner: &UserId,
        message: MessageView,
    ) -> Result<(), PresenterError>;

    /// Short informational reply visible to the interacting user only.
    async fn reply(&self, user: &UserId, text: &str) -> Result<(), PresenterError>;
}

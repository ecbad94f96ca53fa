//! Domain error types

use crate::core::user::UserId;
use thiserror::Error;

/// Errors produced by the quiz core itself.
///
/// These are all expected rejections surfaced to the interacting user as
/// informational replies, never as process failures. Collaborator failures
/// (role mutation, presentation) carry their own error types at the port
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// A start was requested while a session is already live for the owner.
    #[error("a quiz session is already active for {0}")]
    AlreadyActive(UserId),

    /// An answer/continuation event arrived with no matching live session
    /// (expired, completed, or never started).
    #[error("no live quiz session for {0}")]
    NoSession(UserId),

    /// The event's step does not match the session's current step.
    ///
    /// Duplicate delivery of an already-consumed button press lands here and
    /// must be ignored without mutating the session.
    #[error("stale step: event carries {event_step}, session is at {session_step}")]
    StaleStep {
        event_step: usize,
        session_step: usize,
    },

    /// The interacting user is not the owner the payload was addressed to.
    #[error("interaction owned by {owner}, pressed by {presser}")]
    NotForYou { owner: UserId, presser: UserId },

    /// The answer index does not exist on the current question.
    #[error("answer index {0} out of range")]
    InvalidAnswer(usize),
}

impl QuizError {
    /// Whether this rejection is the expected echo of a duplicate delivery.
    pub fn is_stale(&self) -> bool {
        matches!(self, QuizError::StaleStep { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_step_display() {
        let err = QuizError::StaleStep {
            event_step: 0,
            session_step: 1,
        };
        assert_eq!(err.to_string(), "stale step: event carries 0, session is at 1");
        assert!(err.is_stale());
    }

    #[test]
    fn test_no_session_is_not_stale() {
        assert!(!QuizError::NoSession(UserId::from("u1")).is_stale());
    }
}

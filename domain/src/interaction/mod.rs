//! Platform interaction payloads.
//!
//! Button presses arrive from the platform boundary as opaque custom-id
//! strings; [`ButtonAction`] is the codec for the two quiz payload shapes:
//!
//! - `quiz_start:<user>`
//! - `quiz_answer:<user>:<step>:<answer>`
//!
//! Malformed payloads parse to `None` and are dropped at the boundary.

use crate::core::user::UserId;

const START_PREFIX: &str = "quiz_start";
const ANSWER_PREFIX: &str = "quiz_answer";

/// A decoded quiz button payload.
///
/// `owner` is the user the button was rendered for, not necessarily the one
/// who pressed it; the orchestrator compares the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// The start button under a quiz invite.
    Start { owner: UserId },
    /// One answer button under question `step`.
    Answer {
        owner: UserId,
        step: usize,
        answer_index: usize,
    },
}

impl ButtonAction {
    pub fn start(owner: impl Into<UserId>) -> Self {
        ButtonAction::Start {
            owner: owner.into(),
        }
    }

    pub fn answer(owner: impl Into<UserId>, step: usize, answer_index: usize) -> Self {
        ButtonAction::Answer {
            owner: owner.into(),
            step,
            answer_index,
        }
    }

    /// Encode as the custom-id string attached to the rendered button.
    pub fn custom_id(&self) -> String {
        match self {
            ButtonAction::Start { owner } => format!("{}:{}", START_PREFIX, owner),
            ButtonAction::Answer {
                owner,
                step,
                answer_index,
            } => format!("{}:{}:{}:{}", ANSWER_PREFIX, owner, step, answer_index),
        }
    }

    /// Decode a custom-id string; `None` for anything not a quiz payload.
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        match parts.next()? {
            START_PREFIX => {
                let owner = parts.next().filter(|s| !s.is_empty())?;
                if parts.next().is_some() {
                    return None;
                }
                Some(ButtonAction::start(owner))
            }
            ANSWER_PREFIX => {
                let owner = parts.next().filter(|s| !s.is_empty())?;
                let step: usize = parts.next()?.parse().ok()?;
                let answer_index: usize = parts.next()?.parse().ok()?;
                if parts.next().is_some() {
                    return None;
                }
                Some(ButtonAction::answer(owner, step, answer_index))
            }
            _ => None,
        }
    }

    /// The user the payload is addressed to.
    pub fn owner(&self) -> &UserId {
        match self {
            ButtonAction::Start { owner } => owner,
            ButtonAction::Answer { owner, .. } => owner,
        }
    }
}

/// An event delivered by the platform boundary.
///
/// Permission checks for resets happen entirely outside the core; by the
/// time `ResetRequested` arrives it is already authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A user joined the community.
    UserJoined { user: UserId },
    /// A button press: who pressed, and the raw payload.
    ButtonPressed { presser: UserId, custom_id: String },
    /// Administrative reset of a user's house and session.
    ResetRequested { target: UserId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_roundtrip() {
        let action = ButtonAction::start("1234");
        assert_eq!(action.custom_id(), "quiz_start:1234");
        assert_eq!(ButtonAction::parse("quiz_start:1234"), Some(action));
    }

    #[test]
    fn test_answer_roundtrip() {
        let action = ButtonAction::answer("u9", 2, 3);
        assert_eq!(action.custom_id(), "quiz_answer:u9:2:3");
        assert_eq!(ButtonAction::parse("quiz_answer:u9:2:3"), Some(action));
    }

    #[test]
    fn test_garbage_payloads_rejected() {
        for payload in [
            "",
            "quiz_start",
            "quiz_start:",
            "quiz_start:u1:extra",
            "quiz_answer:u1",
            "quiz_answer:u1:x:0",
            "quiz_answer:u1:0:y",
            "quiz_answer:u1:0:1:junk",
            "other_button:u1",
        ] {
            assert_eq!(ButtonAction::parse(payload), None, "{:?}", payload);
        }
    }

    #[test]
    fn test_owner_accessor() {
        assert_eq!(
            ButtonAction::answer("u1", 0, 0).owner(),
            &UserId::from("u1")
        );
    }
}

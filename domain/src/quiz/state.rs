//! The quiz lifecycle as an explicit state machine.
//!
//! Every lifecycle change goes through [`QuizState::transition`], so an
//! illegal move (answering while idle, starting twice) is a rejected case of
//! one function instead of a scattered conditional on a step counter.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one owner's quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizState {
    /// No quiz running.
    Idle,
    /// Waiting for the answer to question `step` (zero-based).
    InProgress { step: usize },
    /// All questions answered; scorer/selector and role mutation pending.
    Completing,
}

/// Events the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// Start button pressed.
    Start,
    /// Answer button pressed, carrying the step it was rendered for.
    Answer { expected_step: usize },
    /// Completion side effects finished (successfully or not).
    Finalized,
    /// Explicit termination: administrative reset or TTL expiry.
    Reset,
}

/// Illegal transition attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Start while a quiz is already running.
    AlreadyStarted,
    /// Answer or finalize outside the state that accepts it.
    NotInProgress,
    /// Answer for a step the session is no longer at.
    StaleStep { session_step: usize },
}

impl QuizState {
    /// Apply one event, yielding the next state or a rejection.
    ///
    /// `question_count` decides whether an accepted answer advances the step
    /// or moves to [`QuizState::Completing`]. Rejections never mutate.
    pub fn transition(
        self,
        event: QuizEvent,
        question_count: usize,
    ) -> Result<QuizState, TransitionError> {
        match (self, event) {
            (QuizState::Idle, QuizEvent::Start) => Ok(QuizState::InProgress { step: 0 }),
            (QuizState::InProgress { .. } | QuizState::Completing, QuizEvent::Start) => {
                Err(TransitionError::AlreadyStarted)
            }

            (QuizState::InProgress { step }, QuizEvent::Answer { expected_step }) => {
                if step != expected_step {
                    return Err(TransitionError::StaleStep { session_step: step });
                }
                if step + 1 >= question_count {
                    Ok(QuizState::Completing)
                } else {
                    Ok(QuizState::InProgress { step: step + 1 })
                }
            }
            (QuizState::Idle | QuizState::Completing, QuizEvent::Answer { .. }) => {
                Err(TransitionError::NotInProgress)
            }

            (QuizState::Completing, QuizEvent::Finalized) => Ok(QuizState::Idle),
            (QuizState::Idle | QuizState::InProgress { .. }, QuizEvent::Finalized) => {
                Err(TransitionError::NotInProgress)
            }

            // Reset terminates from any state.
            (_, QuizEvent::Reset) => Ok(QuizState::Idle),
        }
    }

    /// Current step, when a question is pending.
    pub fn step(&self) -> Option<usize> {
        match self {
            QuizState::InProgress { step } => Some(*step),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, QuizState::InProgress { .. })
    }
}

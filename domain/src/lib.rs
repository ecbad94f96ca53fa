//! Domain layer for cappello
//!
//! This crate contains the quiz core: houses, questions, session lifecycle,
//! and the sorting math. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sorting
//!
//! A session accumulates one tally increment per answered question. At
//! completion the tally goes through a temperature-scaled softmax plus
//! bounded jitter ([`Scorer`]), and the final house is drawn by cumulative
//! weighted sampling ([`weighted_pick`]), so the leading house is favored
//! but never certain.
//!
//! ## Single-flight sessions
//!
//! At most one live session exists per owner; every button payload names its
//! owner and the step it was rendered for, so duplicate or stale deliveries
//! are rejected instead of double-counted.

pub mod core;
pub mod interaction;
pub mod quiz;
pub mod sorting;

// Re-export commonly used types
pub use crate::core::{House, QuizError, UserId};
pub use interaction::{ButtonAction, PlatformEvent};
pub use quiz::{
    Answer, AnswerOutcome, Question, QuestionBank, QuizEvent, QuizSession, QuizState, Tally,
    TransitionError,
};
pub use sorting::{
    HAT_LINES, HouseDistribution, Narrative, RandomSource, Scorer, SequenceSource, hat_line,
    weighted_pick,
};

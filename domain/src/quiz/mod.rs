//! Quiz entities: questions, tallies, session lifecycle.

pub mod question;
pub mod session;
pub mod state;
pub mod tally;

pub use question::{Answer, Question, QuestionBank};
pub use session::{AnswerOutcome, QuizSession};
pub use state::{QuizEvent, QuizState, TransitionError};
pub use tally::Tally;

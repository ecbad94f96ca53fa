//! One user's in-progress quiz attempt.

use crate::core::error::QuizError;
use crate::core::user::UserId;
use crate::quiz::question::Question;
use crate::quiz::state::{QuizEvent, QuizState, TransitionError};
use crate::quiz::tally::Tally;

/// Result of feeding an accepted answer into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// More questions remain; `next_step` indexes the one to render.
    Advanced { next_step: usize },
    /// Last question answered; the session is done accumulating.
    Completed { tally: Tally },
}

/// A live quiz session (Entity).
///
/// Created with the question sequence assigned for this attempt and a zeroed
/// tally; mutated only through [`QuizSession::record_answer`]. Invariant:
/// `tally.total()` equals the number of answered questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    owner: UserId,
    state: QuizState,
    tally: Tally,
    questions: Vec<Question>,
}

impl QuizSession {
    /// Start a session at question 0.
    pub fn new(owner: UserId, questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        Self {
            owner,
            state: QuizState::InProgress { step: 0 },
            tally: Tally::new(),
            questions,
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Current step, while a question is pending.
    pub fn step(&self) -> Option<usize> {
        self.state.step()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.state.step()?)
    }

    pub fn question(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Record the answer a button press carried.
    ///
    /// `expected_step` is the step the pressed button was rendered for; a
    /// mismatch means a duplicate or out-of-order delivery and is rejected
    /// without touching the tally. Exactly one increment happens per
    /// accepted answer.
    pub fn record_answer(
        &mut self,
        expected_step: usize,
        answer_index: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let step = match self.state.step() {
            Some(step) => step,
            None => return Err(QuizError::NoSession(self.owner.clone())),
        };

        // Resolve the chosen house before transitioning, so an invalid
        // answer index leaves the state untouched too.
        let house = match self
            .questions
            .get(step)
            .filter(|_| step == expected_step)
            .and_then(|q| q.answer(answer_index))
        {
            Some(answer) => Some(answer.house),
            None if step == expected_step => return Err(QuizError::InvalidAnswer(answer_index)),
            None => None,
        };

        let next = self
            .state
            .transition(
                QuizEvent::Answer { expected_step },
                self.questions.len(),
            )
            .map_err(|e| match e {
                TransitionError::StaleStep { session_step } => QuizError::StaleStep {
                    event_step: expected_step,
                    session_step,
                },
                TransitionError::AlreadyStarted => QuizError::AlreadyActive(self.owner.clone()),
                TransitionError::NotInProgress => QuizError::NoSession(self.owner.clone()),
            })?;

        // Unreachable for an accepted transition; kept as the invariant check.
        let house = house.ok_or(QuizError::InvalidAnswer(answer_index))?;

        self.tally.increment(house);
        self.state = next;

        match next {
            QuizState::InProgress { step } => Ok(AnswerOutcome::Advanced { next_step: step }),
            QuizState::Completing => Ok(AnswerOutcome::Completed { tally: self.tally }),
            QuizState::Idle => Err(QuizError::NoSession(self.owner.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::house::House;
    use crate::quiz::question::QuestionBank;

    fn session() -> QuizSession {
        let questions = QuestionBank::builtin().questions()[..3].to_vec();
        QuizSession::new(UserId::from("u1"), questions)
    }

    #[test]
    fn test_three_answers_complete_with_matching_tally() {
        let mut s = session();

        // First answer of every builtin question maps to Grifondoro.
        assert_eq!(
            s.record_answer(0, 0).unwrap(),
            AnswerOutcome::Advanced { next_step: 1 }
        );
        assert_eq!(
            s.record_answer(1, 0).unwrap(),
            AnswerOutcome::Advanced { next_step: 2 }
        );

        match s.record_answer(2, 0).unwrap() {
            AnswerOutcome::Completed { tally } => {
                assert_eq!(tally.get(House::Grifondoro), 3);
                assert_eq!(tally.total(), 3);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(s.state(), QuizState::Completing);
    }

    #[test]
    fn test_duplicate_delivery_counts_once() {
        let mut s = session();
        s.record_answer(0, 1).unwrap();

        // Same button press delivered again: stale, no second increment.
        let err = s.record_answer(0, 1).unwrap_err();
        assert!(err.is_stale());
        assert_eq!(s.tally().total(), 1);
        assert_eq!(s.step(), Some(1));
    }

    #[test]
    fn test_invalid_answer_index_leaves_session_untouched() {
        let mut s = session();
        assert_eq!(
            s.record_answer(0, 42).unwrap_err(),
            QuizError::InvalidAnswer(42)
        );
        assert_eq!(s.tally().total(), 0);
        assert_eq!(s.step(), Some(0));
    }

    #[test]
    fn test_tally_total_tracks_steps() {
        let mut s = session();
        assert_eq!(s.tally().total(), 0);
        s.record_answer(0, 2).unwrap();
        assert_eq!(s.tally().total(), 1);
        s.record_answer(1, 3).unwrap();
        assert_eq!(s.tally().total(), 2);
    }

    #[test]
    fn test_answer_after_completion_is_rejected() {
        let questions = QuestionBank::builtin().questions()[..1].to_vec();
        let mut s = QuizSession::new(UserId::from("u1"), questions);
        s.record_answer(0, 0).unwrap();

        assert!(matches!(
            s.record_answer(1, 0).unwrap_err(),
            QuizError::NoSession(_)
        ));
    }
}

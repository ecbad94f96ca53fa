//! In-memory owner → session map with TTL expiry.
//!
//! Sessions are ephemeral by design: memory-resident, lost on restart, no
//! cross-instance coordination. The map is the only shared mutable state in
//! the core and is lock-protected because two deliveries for the same owner
//! may be handled concurrently.

use crate::config::QuizParams;
use cappello_domain::{AnswerOutcome, Question, QuizError, QuizSession, Tally, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of an accepted answer, as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAnswer {
    /// Session advanced; `question` is the one to render next.
    Advanced { next_step: usize, question: Question },
    /// Session completed and was removed from the store.
    Completed { tally: Tally },
}

struct ActiveSession {
    session: QuizSession,
    started_at: Instant,
    /// Distinguishes this session from later ones for the same owner, so a
    /// timer that outlives its session can never destroy a successor.
    generation: u64,
    expiry: CancellationToken,
}

/// Owner-keyed store of live quiz sessions.
///
/// Enforces single-flight per owner, strict step matching, and TTL expiry.
/// Cheap to clone; clones share the same map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<UserId, ActiveSession>>>,
    ttl: Duration,
    generations: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(params: &QuizParams) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl: params.session_ttl,
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a session for `owner` seeded with `questions`.
    ///
    /// Fails with [`QuizError::AlreadyActive`] while a live session exists;
    /// an expired-but-unreaped session counts as absent. On success an
    /// expiry task is scheduled for `now + TTL` and the first question is
    /// returned for rendering.
    pub async fn start(
        &self,
        owner: UserId,
        questions: Vec<Question>,
    ) -> Result<Question, QuizError> {
        let mut map = self.inner.lock().await;

        if let Some(existing) = map.get(&owner) {
            if existing.started_at.elapsed() < self.ttl {
                return Err(QuizError::AlreadyActive(owner));
            }
            // Reap lazily; the timer task lost the race.
            existing.expiry.cancel();
            map.remove(&owner);
        }

        let session = QuizSession::new(owner.clone(), questions);
        let first = session
            .current_question()
            .cloned()
            .ok_or_else(|| QuizError::NoSession(owner.clone()))?;

        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let expiry = CancellationToken::new();
        self.schedule_expiry(owner.clone(), generation, expiry.clone());

        debug!(owner = %owner, generation, "quiz session started");
        map.insert(
            owner,
            ActiveSession {
                session,
                started_at: Instant::now(),
                generation,
                expiry,
            },
        );

        Ok(first)
    }

    /// Record an answer for the owner's live session.
    ///
    /// Strict `expected_step` matching makes this idempotent against
    /// duplicate delivery: a re-press of an already-consumed button carries
    /// a stale step and is rejected without a second tally increment.
    pub async fn record_answer(
        &self,
        owner: &UserId,
        expected_step: usize,
        answer_index: usize,
    ) -> Result<StoreAnswer, QuizError> {
        let mut map = self.inner.lock().await;

        let entry = map
            .get_mut(owner)
            .ok_or_else(|| QuizError::NoSession(owner.clone()))?;

        // Lazy TTL guard: the expiry task may not have run yet.
        if entry.started_at.elapsed() >= self.ttl {
            entry.expiry.cancel();
            map.remove(owner);
            debug!(owner = %owner, "expired session reaped on answer");
            return Err(QuizError::NoSession(owner.clone()));
        }

        match entry.session.record_answer(expected_step, answer_index)? {
            AnswerOutcome::Advanced { next_step } => {
                let question = entry
                    .session
                    .question(next_step)
                    .cloned()
                    .ok_or_else(|| QuizError::NoSession(owner.clone()))?;
                Ok(StoreAnswer::Advanced {
                    next_step,
                    question,
                })
            }
            AnswerOutcome::Completed { tally } => {
                entry.expiry.cancel();
                map.remove(owner);
                debug!(owner = %owner, "quiz session completed");
                Ok(StoreAnswer::Completed { tally })
            }
        }
    }

    /// Terminate the owner's session, if any. Idempotent.
    pub async fn end(&self, owner: &UserId) -> bool {
        let mut map = self.inner.lock().await;
        match map.remove(owner) {
            Some(entry) => {
                entry.expiry.cancel();
                debug!(owner = %owner, "quiz session ended");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the owner's live session, for inspection.
    pub async fn active_session(&self, owner: &UserId) -> Option<QuizSession> {
        let map = self.inner.lock().await;
        map.get(owner)
            .filter(|e| e.started_at.elapsed() < self.ttl)
            .map(|e| e.session.clone())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    fn schedule_expiry(&self, owner: UserId, generation: u64, token: CancellationToken) {
        let inner = Arc::clone(&self.inner);
        // Fix the deadline now rather than at the task's first poll, so the
        // timer really fires at schedule time + TTL as documented.
        let deadline = Instant::now() + self.ttl;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    let mut map = inner.lock().await;
                    // The generation check keeps a late timer from killing a
                    // successor session under the same owner id.
                    let matches = map
                        .get(&owner)
                        .is_some_and(|e| e.generation == generation);
                    if matches {
                        map.remove(&owner);
                        warn!(owner = %owner, "quiz session expired");
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cappello_domain::{House, QuestionBank};

    fn params(ttl: Duration) -> QuizParams {
        QuizParams::default().with_session_ttl(ttl)
    }

    fn questions(n: usize) -> Vec<Question> {
        QuestionBank::builtin().questions()[..n].to_vec()
    }

    const TTL: Duration = Duration::from_secs(300);

    async fn let_timers_run() {
        // Give spawned expiry tasks a chance to observe the advanced clock.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_single_flight() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");

        store.start(owner.clone(), questions(3)).await.unwrap();
        store.record_answer(&owner, 0, 1).await.unwrap();

        let err = store.start(owner.clone(), questions(3)).await.unwrap_err();
        assert_eq!(err, QuizError::AlreadyActive(owner.clone()));

        // The live session is untouched by the rejected start.
        let session = store.active_session(&owner).await.unwrap();
        assert_eq!(session.tally().total(), 1);
        assert_eq!(session.step(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_without_session_is_rejected() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("ghost");

        let err = store.record_answer(&owner, 0, 0).await.unwrap_err();
        assert_eq!(err, QuizError::NoSession(owner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_delivery_counts_once() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        store.record_answer(&owner, 0, 2).await.unwrap();
        let err = store.record_answer(&owner, 0, 2).await.unwrap_err();
        assert!(err.is_stale());

        let session = store.active_session(&owner).await.unwrap();
        assert_eq!(session.tally().total(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_returns_tally_and_removes_session() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        store.record_answer(&owner, 0, 0).await.unwrap();
        store.record_answer(&owner, 1, 0).await.unwrap();
        let result = store.record_answer(&owner, 2, 0).await.unwrap();

        match result {
            StoreAnswer::Completed { tally } => {
                assert_eq!(tally.get(House::Grifondoro), 3);
                assert_eq!(tally.total(), 3);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advanced_hands_back_next_question() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        let qs = questions(3);
        store.start(owner.clone(), qs.clone()).await.unwrap();

        match store.record_answer(&owner, 0, 3).await.unwrap() {
            StoreAnswer::Advanced {
                next_step,
                question,
            } => {
                assert_eq!(next_step, 1);
                assert_eq!(question, qs[1]);
            }
            other => panic!("expected advance, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_ttl() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        tokio::time::advance(TTL + Duration::from_millis(1)).await;
        let_timers_run().await;

        assert!(store.is_empty().await);
        let err = store.record_answer(&owner, 0, 0).await.unwrap_err();
        assert_eq!(err, QuizError::NoSession(owner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lazy_guard_rejects_expired_session_before_timer_runs() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        // Advance without yielding: the timer task has not observed the
        // deadline yet, but the answer must already be rejected.
        tokio::time::advance(TTL).await;
        let err = store.record_answer(&owner, 0, 0).await.unwrap_err();
        assert_eq!(err, QuizError::NoSession(owner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_session_does_not_block_restart() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        tokio::time::advance(TTL + Duration::from_millis(1)).await;
        store.start(owner.clone(), questions(3)).await.unwrap();

        let session = store.active_session(&owner).await.unwrap();
        assert_eq!(session.step(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_is_idempotent_and_cancels_expiry() {
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");
        store.start(owner.clone(), questions(3)).await.unwrap();

        assert!(store.end(&owner).await);
        assert!(!store.end(&owner).await);

        // A successor session survives the first session's TTL deadline.
        store.start(owner.clone(), questions(3)).await.unwrap();
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        let_timers_run().await;
        assert!(store.active_session(&owner).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_timer_does_not_touch_successor() {
        // Complete a 1-question session, restart, then cross the first
        // session's deadline; the successor must stay alive.
        let store = SessionStore::new(&params(TTL));
        let owner = UserId::from("u1");

        store.start(owner.clone(), questions(1)).await.unwrap();
        let result = store.record_answer(&owner, 0, 0).await.unwrap();
        assert!(matches!(result, StoreAnswer::Completed { .. }));

        store.start(owner.clone(), questions(3)).await.unwrap();
        tokio::time::advance(TTL / 2).await;
        let_timers_run().await;
        assert!(store.active_session(&owner).await.is_some());
    }
}

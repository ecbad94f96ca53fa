//! Handle Interaction use case
//!
//! The quiz orchestrator: turns platform events into session store calls,
//! runs scorer and selector on completion, and emits the final narrative
//! sequence. Every rejection from the core and every collaborator failure
//! is converted into a user-visible reply here; nothing propagates as a
//! crash.

use crate::config::QuizParams;
use crate::ports::presenter::{ButtonView, MessageView, PresenterError, QuizPresenter};
use crate::ports::role_gateway::RoleGateway;
use crate::store::{SessionStore, StoreAnswer};
use cappello_domain::{
    ButtonAction, Narrative, PlatformEvent, Question, QuestionBank, QuizError, RandomSource,
    Tally, UserId, hat_line, weighted_pick,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors the orchestrator cannot convert into a reply.
///
/// Only the presentation sink itself qualifies: when it is down there is no
/// way to tell the user anything.
#[derive(Error, Debug)]
pub enum HandleEventError {
    #[error("presenter error: {0}")]
    Presenter(#[from] PresenterError),
}

/// Use case driving the quiz session state machine.
pub struct HandleInteractionUseCase<P: QuizPresenter, R: RoleGateway> {
    presenter: Arc<P>,
    roles: Arc<R>,
    store: SessionStore,
    bank: QuestionBank,
    params: QuizParams,
    rng: Arc<Mutex<Box<dyn RandomSource>>>,
}

impl<P: QuizPresenter, R: RoleGateway> HandleInteractionUseCase<P, R> {
    pub fn new(
        presenter: Arc<P>,
        roles: Arc<R>,
        bank: QuestionBank,
        params: QuizParams,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            presenter,
            roles,
            store: SessionStore::new(&params),
            bank,
            params,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// The session store, for inspection.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Dispatch one platform event.
    pub async fn handle(&self, event: PlatformEvent) -> Result<(), HandleEventError> {
        match event {
            PlatformEvent::UserJoined { user } => self.post_invite(&user, true).await,
            PlatformEvent::ButtonPressed { presser, custom_id } => {
                match ButtonAction::parse(&custom_id) {
                    Some(ButtonAction::Start { owner }) => {
                        self.handle_start(&presser, &owner).await
                    }
                    Some(ButtonAction::Answer {
                        owner,
                        step,
                        answer_index,
                    }) => self.handle_answer(&presser, &owner, step, answer_index).await,
                    None => {
                        // Not a quiz payload; someone else's button.
                        debug!(%custom_id, "ignoring unrecognized button payload");
                        Ok(())
                    }
                }
            }
            PlatformEvent::ResetRequested { target } => self.handle_reset(&target).await,
        }
    }

    async fn handle_start(&self, presser: &UserId, owner: &UserId) -> Result<(), HandleEventError> {
        if let Err(err) = Self::check_ownership(presser, owner) {
            debug!(%err, "start pressed by non-owner");
            return Ok(self
                .presenter
                .reply(presser, "Questo quiz non è per te 👀")
                .await?);
        }

        match self.roles.current_house(owner).await {
            Ok(Some(house)) => {
                debug!(%owner, %house, "start rejected: already sorted");
                return Ok(self
                    .presenter
                    .reply(
                        owner,
                        "Hai già una Casa! Se vuoi cambiare, chiedi a un mod di usare **/resetcasa**.",
                    )
                    .await?);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(%owner, error = %e, "role lookup failed on start");
                return Ok(self
                    .presenter
                    .reply(owner, "Errore interno del bot. Riprova tra poco.")
                    .await?);
            }
        }

        let questions = {
            let mut rng = self.rng.lock().await;
            self.bank
                .draw(self.params.questions_per_session, rng.as_mut())
        };

        match self.store.start(owner.clone(), questions).await {
            Ok(first) => {
                info!(%owner, "quiz started");
                let view = Self::question_view(owner, 0, &first);
                Ok(self.presenter.show_question(owner, view).await?)
            }
            Err(QuizError::AlreadyActive(_)) => Ok(self
                .presenter
                .reply(owner, "Hai già un quiz in corso: rispondi alle domande qui sopra!")
                .await?),
            Err(e) => {
                warn!(%owner, error = %e, "unexpected start rejection");
                Ok(self
                    .presenter
                    .reply(owner, "Errore interno del bot. Riprova tra poco.")
                    .await?)
            }
        }
    }

    async fn handle_answer(
        &self,
        presser: &UserId,
        owner: &UserId,
        step: usize,
        answer_index: usize,
    ) -> Result<(), HandleEventError> {
        if let Err(err) = Self::check_ownership(presser, owner) {
            debug!(%err, "answer pressed by non-owner");
            return Ok(self
                .presenter
                .reply(presser, "Questo quiz non è per te 👀")
                .await?);
        }

        match self.store.record_answer(owner, step, answer_index).await {
            Ok(StoreAnswer::Advanced {
                next_step,
                question,
            }) => {
                let view = Self::question_view(owner, next_step, &question);
                Ok(self.presenter.show_question(owner, view).await?)
            }
            Ok(StoreAnswer::Completed { tally }) => self.finalize(owner, tally).await,
            Err(QuizError::NoSession(_)) => Ok(self
                .presenter
                .reply(
                    owner,
                    "Sessione scaduta o non valida. Riclicca **Inizia il quiz** nel messaggio del canale.",
                )
                .await?),
            Err(err @ QuizError::StaleStep { .. }) => {
                // Duplicate delivery of an already-consumed press.
                debug!(%owner, %err, "stale answer ignored");
                Ok(self
                    .presenter
                    .reply(owner, "Hai già risposto a questa domanda.")
                    .await?)
            }
            Err(QuizError::InvalidAnswer(_)) => {
                Ok(self.presenter.reply(owner, "Risposta non valida.").await?)
            }
            Err(e) => {
                warn!(%owner, error = %e, "unexpected answer rejection");
                Ok(self
                    .presenter
                    .reply(owner, "Errore interno del bot. Riprova tra poco.")
                    .await?)
            }
        }
    }

    /// Completion: score, draw, mutate roles, narrate.
    ///
    /// The session is already gone from the store by the time this runs; a
    /// role failure is reported and never retried.
    async fn finalize(&self, owner: &UserId, tally: Tally) -> Result<(), HandleEventError> {
        let (winner, narrative, line) = {
            let mut rng = self.rng.lock().await;
            let distribution = self.params.scorer().distribution(&tally, rng.as_mut());
            let narrative =
                Narrative::from_distribution(&distribution, self.params.closeness_threshold);
            let winner = weighted_pick(&distribution, rng.as_mut());
            let line = hat_line(rng.as_mut());
            (winner, narrative, line)
        };

        info!(%owner, %winner, tally = %tally, "quiz completed");

        let mutation = async {
            self.roles.clear_house_roles(owner).await?;
            self.roles.assign_house_role(owner, winner).await
        };
        if let Err(e) = mutation.await {
            warn!(%owner, %winner, error = %e, "role mutation failed");
            return Ok(self
                .presenter
                .reply(
                    owner,
                    "Il Cappello ha deciso, ma non sono riuscito ad assegnarti il ruolo. Avvisa un mod!",
                )
                .await?);
        }

        let content = format!(
            "🎩 **Cappello Parlante:** \"{}\"\n{}\n✨ @{} sei… **{}**!",
            line,
            narrative,
            owner,
            winner.to_string().to_uppercase()
        );
        Ok(self
            .presenter
            .show_verdict(owner, MessageView::text(content))
            .await?)
    }

    /// Administrative reset: end the session, strip roles, repost the
    /// invite. Permission checks happened before the event reached us.
    async fn handle_reset(&self, target: &UserId) -> Result<(), HandleEventError> {
        let had_session = self.store.end(target).await;
        info!(%target, had_session, "administrative reset");

        if let Err(e) = self.roles.clear_house_roles(target).await {
            warn!(%target, error = %e, "role clear failed on reset");
            return Ok(self
                .presenter
                .reply(
                    target,
                    "Non sono riuscito a rimuovere la Casa. Avvisa un mod!",
                )
                .await?);
        }

        self.post_invite(target, false).await
    }

    async fn post_invite(&self, user: &UserId, welcome: bool) -> Result<(), HandleEventError> {
        let content = if welcome {
            format!("👋 Benvenuto @{}! Pronto per lo **Smistamento**?", user)
        } else {
            format!("🎩 @{} il Cappello Parlante ti aspetta. Clicca per iniziare!", user)
        };

        let start = ButtonView::new(
            ButtonAction::start(user.clone()).custom_id(),
            "🎩 Inizia il quiz",
        );
        Ok(self
            .presenter
            .post_invite(user, MessageView::new(content, vec![start]))
            .await?)
    }

    fn check_ownership(presser: &UserId, owner: &UserId) -> Result<(), QuizError> {
        if presser != owner {
            return Err(QuizError::NotForYou {
                owner: owner.clone(),
                presser: presser.clone(),
            });
        }
        Ok(())
    }

    fn question_view(owner: &UserId, step: usize, question: &Question) -> MessageView {
        let buttons = question
            .answers
            .iter()
            .enumerate()
            .map(|(idx, answer)| {
                ButtonView::new(
                    ButtonAction::answer(owner.clone(), step, idx).custom_id(),
                    answer.label.clone(),
                )
            })
            .collect();

        MessageView::new(format!("@{} {}", owner, question.prompt), buttons)
    }
}

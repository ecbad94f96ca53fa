//! Console adapter for the platform ports.
//!
//! Implements both the presenter and the role gateway against stdout and an
//! in-memory role ledger, so the whole quiz flow runs end-to-end from the
//! REPL without a chat-platform connection.

use async_trait::async_trait;
use cappello_application::{
    MessageView, PresenterError, QuizPresenter, RoleGateway, RoleGatewayError,
};
use cappello_domain::{House, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// One role assignment on record.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub house: House,
    pub assigned_at: DateTime<Utc>,
}

/// Stdout presenter plus in-memory role ledger.
pub struct ConsolePlatform {
    channel: String,
    ledger: Mutex<HashMap<UserId, LedgerEntry>>,
}

impl ConsolePlatform {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ledger: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the current role assignments.
    pub async fn roles(&self) -> Vec<(UserId, LedgerEntry)> {
        let ledger = self.ledger.lock().await;
        let mut entries: Vec<(UserId, LedgerEntry)> =
            ledger.iter().map(|(u, e)| (u.clone(), e.clone())).collect();
        entries.sort_by(|a, b| a.1.assigned_at.cmp(&b.1.assigned_at));
        entries
    }

    fn print_message(&self, message: &MessageView) {
        println!("[#{}] {}", self.channel, message.content);
        for button in &message.buttons {
            println!("         [{}]  ({})", button.label, button.custom_id);
        }
    }
}

#[async_trait]
impl QuizPresenter for ConsolePlatform {
    async fn post_invite(
        &self,
        user: &UserId,
        message: MessageView,
    ) -> Result<(), PresenterError> {
        debug!(%user, "posting quiz invite");
        self.print_message(&message);
        Ok(())
    }

    async fn show_question(
        &self,
        owner: &UserId,
        message: MessageView,
    ) -> Result<(), PresenterError> {
        debug!(%owner, "rendering question");
        self.print_message(&message);
        Ok(())
    }

    async fn show_verdict(
        &self,
        owner: &UserId,
        message: MessageView,
    ) -> Result<(), PresenterError> {
        debug!(%owner, "rendering verdict");
        self.print_message(&message);
        Ok(())
    }

    async fn reply(&self, user: &UserId, text: &str) -> Result<(), PresenterError> {
        println!("[@{}] {}", user, text);
        Ok(())
    }
}

#[async_trait]
impl RoleGateway for ConsolePlatform {
    async fn current_house(&self, user: &UserId) -> Result<Option<House>, RoleGatewayError> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.get(user).map(|e| e.house))
    }

    async fn clear_house_roles(&self, user: &UserId) -> Result<(), RoleGatewayError> {
        let mut ledger = self.ledger.lock().await;
        if ledger.remove(user).is_some() {
            debug!(%user, "house role removed");
        }
        Ok(())
    }

    async fn assign_house_role(&self, user: &UserId, house: House) -> Result<(), RoleGatewayError> {
        let mut ledger = self.ledger.lock().await;
        ledger.insert(
            user.clone(),
            LedgerEntry {
                house,
                assigned_at: Utc::now(),
            },
        );
        debug!(%user, %house, "house role assigned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assign_then_query_and_clear() {
        let platform = ConsolePlatform::new("smistamento");
        let user = UserId::from("u1");

        assert_eq!(platform.current_house(&user).await.unwrap(), None);

        platform
            .assign_house_role(&user, House::Corvonero)
            .await
            .unwrap();
        assert_eq!(
            platform.current_house(&user).await.unwrap(),
            Some(House::Corvonero)
        );
        assert_eq!(platform.roles().await.len(), 1);

        platform.clear_house_roles(&user).await.unwrap();
        assert_eq!(platform.current_house(&user).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reassignment_replaces_previous_house() {
        let platform = ConsolePlatform::new("smistamento");
        let user = UserId::from("u1");

        platform
            .assign_house_role(&user, House::Grifondoro)
            .await
            .unwrap();
        platform
            .assign_house_role(&user, House::Tassorosso)
            .await
            .unwrap();

        assert_eq!(
            platform.current_house(&user).await.unwrap(),
            Some(House::Tassorosso)
        );
        assert_eq!(platform.roles().await.len(), 1);
    }
}

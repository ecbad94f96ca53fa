//! Role mutation port.
//!
//! House membership is a platform role. The core calls this port only at
//! session completion and on administrative reset, and always awaits a
//! definitive success or failure before declaring the step done.

use async_trait::async_trait;
use cappello_domain::{House, UserId};
use thiserror::Error;

/// Errors from the role collaborator (permissions, rate limits, network).
#[derive(Error, Debug)]
pub enum RoleGatewayError {
    #[error("missing permission: {0}")]
    PermissionDenied(String),

    #[error("rate limited by the platform")]
    RateLimited,

    #[error("member not found: {0}")]
    MemberNotFound(UserId),

    #[error("platform error: {0}")]
    Platform(String),
}

/// House role membership operations.
///
/// Implementations (adapters) live in the infrastructure layer. The core
/// never retries a failed mutation; the orchestrator reports the failure
/// and the session stays destroyed.
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// The house role the user currently wears, if any.
    async fn current_house(&self, user: &UserId) -> Result<Option<House>, RoleGatewayError>;

    /// Remove every house role from the user. No-op when there are none.
    async fn clear_house_roles(&self, user: &UserId) -> Result<(), RoleGatewayError>;

    /// Ensure the role for `house` exists and assign it to the user.
    async fn assign_house_role(&self, user: &UserId, house: House) -> Result<(), RoleGatewayError>;
}

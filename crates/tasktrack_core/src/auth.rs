//! Owner identity resolution port.
//!
//! # Responsibility
//! - Define the contract for resolving the active session's owner.
//! - Provide a fixed-identity implementation for CLI and test callers.
//!
//! # Invariants
//! - `None` means "not authenticated"; the surrounding application handles
//!   it by redirecting to a login flow. Core never fabricates an owner.

use crate::model::task::OwnerId;

/// Resolves the owner identity the current session acts as.
pub trait AuthProvider {
    /// Returns the active owner, or `None` when no one is signed in.
    fn current_owner(&self) -> Option<OwnerId>;
}

/// Auth provider with a fixed identity, for local tools and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAuthProvider {
    owner: Option<OwnerId>,
}

impl StaticAuthProvider {
    /// Provider that reports `owner` as signed in.
    pub fn signed_in(owner: OwnerId) -> Self {
        Self { owner: Some(owner) }
    }

    /// Provider that reports no active session.
    pub fn signed_out() -> Self {
        Self { owner: None }
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_owner(&self) -> Option<OwnerId> {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthProvider, StaticAuthProvider};
    use uuid::Uuid;

    #[test]
    fn static_provider_reports_configured_identity() {
        let owner = Uuid::new_v4();
        assert_eq!(
            StaticAuthProvider::signed_in(owner).current_owner(),
            Some(owner)
        );
        assert_eq!(StaticAuthProvider::signed_out().current_owner(), None);
    }
}

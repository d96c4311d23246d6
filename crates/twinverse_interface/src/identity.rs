//! Identity collaborator trait.

use async_trait::async_trait;
use twinverse_core::Caller;

/// Supplies the caller of the current operation.
///
/// Returning `None` means nobody is signed in; callers of this trait treat
/// that as an authorization failure.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The authenticated caller, if any.
    async fn current_caller(&self) -> Option<Caller>;
}

/// Identity fixed at construction time.
///
/// Used by the command line, where the user id comes from a flag.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    caller: Option<Caller>,
}

impl StaticIdentity {
    /// An identity that always returns `caller`.
    pub fn new(caller: Caller) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    /// An identity with nobody signed in.
    pub fn anonymous() -> Self {
        Self { caller: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_caller(&self) -> Option<Caller> {
        self.caller.clone()
    }
}

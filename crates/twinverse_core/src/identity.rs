//! Caller identity supplied by the identity collaborator.

use serde::{Deserialize, Serialize};

/// Stable identifier of a registered user.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Account role.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Regular account
    #[default]
    User,
    /// Can review other users' content
    Moderator,
    /// Full access
    Admin,
}

/// The authenticated caller of a workflow operation.
///
/// # Examples
///
/// ```
/// use twinverse_core::{Caller, Role};
///
/// let caller = Caller::new("user-1", Role::Admin);
/// assert!(caller.is_admin());
/// assert_eq!(caller.id().as_str(), "user-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Caller {
    /// Caller's user identifier
    id: UserId,
    /// Caller's role
    role: Role,
}

impl Caller {
    /// Creates a caller.
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// True when the caller has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the caller may read records owned by `owner`.
    pub fn can_read(&self, owner: &UserId) -> bool {
        &self.id == owner || matches!(self.role, Role::Admin | Role::Moderator)
    }
}

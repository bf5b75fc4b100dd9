// ── User and access-level domain types ──

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A platform user as the collaboration endpoints return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: None,
        }
    }

    /// Preferred display name: username when set, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}

/// Access level granted to a project member.
///
/// Exactly one user holds `Owner` per project at any time; the
/// change-owner workflow swaps it in a single state transition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum UserAccess {
    Owner,
    #[strum(serialize = "Read / Write")]
    ReadWrite,
    #[strum(serialize = "Read only")]
    ReadOnly,
}

impl UserAccess {
    /// The non-owner levels an existing collaborator can be toggled between.
    pub fn toggled(self) -> Self {
        match self {
            Self::ReadWrite => Self::ReadOnly,
            Self::ReadOnly => Self::ReadWrite,
            Self::Owner => Self::Owner,
        }
    }
}

/// A project member together with the access they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub user: User,
    pub access: UserAccess,
}

impl Collaborator {
    pub fn new(user: User, access: UserAccess) -> Self {
        Self { user, access }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_username() {
        let mut user = User::new("u1", "ada@example.com");
        assert_eq!(user.display_name(), "ada@example.com");
        user.username = Some("ada".into());
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn toggled_never_touches_owner() {
        assert_eq!(UserAccess::ReadWrite.toggled(), UserAccess::ReadOnly);
        assert_eq!(UserAccess::ReadOnly.toggled(), UserAccess::ReadWrite);
        assert_eq!(UserAccess::Owner.toggled(), UserAccess::Owner);
    }

    #[test]
    fn access_labels() {
        assert_eq!(UserAccess::ReadWrite.to_string(), "Read / Write");
        assert_eq!(UserAccess::Owner.to_string(), "Owner");
    }
}

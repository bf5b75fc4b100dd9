// ── Project domain type ──
//
// Every mutator returns a new Project value; reducers rely on
// copy-on-write so prior state snapshots stay valid.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, UserId};
use super::user::{Collaborator, User, UserAccess};

/// A project with its owner and collaborator roster.
///
/// `author` is the single owner. `collaborators` holds the non-owner
/// members, insertion-ordered so rosters render stably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub author: User,
    pub collaborators: IndexMap<UserId, Collaborator>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>, author: User) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            author,
            collaborators: IndexMap::new(),
        }
    }

    /// Access level held by the given user, the owner included.
    pub fn access_of(&self, user_id: &UserId) -> Option<UserAccess> {
        if self.author.id == *user_id {
            return Some(UserAccess::Owner);
        }
        self.collaborators.get(user_id).map(|c| c.access)
    }

    /// New value with `user` present at `access` (insert or replace).
    pub fn with_collaborator(&self, user: User, access: UserAccess) -> Self {
        let mut next = self.clone();
        next.collaborators
            .insert(user.id.clone(), Collaborator::new(user, access));
        next
    }

    /// New value with the given user removed from the roster.
    pub fn without_collaborator(&self, user_id: &UserId) -> Self {
        let mut next = self.clone();
        next.collaborators.shift_remove(user_id);
        next
    }

    /// New value with the whole roster replaced: `owner` becomes the
    /// author and `collaborators` the full non-owner membership.
    pub fn with_team(&self, owner: User, collaborators: Vec<Collaborator>) -> Self {
        let mut next = self.clone();
        next.author = owner;
        next.collaborators = collaborators
            .into_iter()
            .map(|c| (c.user.id.clone(), c))
            .collect();
        next.collaborators.shift_remove(&next.author.id);
        next
    }

    /// New value with ownership transferred to the member matching
    /// `email` — the old owner joins the roster at ReadWrite and the
    /// new owner leaves it, all in one value.
    ///
    /// When no member matches, the author becomes a placeholder user
    /// keyed by the email; the next roster load reconciles it.
    pub fn with_owner(&self, email: &str) -> Self {
        let mut next = self.clone();
        let old_owner = std::mem::replace(
            &mut next.author,
            match next.collaborators.values().find(|c| c.user.email == email) {
                Some(found) => found.user.clone(),
                None => User::new(email, email),
            },
        );
        next.collaborators.shift_remove(&next.author.id);
        next.collaborators.insert(
            old_owner.id.clone(),
            Collaborator::new(old_owner, UserAccess::ReadWrite),
        );
        next
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project() -> Project {
        let mut p = Project::new("p1", "churn-model", User::new("owner", "owner@example.com"));
        p.collaborators.insert(
            UserId::from("u1"),
            Collaborator::new(User::new("u1", "u1@example.com"), UserAccess::ReadWrite),
        );
        p
    }

    #[test]
    fn with_collaborator_leaves_original_untouched() {
        let before = project();
        let after = before.with_collaborator(User::new("u2", "u2@example.com"), UserAccess::ReadOnly);
        assert_eq!(before.collaborators.len(), 1);
        assert_eq!(after.collaborators.len(), 2);
        assert_eq!(after.access_of(&UserId::from("u2")), Some(UserAccess::ReadOnly));
    }

    #[test]
    fn with_collaborator_replaces_existing_access() {
        let after = project().with_collaborator(User::new("u1", "u1@example.com"), UserAccess::ReadOnly);
        assert_eq!(after.collaborators.len(), 1);
        assert_eq!(after.access_of(&UserId::from("u1")), Some(UserAccess::ReadOnly));
    }

    #[test]
    fn without_collaborator_removes_only_that_user() {
        let before = project().with_collaborator(User::new("u2", "u2@example.com"), UserAccess::ReadOnly);
        let after = before.without_collaborator(&UserId::from("u1"));
        assert!(after.collaborators.get(&UserId::from("u1")).is_none());
        assert!(after.collaborators.get(&UserId::from("u2")).is_some());
    }

    #[test]
    fn owner_transfer_is_one_value_with_one_owner() {
        let after = project().with_owner("u1@example.com");
        assert_eq!(after.author.id, UserId::from("u1"));
        // Old owner demoted into the roster in the same value.
        assert_eq!(
            after.access_of(&UserId::from("owner")),
            Some(UserAccess::ReadWrite)
        );
        // The new owner is no longer listed as a plain collaborator.
        assert!(after.collaborators.get(&UserId::from("u1")).is_none());
    }

    #[test]
    fn owner_transfer_to_unknown_email_uses_placeholder() {
        let after = project().with_owner("nobody@example.com");
        assert_eq!(after.author.email, "nobody@example.com");
        assert_eq!(after.access_of(&UserId::from("owner")), Some(UserAccess::ReadWrite));
    }

    #[test]
    fn with_team_replaces_roster_wholesale() {
        let owner = User::new("new-owner", "new@example.com");
        let roster = vec![
            Collaborator::new(User::new("a", "a@example.com"), UserAccess::ReadOnly),
            Collaborator::new(User::new("b", "b@example.com"), UserAccess::ReadWrite),
        ];
        let after = project().with_team(owner.clone(), roster);
        assert_eq!(after.author, owner);
        assert_eq!(after.collaborators.len(), 2);
        assert!(after.collaborators.get(&UserId::from("u1")).is_none());
        // Insertion order preserved.
        let ids: Vec<_> = after.collaborators.keys().map(UserId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}

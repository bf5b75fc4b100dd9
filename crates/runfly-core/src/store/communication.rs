// ── Communication-state primitive ──
//
// One tagged state models the lifecycle of every asynchronous server
// call in the app. The error string lives inside the Failed variant,
// so "error set iff failed" holds by construction.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single asynchronous request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Communication {
    #[default]
    NotRequested,
    Requesting,
    Succeeded,
    Failed {
        error: String,
    },
}

/// Transition input applied to a [`Communication`].
///
/// Orchestrators dispatch these; payloads merge into the owning slice
/// through separate actions, never into the communication record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Request,
    Success,
    Failure(String),
    Reset,
}

impl Communication {
    /// Fold one phase into the next state. Pure and total: every phase
    /// maps every state somewhere, and `Reset` returns to
    /// `NotRequested` from anywhere (so resetting twice equals once).
    pub fn apply(&self, phase: &Phase) -> Self {
        match phase {
            Phase::Request => Self::Requesting,
            Phase::Success => Self::Succeeded,
            Phase::Failure(error) => Self::Failed {
                error: error.clone(),
            },
            Phase::Reset => Self::NotRequested,
        }
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The failure message, present exactly when the state is `Failed`.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_then_terminal() {
        let c = Communication::default().apply(&Phase::Request);
        assert!(c.is_requesting());

        let ok = c.apply(&Phase::Success);
        assert!(ok.is_succeeded());
        assert_eq!(ok.error(), None);

        let bad = c.apply(&Phase::Failure("500 internal".into()));
        assert!(bad.is_failed());
        assert_eq!(bad.error(), Some("500 internal"));
    }

    #[test]
    fn reset_is_idempotent() {
        let failed = Communication::Failed {
            error: "oops".into(),
        };
        let once = failed.apply(&Phase::Reset);
        let twice = once.apply(&Phase::Reset);
        assert_eq!(once, Communication::NotRequested);
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_is_deterministic() {
        let phase = Phase::Failure("403 forbidden".into());
        let a = Communication::Requesting.apply(&phase);
        let b = Communication::Requesting.apply(&phase);
        assert_eq!(a, b);
    }

    #[test]
    fn default_is_not_requested() {
        assert_eq!(Communication::default(), Communication::NotRequested);
    }
}

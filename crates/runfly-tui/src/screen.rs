//! Screen identifier enum.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Projects, // 1
    Runs, // 2
    Team, // 3
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Projects, Self::Runs, Self::Team];

    /// Numeric key (1-3) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Projects => 1,
            Self::Runs => 2,
            Self::Team => 3,
        }
    }

    /// Screen from a numeric key (1-3). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Projects),
            2 => Some(Self::Runs),
            3 => Some(Self::Team),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Runs => "Runs",
            Self::Team => "Team",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(4), None);
    }

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(ScreenId::Team.next(), ScreenId::Projects);
        assert_eq!(ScreenId::Projects.prev(), ScreenId::Team);
        for id in ScreenId::ALL {
            assert_eq!(id.next().prev(), id);
        }
    }
}

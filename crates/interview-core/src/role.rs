//! Interviewer roles and rotation order.

use serde::{Deserialize, Serialize};

/// Interviewer role. Rotation proceeds `HR -> Tech -> Collaboration -> HR ...`
/// per the GLOSSARY's definition of "Rotation".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Hr,
    Tech,
    Collaboration,
}

impl Role {
    pub const ROTATION: [Role; 3] = [Role::Hr, Role::Tech, Role::Collaboration];

    /// The role that takes over once this role's turn budget is exhausted.
    pub fn next(self) -> Role {
        match self {
            Role::Hr => Role::Tech,
            Role::Tech => Role::Collaboration,
            Role::Collaboration => Role::Hr,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Tech => "TECH",
            Role::Collaboration => "COLLABORATION",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_cyclic() {
        assert_eq!(Role::Hr.next(), Role::Tech);
        assert_eq!(Role::Tech.next(), Role::Collaboration);
        assert_eq!(Role::Collaboration.next(), Role::Hr);
    }
}

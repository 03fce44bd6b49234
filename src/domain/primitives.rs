//! Domain primitives: opaque identifiers for tournaments, games, entities, formulas and rules.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }
    };
}

string_id!(
    /// Tournament a formula and its games are scoped to.
    TournamentId
);

string_id!(
    /// A single recorded game.
    GameId
);

string_id!(
    /// A ranked entity: a player or a team.
    EntityId
);

string_id!(
    /// A stored scoring formula.
    FormulaId
);

string_id!(
    /// A rule within a formula.
    RuleId
);

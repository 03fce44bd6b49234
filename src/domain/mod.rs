//! Domain types for tournament scoring.
//!
//! This module provides:
//! - Exact numeric handling for scores and points via the Decimal wrapper
//! - Identifier primitives for tournaments, games, entities, formulas and rules
//! - Formula, rule and condition types in their stored JSON shape
//! - Game, participant and standing types
//! - Stable ordering keys for deterministic processing

pub mod decimal;
pub mod formula;
pub mod game;
pub mod ordering;
pub mod primitives;
pub mod standing;

pub use decimal::Decimal;
pub use formula::{Comparison, Condition, DrawPolicy, Formula, FormulaError, Metric, Operator, Rule};
pub use game::{Game, GameOutcome, Participant};
pub use ordering::{
    sort_games_deterministic, sort_standings_deterministic, GameOrderingKey, StandingOrderingKey,
};
pub use primitives::{EntityId, FormulaId, GameId, RuleId, TournamentId};
pub use standing::{
    Counters, Direction, Movement, Snapshot, SpecialEvent, StandingEntry, Streak, StreakKind,
};

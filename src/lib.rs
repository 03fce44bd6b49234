pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod store;

pub use config::Config;
pub use domain::{
    Condition, Decimal, Direction, DrawPolicy, EntityId, Formula, Game, GameId, GameOutcome,
    Metric, Participant, Rule, RuleId, Snapshot, SpecialEvent, StandingEntry, TournamentId,
};
pub use engine::{compute_standings, compute_standings_with, explain_points, EngineOptions, RankPolicy};
pub use error::ServiceError;
pub use orchestration::{Leaderboard, LeaderboardService, PointsPreview};
pub use store::{FormulaStore, GameStore, InMemoryStore, SnapshotStore, StoreError};

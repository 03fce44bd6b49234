//! Glue between the stores and the pure engine.

pub mod fingerprint;
pub mod leaderboard;

pub use fingerprint::{formula_fingerprint, games_fingerprint};
pub use leaderboard::{Leaderboard, LeaderboardService, PointsPreview};

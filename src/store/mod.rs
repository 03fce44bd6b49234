//! Store abstractions for the collaborators that own formulas, games and snapshots.
//!
//! The engine never talks to these; the leaderboard service fetches through
//! them and hands resolved values to the engine.

use crate::domain::{Formula, Game, GameId, Participant, Snapshot, TournamentId};
use async_trait::async_trait;
use std::fmt;

pub mod memory;

pub use memory::InMemoryStore;

/// Supplies the resolved formula for a tournament.
///
/// Template/default formulas are the store's concern: implementations return
/// a fully resolved `Formula`, never a template reference.
#[async_trait]
pub trait FormulaStore: Send + Sync + fmt::Debug {
    async fn fetch_formula(&self, tournament: &TournamentId) -> Result<Option<Formula>, StoreError>;
}

/// Supplies games and their participants.
#[async_trait]
pub trait GameStore: Send + Sync + fmt::Debug {
    /// All games recorded for a tournament, in any order.
    async fn fetch_games(&self, tournament: &TournamentId) -> Result<Vec<Game>, StoreError>;

    /// Participants of one game. Empty when none are recorded.
    async fn fetch_participants(&self, game: &GameId) -> Result<Vec<Participant>, StoreError>;
}

/// Supplies (and optionally records) the previous period's standings.
#[async_trait]
pub trait SnapshotStore: Send + Sync + fmt::Debug {
    async fn fetch_snapshot(&self, tournament: &TournamentId) -> Result<Option<Snapshot>, StoreError>;

    async fn save_snapshot(
        &self,
        tournament: &TournamentId,
        snapshot: Snapshot,
    ) -> Result<(), StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing storage could not be reached.
    Unavailable(String),
    /// A stored record could not be decoded.
    Corrupt(String),
    Other(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Corrupt record: {}", msg),
            StoreError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

//! In-memory store for tests and embedding without a database.

use super::{FormulaStore, GameStore, SnapshotStore, StoreError};
use crate::domain::{Formula, Game, GameId, Participant, Snapshot, TournamentId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Holds formulas, games and snapshots in memory.
///
/// A default formula stands in for tournaments without one of their own.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    formulas: HashMap<TournamentId, Formula>,
    default_formula: Option<Formula>,
    games: Vec<Game>,
    participants: HashMap<GameId, Vec<Participant>>,
    snapshots: RwLock<HashMap<TournamentId, Snapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the formula for a tournament.
    pub fn with_formula(mut self, tournament: impl Into<TournamentId>, formula: Formula) -> Self {
        self.formulas.insert(tournament.into(), formula);
        self
    }

    /// Parse and validate a formula in its stored JSON shape.
    ///
    /// # Errors
    /// Returns `StoreError::Corrupt` if the JSON is malformed or the formula is invalid.
    pub fn with_formula_json(
        self,
        tournament: impl Into<TournamentId>,
        json: &str,
    ) -> Result<Self, StoreError> {
        let formula: Formula = serde_json::from_str(json)?;
        formula
            .validate()
            .map_err(|e| StoreError::Corrupt(format!("formula {}: {}", formula.id, e)))?;
        Ok(self.with_formula(tournament, formula))
    }

    /// Formula returned for tournaments with no formula of their own.
    pub fn with_default_formula(mut self, formula: Formula) -> Self {
        self.default_formula = Some(formula);
        self
    }

    /// Add a game with its participants.
    pub fn with_game(mut self, game: Game, participants: Vec<Participant>) -> Self {
        self.participants.insert(game.id.clone(), participants);
        self.games.push(game);
        self
    }

    pub fn with_snapshot(mut self, tournament: impl Into<TournamentId>, snapshot: Snapshot) -> Self {
        self.snapshots.get_mut().insert(tournament.into(), snapshot);
        self
    }
}

#[async_trait]
impl FormulaStore for InMemoryStore {
    async fn fetch_formula(&self, tournament: &TournamentId) -> Result<Option<Formula>, StoreError> {
        Ok(self
            .formulas
            .get(tournament)
            .or(self.default_formula.as_ref())
            .cloned())
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn fetch_games(&self, tournament: &TournamentId) -> Result<Vec<Game>, StoreError> {
        Ok(self
            .games
            .iter()
            .filter(|g| &g.tournament_id == tournament)
            .cloned()
            .collect())
    }

    async fn fetch_participants(&self, game: &GameId) -> Result<Vec<Participant>, StoreError> {
        Ok(self.participants.get(game).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl SnapshotStore for InMemoryStore {
    async fn fetch_snapshot(&self, tournament: &TournamentId) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(tournament).cloned())
    }

    async fn save_snapshot(
        &self,
        tournament: &TournamentId,
        snapshot: Snapshot,
    ) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .await
            .insert(tournament.clone(), snapshot);
        Ok(())
    }
}

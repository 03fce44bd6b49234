//! Game records as supplied by the game store, and the outcome derived from them.

use crate::domain::{Decimal, EntityId, GameId, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded game. Participants are supplied separately, keyed by game id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub tournament_id: TournamentId,
    pub played_at: DateTime<Utc>,
}

impl Game {
    pub fn new(
        id: impl Into<GameId>,
        tournament_id: impl Into<TournamentId>,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tournament_id: tournament_id.into(),
            played_at,
        }
    }
}

/// One side of a game: a player or a team, with its score and winner flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub entity_id: EntityId,
    pub display_name: String,
    /// Historical records may carry no score.
    #[serde(default)]
    pub score: Option<Decimal>,
    #[serde(default)]
    pub winner: bool,
}

impl Participant {
    pub fn new(
        entity_id: impl Into<EntityId>,
        display_name: impl Into<String>,
        score: impl Into<Decimal>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            display_name: display_name.into(),
            score: Some(score.into()),
            winner: false,
        }
    }

    /// Mark this participant as the recorded winner.
    pub fn winning(mut self) -> Self {
        self.winner = true;
        self
    }

    pub fn without_score(mut self) -> Self {
        self.score = None;
        self
    }

    /// Score with a missing value read as zero.
    pub fn score_or_zero(&self) -> Decimal {
        self.score.unwrap_or_default()
    }
}

/// Winner/loser score pair for one game; the unit formulas are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub winner_score: Decimal,
    pub loser_score: Decimal,
}

impl GameOutcome {
    pub fn new(winner_score: impl Into<Decimal>, loser_score: impl Into<Decimal>) -> Self {
        Self {
            winner_score: winner_score.into(),
            loser_score: loser_score.into(),
        }
    }
}

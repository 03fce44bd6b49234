//! Stable orderings for deterministic processing.

use crate::domain::{Decimal, Game, StandingEntry};
use std::borrow::Borrow;
use std::cmp::Reverse;

/// Chronological ordering key for games.
///
/// Ordering: played_at -> game id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GameOrderingKey {
    pub played_at_ms: i64,
    pub game_id: String,
}

impl GameOrderingKey {
    pub fn from_game(game: &Game) -> Self {
        GameOrderingKey {
            played_at_ms: game.played_at.timestamp_millis(),
            game_id: game.id.as_str().to_string(),
        }
    }
}

/// Sort games (owned or borrowed) chronologically, breaking timestamp ties by id.
pub fn sort_games_deterministic<G: Borrow<Game>>(games: &mut [G]) {
    games.sort_by_cached_key(|g| GameOrderingKey::from_game(g.borrow()));
}

/// Ranking key for standings.
///
/// Ordering: points desc -> wins desc -> games played asc -> display name -> entity id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StandingOrderingKey {
    pub points: Reverse<Decimal>,
    pub wins: Reverse<u32>,
    pub games_played: u32,
    pub display_name: String,
    pub entity_id: String,
}

impl StandingOrderingKey {
    pub fn from_entry(entry: &StandingEntry) -> Self {
        StandingOrderingKey {
            points: Reverse(entry.points),
            wins: Reverse(entry.wins),
            games_played: entry.games_played,
            display_name: entry.display_name.clone(),
            entity_id: entry.entity_id.as_str().to_string(),
        }
    }

    /// Equal on every statistical tie-break; only name and id differ.
    pub fn ties_with(&self, other: &Self) -> bool {
        self.points == other.points
            && self.wins == other.wins
            && self.games_played == other.games_played
    }
}

/// Sort standings into ranking order.
pub fn sort_standings_deterministic(entries: &mut [StandingEntry]) {
    entries.sort_by_cached_key(StandingOrderingKey::from_entry);
}

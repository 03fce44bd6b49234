//! Standing entries produced per leaderboard query, and prior-period snapshots.

use crate::domain::{Decimal, EntityId, GameId, RuleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bonus rule that fired for the winner of a specific game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEvent {
    pub rule_id: RuleId,
    pub game_id: GameId,
    pub description: String,
    pub points: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

/// Signed change in position versus the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub direction: Direction,
    /// previous position minus current position; negative when moving down.
    pub positions: i64,
}

impl Movement {
    pub fn between(previous_position: u32, current_position: u32) -> Self {
        let positions = i64::from(previous_position) - i64::from(current_position);
        let direction = match positions {
            p if p > 0 => Direction::Up,
            p if p < 0 => Direction::Down,
            _ => Direction::None,
        };
        Self {
            direction,
            positions,
        }
    }

    pub fn unchanged() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: u32,
}

/// Raw per-entity counters kept alongside the standings totals.
///
/// Streaks depend on chronological order; the aggregator feeds results in
/// `(played_at, game_id)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub perfect_score_wins: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_streak: Option<Streak>,
    pub longest_win_streak: u32,
}

impl Counters {
    /// Record the next result in chronological order.
    pub fn record(&mut self, kind: StreakKind, perfect: bool) {
        if kind == StreakKind::Win && perfect {
            self.perfect_score_wins += 1;
        }

        let length = match self.current_streak {
            Some(streak) if streak.kind == kind => streak.length + 1,
            _ => 1,
        };
        self.current_streak = Some(Streak { kind, length });

        if kind == StreakKind::Win {
            self.longest_win_streak = self.longest_win_streak.max(length);
        }
    }
}

/// One entity's aggregated statistics for a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub entity_id: EntityId,
    pub display_name: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: Decimal,
    #[serde(default)]
    pub special_events: Vec<SpecialEvent>,
    /// 1-based; 0 until ranked.
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub movement: Movement,
    #[serde(default)]
    pub counters: Counters,
}

impl StandingEntry {
    pub fn new(entity_id: EntityId, display_name: impl Into<String>) -> Self {
        Self {
            entity_id,
            display_name: display_name.into(),
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points: Decimal::zero(),
            special_events: Vec::new(),
            position: 0,
            movement: Movement::unchanged(),
            counters: Counters::default(),
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.position > 0
    }
}

/// An immutable prior-period leaderboard, used only for movement lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<StandingEntry>,
}

impl Snapshot {
    pub fn new(entries: Vec<StandingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StandingEntry] {
        &self.entries
    }

    /// Position per entity. Unranked entries are skipped.
    pub fn positions(&self) -> HashMap<&EntityId, u32> {
        self.entries
            .iter()
            .filter(|e| e.is_ranked())
            .map(|e| (&e.entity_id, e.position))
            .collect()
    }
}

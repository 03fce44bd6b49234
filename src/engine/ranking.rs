//! Position assignment and movement versus a previous snapshot.

use crate::domain::{
    sort_standings_deterministic, Movement, Snapshot, StandingEntry, StandingOrderingKey,
};
use serde::{Deserialize, Serialize};

/// Whether statistically tied entries may share a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankPolicy {
    /// Every entry gets its own position; the name tie-break decides.
    #[default]
    Strict,
    /// Entries equal on points, wins and games played share a position (1, 2, 2, 4).
    Shared,
}

/// Order `entries` and set `position` and `movement` on each.
///
/// Entities absent from `previous` are new entrants with no movement.
pub fn rank(
    mut entries: Vec<StandingEntry>,
    previous: Option<&Snapshot>,
    policy: RankPolicy,
) -> Vec<StandingEntry> {
    sort_standings_deterministic(&mut entries);

    let previous_positions = previous.map(Snapshot::positions).unwrap_or_default();

    let mut prev: Option<(StandingOrderingKey, u32)> = None;
    for (idx, entry) in entries.iter_mut().enumerate() {
        let key = StandingOrderingKey::from_entry(entry);
        let position = match (policy, &prev) {
            (RankPolicy::Shared, Some((prev_key, prev_position))) if prev_key.ties_with(&key) => {
                *prev_position
            }
            _ => (idx + 1) as u32,
        };

        entry.position = position;
        entry.movement = previous_positions
            .get(&entry.entity_id)
            .map(|&before| Movement::between(before, position))
            .unwrap_or_else(Movement::unchanged);

        prev = Some((key, position));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, Direction, EntityId};

    fn entry(id: &str, points: i64, wins: u32, games_played: u32) -> StandingEntry {
        let mut e = StandingEntry::new(EntityId::new(id), id);
        e.points = Decimal::from(points);
        e.wins = wins;
        e.games_played = games_played;
        e
    }

    fn ranked_at(id: &str, position: u32) -> StandingEntry {
        let mut e = entry(id, 0, 0, 0);
        e.position = position;
        e
    }

    fn order(entries: &[StandingEntry]) -> Vec<(&str, u32)> {
        entries
            .iter()
            .map(|e| (e.entity_id.as_str(), e.position))
            .collect()
    }

    #[test]
    fn test_positions_are_one_based_and_strict() {
        let entries = vec![entry("b", 6, 2, 3), entry("a", 6, 2, 3), entry("c", 9, 3, 3)];
        let ranked = rank(entries, None, RankPolicy::Strict);
        assert_eq!(order(&ranked), vec![("c", 1), ("a", 2), ("b", 3)]);
    }

    #[test]
    fn test_fewer_games_rank_higher() {
        let entries = vec![entry("busy", 9, 3, 6), entry("lean", 9, 3, 4)];
        let ranked = rank(entries, None, RankPolicy::Strict);
        assert_eq!(ranked[0].entity_id.as_str(), "lean");
    }

    #[test]
    fn test_shared_policy_gives_ties_same_position() {
        let entries = vec![
            entry("a", 9, 3, 3),
            entry("b", 6, 2, 3),
            entry("c", 6, 2, 3),
            entry("d", 3, 1, 3),
        ];
        let ranked = rank(entries, None, RankPolicy::Shared);
        assert_eq!(
            order(&ranked),
            vec![("a", 1), ("b", 2), ("c", 2), ("d", 4)]
        );
    }

    #[test]
    fn test_movement_against_previous_snapshot() {
        let previous = Snapshot::new(vec![
            ranked_at("a", 1),
            ranked_at("b", 2),
            ranked_at("c", 3),
        ]);
        let entries = vec![entry("a", 3, 1, 3), entry("b", 6, 2, 3), entry("c", 9, 3, 3)];
        let ranked = rank(entries, Some(&previous), RankPolicy::Strict);

        let c = &ranked[0];
        assert_eq!(c.entity_id.as_str(), "c");
        assert_eq!(c.movement.direction, Direction::Up);
        assert_eq!(c.movement.positions, 2);

        let b = &ranked[1];
        assert_eq!(b.movement, Movement::unchanged());

        let a = &ranked[2];
        assert_eq!(a.movement.direction, Direction::Down);
        assert_eq!(a.movement.positions, -2);
    }

    #[test]
    fn test_new_entrant_has_no_movement() {
        let previous = Snapshot::new(vec![ranked_at("gone", 1)]);
        let ranked = rank(vec![entry("fresh", 3, 1, 1)], Some(&previous), RankPolicy::Strict);
        assert_eq!(ranked[0].movement.direction, Direction::None);
        assert_eq!(ranked[0].movement.positions, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new(), None, RankPolicy::Strict).is_empty());
    }
}

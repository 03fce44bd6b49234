//! Deterministic fingerprints of standings inputs, usable as cache keys.
//!
//! Standings are a pure function of (formula, games, participants), so equal
//! fingerprints imply equal standings for the same engine options.

use crate::domain::{sort_games_deterministic, Formula, Game, GameId, Participant};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Hash of everything in a formula that can change an award.
pub fn formula_fingerprint(formula: &Formula) -> String {
    let mut hasher = Sha256::new();
    hasher.update(formula.id.as_str());
    hasher.update([0u8]);
    hasher.update(formula.default_winner_points.to_canonical_string());
    hasher.update([0u8]);
    hasher.update(formula.default_loser_points.to_canonical_string());
    hasher.update([0u8]);

    for rule in &formula.rules {
        hasher.update(b"R");
        hasher.update(rule.id.as_str());
        hasher.update([0u8]);
        hasher.update(rule.condition.to_string());
        hasher.update([0u8]);
        hasher.update(rule.winner_points.to_canonical_string());
        hasher.update([0u8]);
        hasher.update(rule.loser_points.to_canonical_string());
        hasher.update([0u8]);
        hasher.update(rule.label());
        hasher.update([0u8]);
    }

    hasher.update(b"D");
    if let Some(points) = formula.draw.points {
        hasher.update(points.to_canonical_string());
    }
    hasher.update([0u8]);
    if let Some(condition) = &formula.draw.condition {
        hasher.update(condition.to_string());
    }

    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Hash of a game set, independent of the order games and participants are supplied in.
pub fn games_fingerprint(
    games: &[Game],
    participants_by_game: &HashMap<GameId, Vec<Participant>>,
) -> String {
    let mut ordered: Vec<&Game> = games.iter().collect();
    sort_games_deterministic(&mut ordered);

    let mut hasher = Sha256::new();
    for game in ordered {
        hasher.update(b"G");
        hasher.update(game.id.as_str());
        hasher.update([0u8]);
        hasher.update(game.played_at.timestamp_millis().to_le_bytes());

        let mut participants: Vec<&Participant> = participants_by_game
            .get(&game.id)
            .map(|ps| ps.iter().collect())
            .unwrap_or_default();
        participants.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));

        for p in participants {
            hasher.update(b"P");
            hasher.update(p.entity_id.as_str());
            hasher.update([0u8]);
            hasher.update(p.display_name.as_str());
            hasher.update([0u8]);
            match p.score {
                Some(score) => hasher.update(score.to_canonical_string()),
                None => hasher.update(b"-"),
            }
            hasher.update(if p.winner { b"W" } else { b"L" });
        }
    }

    format!("sha256:{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, Decimal, Metric, Rule};
    use chrono::{TimeZone, Utc};

    fn formula() -> Formula {
        Formula::new("f", "Twelve", 3, 0).with_rule(Rule::new(
            "perfect",
            Condition::equals(Metric::WinnerScore, 12),
            5,
            0,
        ))
    }

    fn games() -> (Vec<Game>, HashMap<GameId, Vec<Participant>>) {
        let g1 = Game::new("g1", "t", Utc.timestamp_opt(100, 0).unwrap());
        let g2 = Game::new("g2", "t", Utc.timestamp_opt(200, 0).unwrap());
        let mut participants = HashMap::new();
        participants.insert(
            g1.id.clone(),
            vec![Participant::new("a", "A", 12).winning(), Participant::new("b", "B", 0)],
        );
        participants.insert(
            g2.id.clone(),
            vec![Participant::new("b", "B", 8).winning(), Participant::new("a", "A", 6)],
        );
        (vec![g1, g2], participants)
    }

    #[test]
    fn test_formula_fingerprint_is_stable() {
        assert_eq!(formula_fingerprint(&formula()), formula_fingerprint(&formula()));
        assert!(formula_fingerprint(&formula()).starts_with("sha256:"));
    }

    #[test]
    fn test_formula_fingerprint_changes_with_points() {
        let mut changed = formula();
        changed.rules[0].winner_points = Decimal::from(6);
        assert_ne!(formula_fingerprint(&formula()), formula_fingerprint(&changed));
    }

    #[test]
    fn test_formula_fingerprint_ignores_display_name() {
        let mut renamed = formula();
        renamed.name = "Renamed".to_string();
        assert_eq!(formula_fingerprint(&formula()), formula_fingerprint(&renamed));
    }

    #[test]
    fn test_games_fingerprint_ignores_input_order() {
        let (games, participants) = games();
        let mut reversed = games.clone();
        reversed.reverse();
        let mut shuffled = participants.clone();
        for ps in shuffled.values_mut() {
            ps.reverse();
        }

        assert_eq!(
            games_fingerprint(&games, &participants),
            games_fingerprint(&reversed, &shuffled)
        );
    }

    #[test]
    fn test_games_fingerprint_changes_with_score() {
        let (games, participants) = games();
        let mut edited = participants.clone();
        if let Some(ps) = edited.get_mut(&GameId::new("g1")) {
            ps[1].score = None;
        }
        assert_ne!(
            games_fingerprint(&games, &participants),
            games_fingerprint(&games, &edited)
        );
    }
}

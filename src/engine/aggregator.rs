//! Folds extracted games into per-entity standings totals.

use super::extractor::{extract, Contender, Extraction};
use super::resolver::resolve;
use super::EngineOptions;
use crate::domain::{
    sort_games_deterministic, Decimal, EntityId, Formula, Game, GameId, Participant, SpecialEvent,
    StandingEntry, StreakKind,
};
use std::collections::{BTreeMap, HashMap};

/// Running totals keyed by entity.
///
/// Uses BTreeMap so the unranked output order is deterministic.
#[derive(Debug, Default)]
struct Tally {
    entries: BTreeMap<EntityId, StandingEntry>,
}

impl Tally {
    fn credit(
        &mut self,
        contender: &Contender,
        kind: StreakKind,
        points: Decimal,
        perfect: bool,
    ) -> &mut StandingEntry {
        let entry = self
            .entries
            .entry(contender.entity_id.clone())
            .or_insert_with(|| {
                StandingEntry::new(contender.entity_id.clone(), contender.display_name.clone())
            });

        entry.games_played += 1;
        match kind {
            StreakKind::Win => entry.wins += 1,
            StreakKind::Loss => entry.losses += 1,
            StreakKind::Draw => entry.draws += 1,
        }
        entry.points = match entry.points.checked_add(points) {
            Some(total) => total,
            None => {
                tracing::warn!(
                    entity_id = %entry.entity_id,
                    points = %points,
                    "Points total out of range, saturating"
                );
                entry.points.saturating_add(points)
            }
        };
        entry.counters.record(kind, perfect);
        entry
    }

    fn apply(&mut self, formula: &Formula, extraction: &Extraction, options: &EngineOptions) {
        if extraction.is_draw {
            let points = options.draw_points(formula);
            for contender in extraction.contenders() {
                self.credit(contender, StreakKind::Draw, points, false);
            }
            return;
        }

        let award = resolve(formula, &extraction.outcome);
        let perfect = options.is_perfect_win(&extraction.outcome);

        let winner = self.credit(
            &extraction.winner,
            StreakKind::Win,
            award.winner_points,
            perfect,
        );
        if let Some(rule) = award.matched_rule {
            winner.special_events.push(SpecialEvent {
                rule_id: rule.id.clone(),
                game_id: extraction.game_id.clone(),
                description: rule.label(),
                points: award.winner_points,
            });
        }

        self.credit(&extraction.loser, StreakKind::Loss, award.loser_points, false);
        for other in &extraction.others {
            self.credit(other, StreakKind::Loss, formula.default_loser_points, false);
        }
    }
}

/// Aggregate `games` into unranked standings (positions unset).
///
/// Games are folded in `(played_at, game_id)` order, so totals, streaks and
/// special-event order do not depend on input order. Games without
/// participants, or with fewer than two, are skipped.
pub fn aggregate(
    formula: &Formula,
    games: &[Game],
    participants_by_game: &HashMap<GameId, Vec<Participant>>,
    options: &EngineOptions,
) -> Vec<StandingEntry> {
    let mut ordered: Vec<&Game> = games.iter().collect();
    sort_games_deterministic(&mut ordered);

    let mut tally = Tally::default();
    for game in ordered {
        let Some(participants) = participants_by_game.get(&game.id) else {
            tracing::warn!(game_id = %game.id, "No participants recorded for game");
            continue;
        };
        if let Some(extraction) = extract(game, participants, &formula.draw) {
            tally.apply(formula, &extraction, options);
        }
    }

    tally.entries.into_values().collect()
}

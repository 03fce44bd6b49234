//! Pure computation engine for formula scoring and standings.
//!
//! Pipeline: extractor -> resolver (condition) -> aggregator -> ranking.
//! Nothing here performs I/O or holds state between calls.

use crate::domain::{
    Decimal, Formula, Game, GameId, GameOutcome, Participant, Snapshot, StandingEntry,
};
use std::collections::HashMap;

pub mod aggregator;
pub mod condition;
pub mod extractor;
pub mod ranking;
pub mod resolver;

pub use aggregator::aggregate;
pub use condition::evaluate;
pub use extractor::{extract, Contender, Extraction};
pub use ranking::{rank, RankPolicy};
pub use resolver::{resolve, Award};

/// Caller-owned policy knobs for a standings computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Draw points when the formula's draw policy leaves them unset.
    pub default_draw_points: Decimal,
    /// Winner score that makes a win perfect. None counts shutouts instead.
    pub perfect_score: Option<Decimal>,
    pub rank_policy: RankPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_draw_points: Decimal::from(1),
            perfect_score: None,
            rank_policy: RankPolicy::Strict,
        }
    }
}

impl EngineOptions {
    pub fn draw_points(&self, formula: &Formula) -> Decimal {
        formula.draw.points.unwrap_or(self.default_draw_points)
    }

    pub fn is_perfect_win(&self, outcome: &GameOutcome) -> bool {
        match self.perfect_score {
            Some(target) => outcome.winner_score >= target,
            None => outcome.loser_score.is_zero(),
        }
    }
}

/// Compute ordered standings with default options.
pub fn compute_standings(
    formula: &Formula,
    games: &[Game],
    participants_by_game: &HashMap<GameId, Vec<Participant>>,
    previous: Option<&Snapshot>,
) -> Vec<StandingEntry> {
    compute_standings_with(
        &EngineOptions::default(),
        formula,
        games,
        participants_by_game,
        previous,
    )
}

/// Extract, resolve, aggregate and rank `games` under `formula`.
pub fn compute_standings_with(
    options: &EngineOptions,
    formula: &Formula,
    games: &[Game],
    participants_by_game: &HashMap<GameId, Vec<Participant>>,
    previous: Option<&Snapshot>,
) -> Vec<StandingEntry> {
    let entries = aggregate(formula, games, participants_by_game, options);
    tracing::debug!(
        formula_id = %formula.id,
        games = games.len(),
        entities = entries.len(),
        "Aggregated standings"
    );
    rank(entries, previous, options.rank_policy)
}

/// Points `formula` awards for a hypothetical outcome, with the rule responsible.
pub fn explain_points<'a>(formula: &'a Formula, outcome: &GameOutcome) -> Award<'a> {
    resolve(formula, outcome)
}

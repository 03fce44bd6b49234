//! Condition evaluation against a single game outcome.

use crate::domain::{Comparison, Condition, Decimal, GameOutcome, Metric};

/// The scalar a metric selects from an outcome.
///
/// None when a derived metric falls outside the decimal range.
pub fn metric_value(metric: Metric, outcome: &GameOutcome) -> Option<Decimal> {
    match metric {
        Metric::ScoreDifferential => outcome.winner_score.checked_sub(outcome.loser_score),
        Metric::WinnerScore => Some(outcome.winner_score),
        Metric::LoserScore => Some(outcome.loser_score),
        Metric::TotalScore => outcome.winner_score.checked_add(outcome.loser_score),
    }
}

/// Whether `condition` holds for `outcome`. Pure and total.
///
/// An inverted `between` range matches nothing, and neither does a metric
/// that overflows.
pub fn evaluate(condition: &Condition, outcome: &GameOutcome) -> bool {
    let Some(x) = metric_value(condition.metric, outcome) else {
        tracing::warn!(
            metric = %condition.metric,
            winner_score = %outcome.winner_score,
            loser_score = %outcome.loser_score,
            "Metric out of range, condition does not match"
        );
        return false;
    };
    match condition.comparison {
        Comparison::Equals(v) => x == v,
        Comparison::GreaterThan(v) => x > v,
        Comparison::LessThan(v) => x < v,
        Comparison::GreaterThanOrEqual(v) => x >= v,
        Comparison::LessThanOrEqual(v) => x <= v,
        Comparison::Between { low, high } => low <= x && x <= high,
    }
}

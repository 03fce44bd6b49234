//! First-match-wins formula resolution.

use super::condition::evaluate;
use crate::domain::{Decimal, Formula, GameOutcome, Rule};

/// Points awarded for one outcome, and the rule that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award<'a> {
    pub winner_points: Decimal,
    pub loser_points: Decimal,
    /// None when the formula's defaults applied.
    pub matched_rule: Option<&'a Rule>,
}

/// Resolve the award for `outcome`: the first rule whose condition holds, else the defaults.
pub fn resolve<'a>(formula: &'a Formula, outcome: &GameOutcome) -> Award<'a> {
    formula
        .rules
        .iter()
        .find(|rule| evaluate(&rule.condition, outcome))
        .map(|rule| Award {
            winner_points: rule.winner_points,
            loser_points: rule.loser_points,
            matched_rule: Some(rule),
        })
        .unwrap_or(Award {
            winner_points: formula.default_winner_points,
            loser_points: formula.default_loser_points,
            matched_rule: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, Metric};

    fn twelve_formula() -> Formula {
        Formula::new("f", "Twelve", 3, 0).with_rule(Rule::new(
            "perfect",
            Condition::equals(Metric::WinnerScore, 12),
            5,
            0,
        ))
    }

    #[test]
    fn test_matching_rule_awards_its_points() {
        let formula = twelve_formula();
        let award = resolve(&formula, &GameOutcome::new(12, 0));
        assert_eq!(award.winner_points, Decimal::from(5));
        assert_eq!(award.loser_points, Decimal::zero());
        assert_eq!(award.matched_rule.map(|r| r.id.as_str()), Some("perfect"));
    }

    #[test]
    fn test_no_match_falls_back_to_defaults() {
        let formula = twelve_formula();
        let award = resolve(&formula, &GameOutcome::new(8, 3));
        assert_eq!(award.winner_points, Decimal::from(3));
        assert_eq!(award.loser_points, Decimal::zero());
        assert!(award.matched_rule.is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let formula = Formula::new("f", "Overlap", 3, 0)
            .with_rule(Rule::new(
                "blowout",
                Condition::between(Metric::ScoreDifferential, 10, 12),
                6,
                0,
            ))
            .with_rule(Rule::new(
                "shutout",
                Condition::equals(Metric::LoserScore, 0),
                4,
                1,
            ));

        let award = resolve(&formula, &GameOutcome::new(12, 0));
        assert_eq!(award.winner_points, Decimal::from(6));
        assert_eq!(award.matched_rule.map(|r| r.id.as_str()), Some("blowout"));
    }

    #[test]
    fn test_empty_rules_always_use_defaults() {
        let formula = Formula::new("f", "Flat", 2, 1);
        let award = resolve(&formula, &GameOutcome::new(12, 0));
        assert_eq!(award.winner_points, Decimal::from(2));
        assert_eq!(award.loser_points, Decimal::from(1));
        assert!(award.matched_rule.is_none());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let formula = twelve_formula();
        let outcome = GameOutcome::new(12, 0);
        let first = resolve(&formula, &outcome);
        for _ in 0..10 {
            assert_eq!(resolve(&formula, &outcome), first);
        }
    }
}

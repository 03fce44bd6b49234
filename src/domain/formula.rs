//! Scoring formulas: ordered rules mapping game outcomes to points.
//!
//! The stored JSON shape of a condition is `{ "type", "operator", "value" }`
//! where `value` is a `[low, high]` pair for `between` and a number otherwise.
//! In memory the pair/scalar split is a tagged [`Comparison`], so a formula
//! that deserializes is already well-shaped.

use crate::domain::{Decimal, FormulaId, RuleId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// The scalar a condition tests, derived from a game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// winner score minus loser score
    ScoreDifferential,
    WinnerScore,
    LoserScore,
    /// winner score plus loser score
    TotalScore,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::ScoreDifferential => "score_differential",
            Metric::WinnerScore => "winner_score",
            Metric::LoserScore => "loser_score",
            Metric::TotalScore => "total_score",
        };
        f.write_str(name)
    }
}

/// Operator names as they appear in stored formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Equals => "equals",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Between => "between",
        };
        f.write_str(name)
    }
}

/// An operator together with its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equals(Decimal),
    GreaterThan(Decimal),
    LessThan(Decimal),
    GreaterThanOrEqual(Decimal),
    LessThanOrEqual(Decimal),
    /// Inclusive on both ends.
    Between { low: Decimal, high: Decimal },
}

impl Comparison {
    pub fn operator(&self) -> Operator {
        match self {
            Comparison::Equals(_) => Operator::Equals,
            Comparison::GreaterThan(_) => Operator::GreaterThan,
            Comparison::LessThan(_) => Operator::LessThan,
            Comparison::GreaterThanOrEqual(_) => Operator::GreaterThanOrEqual,
            Comparison::LessThanOrEqual(_) => Operator::LessThanOrEqual,
            Comparison::Between { .. } => Operator::Between,
        }
    }
}

/// A single predicate over a game outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct Condition {
    pub metric: Metric,
    pub comparison: Comparison,
}

impl Condition {
    pub fn new(metric: Metric, comparison: Comparison) -> Self {
        Self { metric, comparison }
    }

    pub fn equals(metric: Metric, value: impl Into<Decimal>) -> Self {
        Self::new(metric, Comparison::Equals(value.into()))
    }

    pub fn between(metric: Metric, low: impl Into<Decimal>, high: impl Into<Decimal>) -> Self {
        Self::new(
            metric,
            Comparison::Between {
                low: low.into(),
                high: high.into(),
            },
        )
    }

    fn check_range(&self) -> Result<(), FormulaError> {
        match self.comparison {
            Comparison::Between { low, high } if low > high => {
                Err(FormulaError::InvertedRange { low, high })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparison {
            Comparison::Equals(v) => write!(f, "{} = {}", self.metric, v),
            Comparison::GreaterThan(v) => write!(f, "{} > {}", self.metric, v),
            Comparison::LessThan(v) => write!(f, "{} < {}", self.metric, v),
            Comparison::GreaterThanOrEqual(v) => write!(f, "{} >= {}", self.metric, v),
            Comparison::LessThanOrEqual(v) => write!(f, "{} <= {}", self.metric, v),
            Comparison::Between { low, high } => {
                write!(f, "{} between {} and {}", self.metric, low, high)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCondition {
    #[serde(rename = "type")]
    metric: Metric,
    operator: Operator,
    value: RawValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(Decimal),
    Pair(Vec<Decimal>),
}

impl TryFrom<RawCondition> for Condition {
    type Error = FormulaError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let comparison = match (raw.operator, raw.value) {
            (Operator::Between, RawValue::Pair(pair)) => match pair.as_slice() {
                [low, high] => Comparison::Between {
                    low: *low,
                    high: *high,
                },
                _ => return Err(FormulaError::MalformedPair { len: pair.len() }),
            },
            (Operator::Between, RawValue::Scalar(_)) => return Err(FormulaError::PairRequired),
            (operator, RawValue::Pair(_)) => {
                return Err(FormulaError::ScalarRequired { operator })
            }
            (Operator::Equals, RawValue::Scalar(v)) => Comparison::Equals(v),
            (Operator::GreaterThan, RawValue::Scalar(v)) => Comparison::GreaterThan(v),
            (Operator::LessThan, RawValue::Scalar(v)) => Comparison::LessThan(v),
            (Operator::GreaterThanOrEqual, RawValue::Scalar(v)) => {
                Comparison::GreaterThanOrEqual(v)
            }
            (Operator::LessThanOrEqual, RawValue::Scalar(v)) => Comparison::LessThanOrEqual(v),
        };

        let condition = Condition::new(raw.metric, comparison);
        condition.check_range()?;
        Ok(condition)
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let value = match condition.comparison {
            Comparison::Equals(v)
            | Comparison::GreaterThan(v)
            | Comparison::LessThan(v)
            | Comparison::GreaterThanOrEqual(v)
            | Comparison::LessThanOrEqual(v) => RawValue::Scalar(v),
            Comparison::Between { low, high } => RawValue::Pair(vec![low, high]),
        };
        RawCondition {
            metric: condition.metric,
            operator: condition.comparison.operator(),
            value,
        }
    }
}

/// A condition-to-points mapping within a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub condition: Condition,
    pub winner_points: Decimal,
    pub loser_points: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    pub fn new(
        id: impl Into<RuleId>,
        condition: Condition,
        winner_points: impl Into<Decimal>,
        loser_points: impl Into<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            condition,
            winner_points: winner_points.into(),
            loser_points: loser_points.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Human-readable label: the stored description, or the rendered condition.
    pub fn label(&self) -> String {
        match &self.description {
            Some(d) if !d.trim().is_empty() => d.clone(),
            _ => self.condition.to_string(),
        }
    }
}

/// How a formula treats drawn games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPolicy {
    /// Points awarded to every side of a draw. Falls back to the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Decimal>,
    /// Outcomes matching this condition are scored as draws even when a winner is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// A named, ordered set of scoring rules plus default points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub id: FormulaId,
    pub name: String,
    /// Evaluated in order; the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub default_winner_points: Decimal,
    pub default_loser_points: Decimal,
    #[serde(default)]
    pub draw: DrawPolicy,
}

impl Formula {
    pub fn new(
        id: impl Into<FormulaId>,
        name: impl Into<String>,
        default_winner_points: impl Into<Decimal>,
        default_loser_points: impl Into<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules: Vec::new(),
            default_winner_points: default_winner_points.into(),
            default_loser_points: default_loser_points.into(),
            draw: DrawPolicy::default(),
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_draw_policy(mut self, draw: DrawPolicy) -> Self {
        self.draw = draw;
        self
    }

    /// Check the invariants the engine relies on.
    ///
    /// Run by stores and the service before a formula is used or saved.
    pub fn validate(&self) -> Result<(), FormulaError> {
        let mut seen: HashSet<&RuleId> = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(&rule.id) {
                return Err(FormulaError::DuplicateRuleId(rule.id.clone()));
            }
            if rule.winner_points.is_negative() || rule.loser_points.is_negative() {
                return Err(FormulaError::NegativePoints(rule.id.clone()));
            }
            rule.condition.check_range()?;
        }

        if let Some(points) = self.draw.points {
            if points.is_negative() {
                return Err(FormulaError::NegativeDrawPoints(points));
            }
        }
        if let Some(condition) = &self.draw.condition {
            condition.check_range()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("operator between requires a [low, high] pair")]
    PairRequired,
    #[error("operator {operator} requires a single number")]
    ScalarRequired { operator: Operator },
    #[error("between range must have exactly two bounds, got {len}")]
    MalformedPair { len: usize },
    #[error("between range is inverted: {low} > {high}")]
    InvertedRange { low: Decimal, high: Decimal },
    #[error("rule {0} awards negative points")]
    NegativePoints(RuleId),
    #[error("draw points must not be negative, got {0}")]
    NegativeDrawPoints(Decimal),
    #[error("duplicate rule id {0}")]
    DuplicateRuleId(RuleId),
}

use crate::config::Config;
use crate::domain::{
    Decimal, Formula, FormulaId, GameId, GameOutcome, Participant, RuleId, Snapshot,
    StandingEntry, TournamentId,
};
use crate::engine::{compute_standings_with, explain_points, EngineOptions};
use crate::error::ServiceError;
use crate::orchestration::fingerprint::{formula_fingerprint, games_fingerprint};
use crate::store::{FormulaStore, GameStore, SnapshotStore};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered standings for one tournament, with the input fingerprints they were computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub tournament_id: TournamentId,
    pub formula_id: FormulaId,
    pub formula_fingerprint: String,
    pub games_fingerprint: String,
    pub entries: Vec<StandingEntry>,
}

/// Owned explanation of the points a formula awards for a hypothetical outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsPreview {
    pub winner_points: Decimal,
    pub loser_points: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule_id: Option<RuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fetches standings inputs from the stores and runs the engine over them.
#[derive(Clone)]
pub struct LeaderboardService {
    formulas: Arc<dyn FormulaStore>,
    games: Arc<dyn GameStore>,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    options: EngineOptions,
}

impl LeaderboardService {
    pub fn new(formulas: Arc<dyn FormulaStore>, games: Arc<dyn GameStore>, config: &Config) -> Self {
        Self {
            formulas,
            games,
            snapshots: None,
            options: config.engine_options(),
        }
    }

    /// Use `snapshots` as the previous-period baseline for movement.
    pub fn with_snapshots(mut self, snapshots: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    /// Compute the current leaderboard for `tournament`. Read-only.
    pub async fn leaderboard(&self, tournament: &TournamentId) -> Result<Leaderboard, ServiceError> {
        let board = self.compute(tournament).await?;
        tracing::info!(
            tournament=%tournament,
            formula_id=%board.formula_id,
            entries=board.entries.len(),
            "Computed leaderboard"
        );
        Ok(board)
    }

    /// Compute the leaderboard and store it as the baseline for the next period.
    ///
    /// Callers run this once when a period ends; movement in later
    /// `leaderboard` calls is measured against the stored result.
    pub async fn close_period(&self, tournament: &TournamentId) -> Result<Leaderboard, ServiceError> {
        let store = self
            .snapshots
            .as_ref()
            .ok_or(ServiceError::SnapshotsUnavailable)?;

        let board = self.compute(tournament).await?;
        store
            .save_snapshot(tournament, Snapshot::new(board.entries.clone()))
            .await?;

        tracing::info!(
            tournament=%tournament,
            formula_id=%board.formula_id,
            entries=board.entries.len(),
            "Closed period, snapshot recorded"
        );
        Ok(board)
    }

    async fn compute(&self, tournament: &TournamentId) -> Result<Leaderboard, ServiceError> {
        let formula = self
            .formulas
            .fetch_formula(tournament)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("formula for tournament {}", tournament)))?;

        formula.validate().map_err(|e| {
            tracing::error!(tournament=%tournament, formula_id=%formula.id, error=%e, "Stored formula is invalid");
            e
        })?;

        let games = self.games.fetch_games(tournament).await?;

        // Participants for every game, fetched concurrently
        let participant_futures = games.iter().map(|game| async move {
            self.games
                .fetch_participants(&game.id)
                .await
                .map(|participants| (game.id.clone(), participants))
        });
        let participants_by_game: HashMap<GameId, Vec<Participant>> =
            try_join_all(participant_futures).await?.into_iter().collect();

        let previous = match &self.snapshots {
            Some(store) => store.fetch_snapshot(tournament).await?,
            None => None,
        };

        let entries = compute_standings_with(
            &self.options,
            &formula,
            &games,
            &participants_by_game,
            previous.as_ref(),
        );

        tracing::debug!(
            tournament=%tournament,
            games=games.len(),
            has_previous=previous.is_some(),
            "Standings inputs loaded"
        );

        Ok(Leaderboard {
            tournament_id: tournament.clone(),
            formula_id: formula.id.clone(),
            formula_fingerprint: formula_fingerprint(&formula),
            games_fingerprint: games_fingerprint(&games, &participants_by_game),
            entries,
        })
    }

    /// Validate a candidate formula and explain what it awards for `outcome`.
    pub fn preview(&self, formula: &Formula, outcome: &GameOutcome) -> Result<PointsPreview, ServiceError> {
        formula.validate()?;

        let award = explain_points(formula, outcome);
        Ok(PointsPreview {
            winner_points: award.winner_points,
            loser_points: award.loser_points,
            matched_rule_id: award.matched_rule.map(|r| r.id.clone()),
            description: award.matched_rule.map(|r| r.label()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, Metric, Rule};
    use crate::store::InMemoryStore;

    fn service(store: InMemoryStore) -> LeaderboardService {
        let store = Arc::new(store);
        LeaderboardService::new(store.clone(), store, &Config::default())
    }

    #[tokio::test]
    async fn test_missing_formula_is_not_found() {
        let err = service(InMemoryStore::new())
            .leaderboard(&TournamentId::new("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_stored_formula_is_rejected() {
        let formula = Formula::new("f", "Bad", 3, 0)
            .with_rule(Rule::new("r", Condition::between(Metric::WinnerScore, 9, 3), 5, 0));
        let err = service(InMemoryStore::new().with_formula("t", formula))
            .leaderboard(&TournamentId::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidFormula(_)));
    }

    #[tokio::test]
    async fn test_tournament_without_games_has_empty_leaderboard() {
        let board = service(InMemoryStore::new().with_formula("t", Formula::new("f", "Flat", 3, 0)))
            .leaderboard(&TournamentId::new("t"))
            .await
            .unwrap();
        assert!(board.entries.is_empty());
        assert_eq!(board.formula_id.as_str(), "f");
    }

    #[tokio::test]
    async fn test_close_period_requires_snapshot_store() {
        let store = InMemoryStore::new().with_formula("t", Formula::new("f", "Flat", 3, 0));
        let err = service(store)
            .close_period(&TournamentId::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SnapshotsUnavailable));
    }

    #[tokio::test]
    async fn test_leaderboard_does_not_write_snapshot() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_formula("t", Formula::new("f", "Flat", 3, 0))
                .with_game(
                    crate::domain::Game::new("g1", "t", chrono::Utc::now()),
                    vec![Participant::new("a", "A", 2).winning(), Participant::new("b", "B", 1)],
                ),
        );
        let svc = LeaderboardService::new(store.clone(), store.clone(), &Config::default())
            .with_snapshots(store.clone());
        let tournament = TournamentId::new("t");

        svc.leaderboard(&tournament).await.unwrap();
        assert_eq!(store.fetch_snapshot(&tournament).await.unwrap(), None);

        let closed = svc.close_period(&tournament).await.unwrap();
        let stored = store.fetch_snapshot(&tournament).await.unwrap().unwrap();
        assert_eq!(stored.entries(), closed.entries.as_slice());
    }

    #[test]
    fn test_preview_explains_matched_rule() {
        let formula = Formula::new("f", "Twelve", 3, 0).with_rule(
            Rule::new("perfect", Condition::equals(Metric::WinnerScore, 12), 5, 0)
                .with_description("Perfect game"),
        );
        let svc = service(InMemoryStore::new());

        let preview = svc.preview(&formula, &GameOutcome::new(12, 0)).unwrap();
        assert_eq!(preview.winner_points, Decimal::from(5));
        assert_eq!(preview.matched_rule_id, Some(RuleId::new("perfect")));
        assert_eq!(preview.description.as_deref(), Some("Perfect game"));

        let fallback = svc.preview(&formula, &GameOutcome::new(8, 3)).unwrap();
        assert_eq!(fallback.winner_points, Decimal::from(3));
        assert_eq!(fallback.matched_rule_id, None);
    }

    #[test]
    fn test_preview_rejects_invalid_candidate() {
        let formula = Formula::new("f", "Neg", 3, 0)
            .with_rule(Rule::new("r", Condition::equals(Metric::LoserScore, 0), -2, 0));
        let result = service(InMemoryStore::new()).preview(&formula, &GameOutcome::new(5, 0));
        assert!(matches!(result, Err(ServiceError::InvalidFormula(_))));
    }
}

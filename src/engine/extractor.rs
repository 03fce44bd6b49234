//! Reduces a game and its participants to a winner/loser outcome.

use super::condition::evaluate;
use crate::domain::{DrawPolicy, EntityId, Game, GameId, GameOutcome, Participant};
use std::cmp::Reverse;

/// A side of an extracted game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub entity_id: EntityId,
    pub display_name: String,
}

impl From<&Participant> for Contender {
    fn from(p: &Participant) -> Self {
        Contender {
            entity_id: p.entity_id.clone(),
            display_name: p.display_name.clone(),
        }
    }
}

/// The evaluation view of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub game_id: GameId,
    pub outcome: GameOutcome,
    pub winner: Contender,
    pub loser: Contender,
    /// Middle-ranked participants of games with more than two sides.
    pub others: Vec<Contender>,
    pub is_draw: bool,
}

impl Extraction {
    /// Every participant of the game, winner first.
    pub fn contenders(&self) -> impl Iterator<Item = &Contender> {
        std::iter::once(&self.winner)
            .chain(self.others.iter())
            .chain(std::iter::once(&self.loser))
    }
}

/// Extract the outcome of `game`.
///
/// Two sides: the flagged winner against the other. More sides: highest score
/// against lowest score, everyone else along for participation. The game is a
/// draw when no side (or more than one side of a two-sided game) is flagged as
/// winner, when the top score is shared in a multi-sided game, or when the
/// draw policy's condition holds. Missing scores count as zero.
///
/// Returns `None` for games with fewer than two participants.
pub fn extract(game: &Game, participants: &[Participant], draw: &DrawPolicy) -> Option<Extraction> {
    if participants.len() < 2 {
        tracing::warn!(
            game_id = %game.id,
            participants = participants.len(),
            "Skipping game with fewer than two participants"
        );
        return None;
    }

    let flagged = participants.iter().filter(|p| p.winner).count();

    // Highest score first; id keeps equal scores in a stable order.
    let mut ranked: Vec<&Participant> = participants.iter().collect();
    ranked.sort_by_cached_key(|p| (Reverse(p.score_or_zero()), p.entity_id.clone()));

    let (winner, loser, others, mut is_draw) = if ranked.len() == 2 {
        match participants.iter().position(|p| p.winner) {
            Some(idx) if flagged == 1 => {
                let winner = &participants[idx];
                let loser = &participants[1 - idx];
                (winner, loser, Vec::new(), false)
            }
            _ => (ranked[0], ranked[1], Vec::new(), true),
        }
    } else {
        let top_tied = ranked[0].score_or_zero() == ranked[1].score_or_zero();
        let last = ranked.len() - 1;
        let others = ranked[1..last].iter().map(|p| Contender::from(*p)).collect();
        (ranked[0], ranked[last], others, flagged == 0 || top_tied)
    };

    let outcome = GameOutcome {
        winner_score: winner.score_or_zero(),
        loser_score: loser.score_or_zero(),
    };

    if !is_draw {
        if let Some(condition) = &draw.condition {
            is_draw = evaluate(condition, &outcome);
        }
    }

    Some(Extraction {
        game_id: game.id.clone(),
        outcome,
        winner: winner.into(),
        loser: loser.into(),
        others,
        is_draw,
    })
}

use serde::Serialize;

use crate::game_data::{GameResult, NormalizedGame};

/// Win/draw/loss breakdown for one batch of games.
///
/// `opp_*` counters explain wins (how the opponent went down); the others
/// explain losses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStats {
    pub num_games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub opp_resigned: u32,
    pub opp_checkmated: u32,
    pub opp_timeout: u32,
    pub opp_abandoned: u32,
    pub resigned: u32,
    pub checkmated: u32,
    pub timeouts: u32,
    pub abandoned: u32,
    /// Percentage with two decimals; `None` when there are no games.
    pub win_rate: Option<f64>,
    pub rating_change: i32,
}

impl OutcomeStats {
    /// Games that were neither a win, a draw nor an explicit loss.
    pub fn unclassified(&self) -> u32 {
        self.num_games - self.wins - self.draws - self.losses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
    Unclassified,
}

/// A loss only counts when the opponent is recorded as the winner.
pub fn classify(game: &NormalizedGame) -> Outcome {
    if game.player_result == GameResult::Win {
        Outcome::Win
    } else if game.player_result.is_draw() {
        Outcome::Draw
    } else if game.opponent_result == GameResult::Win {
        Outcome::Loss
    } else {
        Outcome::Unclassified
    }
}

/// Games must be chronological for `rating_change` to mean anything.
pub fn outcome_stats(games: &[NormalizedGame]) -> OutcomeStats {
    let mut stats = OutcomeStats {
        num_games: games.len() as u32,
        ..Default::default()
    };

    for game in games {
        match classify(game) {
            Outcome::Win => {
                stats.wins += 1;
                match game.opponent_result {
                    GameResult::Resigned => stats.opp_resigned += 1,
                    GameResult::Checkmated => stats.opp_checkmated += 1,
                    GameResult::Timeout => stats.opp_timeout += 1,
                    GameResult::Abandoned => stats.opp_abandoned += 1,
                    _ => {}
                }
            }
            Outcome::Draw => stats.draws += 1,
            Outcome::Loss => {
                stats.losses += 1;
                match game.player_result {
                    GameResult::Resigned => stats.resigned += 1,
                    GameResult::Checkmated => stats.checkmated += 1,
                    GameResult::Timeout => stats.timeouts += 1,
                    GameResult::Abandoned => stats.abandoned += 1,
                    _ => {}
                }
            }
            Outcome::Unclassified => {
                tracing::debug!(
                    game_id = %game.id,
                    player = %game.player_result,
                    opponent = %game.opponent_result,
                    "Unclassified result"
                );
            }
        }
    }

    if let (Some(first), Some(last)) = (games.first(), games.last()) {
        stats.rating_change = last.player_rating - first.player_rating;
        stats.win_rate = Some(round2(stats.wins as f64 / games.len() as f64 * 100.0));
    }

    stats
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

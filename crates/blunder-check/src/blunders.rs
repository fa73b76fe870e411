//! Per-game blunder counting against a UCI engine.
//!
//! Each game gets its own engine session. Inside a game every request waits
//! for the previous answer; separate games may overlap up to the configured
//! session count. A game that cannot be evaluated counts zero blunders and
//! never stops the batch.

use chess_core::pgn::{to_fen, Replay};
use chess_core::{NormalizedGame, Side};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use shakmaty::Position;

use crate::config::EngineConfig;
use crate::engine::{EngineLauncher, PositionEvaluator};
use crate::error::EvalError;

/// Whether a game's count came from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum BlunderStatus {
    Evaluated,
    /// Counted as zero; holds the reason.
    Degraded(String),
}

impl BlunderStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, BlunderStatus::Degraded(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            BlunderStatus::Evaluated => None,
            BlunderStatus::Degraded(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameBlunders {
    pub game_id: String,
    pub blunders: u32,
    #[serde(flatten)]
    pub status: BlunderStatus,
}

impl GameBlunders {
    fn evaluated(game_id: &str, blunders: u32) -> Self {
        Self {
            game_id: game_id.to_string(),
            blunders,
            status: BlunderStatus::Evaluated,
        }
    }

    fn degraded(game_id: &str, err: &EvalError) -> Self {
        Self {
            game_id: game_id.to_string(),
            blunders: 0,
            status: BlunderStatus::Degraded(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlunderReport {
    pub games: Vec<GameBlunders>,
    pub total: u32,
    pub degraded: u32,
}

impl BlunderReport {
    pub fn push(&mut self, game: GameBlunders) {
        self.total += game.blunders;
        if game.status.is_degraded() {
            self.degraded += 1;
        }
        self.games.push(game);
    }
}

pub struct BlunderEvaluator<L> {
    launcher: L,
    depth: u32,
    threshold: i32,
    sessions: usize,
}

impl<L: EngineLauncher> BlunderEvaluator<L> {
    pub fn new(launcher: L, config: &EngineConfig) -> Self {
        Self {
            launcher,
            depth: config.depth,
            threshold: config.blunder_threshold,
            sessions: config.sessions.max(1),
        }
    }

    /// Count one game's blunders in a session of its own.
    pub async fn count_game(&self, game: &NormalizedGame) -> GameBlunders {
        let Some(pgn) = game.move_text.as_deref() else {
            return GameBlunders::evaluated(&game.id, 0);
        };

        let mut engine = match self.launcher.launch().await {
            Ok(engine) => engine,
            Err(e) => {
                warn!(game_id = %game.id, error = %e, "Engine launch failed");
                return GameBlunders::degraded(&game.id, &e);
            }
        };

        let result = count_blunders(&mut engine, pgn, game.side, self.depth, self.threshold).await;
        engine.shutdown().await;

        match result {
            Ok(blunders) => {
                debug!(game_id = %game.id, blunders, "Game evaluated");
                GameBlunders::evaluated(&game.id, blunders)
            }
            Err(e) => {
                warn!(game_id = %game.id, error = %e, "Blunder check degraded to 0");
                GameBlunders::degraded(&game.id, &e)
            }
        }
    }

    /// Results in input order. Dropping the stream abandons the games not
    /// yet finished; finished ones are unaffected.
    pub fn stream<'a>(
        &'a self,
        games: &'a [NormalizedGame],
    ) -> impl Stream<Item = GameBlunders> + Send + 'a
    where
        L::Engine: 'a,
    {
        futures::stream::iter(games)
            .map(move |game| self.count_game(game))
            .buffered(self.sessions)
    }

    pub async fn evaluate_batch(&self, games: &[NormalizedGame]) -> BlunderReport {
        info!(games = games.len(), sessions = self.sessions, "Counting blunders");
        let mut report = BlunderReport::default();
        let mut results = std::pin::pin!(self.stream(games));
        while let Some(game) = results.next().await {
            report.push(game);
        }
        info!(total = report.total, degraded = report.degraded, "Blunder check done");
        report
    }
}

/// Replay `pgn` and count the moves by `side` that lose more than
/// `threshold` centipawns from that side's point of view.
pub async fn count_blunders<E: PositionEvaluator>(
    engine: &mut E,
    pgn: &str,
    side: Side,
    depth: u32,
    threshold: i32,
) -> Result<u32, EvalError> {
    let player = side.color();
    let mut blunders = 0;

    for ply in Replay::new(pgn) {
        let ply = ply?;
        if ply.mover != player {
            continue;
        }

        let before = engine
            .evaluate(&to_fen(&ply.before), depth)
            .await?
            .white_score(ply.before.turn());
        let after = engine
            .evaluate(&to_fen(&ply.after), depth)
            .await?
            .white_score(ply.after.turn());

        let delta = match side {
            Side::White => after - before,
            Side::Black => before - after,
        };
        if delta < threshold {
            debug!(ply = ply.index, san = %ply.san, before, after, "Blunder");
            blunders += 1;
        }
    }

    Ok(blunders)
}

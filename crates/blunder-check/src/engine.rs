//! Position evaluation interface.

use std::future::Future;

use shakmaty::Color;

use crate::error::EvalError;

/// Magnitude a forced mate is clamped to.
pub const MATE_SCORE: i32 = 10_000;

/// Engine verdict, from the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Centipawns(i32),
    /// Mate in N; negative (or zero) when the side to move gets mated.
    Mate(i32),
}

impl Evaluation {
    pub fn for_side_to_move(self) -> i32 {
        match self {
            Evaluation::Centipawns(cp) => cp.clamp(-MATE_SCORE, MATE_SCORE),
            Evaluation::Mate(n) if n > 0 => MATE_SCORE,
            Evaluation::Mate(_) => -MATE_SCORE,
        }
    }

    /// Score with White's advantage positive.
    pub fn white_score(self, side_to_move: Color) -> i32 {
        match side_to_move {
            Color::White => self.for_side_to_move(),
            Color::Black => -self.for_side_to_move(),
        }
    }
}

/// One engine session. Requests are answered strictly one at a time.
pub trait PositionEvaluator: Send {
    fn evaluate(
        &mut self,
        fen: &str,
        depth: u32,
    ) -> impl Future<Output = Result<Evaluation, EvalError>> + Send;

    /// Release the engine. Dropping a session must release it as well.
    fn shutdown(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}

/// Starts a fresh session for each game.
pub trait EngineLauncher: Send + Sync {
    type Engine: PositionEvaluator;

    fn launch(&self) -> impl Future<Output = Result<Self::Engine, EvalError>> + Send;
}

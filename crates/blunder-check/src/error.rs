//! Failures while evaluating a game.

use std::time::Duration;

use chess_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Failed to spawn engine: {0}")]
    Spawn(String),

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine gave no answer within {0:?}")]
    Timeout(Duration),

    #[error("Engine protocol error: {0}")]
    Protocol(String),

    #[error("Replay error: {0}")]
    Replay(#[from] CoreError),
}

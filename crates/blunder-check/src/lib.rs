//! Blunder detection: replays games and asks a UCI engine, position by
//! position, how much each of the player's moves cost.

pub mod blunders;
pub mod config;
pub mod engine;
pub mod error;
pub mod stockfish;

pub use blunders::{count_blunders, BlunderEvaluator, BlunderReport, BlunderStatus, GameBlunders};
pub use config::EngineConfig;
pub use engine::{EngineLauncher, Evaluation, PositionEvaluator, MATE_SCORE};
pub use error::EvalError;
pub use stockfish::{StockfishEngine, StockfishLauncher};


//! Monthly chess statistics: normalization, PGN replay and aggregations.

pub mod error;
pub mod game_data;
pub mod normalize;
pub mod pgn;
pub mod stats;
pub mod summary;

pub use error::CoreError;
pub use game_data::{ArchiveGames, ArchiveResponse, GameResult, NormalizedGame, PlayerRecord, RawGame, Side};
pub use normalize::{normalize_batch, normalize_game, NormalizedBatch};
pub use summary::{MonthlyStats, StatsSummary};

//! Upstream game-archive access.

pub mod chess_com;

use std::future::Future;

use chess_core::ArchiveGames;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Upstream unavailable: {0}")]
    Transport(String),
}

/// Source of monthly game archives.
pub trait GameArchive: Send + Sync {
    /// Games that ended in `year`/`month` (1-12). Records that fail to
    /// decode are counted in `ArchiveGames::malformed`, not returned as errors.
    fn fetch_month(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<ArchiveGames, ClientError>> + Send;

    fn player_exists(&self, username: &str) -> impl Future<Output = Result<bool, ClientError>> + Send;
}

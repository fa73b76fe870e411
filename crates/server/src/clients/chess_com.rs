use chess_core::{ArchiveGames, ArchiveResponse};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{ClientError, GameArchive};

pub struct ChessComClient {
    client: Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("Blunderstruck/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Transport(format!("HTTP client setup: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ClientError> {
        debug!(url, "GET");
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Request error: {e}")))
    }
}

impl GameArchive for ChessComClient {
    /// Fetch one monthly archive, e.g. `/player/{username}/games/2024/03`.
    async fn fetch_month(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<ArchiveGames, ClientError> {
        let url = format!(
            "{}/player/{}/games/{}/{:02}",
            self.base_url,
            username.to_lowercase(),
            year,
            month
        );

        let resp = self.get(&url).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::PlayerNotFound(username.to_string()));
        }

        if !resp.status().is_success() {
            return Err(ClientError::Transport(format!("HTTP {}", resp.status())));
        }

        let archive: ArchiveResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("JSON parse error: {e}")))?;

        Ok(archive.into_games())
    }

    async fn player_exists(&self, username: &str) -> Result<bool, ClientError> {
        let url = format!("{}/player/{}", self.base_url, username.to_lowercase());
        let resp = self.get(&url).await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => Err(ClientError::Transport(format!("HTTP {s}"))),
        }
    }
}

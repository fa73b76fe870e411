use blunder_check::{BlunderEvaluator, StockfishLauncher};

use crate::clients::chess_com::ChessComClient;
use crate::config::Config;

/// Shared by every request.
pub struct AppState {
    pub archive: ChessComClient,
    /// `None` when blunder checks are disabled.
    pub evaluator: Option<BlunderEvaluator<StockfishLauncher>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let archive = ChessComClient::new(&config.chess_com_api_url)?;
        let evaluator = config
            .blunders_enabled
            .then(|| BlunderEvaluator::new(config.engine.launcher(), &config.engine));
        Ok(Self { archive, evaluator })
    }
}

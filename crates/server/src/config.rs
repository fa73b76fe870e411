use std::env;

use blunder_check::EngineConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub chess_com_api_url: String,
    pub blunders_enabled: bool,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            chess_com_api_url: env::var("CHESS_COM_API_URL")
                .unwrap_or_else(|_| "https://api.chess.com/pub".to_string()),
            blunders_enabled: env::var("BLUNDERS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            engine: EngineConfig::from_env(),
        }
    }
}

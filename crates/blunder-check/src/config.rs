//! Engine settings, read from the environment.

use std::env;
use std::time::Duration;

use crate::stockfish::StockfishLauncher;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// UCI engine binary
    pub stockfish_path: String,

    /// Search depth per evaluated position
    pub depth: u32,

    /// Drop (in centipawns, player's perspective) that counts as a blunder
    pub blunder_threshold: i32,

    /// Upper bound on one position evaluation
    pub eval_timeout: Duration,

    /// Engine sessions allowed to run at once (one game each)
    pub sessions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stockfish_path: "/usr/local/bin/stockfish".to_string(),
            depth: 12,
            blunder_threshold: -500,
            eval_timeout: Duration::from_secs(10),
            sessions: num_cpus::get(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            stockfish_path: env::var("STOCKFISH_PATH").unwrap_or(defaults.stockfish_path),
            depth: parse_var("SEARCH_DEPTH").unwrap_or(defaults.depth),
            blunder_threshold: parse_var("BLUNDER_THRESHOLD_CP").unwrap_or(defaults.blunder_threshold),
            eval_timeout: parse_var("EVAL_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.eval_timeout),
            sessions: parse_var("ENGINE_SESSIONS")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.sessions),
        }
    }

    /// Launcher for the configured Stockfish binary.
    pub fn launcher(&self) -> StockfishLauncher {
        StockfishLauncher {
            path: self.stockfish_path.clone(),
            timeout: self.eval_timeout,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

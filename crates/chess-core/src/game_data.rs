use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One side of a chess.com archive record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
    #[serde(default)]
    pub rating: i32,
    pub result: GameResult,
}

/// A finished game as returned by the monthly archive endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGame {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pgn: Option<String>,
    #[serde(default)]
    pub time_control: String,
    pub end_time: i64,
    #[serde(default = "default_rated")]
    pub rated: bool,
    #[serde(default)]
    pub eco: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
    pub white: PlayerRecord,
    pub black: PlayerRecord,
}

fn default_rated() -> bool {
    true
}

/// Archive payload: `{"games": [...]}`. Some proxies nest games in arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    pub games: Vec<ArchiveEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArchiveEntry {
    Game(Box<RawGame>),
    Nested(Vec<ArchiveEntry>),
    /// Anything that is neither a game record nor an array of them.
    Malformed(serde_json::Value),
}

/// Decoded games of one archive, plus how many records had to be dropped.
#[derive(Debug, Clone, Default)]
pub struct ArchiveGames {
    pub games: Vec<RawGame>,
    pub malformed: usize,
}

impl From<Vec<RawGame>> for ArchiveGames {
    fn from(games: Vec<RawGame>) -> Self {
        Self { games, malformed: 0 }
    }
}

impl ArchiveResponse {
    /// Flatten nested arrays into a single list, preserving order.
    /// Undecodable records are logged and counted, never fatal.
    pub fn into_games(self) -> ArchiveGames {
        let mut out = ArchiveGames {
            games: Vec::with_capacity(self.games.len()),
            malformed: 0,
        };
        flatten_into(self.games, &mut out);
        out
    }
}

fn flatten_into(entries: Vec<ArchiveEntry>, out: &mut ArchiveGames) {
    for entry in entries {
        match entry {
            ArchiveEntry::Game(game) => out.games.push(*game),
            ArchiveEntry::Nested(inner) => flatten_into(inner, out),
            ArchiveEntry::Malformed(value) => {
                let url = value.get("url").and_then(|u| u.as_str()).unwrap_or("<no url>");
                warn!(url, "Skipping undecodable archive record");
                out.malformed += 1;
            }
        }
    }
}

/// chess.com result codes. Anything else lands in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameResult {
    Win,
    Checkmated,
    Agreed,
    Repetition,
    Timeout,
    Resigned,
    Stalemate,
    Lose,
    Insufficient,
    FiftyMove,
    Abandoned,
    KingOfTheHill,
    ThreeCheck,
    TimeVsInsufficient,
    BughousePartnerLose,
    Unrecognized(String),
}

impl GameResult {
    pub fn as_str(&self) -> &str {
        match self {
            GameResult::Win => "win",
            GameResult::Checkmated => "checkmated",
            GameResult::Agreed => "agreed",
            GameResult::Repetition => "repetition",
            GameResult::Timeout => "timeout",
            GameResult::Resigned => "resigned",
            GameResult::Stalemate => "stalemate",
            GameResult::Lose => "lose",
            GameResult::Insufficient => "insufficient",
            GameResult::FiftyMove => "50move",
            GameResult::Abandoned => "abandoned",
            GameResult::KingOfTheHill => "kingofthehill",
            GameResult::ThreeCheck => "threecheck",
            GameResult::TimeVsInsufficient => "timevsinsufficient",
            GameResult::BughousePartnerLose => "bughousepartnerlose",
            GameResult::Unrecognized(s) => s,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameResult::Repetition
                | GameResult::Agreed
                | GameResult::Stalemate
                | GameResult::Insufficient
                | GameResult::TimeVsInsufficient
                | GameResult::FiftyMove
        )
    }
}

impl From<&str> for GameResult {
    fn from(s: &str) -> Self {
        match s {
            "win" => GameResult::Win,
            "checkmated" => GameResult::Checkmated,
            "agreed" => GameResult::Agreed,
            "repetition" => GameResult::Repetition,
            "timeout" => GameResult::Timeout,
            "resigned" => GameResult::Resigned,
            "stalemate" => GameResult::Stalemate,
            "lose" => GameResult::Lose,
            "insufficient" => GameResult::Insufficient,
            "50move" => GameResult::FiftyMove,
            "abandoned" => GameResult::Abandoned,
            "kingofthehill" => GameResult::KingOfTheHill,
            "threecheck" => GameResult::ThreeCheck,
            "timevsinsufficient" => GameResult::TimeVsInsufficient,
            "bughousepartnerlose" => GameResult::BughousePartnerLose,
            other => GameResult::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for GameResult {
    fn from(s: String) -> Self {
        GameResult::from(s.as_str())
    }
}

impl From<GameResult> for String {
    fn from(r: GameResult) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn color(self) -> shakmaty::Color {
        match self {
            Side::White => shakmaty::Color::White,
            Side::Black => shakmaty::Color::Black,
        }
    }
}

/// A game seen from the reference player's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedGame {
    pub id: String,
    pub date: DateTime<Utc>,
    pub date_key: String, // 'YYYY-MM-DD', UTC
    pub end_time: i64,
    pub time_control: String,
    pub side: Side,
    pub player_rating: i32,
    pub opponent_rating: i32,
    pub player_result: GameResult,
    pub opponent_result: GameResult,
    pub opening_label: String,
    #[serde(skip_serializing)]
    pub move_text: Option<String>,
}

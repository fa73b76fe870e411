#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use blunder_check::{EngineLauncher, EvalError, Evaluation, PositionEvaluator};
use chess_core::{ArchiveGames, ArchiveResponse, GameResult, PlayerRecord, RawGame};
use server::clients::{ClientError, GameArchive};

pub const PLAYER: &str = "KrisP";

/// 2024-01-01 00:00:00 UTC
pub const JAN_1_2024: i64 = 1_704_067_200;
pub const DAY: i64 = 86_400;

/// A rated game for `PLAYER` as White, ending `day` days after 2024-01-01 (noon UTC).
pub fn raw_game(id: u32, day: i64, rating: i32, player: &str, opponent: &str) -> RawGame {
    RawGame {
        url: format!("https://www.chess.com/game/live/{id}"),
        pgn: Some("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 1-0".to_string()),
        time_control: "600".to_string(),
        end_time: JAN_1_2024 + day * DAY + DAY / 2,
        rated: true,
        eco: Some("https://www.chess.com/openings/Ruy-Lopez-Opening-Morphy-Defense".to_string()),
        rules: Some("chess".to_string()),
        white: PlayerRecord {
            username: PLAYER.to_lowercase(),
            rating,
            result: GameResult::from(player),
        },
        black: PlayerRecord {
            username: "opponent".to_string(),
            rating: 1200,
            result: GameResult::from(opponent),
        },
    }
}

/// Same as `raw_game` with `PLAYER` on the black side.
pub fn raw_game_as_black(id: u32, day: i64, rating: i32, player: &str, opponent: &str) -> RawGame {
    let mut game = raw_game(id, day, rating, player, opponent);
    std::mem::swap(&mut game.white, &mut game.black);
    game
}

/// Engine that answers every position with the same side-to-move score.
pub struct ConstantEngine {
    pub answer: Evaluation,
}

impl PositionEvaluator for ConstantEngine {
    async fn evaluate(&mut self, _fen: &str, _depth: u32) -> Result<Evaluation, EvalError> {
        Ok(self.answer)
    }

    async fn shutdown(self) {}
}

/// Launches `ConstantEngine`s and counts sessions. Clones share the count.
#[derive(Clone)]
pub struct ConstantLauncher {
    pub answer: Evaluation,
    pub launched: Arc<AtomicUsize>,
}

impl ConstantLauncher {
    pub fn new(answer: Evaluation) -> Self {
        Self {
            answer,
            launched: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }
}

impl EngineLauncher for ConstantLauncher {
    type Engine = ConstantEngine;

    async fn launch(&self) -> Result<ConstantEngine, EvalError> {
        self.launched.fetch_add(1, Ordering::SeqCst);
        Ok(ConstantEngine { answer: self.answer })
    }
}

/// How one scripted engine session behaves.
#[derive(Clone, Copy, Debug)]
pub enum Session {
    Healthy,
    /// Request number `n` (0-based) never gets an answer.
    TimesOutAt(usize),
    /// Request number `n` gets a line the parser cannot use.
    GarbledAt(usize),
    FailsToLaunch,
}

pub struct ScriptedEngine {
    answer: Evaluation,
    session: Session,
    requests: usize,
    shut_down: Arc<AtomicUsize>,
}

impl PositionEvaluator for ScriptedEngine {
    async fn evaluate(&mut self, _fen: &str, _depth: u32) -> Result<Evaluation, EvalError> {
        let n = self.requests;
        self.requests += 1;
        match self.session {
            Session::TimesOutAt(at) if at == n => Err(EvalError::Timeout(Duration::from_millis(200))),
            Session::GarbledAt(at) if at == n => Err(EvalError::Protocol("EOF before bestmove".into())),
            _ => Ok(self.answer),
        }
    }

    async fn shutdown(self) {
        self.shut_down.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out sessions in launch order; launches past the script are healthy.
#[derive(Clone)]
pub struct ScriptedLauncher {
    pub answer: Evaluation,
    pub sessions: Vec<Session>,
    pub launched: Arc<AtomicUsize>,
    pub shut_down: Arc<AtomicUsize>,
}

impl ScriptedLauncher {
    pub fn new(answer: Evaluation, sessions: Vec<Session>) -> Self {
        Self {
            answer,
            sessions,
            launched: Arc::new(AtomicUsize::new(0)),
            shut_down: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn shut_down(&self) -> usize {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl EngineLauncher for ScriptedLauncher {
    type Engine = ScriptedEngine;

    async fn launch(&self) -> Result<ScriptedEngine, EvalError> {
        let k = self.launched.fetch_add(1, Ordering::SeqCst);
        let session = self.sessions.get(k).copied().unwrap_or(Session::Healthy);
        if let Session::FailsToLaunch = session {
            return Err(EvalError::Spawn("stockfish: No such file or directory".into()));
        }
        Ok(ScriptedEngine {
            answer: self.answer,
            session,
            requests: 0,
            shut_down: Arc::clone(&self.shut_down),
        })
    }
}

/// In-memory archive.
pub enum FakeArchive {
    Games(Vec<RawGame>),
    /// Raw archive body, decoded the way the chess.com client decodes it.
    Json(String),
    NotFound,
    Down,
}

impl GameArchive for FakeArchive {
    async fn fetch_month(&self, username: &str, _year: i32, _month: u32) -> Result<ArchiveGames, ClientError> {
        match self {
            FakeArchive::Games(games) => Ok(games.clone().into()),
            FakeArchive::Json(body) => serde_json::from_str::<ArchiveResponse>(body)
                .map(ArchiveResponse::into_games)
                .map_err(|e| ClientError::Transport(e.to_string())),
            FakeArchive::NotFound => Err(ClientError::PlayerNotFound(username.to_string())),
            FakeArchive::Down => Err(ClientError::Transport("connection refused".to_string())),
        }
    }

    async fn player_exists(&self, _username: &str) -> Result<bool, ClientError> {
        Ok(!matches!(self, FakeArchive::NotFound))
    }
}

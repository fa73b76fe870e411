//! UCI session over a Stockfish child process.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::engine::{EngineLauncher, Evaluation, PositionEvaluator};
use crate::error::EvalError;

/// One Stockfish process, used by a single game.
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    timeout: Duration,
}

impl StockfishEngine {
    /// Spawn the engine and complete the UCI handshake.
    pub async fn new(path: &str, timeout: Duration) -> Result<Self, EvalError> {
        Self::spawn(Command::new(path), timeout).await
    }

    async fn spawn(mut command: Command, timeout: Duration) -> Result<Self, EvalError> {
        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let mut process = command
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| EvalError::Spawn(format!("{program}: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| EvalError::Spawn("engine stdin unavailable".into()))?;
        let stdout = process
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| EvalError::Spawn("engine stdout unavailable".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout,
            timeout,
        };

        engine.send("uci").await?;
        engine.wait_for("uciok").await?;
        engine.send("setoption name Threads value 1").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    async fn send(&mut self, cmd: &str) -> Result<(), EvalError> {
        debug!(cmd, "SF <");
        self.stdin.write_all(format!("{cmd}\n").as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read until `expected`, bounded by the session timeout.
    async fn wait_for(&mut self, expected: &str) -> Result<(), EvalError> {
        tokio::time::timeout(self.timeout, read_until(&mut self.stdout, expected))
            .await
            .map_err(|_| EvalError::Timeout(self.timeout))?
    }

    /// Ask the engine to quit and reap the process. An engine that is still
    /// busy after the session timeout is killed.
    pub async fn quit(mut self) {
        let limit = self.timeout;
        let _ = tokio::time::timeout(limit, self.send("quit")).await;
        if tokio::time::timeout(limit, self.process.wait()).await.is_err() {
            warn!(?limit, "Engine ignored quit, killing it");
            let _ = self.process.start_kill();
            let _ = tokio::time::timeout(limit, self.process.wait()).await;
        }
    }
}

impl PositionEvaluator for StockfishEngine {
    async fn evaluate(&mut self, fen: &str, depth: u32) -> Result<Evaluation, EvalError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go depth {depth}")).await?;
        read_evaluation(&mut self.stdout, self.timeout).await
    }

    async fn shutdown(self) {
        self.quit().await;
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Sessions abandoned mid-search still release the process.
        let _ = self.process.start_kill();
    }
}

/// Spawns one Stockfish process per session.
#[derive(Clone, Debug)]
pub struct StockfishLauncher {
    pub path: String,
    pub timeout: Duration,
}

impl EngineLauncher for StockfishLauncher {
    type Engine = StockfishEngine;

    async fn launch(&self) -> Result<StockfishEngine, EvalError> {
        StockfishEngine::new(&self.path, self.timeout).await
    }
}

async fn read_until<R>(reader: &mut R, expected: &str) -> Result<(), EvalError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(EvalError::Protocol(format!("EOF while waiting for {expected}")));
        }
        let trimmed = line.trim();
        debug!(line = trimmed, "SF >");
        if trimmed == expected {
            return Ok(());
        }
    }
}

/// Read search output up to `bestmove`, bounded by `limit`.
pub(crate) async fn read_evaluation<R>(reader: &mut R, limit: Duration) -> Result<Evaluation, EvalError>
where
    R: AsyncBufRead + Unpin + Send,
{
    tokio::time::timeout(limit, read_search(reader))
        .await
        .map_err(|_| EvalError::Timeout(limit))?
}

/// Keep the most recent score reported before `bestmove`.
async fn read_search<R>(reader: &mut R) -> Result<Evaluation, EvalError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut latest: Option<Evaluation> = None;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(EvalError::Protocol("EOF before bestmove".into()));
        }
        let trimmed = line.trim();

        if trimmed.starts_with("info") {
            if let Some(score) = parse_score(trimmed) {
                latest = Some(score);
            }
        } else if trimmed.starts_with("bestmove") {
            debug!(line = trimmed, "SF >");
            return Ok(latest.unwrap_or_else(|| {
                warn!("Engine finished without a score, using 0");
                Evaluation::Centipawns(0)
            }));
        }
    }
}

/// Parse `score cp N` / `score mate N` from an info line
fn parse_score(line: &str) -> Option<Evaluation> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let i = parts.iter().position(|p| *p == "score")?;
    let value: i32 = parts.get(i + 2)?.parse().ok()?;
    match *parts.get(i + 1)? {
        "cp" => Some(Evaluation::Centipawns(value)),
        "mate" => Some(Evaluation::Mate(value)),
        _ => None,
    }
}

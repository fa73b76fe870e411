//! PGN move-text utilities: regex tokenizer plus a shakmaty-backed replay.

use std::sync::LazyLock;

use regex::Regex;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Color, EnPassantMode, Position};

use crate::error::CoreError;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}|;[^\n]*").unwrap());
static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static MOVE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.+").unwrap());

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Extract the move tokens from PGN text, in order.
///
/// Headers, comments (including chess.com `{[%clk ...]}` clocks),
/// variations, move numbers, NAGs and the result marker are dropped.
/// Everything else is returned as-is, so garbage surfaces later as an
/// illegal move instead of being silently skipped.
pub fn move_tokens(pgn: &str) -> Vec<String> {
    let no_headers = HEADER_RE.replace_all(pgn, " ");
    let no_comments = COMMENT_RE.replace_all(&no_headers, " ");
    let no_variations = VARIATION_RE.replace_all(&no_comments, " ");

    no_variations
        .split_whitespace()
        .filter_map(|raw| {
            let token = MOVE_NUMBER_RE.replace(raw, "");
            let token = token.trim_end_matches(['!', '?']);
            if token.is_empty() || token.starts_with('$') || RESULT_TOKENS.contains(&token) {
                None
            } else {
                Some(token.to_string())
            }
        })
        .collect()
}

/// One replayed half-move.
#[derive(Debug, Clone)]
pub struct Ply {
    pub index: usize,
    pub mover: Color,
    pub san: String,
    pub before: Chess,
    pub after: Chess,
}

/// Replays a game from the standard start position one half-move at a time.
/// Stops after the first illegal move.
pub struct Replay {
    tokens: std::vec::IntoIter<String>,
    pos: Chess,
    index: usize,
    failed: bool,
}

impl Replay {
    pub fn new(pgn: &str) -> Self {
        Self {
            tokens: move_tokens(pgn).into_iter(),
            pos: Chess::default(),
            index: 0,
            failed: false,
        }
    }
}

impl Iterator for Replay {
    type Item = Result<Ply, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.tokens.next()?;
        let index = self.index;

        let mv = token
            .parse::<SanPlus>()
            .ok()
            .and_then(|san| san.san.to_move(&self.pos).ok());
        let Some(mv) = mv else {
            self.failed = true;
            return Some(Err(CoreError::IllegalMove { ply: index, token }));
        };

        let before = self.pos.clone();
        self.pos.play_unchecked(mv);
        self.index += 1;

        Some(Ok(Ply {
            index,
            mover: before.turn(),
            san: token,
            before,
            after: self.pos.clone(),
        }))
    }
}

/// FEN of a position, as sent to a UCI engine.
pub fn to_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHESS_COM_PGN: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[White "krisp"]
[Black "opp"]
[Result "1-0"]
[ECO "C50"]

1. e4 {[%clk 0:09:58.1]} 1... e5 {[%clk 0:09:57]} 2. Nf3 {[%clk 0:09:55]} 2... Nc6 {[%clk 0:09:50]} 3. Bc4!? Bc5 $1 4. O-O (4. c3 Nf6) Nf6 1-0
"#;

    #[test]
    fn test_move_tokens_strip_pgn_noise() {
        assert_eq!(
            move_tokens(CHESS_COM_PGN),
            vec!["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O", "Nf6"]
        );
    }

    #[test]
    fn test_replay_alternates_sides() {
        let plies: Vec<Ply> = Replay::new(CHESS_COM_PGN).collect::<Result<_, _>>().unwrap();
        assert_eq!(plies.len(), 8);
        assert_eq!(plies[0].mover, Color::White);
        assert_eq!(plies[1].mover, Color::Black);
        assert_eq!(
            to_fen(&plies[0].after),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_fen_after_castling() {
        let plies: Vec<Ply> = Replay::new(CHESS_COM_PGN).collect::<Result<_, _>>().unwrap();
        assert_eq!(plies[6].san, "O-O");
        assert_eq!(
            to_fen(&plies[6].after),
            "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
        // The position before the move is left untouched.
        assert_eq!(to_fen(&plies[6].before), to_fen(&plies[5].after));
    }

    #[test]
    fn test_replay_stops_at_illegal_move() {
        let mut replay = Replay::new("1. e4 e5 2. Ke3 Nc6");
        assert!(replay.next().unwrap().is_ok());
        assert!(replay.next().unwrap().is_ok());
        match replay.next() {
            Some(Err(CoreError::IllegalMove { ply, token })) => {
                assert_eq!(ply, 2);
                assert_eq!(token, "Ke3");
            }
            other => panic!("expected illegal move, got {other:?}"),
        }
        assert!(replay.next().is_none());
    }

    #[test]
    fn test_replay_rejects_garbage_tokens() {
        let first = Replay::new("1. e4 banana").nth(1).unwrap();
        assert!(matches!(first, Err(CoreError::IllegalMove { ply: 1, .. })));
    }
}

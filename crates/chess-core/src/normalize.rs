//! Raw archive record -> player-centric game.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::game_data::{NormalizedGame, RawGame, Side};

const MAX_OPENING_WORDS: usize = 4;

static MOVE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.").unwrap());

/// Normalize one archive record from `username`'s point of view.
pub fn normalize_game(raw: &RawGame, username: &str) -> Result<NormalizedGame, CoreError> {
    let side = if raw.white.username.eq_ignore_ascii_case(username) {
        Side::White
    } else if raw.black.username.eq_ignore_ascii_case(username) {
        Side::Black
    } else {
        return Err(CoreError::MalformedGame(format!(
            "{username} is neither {} nor {}",
            raw.white.username, raw.black.username
        )));
    };

    let id = raw
        .url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::MalformedGame("game has no url".to_string()))?
        .to_string();

    let date = DateTime::from_timestamp(raw.end_time, 0).ok_or_else(|| {
        CoreError::MalformedGame(format!("end_time {} out of range", raw.end_time))
    })?;

    let (player, opponent) = match side {
        Side::White => (&raw.white, &raw.black),
        Side::Black => (&raw.black, &raw.white),
    };

    // Only resolved when the player had the first move.
    let opening_label = match (side, raw.eco.as_deref()) {
        (Side::White, Some(eco)) => opening_label(eco),
        _ => String::new(),
    };

    Ok(NormalizedGame {
        id,
        date,
        date_key: date.format("%Y-%m-%d").to_string(),
        end_time: raw.end_time,
        time_control: raw.time_control.clone(),
        side,
        player_rating: player.rating,
        opponent_rating: opponent.rating,
        player_result: player.result.clone(),
        opponent_result: opponent.result.clone(),
        opening_label,
        move_text: raw.pgn.clone(),
    })
}

/// Turn an opening URL such as
/// `https://www.chess.com/openings/Sicilian-Defense-Najdorf-Variation-6.Be3`
/// into a short display label (`Sicilian Defense Najdorf Variation...`).
pub fn opening_label(eco: &str) -> String {
    let slug = eco.rsplit('/').next().unwrap_or("");
    let spaced = slug.replace('-', " ");
    let name = MOVE_PREFIX_RE.replace_all(&spaced, "");
    let name = name.trim();

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > MAX_OPENING_WORDS {
        format!("{}...", words[..MAX_OPENING_WORDS].join(" "))
    } else {
        name.to_string()
    }
}

/// Result of normalizing one month of archive records.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Rated games, ascending by end time.
    pub games: Vec<NormalizedGame>,
    pub unrated: usize,
    pub skipped: usize,
}

/// Filter unrated games, normalize the rest and sort them chronologically.
/// Malformed records are skipped, never fatal.
pub fn normalize_batch(raws: &[RawGame], username: &str) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for raw in raws {
        if !raw.rated {
            batch.unrated += 1;
            continue;
        }
        match normalize_game(raw, username) {
            Ok(game) => batch.games.push(game),
            Err(e) => {
                warn!(url = %raw.url, error = %e, "Skipping game");
                batch.skipped += 1;
            }
        }
    }

    batch.games.sort_by_key(|g| g.end_time);
    debug!(
        games = batch.games.len(),
        unrated = batch.unrated,
        skipped = batch.skipped,
        "Normalized batch"
    );
    batch
}

//! One player's month: fetch, normalize, aggregate, optionally blunder-check.

use blunder_check::{BlunderEvaluator, BlunderReport, EngineLauncher};
use chess_core::stats::{DailyRatingSeries, MonthlyDelta, OpeningCounts};
use chess_core::{normalize_batch, ArchiveGames, MonthlyStats, StatsSummary};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::clients::{ClientError, GameArchive};
use crate::render;

pub const NO_GAMES_MESSAGE: &str =
    "Sorry, no games found for this month. Please select a different month.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MonthRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 2007, max = 2100))]
    pub year: i32,
    #[serde(default)]
    pub blunders: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    pub username: String,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub summary: StatsSummary,
    pub summary_text: String,
    pub rating_series: DailyRatingSeries,
    pub openings: OpeningCounts,
    pub monthly_deltas: Vec<MonthlyDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blunders: Option<BlunderReport>,
    pub skipped_games: usize,
}

#[derive(Debug, Clone)]
pub enum ReportOutcome {
    PlayerNotFound,
    /// Nothing rated to report on for that month.
    NoResults,
    Report(Box<MonthReport>),
}

pub async fn build_month_report<A, L>(
    archive: &A,
    evaluator: Option<&BlunderEvaluator<L>>,
    req: &MonthRequest,
) -> ReportOutcome
where
    A: GameArchive,
    L: EngineLauncher,
{
    let fetched = match archive.fetch_month(&req.username, req.year, req.month).await {
        Ok(fetched) => fetched,
        Err(ClientError::PlayerNotFound(_)) => return ReportOutcome::PlayerNotFound,
        Err(e) => {
            warn!(username = %req.username, error = %e, "Archive fetch failed, treating as empty");
            ArchiveGames::default()
        }
    };

    let mut batch = normalize_batch(&fetched.games, &req.username);
    batch.skipped += fetched.malformed;
    info!(
        username = %req.username,
        year = req.year,
        month = req.month,
        fetched = fetched.games.len() + fetched.malformed,
        skipped = batch.skipped,
        rated = batch.games.len(),
        "Month loaded"
    );
    if batch.games.is_empty() {
        return ReportOutcome::NoResults;
    }

    let blunders = match (req.blunders, evaluator) {
        (true, Some(evaluator)) => Some(evaluator.evaluate_batch(&batch.games).await),
        (true, None) => {
            warn!("Blunder check requested but no engine configured");
            None
        }
        _ => None,
    };

    let stats = MonthlyStats::compute(&batch.games)
        .with_blunders(blunders.as_ref().map_or(0, |b| b.total));
    let month_name = render::month_name(req.month);
    let summary_text = render::render_summary(&stats.summary, month_name, &req.username);

    ReportOutcome::Report(Box::new(MonthReport {
        username: req.username.clone(),
        year: req.year,
        month: req.month,
        month_name,
        summary: stats.summary,
        summary_text,
        rating_series: stats.rating_series,
        openings: stats.openings,
        monthly_deltas: stats.monthly_deltas,
        blunders,
        skipped_games: batch.skipped,
    }))
}

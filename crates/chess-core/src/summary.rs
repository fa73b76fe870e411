//! Everything the presentation layer needs for one month.

use serde::Serialize;

use crate::game_data::NormalizedGame;
use crate::stats::{
    daily_rating_series, monthly_deltas, opening_counts, outcome_stats, DailyRatingSeries,
    MonthlyDelta, OpeningCounts, OutcomeStats,
};

/// Outcome counters plus the blunder total, for textual rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(flatten)]
    pub outcomes: OutcomeStats,
    pub total_blunders: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub summary: StatsSummary,
    pub rating_series: DailyRatingSeries,
    pub openings: OpeningCounts,
    pub monthly_deltas: Vec<MonthlyDelta>,
}

impl MonthlyStats {
    /// Run every aggregation. Input is sorted here if the caller did not.
    pub fn compute(games: &[NormalizedGame]) -> Self {
        let mut sorted = games.to_vec();
        sorted.sort_by_key(|g| g.end_time);

        // Cannot fail on sorted input.
        let rating_series = daily_rating_series(&sorted).unwrap_or_default();

        Self {
            summary: StatsSummary {
                outcomes: outcome_stats(&sorted),
                total_blunders: 0,
            },
            rating_series,
            openings: opening_counts(&sorted),
            monthly_deltas: monthly_deltas(&sorted),
        }
    }

    pub fn with_blunders(mut self, total: u32) -> Self {
        self.summary.total_blunders = total;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.summary.outcomes.num_games == 0
    }
}

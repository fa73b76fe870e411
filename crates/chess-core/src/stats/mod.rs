//! Pure aggregations over a month of normalized games.

pub mod monthly;
pub mod openings;
pub mod outcomes;
pub mod rating_series;

pub use monthly::{monthly_deltas, MonthlyDelta};
pub use openings::{opening_counts, OpeningCounts};
pub use outcomes::{outcome_stats, OutcomeStats};
pub use rating_series::{daily_rating_series, DailyRatingSeries, RatingPoint};

use crate::error::CoreError;
use crate::game_data::NormalizedGame;

/// Reject input that is not ascending by end time.
pub(crate) fn ensure_chronological(games: &[NormalizedGame]) -> Result<(), CoreError> {
    match games.windows(2).position(|w| w[1].end_time < w[0].end_time) {
        Some(i) => Err(CoreError::UnsortedInput { index: i + 1 }),
        None => Ok(()),
    }
}

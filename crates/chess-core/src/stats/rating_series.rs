use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::ensure_chronological;
use crate::error::CoreError;
use crate::game_data::NormalizedGame;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingPoint {
    pub date: NaiveDate,
    pub rating: Option<i32>,
}

/// One point per calendar day from the first to the last game day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyRatingSeries {
    pub points: Vec<RatingPoint>,
}

impl DailyRatingSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Chart labels (`YYYY-MM-DD`) and values.
    pub fn labels_and_values(&self) -> (Vec<String>, Vec<Option<i32>>) {
        self.points
            .iter()
            .map(|p| (p.date.format("%Y-%m-%d").to_string(), p.rating))
            .unzip()
    }
}

/// Build the daily rating series, carrying the last known rating over days
/// without games. A day with several games keeps its last rating.
pub fn daily_rating_series(games: &[NormalizedGame]) -> Result<DailyRatingSeries, CoreError> {
    ensure_chronological(games)?;

    let (Some(first), Some(last)) = (games.first(), games.last()) else {
        return Ok(DailyRatingSeries::default());
    };

    let mut by_day: HashMap<NaiveDate, i32> = HashMap::new();
    for g in games {
        by_day.insert(g.date.date_naive(), g.player_rating);
    }

    let start = first.date.date_naive();
    let end = last.date.date_naive();

    let mut points = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut carry: Option<i32> = None;
    for date in start.iter_days().take_while(|d| *d <= end) {
        if let Some(&rating) = by_day.get(&date) {
            carry = Some(rating);
        }
        points.push(RatingPoint { date, rating: carry });
    }

    Ok(DailyRatingSeries { points })
}

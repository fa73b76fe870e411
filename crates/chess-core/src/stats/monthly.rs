use std::collections::BTreeMap;

use serde::Serialize;

use crate::game_data::NormalizedGame;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyDelta {
    /// `YYYY-MM`, UTC.
    pub month: String,
    pub change: i32,
}

/// First-to-last rating change per calendar month, oldest month first.
/// First and last follow input order, so pass chronological games.
pub fn monthly_deltas(games: &[NormalizedGame]) -> Vec<MonthlyDelta> {
    // `YYYY-MM` sorts chronologically as a string.
    let mut by_month: BTreeMap<String, (i32, i32)> = BTreeMap::new();
    for g in games {
        let key = g.date.format("%Y-%m").to_string();
        by_month
            .entry(key)
            .and_modify(|(_, last)| *last = g.player_rating)
            .or_insert((g.player_rating, g.player_rating));
    }

    by_month
        .into_iter()
        .map(|(month, (first, last))| MonthlyDelta { month, change: last - first })
        .collect()
}

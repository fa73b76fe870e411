//! Text summary and chart series for the presentation layer.

use std::collections::HashMap;

use chess_core::stats::{DailyRatingSeries, MonthlyDelta, OpeningCounts};
use chess_core::StatsSummary;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const BAR_WIDTH: usize = 40;

/// English month name for 1-12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown month")
}

fn details(parts: &[(u32, &str)]) -> String {
    parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, what)| format!("{n} {what}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_details(sentence: String, details: String) -> String {
    if details.is_empty() {
        sentence
    } else {
        format!("{sentence} ({details})")
    }
}

/// The month's results as a few plain sentences.
pub fn render_summary(summary: &StatsSummary, month_name: &str, username: &str) -> String {
    let o = &summary.outcomes;

    let wins = with_details(
        format!("They won {} games", o.wins),
        details(&[
            (o.opp_resigned, "resignations"),
            (o.opp_checkmated, "checkmates"),
            (o.opp_timeout, "timeouts"),
            (o.opp_abandoned, "abandoned"),
        ]),
    );
    let draws = if o.draws > 0 {
        format!(", drew {} games", o.draws)
    } else {
        String::new()
    };
    let losses = with_details(
        format!("lost {} games", o.losses),
        details(&[
            (o.resigned, "resignations"),
            (o.checkmated, "checkmates"),
            (o.timeouts, "timeouts"),
            (o.abandoned, "abandoned"),
        ]),
    );
    let win_rate = match o.win_rate {
        Some(rate) => format!("That's a win rate of {rate:.2}%."),
        None => "Win rate: no data.".to_string(),
    };

    [
        format!("{username} played {} games in {month_name}.", o.num_games),
        format!("{wins}{draws} and {losses}."),
        win_rate,
        format!("Their ELO change over the month was: {}", o.rating_change),
        format!("Blunders found: {}", summary.total_blunders),
    ]
    .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartKind {
    Rating,
    Openings,
    MonthlyDelta,
}

/// Labeled series handed to a chart widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Option<i64>>,
}

impl Chart {
    /// Line chart of the daily series, titled "<Month> <Year>" of its first day.
    pub fn rating(series: &DailyRatingSeries) -> Self {
        let title = series
            .points
            .first()
            .map(|p| {
                use chrono::Datelike;
                format!("{} {}", month_name(p.date.month()), p.date.year())
            })
            .unwrap_or_default();
        let (labels, values) = series.labels_and_values();
        Self {
            kind: ChartKind::Rating,
            title,
            labels,
            values: values.into_iter().map(|v| v.map(i64::from)).collect(),
        }
    }

    /// Horizontal bars, most played first.
    pub fn openings(counts: &OpeningCounts) -> Self {
        let (labels, values) = counts
            .by_count_desc()
            .into_iter()
            .map(|(label, n)| (label.to_string(), Some(i64::from(n))))
            .unzip();
        Self {
            kind: ChartKind::Openings,
            title: "Times Played".to_string(),
            labels,
            values,
        }
    }

    pub fn monthly(deltas: &[MonthlyDelta]) -> Self {
        Self {
            kind: ChartKind::MonthlyDelta,
            title: "Rating change per month".to_string(),
            labels: deltas.iter().map(|d| d.month.clone()).collect(),
            values: deltas.iter().map(|d| Some(i64::from(d.change))).collect(),
        }
    }

    /// Plain-text bar rendering for terminals.
    pub fn render_text(&self) -> String {
        let present: Vec<i64> = self.values.iter().flatten().copied().collect();
        let signed = present.iter().any(|v| *v < 0);
        // Ratings sit far from zero, so scale them from the lowest value.
        let floor = match self.kind {
            ChartKind::Rating => present.iter().min().copied().unwrap_or(0),
            _ => 0,
        };
        let span = present
            .iter()
            .map(|v| if signed { v.abs() } else { v - floor })
            .max()
            .unwrap_or(0)
            .max(1);
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);

        let mut out = format!("{}\n", self.title);
        for (label, value) in self.labels.iter().zip(&self.values) {
            let line = match value {
                None => format!("{label:<label_width$} |"),
                Some(v) => {
                    let magnitude = if signed { v.abs() } else { v - floor };
                    let len = (magnitude as usize * BAR_WIDTH / span as usize).max(1);
                    let glyph = if *v < 0 { "-" } else { "#" };
                    format!("{label:<label_width$} |{} {v}", glyph.repeat(len))
                }
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Holds at most one live chart per kind.
#[derive(Debug, Default)]
pub struct ChartBoard {
    charts: HashMap<ChartKind, Chart>,
}

impl ChartBoard {
    /// Install `chart`, handing back the one it displaces.
    pub fn replace(&mut self, chart: Chart) -> Option<Chart> {
        self.charts.insert(chart.kind, chart)
    }

    pub fn get(&self, kind: ChartKind) -> Option<&Chart> {
        self.charts.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut kinds: Vec<&ChartKind> = self.charts.keys().collect();
        kinds.sort();
        kinds
            .into_iter()
            .map(|k| self.charts[k].render_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

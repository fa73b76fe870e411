use std::collections::BTreeMap;

use serde::Serialize;

use crate::game_data::NormalizedGame;

/// Above this many games the significance threshold is raised.
const LARGE_SAMPLE: usize = 100;
const LARGE_SAMPLE_MIN_COUNT: u32 = 5;
const SMALL_SAMPLE_MIN_COUNT: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OpeningCounts {
    pub counts: BTreeMap<String, u32>,
}

impl OpeningCounts {
    pub fn get(&self, label: &str) -> Option<u32> {
        self.counts.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Most played first, ties alphabetical.
    pub fn by_count_desc(&self) -> Vec<(&str, u32)> {
        let mut rows: Vec<(&str, u32)> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

pub fn min_count_for(total_games: usize) -> u32 {
    if total_games > LARGE_SAMPLE {
        LARGE_SAMPLE_MIN_COUNT
    } else {
        SMALL_SAMPLE_MIN_COUNT
    }
}

/// Count opening labels, dropping the ones played too rarely to matter.
pub fn opening_counts(games: &[NormalizedGame]) -> OpeningCounts {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for g in games.iter().filter(|g| !g.opening_label.is_empty()) {
        *counts.entry(g.opening_label.clone()).or_insert(0) += 1;
    }

    let min_count = min_count_for(games.len());
    counts.retain(|_, n| *n >= min_count);
    OpeningCounts { counts }
}

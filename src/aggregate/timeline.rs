//! Play-clock usage: the selected passer against every other passer and the sample.

use crate::classify::{ClassifiedPlay, PlayClockBin};
use serde::Serialize;
use std::collections::BTreeMap;

pub const BASELINE_LABEL: &str = "Sample Average";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Reference,
    Baseline,
    Selected,
}

/// Share of attempts per play-clock bucket, aligned with [`Timeline::buckets`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSeries {
    pub label: String,
    pub role: SeriesRole,
    pub shares: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub buckets: Vec<PlayClockBin>,
    pub series: Vec<TimelineSeries>,
}

impl Timeline {
    /// Bucket axis with no series.
    pub fn empty() -> Self {
        Self {
            buckets: PlayClockBin::ALL.to_vec(),
            series: Vec::new(),
        }
    }
}

#[derive(Default)]
struct BucketCounts {
    counts: [u64; PlayClockBin::ALL.len()],
    total: u64,
}

impl BucketCounts {
    fn add(&mut self, bin: PlayClockBin) {
        self.counts[bin.index()] += 1;
        self.total += 1;
    }

    fn shares(&self) -> Option<Vec<f64>> {
        if self.total == 0 {
            return None;
        }
        Some(
            self.counts
                .iter()
                .map(|c| *c as f64 / self.total as f64)
                .collect(),
        )
    }
}

/// Build the timeline.
///
/// `population` is the broad rowset (only the play-clock and temporal windows
/// applied); `selected` is the passer's fully filtered view. Series order:
/// one reference line per other passer by name, the baseline, then the
/// selected passer. Passers with no attempts get no series.
pub fn play_clock_timeline(
    population: &[ClassifiedPlay<'_>],
    selected: &[ClassifiedPlay<'_>],
    passer: &str,
) -> Timeline {
    let mut per_passer: BTreeMap<&str, BucketCounts> = BTreeMap::new();
    let mut baseline = BucketCounts::default();
    for p in population {
        baseline.add(p.play_clock);
        if !p.record.passer.is_empty() {
            per_passer
                .entry(p.record.passer.as_str())
                .or_default()
                .add(p.play_clock);
        }
    }

    let mut own = BucketCounts::default();
    for p in selected {
        own.add(p.play_clock);
    }

    let mut timeline = Timeline::empty();
    for (name, counts) in &per_passer {
        if *name == passer {
            continue;
        }
        if let Some(shares) = counts.shares() {
            timeline.series.push(TimelineSeries {
                label: name.to_string(),
                role: SeriesRole::Reference,
                shares,
            });
        }
    }
    if let Some(shares) = baseline.shares() {
        timeline.series.push(TimelineSeries {
            label: BASELINE_LABEL.to_string(),
            role: SeriesRole::Baseline,
            shares,
        });
    }
    if let Some(shares) = own.shares() {
        timeline.series.push(TimelineSeries {
            label: passer.to_string(),
            role: SeriesRole::Selected,
            shares,
        });
    }
    timeline
}

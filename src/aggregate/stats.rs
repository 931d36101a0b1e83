//! Per-passer tendency table and the selected passer's summary.

use crate::classify::{ClassifiedPlay, DepthBin};
use crate::play::PlayRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasserStats {
    pub passer: String,
    pub attempts: u64,
    pub short_pct: f64,
    pub intermediate_pct: f64,
    pub deep_pct: f64,
    pub avg_epa: Option<f64>,
    pub completion_pct: f64,
    pub avg_air_yards: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasserSummary {
    pub passer: String,
    pub attempts: u64,
    pub completions: u64,
    pub completion_pct: f64,
    pub total_epa: f64,
    pub avg_epa: Option<f64>,
    pub total_air_yards: f64,
    pub avg_air_yards: Option<f64>,
    /// Share of attempts per depth bin, in [`DepthBin::ALL`] order.
    pub depth_shares: Vec<f64>,
}

/// Running sums over a passer's attempts.
#[derive(Default)]
struct Tally {
    attempts: u64,
    completions: u64,
    depth: [u64; 3],
    epa: Mean,
    air_yards: Mean,
}

/// Mean over the present, finite values only.
#[derive(Default)]
struct Mean {
    sum: f64,
    n: u64,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            self.sum += v;
            self.n += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

impl Tally {
    fn add(&mut self, play: &ClassifiedPlay<'_>) {
        let record: &PlayRecord = play.record;
        self.attempts += 1;
        self.completions += u64::from(record.complete_pass);
        self.depth[play.depth.index()] += 1;
        self.epa.add(record.epa);
        self.air_yards.add(record.air_yards);
    }

    fn share(&self, count: u64) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            count as f64 / self.attempts as f64
        }
    }
}

/// One row per passer in the population, sorted by name.
pub fn passer_stats(population: &[ClassifiedPlay<'_>]) -> Vec<PasserStats> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for p in population {
        if p.record.passer.is_empty() {
            continue;
        }
        tallies.entry(p.record.passer.as_str()).or_default().add(p);
    }

    tallies
        .into_iter()
        .map(|(passer, t)| PasserStats {
            passer: passer.to_string(),
            attempts: t.attempts,
            short_pct: t.share(t.depth[DepthBin::Short.index()]),
            intermediate_pct: t.share(t.depth[DepthBin::Intermediate.index()]),
            deep_pct: t.share(t.depth[DepthBin::Deep.index()]),
            avg_epa: t.epa.get(),
            completion_pct: t.share(t.completions),
            avg_air_yards: t.air_yards.get(),
        })
        .collect()
}

pub fn passer_summary(plays: &[ClassifiedPlay<'_>], passer: &str) -> PasserSummary {
    let mut t = Tally::default();
    for p in plays {
        t.add(p);
    }

    PasserSummary {
        passer: passer.to_string(),
        attempts: t.attempts,
        completions: t.completions,
        completion_pct: t.share(t.completions),
        total_epa: t.epa.sum,
        avg_epa: t.epa.get(),
        total_air_yards: t.air_yards.sum,
        avg_air_yards: t.air_yards.get(),
        depth_shares: t.depth.iter().map(|c| t.share(*c)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use pretty_assertions::assert_eq;

    fn attempt(passer: &str, air_yards: Option<f64>, epa: Option<f64>, complete: bool) -> PlayRecord {
        PlayRecord {
            passer: passer.to_string(),
            air_yards,
            epa,
            complete_pass: complete,
            ..Default::default()
        }
    }

    #[test]
    fn depth_shares_sum_to_one() {
        let plays: Vec<PlayRecord> = (0..41)
            .map(|i| {
                let passer = ["A", "B", "C"][i % 3];
                attempt(passer, Some(i as f64 - 5.0), Some(0.1), i % 2 == 0)
            })
            .chain([attempt("D", None, None, false)])
            .collect();

        for row in passer_stats(&classify(&plays)) {
            let sum = row.short_pct + row.intermediate_pct + row.deep_pct;
            assert!((sum - 1.0).abs() < 1e-6, "{}: {}", row.passer, sum);
        }
    }

    #[test]
    fn stats_row_per_passer() {
        let plays = [
            attempt("T.Brady", Some(5.0), Some(1.0), true),
            attempt("T.Brady", Some(15.0), Some(-0.5), false),
            attempt("T.Brady", None, None, true),
            attempt("A.Rodgers", Some(30.0), Some(2.0), true),
            attempt("", Some(30.0), Some(2.0), true),
        ];
        let rows = passer_stats(&classify(&plays));
        assert_eq!(rows.len(), 2);

        assert_eq!(
            rows[0],
            PasserStats {
                passer: "A.Rodgers".into(),
                attempts: 1,
                short_pct: 0.0,
                intermediate_pct: 0.0,
                deep_pct: 1.0,
                avg_epa: Some(2.0),
                completion_pct: 1.0,
                avg_air_yards: Some(30.0),
            }
        );

        let brady = &rows[1];
        assert_eq!(brady.attempts, 3);
        assert!((brady.short_pct - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(brady.avg_epa, Some(0.25));
        assert_eq!(brady.avg_air_yards, Some(10.0));
    }

    #[test]
    fn summary_of_filtered_rows() {
        let plays = [
            attempt("T.Brady", Some(8.0), Some(0.5), true),
            attempt("T.Brady", Some(22.0), Some(-1.5), false),
        ];
        let s = passer_summary(&classify(&plays), "T.Brady");
        assert_eq!(s.attempts, 2);
        assert_eq!(s.completions, 1);
        assert_eq!(s.completion_pct, 0.5);
        assert_eq!(s.total_epa, -1.0);
        assert_eq!(s.avg_epa, Some(-0.5));
        assert_eq!(s.total_air_yards, 30.0);
        assert_eq!(s.depth_shares, vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn empty_summary_has_no_means() {
        let s = passer_summary(&[], "T.Brady");
        assert_eq!(s.attempts, 0);
        assert_eq!(s.avg_epa, None);
        assert_eq!(s.completion_pct, 0.0);
        assert_eq!(s.depth_shares, vec![0.0, 0.0, 0.0]);
    }
}

//! Polar histograms: direction x depth, and receiver x outcome.

use crate::aggregate::rank_receivers;
use crate::classify::{ClassifiedPlay, DepthBin, DirectionBin, OutcomeBin};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Receivers shown in the receiver rose.
pub const TOP_RECEIVERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionDepthCount {
    pub direction: DirectionBin,
    pub depth: DepthBin,
    pub frequency: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiverOutcomeCount {
    pub receiver: String,
    pub outcome: OutcomeBin,
    pub frequency: u64,
}

/// All 24 (direction, depth) pairs at zero, direction-major.
pub fn direction_depth_template() -> Vec<DirectionDepthCount> {
    DirectionBin::ALL
        .into_iter()
        .flat_map(|direction| {
            DepthBin::ALL.into_iter().map(move |depth| DirectionDepthCount {
                direction,
                depth,
                frequency: 0,
            })
        })
        .collect()
}

pub fn rose_by_direction(plays: &[ClassifiedPlay<'_>]) -> Vec<DirectionDepthCount> {
    let mut counts: BTreeMap<(DirectionBin, DepthBin), u64> = BTreeMap::new();
    for p in plays {
        *counts.entry((p.direction, p.depth)).or_insert(0) += 1;
    }

    let mut rows = direction_depth_template();
    for row in &mut rows {
        if let Some(n) = counts.get(&(row.direction, row.depth)) {
            row.frequency = *n;
        }
    }
    rows
}

/// Observed (receiver, outcome) pairs for the most-targeted receivers.
///
/// Rows are ordered by receiver rank, then outcome priority.
pub fn rose_by_receiver(plays: &[ClassifiedPlay<'_>]) -> Vec<ReceiverOutcomeCount> {
    let top: Vec<(String, u64)> = rank_receivers(plays.iter().map(|p| p.record))
        .into_iter()
        .take(TOP_RECEIVERS)
        .collect();
    let kept: BTreeSet<&str> = top.iter().map(|(name, _)| name.as_str()).collect();

    let mut counts: BTreeMap<(&str, OutcomeBin), u64> = BTreeMap::new();
    for p in plays {
        let Some(receiver) = p.record.receiver.as_deref() else {
            continue;
        };
        if kept.contains(receiver) {
            *counts.entry((receiver, p.outcome)).or_insert(0) += 1;
        }
    }

    let mut rows = Vec::new();
    for (receiver, _) in &top {
        for outcome in OutcomeBin::ALL {
            if let Some(n) = counts.get(&(receiver.as_str(), outcome)) {
                rows.push(ReceiverOutcomeCount {
                    receiver: receiver.clone(),
                    outcome,
                    frequency: *n,
                });
            }
        }
    }
    rows
}

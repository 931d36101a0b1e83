//! Chart-ready aggregates. Every function here is pure over the rows it is given.

pub mod rose;
pub mod sankey;
pub mod spatial;
pub mod stats;
pub mod timeline;

pub use rose::{
    DirectionDepthCount, ReceiverOutcomeCount, direction_depth_template, rose_by_direction,
    rose_by_receiver,
};
pub use sankey::{SankeyGraph, sankey_graph};
pub use spatial::{DensityCell, SpatialPoint, pass_density, spatial_points};
pub use stats::{PasserStats, PasserSummary, passer_stats, passer_summary};
pub use timeline::{Timeline, play_clock_timeline};

use crate::play::PlayRecord;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Targeted receivers with their counts: count descending, then name ascending.
pub(crate) fn rank_receivers<'a>(
    plays: impl IntoIterator<Item = &'a PlayRecord>,
) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for p in plays {
        if let Some(receiver) = p.receiver.as_deref() {
            *counts.entry(receiver).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    // Stable sort keeps the name order among equal counts.
    ranked.sort_by_key(|(_, n)| Reverse(*n));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ranking_is_count_then_name() {
        let plays: Vec<PlayRecord> = ["C", "B", "C", "A", "B", "D"]
            .into_iter()
            .map(|r| PlayRecord {
                receiver: Some(r.to_string()),
                ..Default::default()
            })
            .chain([PlayRecord::default()])
            .collect();

        assert_eq!(
            rank_receivers(&plays),
            vec![
                ("B".to_string(), 2),
                ("C".to_string(), 2),
                ("A".to_string(), 1),
                ("D".to_string(), 1),
            ]
        );
    }
}

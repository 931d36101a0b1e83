//! QB -> receiver -> depth flow graph.

use crate::aggregate::rank_receivers;
use crate::classify::{ClassifiedPlay, DepthBin};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

pub const NODE_COLOR: &str = "rgb(233,84,32)";
pub const RECEIVER_LINK_COLOR: &str = "#FBCEB6";
pub const FALLBACK_LINK_COLOR: &str = "#cccccc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SankeyNode {
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: u64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SankeyGraph {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyGraph {
    pub fn empty() -> Self {
        Self::default()
    }

    fn push_node(&mut self, label: &str) -> usize {
        self.nodes.push(SankeyNode {
            label: label.to_string(),
            color: NODE_COLOR,
        });
        self.nodes.len() - 1
    }
}

/// Link color for a receiver -> depth edge, keyed by depth label.
pub fn depth_link_color(label: &str) -> &'static str {
    match label {
        "0-10 yd" => "#511479",
        "10-20 yd" => "#8B2880",
        "20+ yd" => "#C63E73",
        _ => FALLBACK_LINK_COLOR,
    }
}

/// Build the graph from the passer's targeted rows.
///
/// Node 0 is the passer, receivers follow by target count, and depth nodes
/// are appended in the order the ranked (receiver, depth) edges reach them.
/// Untargeted rows are ignored; with none left the graph is empty.
pub fn sankey_graph(plays: &[ClassifiedPlay<'_>], passer: &str) -> SankeyGraph {
    let receivers = rank_receivers(plays.iter().map(|p| p.record));
    if receivers.is_empty() {
        return SankeyGraph::empty();
    }

    let mut graph = SankeyGraph::empty();
    let qb = graph.push_node(passer);

    let mut receiver_index: BTreeMap<&str, usize> = BTreeMap::new();
    for (name, count) in &receivers {
        let idx = graph.push_node(name);
        receiver_index.insert(name.as_str(), idx);
        graph.links.push(SankeyLink {
            source: qb,
            target: idx,
            value: *count,
            color: RECEIVER_LINK_COLOR,
        });
    }

    // 1) Count (receiver, depth) pairs.
    let mut pairs: BTreeMap<(&str, DepthBin), u64> = BTreeMap::new();
    for p in plays {
        if let Some(receiver) = p.record.receiver.as_deref() {
            *pairs.entry((receiver, p.depth)).or_insert(0) += 1;
        }
    }

    // 2) Rank them: count desc, then receiver name, then depth order.
    let mut ranked: Vec<((&str, DepthBin), u64)> = pairs.into_iter().collect();
    ranked.sort_by_key(|((receiver, depth), count)| (Reverse(*count), *receiver, *depth));

    // 3) Depth nodes are created on first sight.
    let mut depth_index: BTreeMap<DepthBin, usize> = BTreeMap::new();
    for ((receiver, depth), count) in ranked {
        let target = match depth_index.get(&depth) {
            Some(idx) => *idx,
            None => {
                let idx = graph.push_node(depth.label());
                depth_index.insert(depth, idx);
                idx
            }
        };
        let Some(source) = receiver_index.get(receiver) else {
            continue;
        };
        graph.links.push(SankeyLink {
            source: *source,
            target,
            value: count,
            color: depth_link_color(depth.label()),
        });
    }

    graph
}

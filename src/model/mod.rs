//! Dashboard model: one filter selection in, every chart-ready aggregate out.

use crate::aggregate::{
    DensityCell, DirectionDepthCount, PasserStats, PasserSummary, ReceiverOutcomeCount,
    SankeyGraph, SpatialPoint, Timeline, direction_depth_template, pass_density, passer_stats,
    passer_summary, play_clock_timeline, rose_by_direction, rose_by_receiver, sankey_graph,
    spatial_points,
};
use crate::classify::classify;
use crate::filter::FilterSpec;
use crate::filter::temporal::apply_temporal_window;
use crate::gateway::DatasetGateway;
use crate::query::{compile, compile_population};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub passer: String,
    pub points: Vec<SpatialPoint>,
    pub density: Vec<DensityCell>,
    pub rose_direction: Vec<DirectionDepthCount>,
    pub rose_receiver: Vec<ReceiverOutcomeCount>,
    pub timeline: Timeline,
    pub sankey: SankeyGraph,
    pub stats: Vec<PasserStats>,
    pub summary: Option<PasserSummary>,
}

impl DashboardData {
    /// Every view in its empty shape. The direction rose keeps its 24 zero rows.
    pub fn empty(passer: &str) -> Self {
        Self {
            passer: passer.to_string(),
            points: Vec::new(),
            density: Vec::new(),
            rose_direction: direction_depth_template(),
            rose_receiver: Vec::new(),
            timeline: Timeline::empty(),
            sankey: SankeyGraph::empty(),
            stats: Vec::new(),
            summary: None,
        }
    }
}

/// Build every view for one filter selection.
///
/// Never fails: a missing passer, a missing dataset or a failed fetch is
/// logged and yields [`DashboardData::empty`].
pub fn build_dashboard(gateway: Option<&dyn DatasetGateway>, filter: &FilterSpec) -> DashboardData {
    let passer = filter.passer();

    // 1) Compile before touching the dataset.
    let query = match compile(filter) {
        Ok(q) => q,
        Err(e) => {
            log::info!("{}; returning empty dashboard", e);
            return DashboardData::empty(passer);
        }
    };
    let Some(gateway) = gateway else {
        log::warn!("no dataset available; returning empty dashboard");
        return DashboardData::empty(passer);
    };

    // 2) Fetch the selected view and the reference population.
    let population_query = compile_population(filter);
    let (selected_rows, population_rows) =
        match (gateway.fetch(&query), gateway.fetch(&population_query)) {
            (Ok(s), Ok(p)) => (s, p),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("fetch failed for {}: {}", passer, e);
                return DashboardData::empty(passer);
            }
        };
    log::debug!(
        "fetched {} selected rows, {} population rows",
        selected_rows.len(),
        population_rows.len()
    );

    // 3) Post-fetch temporal pass, then classify.
    let selected_rows = apply_temporal_window(selected_rows, filter);
    let population_rows = apply_temporal_window(population_rows, filter);
    let selected = classify(&selected_rows);
    let population = classify(&population_rows);

    log::info!(
        "{}: {} attempts in view, {} in population",
        passer,
        selected.len(),
        population.len()
    );

    // 4) Aggregate.
    DashboardData {
        passer: passer.to_string(),
        points: spatial_points(&selected_rows),
        density: pass_density(&selected_rows),
        rose_direction: rose_by_direction(&selected),
        rose_receiver: rose_by_receiver(&selected),
        timeline: play_clock_timeline(&population, &selected, passer),
        sankey: sankey_graph(&selected, passer),
        stats: passer_stats(&population),
        summary: Some(passer_summary(&selected, passer)),
    }
}

//! Pass locations in field units, plus the density layer drawn under them.

use crate::play::PlayRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field units before the goal line (the end zone).
pub const END_ZONE_OFFSET: f64 = 30.0;
/// Field units per yard.
pub const UNITS_PER_YARD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub receiver: Option<String>,
    pub air_yards: Option<f64>,
    pub down: Option<u8>,
    pub distance: Option<u32>,
    pub date: String,
    pub play_clock: Option<f64>,
    pub passer: String,
    pub posteam: Option<String>,
    pub defteam: Option<String>,
    pub epa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialPoint {
    pub x: f64,
    pub y: f64,
    pub tooltip: Tooltip,
}

/// One-yard cell; `x`/`y` are the cell origin in field units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCell {
    pub x: f64,
    pub y: f64,
    pub count: u64,
}

pub fn to_field_units(x_yards: f64, y_yards: f64) -> (f64, f64) {
    (
        END_ZONE_OFFSET + UNITS_PER_YARD * x_yards,
        UNITS_PER_YARD * y_yards,
    )
}

/// Rows without both coordinates are skipped; order follows the input.
pub fn spatial_points(plays: &[PlayRecord]) -> Vec<SpatialPoint> {
    plays
        .iter()
        .filter_map(|p| {
            let (x, y) = to_field_units(p.pass_location_x?, p.pass_location_y?);
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            Some(SpatialPoint {
                x,
                y,
                tooltip: Tooltip {
                    receiver: p.receiver.clone(),
                    air_yards: p.air_yards,
                    down: p.down,
                    distance: p.distance,
                    date: p.game_date.clone(),
                    play_clock: p.play_clock,
                    passer: p.passer.clone(),
                    posteam: p.posteam.clone(),
                    defteam: p.defteam.clone(),
                    epa: p.epa,
                },
            })
        })
        .collect()
}

pub fn pass_density(plays: &[PlayRecord]) -> Vec<DensityCell> {
    let mut cells: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    for p in plays {
        let (Some(x), Some(y)) = (p.pass_location_x, p.pass_location_y) else {
            continue;
        };
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        *cells
            .entry((x.floor() as i64, y.floor() as i64))
            .or_insert(0) += 1;
    }

    cells
        .into_iter()
        .map(|((cx, cy), count)| {
            let (x, y) = to_field_units(cx as f64, cy as f64);
            DensityCell { x, y, count }
        })
        .collect()
}

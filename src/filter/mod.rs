//! Filter selection for one dashboard interaction.
//!
//! Set-valued dimensions are `Option<BTreeSet<_>>`: `None` leaves the dimension
//! unconstrained, `Some(empty)` excludes every row.

pub mod parse;
pub mod temporal;

use crate::classify::{DepthBin, DirectionBin};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Inclusive window in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockRange {
    pub min: f64,
    pub max: f64,
}

impl ClockRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, secs: f64) -> bool {
        self.min <= secs && secs <= self.max
    }
}

impl Default for ClockRange {
    /// The full 0..40 play clock.
    fn default() -> Self {
        Self::new(0.0, 40.0)
    }
}

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Immutable once built; construct with [`FilterSpec::new`] and the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    passer: String,
    dates: DateRange,
    play_clock: ClockRange,
    game_clock: Option<ClockRange>,
    downs: Option<BTreeSet<u8>>,
    depths: Option<BTreeSet<DepthBin>>,
    receivers: Option<BTreeSet<String>>,
    directions: Option<BTreeSet<DirectionBin>>,
}

impl FilterSpec {
    /// Surrounding blanks in the passer name are dropped.
    pub fn new(passer: impl Into<String>) -> Self {
        let passer: String = passer.into();
        Self {
            passer: passer.trim().to_string(),
            dates: DateRange::default(),
            play_clock: ClockRange::default(),
            game_clock: None,
            downs: None,
            depths: None,
            receivers: None,
            directions: None,
        }
    }

    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_play_clock(mut self, window: ClockRange) -> Self {
        self.play_clock = window;
        self
    }

    pub fn with_game_clock(mut self, window: ClockRange) -> Self {
        self.game_clock = Some(window);
        self
    }

    pub fn with_downs(mut self, downs: impl IntoIterator<Item = u8>) -> Self {
        self.downs = Some(downs.into_iter().collect());
        self
    }

    pub fn with_depths(mut self, depths: impl IntoIterator<Item = DepthBin>) -> Self {
        self.depths = Some(depths.into_iter().collect());
        self
    }

    pub fn with_receivers<S: Into<String>>(mut self, receivers: impl IntoIterator<Item = S>) -> Self {
        self.receivers = Some(receivers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_directions(mut self, directions: impl IntoIterator<Item = DirectionBin>) -> Self {
        self.directions = Some(directions.into_iter().collect());
        self
    }

    pub fn passer(&self) -> &str {
        &self.passer
    }

    /// A blank passer name counts as no selection.
    pub fn has_passer(&self) -> bool {
        !self.passer.is_empty()
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn play_clock(&self) -> ClockRange {
        self.play_clock
    }

    pub fn game_clock(&self) -> Option<ClockRange> {
        self.game_clock
    }

    pub fn downs(&self) -> Option<&BTreeSet<u8>> {
        self.downs.as_ref()
    }

    pub fn depths(&self) -> Option<&BTreeSet<DepthBin>> {
        self.depths.as_ref()
    }

    pub fn receivers(&self) -> Option<&BTreeSet<String>> {
        self.receivers.as_ref()
    }

    pub fn directions(&self) -> Option<&BTreeSet<DirectionBin>> {
        self.directions.as_ref()
    }
}

//! Parsing of filter arguments given on the command line.
//!
//! Ranges are written `a-b` or `a..b`; lists are comma separated. An empty list
//! string is an explicit empty selection.

use crate::Result;
use crate::classify::{DepthBin, DirectionBin};
use crate::filter::{ClockRange, DateRange};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeSet;

/// Parse "0-40", "0..40" or "12.5..30" into an inclusive clock window.
pub fn parse_clock_range(s: &str) -> Result<ClockRange> {
    let re = Regex::new(r#"^\s*(\d+(?:\.\d+)?)\s*(?:-|\.\.)\s*(\d+(?:\.\d+)?)\s*$"#)?;
    let Some(caps) = re.captures(s) else {
        bail!("cannot parse clock range {:?} (expected MIN-MAX)", s);
    };

    let min: f64 = caps[1].parse()?;
    let max: f64 = caps[2].parse()?;
    if min > max {
        bail!("clock range {:?} has min > max", s);
    }
    Ok(ClockRange::new(min, max))
}

/// Parse "2022-09-01..2024-02-01" into an inclusive date window.
pub fn parse_date_range(s: &str) -> Result<DateRange> {
    let re = Regex::new(r#"^\s*(\d{4}-\d{2}-\d{2})\s*\.\.\s*(\d{4}-\d{2}-\d{2})\s*$"#)?;
    let Some(caps) = re.captures(s) else {
        bail!("cannot parse date range {:?} (expected START..END)", s);
    };

    let start = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
        .with_context(|| format!("bad start date in {:?}", s))?;
    let end = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d")
        .with_context(|| format!("bad end date in {:?}", s))?;
    Ok(DateRange::new(start, end))
}

/// Split a comma-separated list, dropping blank items.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn parse_downs(s: &str) -> Result<BTreeSet<u8>> {
    let mut downs = BTreeSet::new();
    for item in parse_list(s) {
        let down: u8 = item
            .parse()
            .with_context(|| format!("bad down {:?}", item))?;
        if !(1..=4).contains(&down) {
            bail!("down must be between 1 and 4, got {}", down);
        }
        downs.insert(down);
    }
    Ok(downs)
}

pub fn parse_depths(s: &str) -> Result<BTreeSet<DepthBin>> {
    let mut depths = BTreeSet::new();
    for item in parse_list(s) {
        match DepthBin::parse(&item) {
            Some(depth) => {
                depths.insert(depth);
            }
            None => bail!("unknown depth bin {:?}", item),
        }
    }
    Ok(depths)
}

pub fn parse_directions(s: &str) -> Result<BTreeSet<DirectionBin>> {
    let mut directions = BTreeSet::new();
    for item in parse_list(s) {
        match DirectionBin::parse(&item) {
            Some(direction) => {
                directions.insert(direction);
            }
            None => bail!("unknown pass direction {:?}", item),
        }
    }
    Ok(directions)
}

//! Post-fetch temporal pass.
//!
//! Dates are not part of the compiled predicate: rows come back from the gateway
//! with raw date text, which is normalized here and compared in memory. The
//! optional game-clock window is applied in the same pass.

use crate::filter::FilterSpec;
use crate::play::PlayRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Normalize a raw `game_date` to a calendar date.
pub fn normalize_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Keep rows inside the filter's date range and game-clock window.
///
/// Rows whose date cannot be normalized are dropped.
pub fn apply_temporal_window(rows: Vec<PlayRecord>, filter: &FilterSpec) -> Vec<PlayRecord> {
    let dates = filter.dates();
    let game_clock = filter.game_clock();
    let fetched = rows.len();
    let mut undated = 0usize;

    let kept: Vec<PlayRecord> = rows
        .into_iter()
        .filter(|row| {
            let Some(date) = normalize_game_date(&row.game_date) else {
                undated += 1;
                return false;
            };
            if !dates.contains(date) {
                return false;
            }
            match game_clock {
                Some(window) => row.game_clock.is_some_and(|secs| window.contains(secs)),
                None => true,
            }
        })
        .collect();

    if undated > 0 {
        log::debug!("temporal pass dropped {} rows with unreadable game_date", undated);
    }
    log::debug!("temporal pass kept {} of {} rows", kept.len(), fetched);

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ClockRange, DateRange};
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: &str, game_clock: Option<f64>) -> PlayRecord {
        PlayRecord {
            passer: "T.Brady".to_string(),
            game_date: date.to_string(),
            game_clock,
            ..Default::default()
        }
    }

    #[test]
    fn normalizes_common_date_shapes() {
        assert_eq!(normalize_game_date("2022-09-11"), Some(d(2022, 9, 11)));
        assert_eq!(normalize_game_date("2022-09-11 00:00:00"), Some(d(2022, 9, 11)));
        assert_eq!(normalize_game_date("2022-09-11T13:00:00.000"), Some(d(2022, 9, 11)));
        assert_eq!(normalize_game_date("2022-09-11T13:00:00+00:00"), Some(d(2022, 9, 11)));
        assert_eq!(normalize_game_date(""), None);
        assert_eq!(normalize_game_date("week 1"), None);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_unreadable_dates() {
        let filter = FilterSpec::new("T.Brady")
            .with_dates(DateRange::new(d(2022, 9, 11), d(2022, 9, 18)));
        let rows = vec![
            row("2022-09-10", None),
            row("2022-09-11", None),
            row("2022-09-18 00:00:00", None),
            row("2022-09-19", None),
            row("not a date", None),
        ];

        let kept = apply_temporal_window(rows, &filter);
        let dates: Vec<&str> = kept.iter().map(|r| r.game_date.as_str()).collect();
        assert_eq!(dates, vec!["2022-09-11", "2022-09-18 00:00:00"]);
    }

    #[test]
    fn game_clock_window_requires_a_clock() {
        let filter = FilterSpec::new("T.Brady").with_game_clock(ClockRange::new(0.0, 120.0));
        let rows = vec![
            row("2022-09-11", Some(30.0)),
            row("2022-09-11", Some(600.0)),
            row("2022-09-11", None),
        ];

        let kept = apply_temporal_window(rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].game_clock, Some(30.0));
    }
}

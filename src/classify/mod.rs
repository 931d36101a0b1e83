//! Total classification functions mapping raw play fields to categorical bins.
//!
//! None of these fail: missing, malformed or out-of-range input falls back to a
//! fixed default bin.

pub mod bins;

pub use bins::{DepthBin, DirectionBin, OutcomeBin, PlayClockBin};

use crate::play::PlayRecord;

/// Upper edge of the short bin; 10 itself is short.
pub const SHORT_MAX_YARDS: f64 = 10.0;
/// Upper edge of the intermediate bin; 20 itself is intermediate.
pub const INTERMEDIATE_MAX_YARDS: f64 = 20.0;

/// Unrecognized or missing directions land on `E`.
pub fn bin_direction(raw: Option<&str>) -> DirectionBin {
    raw.and_then(DirectionBin::parse).unwrap_or(DirectionBin::E)
}

pub fn bin_depth(air_yards: Option<f64>) -> DepthBin {
    match air_yards.filter(|y| !y.is_nan()) {
        None => DepthBin::Short,
        Some(y) if y <= SHORT_MAX_YARDS => DepthBin::Short,
        Some(y) if y <= INTERMEDIATE_MAX_YARDS => DepthBin::Intermediate,
        Some(_) => DepthBin::Deep,
    }
}

/// Missing or negative clocks map to `15-20s`.
pub fn bin_playclock(seconds: Option<f64>) -> PlayClockBin {
    let Some(secs) = seconds.filter(|s| !s.is_nan() && *s >= 0.0) else {
        return PlayClockBin::Secs15To20;
    };

    PlayClockBin::ALL
        .into_iter()
        .find(|bin| secs <= bin.upper_bound())
        .unwrap_or(PlayClockBin::Secs35To40)
}

/// Touchdown beats a first down on the pass, which beats a generic first down.
pub fn bin_play_outcome(record: &PlayRecord) -> OutcomeBin {
    if record.pass_touchdown {
        OutcomeBin::Touchdown
    } else if record.first_down_pass || record.first_down {
        OutcomeBin::FirstDown
    } else {
        OutcomeBin::NoFirstDown
    }
}

/// A play with its derived bins. Bins are recomputed on every pass, never stored.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedPlay<'a> {
    pub record: &'a PlayRecord,
    pub direction: DirectionBin,
    pub depth: DepthBin,
    pub play_clock: PlayClockBin,
    pub outcome: OutcomeBin,
}

impl<'a> ClassifiedPlay<'a> {
    pub fn new(record: &'a PlayRecord) -> Self {
        Self {
            record,
            direction: bin_direction(record.pass_direction.as_deref()),
            depth: bin_depth(record.air_yards),
            play_clock: bin_playclock(record.play_clock),
            outcome: bin_play_outcome(record),
        }
    }
}

pub fn classify(records: &[PlayRecord]) -> Vec<ClassifiedPlay<'_>> {
    records.iter().map(ClassifiedPlay::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn direction_accepts_codes_and_names_in_any_case() {
        for d in DirectionBin::ALL {
            assert_eq!(bin_direction(Some(d.label())), d);
            assert_eq!(bin_direction(Some(d.label().to_lowercase().as_str())), d);
            assert_eq!(bin_direction(Some(d.full_name())), d);
            assert_eq!(bin_direction(Some(d.full_name().to_lowercase().as_str())), d);
        }
        assert_eq!(bin_direction(Some("North")), DirectionBin::N);
        assert_eq!(bin_direction(Some("ne")), DirectionBin::NE);
    }

    #[test]
    fn direction_defaults_to_east() {
        assert_eq!(bin_direction(None), DirectionBin::E);
        assert_eq!(bin_direction(Some("")), DirectionBin::E);
        assert_eq!(bin_direction(Some("INVALID")), DirectionBin::E);
        assert_eq!(bin_direction(Some("north-east")), DirectionBin::E);
    }

    #[test]
    fn depth_boundaries_belong_to_lower_bin() {
        assert_eq!(bin_depth(Some(0.0)), DepthBin::Short);
        assert_eq!(bin_depth(Some(5.0)), DepthBin::Short);
        assert_eq!(bin_depth(Some(10.0)), DepthBin::Short);
        assert_eq!(bin_depth(Some(10.5)), DepthBin::Intermediate);
        assert_eq!(bin_depth(Some(11.0)), DepthBin::Intermediate);
        assert_eq!(bin_depth(Some(20.0)), DepthBin::Intermediate);
        assert_eq!(bin_depth(Some(21.0)), DepthBin::Deep);
        assert_eq!(bin_depth(Some(50.0)), DepthBin::Deep);
    }

    #[test]
    fn depth_defaults_to_short() {
        assert_eq!(bin_depth(None), DepthBin::Short);
        assert_eq!(bin_depth(Some(f64::NAN)), DepthBin::Short);
        assert_eq!(bin_depth(Some(-4.0)), DepthBin::Short);
    }

    #[test]
    fn depth_is_monotone() {
        let mut prev = bin_depth(Some(-10.0));
        let mut y = -10.0;
        while y <= 60.0 {
            let cur = bin_depth(Some(y));
            assert!(cur >= prev, "bin_depth({y}) went backwards");
            prev = cur;
            y += 0.25;
        }
    }

    #[test]
    fn playclock_buckets_are_right_inclusive() {
        let cases = [
            (0.0, "0-5s"),
            (5.0, "0-5s"),
            (6.0, "5-10s"),
            (10.0, "5-10s"),
            (11.0, "10-15s"),
            (15.0, "10-15s"),
            (16.0, "15-20s"),
            (20.0, "15-20s"),
            (21.0, "20-25s"),
            (25.0, "20-25s"),
            (26.0, "25-30s"),
            (30.0, "25-30s"),
            (31.0, "30-35s"),
            (35.0, "30-35s"),
            (35.5, "35-40s"),
            (40.0, "35-40s"),
            (50.0, "35-40s"),
        ];
        for (secs, label) in cases {
            assert_eq!(bin_playclock(Some(secs)).label(), label, "secs={secs}");
        }
    }

    #[test]
    fn playclock_defaults_to_mid_range() {
        assert_eq!(bin_playclock(None), PlayClockBin::Secs15To20);
        assert_eq!(bin_playclock(Some(-1.0)), PlayClockBin::Secs15To20);
        assert_eq!(bin_playclock(Some(f64::NAN)), PlayClockBin::Secs15To20);
    }

    #[test]
    fn outcome_priority() {
        let td = PlayRecord {
            pass_touchdown: true,
            first_down: true,
            first_down_pass: true,
            ..Default::default()
        };
        let fd_pass = PlayRecord {
            first_down_pass: true,
            ..Default::default()
        };
        let fd = PlayRecord {
            first_down: true,
            ..Default::default()
        };

        assert_eq!(bin_play_outcome(&td), OutcomeBin::Touchdown);
        assert_eq!(bin_play_outcome(&fd_pass), OutcomeBin::FirstDown);
        assert_eq!(bin_play_outcome(&fd), OutcomeBin::FirstDown);
        assert_eq!(bin_play_outcome(&PlayRecord::default()), OutcomeBin::NoFirstDown);
    }

    #[test]
    fn bins_serialize_as_labels() {
        let json = serde_json::to_string(&(
            DirectionBin::SW,
            DepthBin::Deep,
            PlayClockBin::Secs30To35,
            OutcomeBin::FirstDown,
        ))
        .unwrap();
        assert_eq!(json, r#"["SW","20+ yd","30-35s","First Down"]"#);
    }
}

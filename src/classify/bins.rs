//! Categorical bins. Each bin serializes as its display label.

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! serialize_as_label {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

/// Eight-point compass direction of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectionBin {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl DirectionBin {
    pub const ALL: [DirectionBin; 8] = [
        DirectionBin::N,
        DirectionBin::NE,
        DirectionBin::E,
        DirectionBin::SE,
        DirectionBin::S,
        DirectionBin::SW,
        DirectionBin::W,
        DirectionBin::NW,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DirectionBin::N => "N",
            DirectionBin::NE => "NE",
            DirectionBin::E => "E",
            DirectionBin::SE => "SE",
            DirectionBin::S => "S",
            DirectionBin::SW => "SW",
            DirectionBin::W => "W",
            DirectionBin::NW => "NW",
        }
    }

    /// Upper-case full cardinal name.
    pub fn full_name(&self) -> &'static str {
        match self {
            DirectionBin::N => "NORTH",
            DirectionBin::NE => "NORTHEAST",
            DirectionBin::E => "EAST",
            DirectionBin::SE => "SOUTHEAST",
            DirectionBin::S => "SOUTH",
            DirectionBin::SW => "SOUTHWEST",
            DirectionBin::W => "WEST",
            DirectionBin::NW => "NORTHWEST",
        }
    }

    /// Strict parse of an abbreviation or full name, ignoring case and surrounding blanks.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|d| d.label() == upper || d.full_name() == upper)
    }
}

/// Air-yards depth bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthBin {
    Short,
    Intermediate,
    Deep,
}

impl DepthBin {
    pub const ALL: [DepthBin; 3] = [DepthBin::Short, DepthBin::Intermediate, DepthBin::Deep];

    pub fn label(&self) -> &'static str {
        match self {
            DepthBin::Short => "0-10 yd",
            DepthBin::Intermediate => "10-20 yd",
            DepthBin::Deep => "20+ yd",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Accepts the display label or the words short / intermediate / deep.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0-10 yd" | "short" => Some(DepthBin::Short),
            "10-20 yd" | "intermediate" => Some(DepthBin::Intermediate),
            "20+ yd" | "deep" => Some(DepthBin::Deep),
            _ => None,
        }
    }
}

/// Five-second play-clock bucket, right-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayClockBin {
    Secs0To5,
    Secs5To10,
    Secs10To15,
    Secs15To20,
    Secs20To25,
    Secs25To30,
    Secs30To35,
    Secs35To40,
}

impl PlayClockBin {
    pub const ALL: [PlayClockBin; 8] = [
        PlayClockBin::Secs0To5,
        PlayClockBin::Secs5To10,
        PlayClockBin::Secs10To15,
        PlayClockBin::Secs15To20,
        PlayClockBin::Secs20To25,
        PlayClockBin::Secs25To30,
        PlayClockBin::Secs30To35,
        PlayClockBin::Secs35To40,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlayClockBin::Secs0To5 => "0-5s",
            PlayClockBin::Secs5To10 => "5-10s",
            PlayClockBin::Secs10To15 => "10-15s",
            PlayClockBin::Secs15To20 => "15-20s",
            PlayClockBin::Secs20To25 => "20-25s",
            PlayClockBin::Secs25To30 => "25-30s",
            PlayClockBin::Secs30To35 => "30-35s",
            PlayClockBin::Secs35To40 => "35-40s",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Inclusive upper edge in seconds. The last bucket also takes everything above it.
    pub fn upper_bound(self) -> f64 {
        5.0 * (self.index() + 1) as f64
    }
}

/// Result of a pass attempt, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeBin {
    Touchdown,
    FirstDown,
    NoFirstDown,
}

impl OutcomeBin {
    pub const ALL: [OutcomeBin; 3] = [
        OutcomeBin::Touchdown,
        OutcomeBin::FirstDown,
        OutcomeBin::NoFirstDown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutcomeBin::Touchdown => "Touchdown",
            OutcomeBin::FirstDown => "First Down",
            OutcomeBin::NoFirstDown => "No First Down",
        }
    }
}

serialize_as_label!(DirectionBin, DepthBin, PlayClockBin, OutcomeBin);

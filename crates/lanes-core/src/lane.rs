//! The fixed set of lanes a student can pick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A role lane in the team game.
///
/// Declaration order is the canonical column order of every lane-indexed
/// table and the vertex order of the co-occurrence graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    #[serde(rename = "MID")]
    Mid,
    Top,
    #[serde(rename = "Jg")]
    Jungle,
    #[serde(rename = "Sup")]
    Support,
    #[serde(rename = "ADC")]
    Adc,
}

impl Lane {
    /// All lanes in canonical order.
    pub const ALL: [Self; 5] = [Self::Mid, Self::Top, Self::Jungle, Self::Support, Self::Adc];

    /// Number of lanes.
    pub const COUNT: usize = Self::ALL.len();

    /// Header token introducing this lane's group in the survey file.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Mid => "MID",
            Self::Top => "Top",
            Self::Jungle => "Jg",
            Self::Support => "Sup",
            Self::Adc => "ADC",
        }
    }

    /// Position of this lane in [`Lane::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Match a trimmed line against the header tokens (case-sensitive).
    #[must_use]
    pub fn from_header(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lane| lane.header() == token)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Error returned when a string is not one of the lane header tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lane '{0}': expected one of MID, Top, Jg, Sup, ADC")]
pub struct UnknownLane(pub String);

impl FromStr for Lane {
    type Err = UnknownLane;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s).ok_or_else(|| UnknownLane(s.to_string()))
    }
}

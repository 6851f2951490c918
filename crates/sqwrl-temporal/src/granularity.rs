//! Temporal granularities, coarsest first

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TemporalError;

/// Precision of a datetime value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Granularity {
    /// Every granularity, coarsest first
    pub const ALL: [Granularity; 7] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// The finest supported granularity
    pub const FINEST: Granularity = Self::Milliseconds;

    /// Position in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TemporalError;

    /// Accepts plural or singular names in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let plural = if lower.ends_with('s') {
            lower.clone()
        } else {
            format!("{}s", lower)
        };
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == plural)
            .ok_or(TemporalError::UnknownGranularity { name: s.to_string() })
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 1000.0;

/// Countries a score can be converted between. Each carries a fixed baseline
/// factor relative to the US.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    US,
    UK,
    India,
    Canada,
}

impl Country {
    pub const ALL: [Country; 4] = [Country::US, Country::UK, Country::India, Country::Canada];

    pub fn code(self) -> &'static str {
        match self {
            Country::US => "US",
            Country::UK => "UK",
            Country::India => "India",
            Country::Canada => "Canada",
        }
    }

    pub fn baseline(self) -> f64 {
        match self {
            Country::US => 1.0,
            Country::UK => 0.9,
            Country::India => 0.8,
            Country::Canada => 0.95,
        }
    }

    /// "US, UK, India, Canada"
    pub fn valid_codes() -> String {
        Self::ALL
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown country code '{0}'")]
pub struct UnknownCountry(pub String);

impl FromStr for Country {
    type Err = UnknownCountry;

    // Exact match only, "us" is not a valid code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownCountry(s.to_string()))
    }
}

/// Normalizes `score` against the source baseline, rescales it to the target
/// baseline and rounds to two decimals.
pub fn convert(from: Country, to: Country, score: f64) -> f64 {
    let normalized = score / from.baseline();
    round_to_cents(normalized * to.baseline())
}

/// Rounds half away from zero at the second decimal.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn in_range(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

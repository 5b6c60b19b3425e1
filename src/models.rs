use crate::rates::{self, Country};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One completed conversion. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: String,
    #[serde(serialize_with = "serialize_iso8601")]
    pub timestamp: DateTime<Utc>,
    pub country_from: Country,
    pub country_to: Country,
    pub original_score: f64,
    pub converted_score: f64,
}

impl ConversionRecord {
    pub fn new(country_from: Country, country_to: Country, original_score: f64) -> Self {
        let timestamp = Utc::now();
        Self {
            id: generate_id(timestamp),
            timestamp,
            country_from,
            country_to,
            original_score,
            converted_score: rates::convert(country_from, country_to, original_score),
        }
    }
}

/// `<unix millis>-<9 base36 chars>`. Collisions are possible in principle but
/// would need two records in the same millisecond with the same suffix.
fn generate_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", at.timestamp_millis(), suffix)
}

/// Millisecond precision with a `Z` suffix, e.g. `2026-01-01T12:00:00.000Z`.
pub fn to_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize_iso8601<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso8601(at))
}

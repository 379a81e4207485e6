//! Data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Maritime Mobile Service Identity (MMSI)
///
/// The vessel key in AIS messages. Kept as a normalized string: the feed
/// may deliver it as a JSON number or string, and string form avoids
/// losing leading zeros or precision on the way to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mmsi(String);

impl Mmsi {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Mmsi {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Mmsi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Mmsi(n.to_string())),
            Raw::Text(s) => Ok(Mmsi(s)),
        }
    }
}

/// One vessel report from the combined AIS feed
///
/// A single newline-delimited JSON object from the streaming response.
/// Every field except the MMSI is optional; the full model interleaves
/// position and static reports, so any given record may carry only a
/// subset of the attributes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselReport {
    pub mmsi: Mmsi,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Navigational status
    ///
    /// Value range between 0 - 15.
    /// - 0 = under way using engine
    /// - 1 = at anchor
    /// - 2 = not under command
    /// - 3 = restricted maneuverability
    /// - 4 = constrained by her draught
    /// - 5 = moored
    /// - 6 = aground
    /// - 7 = engaged in fishing
    /// - 8 = under way sailing
    /// - 15 = undefined
    #[serde(default)]
    pub navigational_status: Option<u8>,
    #[serde(default)]
    pub speed_over_ground: Option<f64>,
    #[serde(default)]
    pub true_heading: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    /// ISO 3166-1 alpha-2 flag state of the vessel
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Most recently observed attributes of one vessel
///
/// Serialized form is what gets forwarded to the alert sink; `last_seen`
/// serializes as an RFC 3339 UTC timestamp via chrono.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselState {
    pub mmsi: Mmsi,
    pub last_seen: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub navigational_status: Option<u8>,
    pub status_text: String,
    pub speed_over_ground: Option<f64>,
    pub heading: Option<i32>,
    pub name: String,
    pub destination: String,
}

/// Placeholder for identifying strings absent from a record
pub const UNKNOWN: &str = "Unknown";

/// Human-readable label for a navigational status code
///
/// Codes 0-8 and 15 are defined; everything else, including an absent
/// code, reads as `"Unknown"`.
pub fn status_label(code: Option<u8>) -> &'static str {
    match code {
        Some(0) => "Under way using engine",
        Some(1) => "At anchor",
        Some(2) => "Not under command",
        Some(3) => "Restricted manoeuvrability",
        Some(4) => "Constrained by her draught",
        Some(5) => "Moored",
        Some(6) => "Aground",
        Some(7) => "Engaged in fishing",
        Some(8) => "Under way sailing",
        Some(15) => "Undefined",
        _ => UNKNOWN,
    }
}

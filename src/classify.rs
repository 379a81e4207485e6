//! Forwarding decision for incoming vessel reports.

use std::collections::HashSet;

use crate::models::Mmsi;

/// Flag state whose vessels are forwarded regardless of the watchlist
pub const WATCHED_COUNTRY: &str = "RU";

/// MMSI prefix range allocated to the watched flag state
pub const WATCHED_MMSI_PREFIX: &str = "273";

/// Why a report matched the forwarding rule
///
/// The conditions are an OR; the variant records which one fired first
/// so logs can tell the reasons apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Watchlist,
    CountryCode,
    MmsiPrefix,
}

impl MatchReason {
    pub fn describe(&self) -> &'static str {
        match self {
            MatchReason::Watchlist => "on watchlist",
            MatchReason::CountryCode => "flagged country code",
            MatchReason::MmsiPrefix => "flagged MMSI prefix",
        }
    }
}

/// Decide whether a vessel update should be forwarded.
///
/// The country code comes from the incoming record, not from the state
/// table; a vessel whose flag was reported earlier but is absent from
/// the current record does not match on nationality.
pub fn classify(
    mmsi: &Mmsi,
    country_code: Option<&str>,
    watchlist: &HashSet<String>,
) -> Option<MatchReason> {
    if watchlist.contains(mmsi.as_str()) {
        Some(MatchReason::Watchlist)
    } else if country_code == Some(WATCHED_COUNTRY) {
        Some(MatchReason::CountryCode)
    } else if mmsi.as_str().starts_with(WATCHED_MMSI_PREFIX) {
        Some(MatchReason::MmsiPrefix)
    } else {
        None
    }
}

//! Live per-vessel state table.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{status_label, Mmsi, VesselReport, VesselState, UNKNOWN};

/// In-memory table of the latest observed state per vessel
///
/// Entries are created on first sight of an MMSI and never evicted for
/// the lifetime of the process. There is no durability; the table starts
/// empty on every run.
#[derive(Debug, Default)]
pub struct VesselTable {
    vessels: HashMap<Mmsi, VesselState>,
}

impl VesselTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one report to the table and return the resulting entry.
    ///
    /// All attributes are overwritten wholesale from the report: a field
    /// the report does not carry resets to its default (`None` or
    /// `"Unknown"`) rather than retaining the previous value. Only the
    /// MMSI key and `last_seen` escape that rule; `last_seen` is set to
    /// `seen` unconditionally.
    pub fn apply(&mut self, report: &VesselReport, seen: DateTime<Utc>) -> &VesselState {
        let entry = self
            .vessels
            .entry(report.mmsi.clone())
            .or_insert_with(|| VesselState {
                mmsi: report.mmsi.clone(),
                last_seen: seen,
                latitude: None,
                longitude: None,
                navigational_status: None,
                status_text: status_label(None).to_string(),
                speed_over_ground: None,
                heading: None,
                name: UNKNOWN.to_string(),
                destination: UNKNOWN.to_string(),
            });

        entry.last_seen = seen;
        entry.latitude = report.latitude;
        entry.longitude = report.longitude;
        entry.navigational_status = report.navigational_status;
        entry.status_text = status_label(report.navigational_status).to_string();
        entry.speed_over_ground = report.speed_over_ground;
        entry.heading = report.true_heading;
        entry.name = report.name.clone().unwrap_or_else(|| UNKNOWN.to_string());
        entry.destination = report
            .destination
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());

        entry
    }

    pub fn get(&self, mmsi: &Mmsi) -> Option<&VesselState> {
        self.vessels.get(mmsi)
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn report(mmsi: &str) -> VesselReport {
        VesselReport {
            mmsi: Mmsi::from(mmsi),
            latitude: None,
            longitude: None,
            navigational_status: None,
            speed_over_ground: None,
            true_heading: None,
            name: None,
            destination: None,
            country_code: None,
        }
    }

    #[test]
    fn creates_one_entry_per_mmsi() {
        let mut table = VesselTable::new();
        let now = Utc::now();

        table.apply(&report("257123456"), now);
        table.apply(&report("257123456"), now);
        table.apply(&report("273000111"), now);

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_fields_reset_to_defaults() {
        let mut table = VesselTable::new();
        let mut first = report("257123456");
        first.latitude = Some(61.8);
        first.longitude = Some(28.9);
        first.navigational_status = Some(5);
        first.name = Some("SUULA".to_string());
        first.destination = Some("SEPIT".to_string());

        let now = Utc::now();
        table.apply(&first, now);
        table.apply(&report("257123456"), now + Duration::seconds(1));

        let entry = table.get(&Mmsi::from("257123456")).unwrap();
        assert_eq!(entry.latitude, None);
        assert_eq!(entry.longitude, None);
        assert_eq!(entry.navigational_status, None);
        assert_eq!(entry.status_text, "Unknown");
        assert_eq!(entry.name, "Unknown");
        assert_eq!(entry.destination, "Unknown");
    }

    #[test]
    fn status_text_follows_latest_code() {
        let mut table = VesselTable::new();
        let mut r = report("257123456");
        r.navigational_status = Some(5);

        table.apply(&r, Utc::now());

        let entry = table.get(&Mmsi::from("257123456")).unwrap();
        assert_eq!(entry.status_text, "Moored");
    }

    #[test]
    fn last_seen_refreshes_on_every_update() {
        let mut table = VesselTable::new();
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(10);

        table.apply(&report("257123456"), t0);
        let first = table.get(&Mmsi::from("257123456")).unwrap().last_seen;
        table.apply(&report("257123456"), t1);
        let second = table.get(&Mmsi::from("257123456")).unwrap().last_seen;

        assert_eq!(first, t0);
        assert_eq!(second, t1);
        assert!(second >= first);
    }
}

//! Watchlist loading.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AisSentryError;

/// Load the watchlist of MMSI numbers from a local JSON file.
///
/// Never fails: a missing file, malformed JSON or a non-array top level
/// all degrade to an empty set with a logged diagnostic, leaving only
/// the country and prefix rules active.
pub fn load(path: &Path) -> HashSet<String> {
    match try_load(path) {
        Ok(set) => {
            info!("Loaded {} MMSI numbers from {}", set.len(), path.display());
            set
        }
        Err(e) => {
            warn!(
                "Failed to load watchlist from {}: {}, continuing with an empty watchlist",
                path.display(),
                e
            );
            HashSet::new()
        }
    }
}

fn try_load(path: &Path) -> Result<HashSet<String>, AisSentryError> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<Value> = serde_json::from_str(&raw)?;

    let mut set = HashSet::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(s) => {
                set.insert(s);
            }
            Value::Number(n) => {
                set.insert(n.to_string());
            }
            other => warn!("Ignoring non-identifier watchlist entry: {}", other),
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_numbers_and_strings() {
        let file = write_file(r#"[257123456, "111222333", 273000111]"#);

        let set = load(file.path());

        assert_eq!(set.len(), 3);
        assert!(set.contains("257123456"));
        assert!(set.contains("111222333"));
        assert!(set.contains("273000111"));
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let set = load(Path::new("/nonexistent/shadowfleet.json"));

        assert!(set.is_empty());
    }

    #[test]
    fn malformed_json_yields_empty_set() {
        let file = write_file("not json at all");

        assert!(load(file.path()).is_empty());
    }

    #[test]
    fn non_array_top_level_yields_empty_set() {
        let file = write_file(r#"{"mmsi": 257123456}"#);

        assert!(load(file.path()).is_empty());
    }

    #[test]
    fn non_identifier_entries_are_skipped() {
        let file = write_file(r#"[257123456, null, true, ["nested"]]"#);

        let set = load(file.path());

        assert_eq!(set.len(), 1);
        assert!(set.contains("257123456"));
    }
}

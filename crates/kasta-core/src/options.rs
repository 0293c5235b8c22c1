//! Conversion options
//!
//! The two known exporter variants disagree on marketing-suffix cleanup and on
//! whether devices are classified against the catalog. Both choices are
//! carried here so a single pipeline serves either variant.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options controlling one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Remove the "AK" and "ES" marketing suffixes from every cell value
    pub strip_marketing_suffixes: bool,
    /// Resolve device types from the catalog and parse scenes per type
    pub classify_devices: bool,
    /// Treat the first worksheet row as a column header and skip it
    pub skip_header_row: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strip_marketing_suffixes: false,
            classify_devices: true,
            skip_header_row: true,
        }
    }
}

impl ConvertOptions {
    /// Load options from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Options {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the options to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert!(!options.strip_marketing_suffixes);
        assert!(options.classify_devices);
        assert!(options.skip_header_row);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"stripMarketingSuffixes": true}"#).unwrap();
        assert!(options.strip_marketing_suffixes);
        assert!(options.classify_devices);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");

        let options = ConvertOptions {
            classify_devices: false,
            ..ConvertOptions::default()
        };
        options.save(&path).unwrap();

        assert_eq!(ConvertOptions::load(&path).unwrap(), options);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConvertOptions::load(&path).unwrap_err();
        assert!(matches!(err, Error::Options { .. }));
    }
}

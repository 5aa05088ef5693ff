// src/config.rs

//! Settings for the face report printed by `ftinfo`.
//!
//! Deserialized from a JSON file; every field has a default, so a partial
//! file (or none at all) is fine. The defaults reproduce the classic
//! FreeType tutorial: the letter `A` at 16pt on a 300 dpi device, loaded
//! unscaled and without bitmaps.

use crate::types::{F26Dot6, LoadFlags, Long, UInt};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Which face of a multi-face file to open.
    pub face_index: Long,
    /// Character whose glyph outline is dumped.
    pub probe_char: char,
    /// Nominal width in 26.6 points; 0 means "same as height".
    pub char_width: F26Dot6,
    /// Nominal height in 26.6 points.
    pub char_height: F26Dot6,
    pub horizontal_dpi: UInt,
    pub vertical_dpi: UInt,
    /// Flags for loading the probe glyph, e.g. `"NO_BITMAP | NO_SCALE"`.
    pub load_flags: LoadFlags,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            face_index: 0,
            probe_char: 'A',
            char_width: 0,
            char_height: 16 * 64,
            horizontal_dpi: 300,
            vertical_dpi: 300,
            load_flags: LoadFlags::NO_BITMAP | LoadFlags::NO_SCALE,
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<ReportConfig> {
        serde_json::from_str(json).context("Invalid report configuration")
    }

    pub fn from_file(path: &Path) -> Result<ReportConfig> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ReportConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.load_flags.bits(), 0x9);
    }

    #[test]
    fn partial_override() {
        let config = ReportConfig::from_json_str(
            r#"{ "probe_char": "g", "horizontal_dpi": 96, "load_flags": "NO_HINTING | RENDER" }"#,
        )
        .unwrap();
        assert_eq!(config.probe_char, 'g');
        assert_eq!(config.horizontal_dpi, 96);
        assert_eq!(config.vertical_dpi, 300);
        assert_eq!(config.load_flags, LoadFlags::NO_HINTING | LoadFlags::RENDER);
    }

    #[test]
    fn unknown_flag_name_is_rejected() {
        assert!(ReportConfig::from_json_str(r#"{ "load_flags": "NOT_A_FLAG" }"#).is_err());
    }

    #[test]
    fn missing_file_mentions_the_path() {
        let err = ReportConfig::from_file(Path::new("/nonexistent/ftinfo.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/ftinfo.json"));
    }

    #[test]
    fn serializes_back_to_json() {
        let json = serde_json::to_string(&ReportConfig::default()).unwrap();
        let back = ReportConfig::from_json_str(&json).unwrap();
        assert_eq!(back, ReportConfig::default());
    }
}

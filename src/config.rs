//! # Configuration
//!
//! One JSON file for the printer profile and transport settings. Missing
//! sections and fields take their defaults, so `{}` is a valid config.
//!
//! ```json
//! {
//!   "profile": { "columns": 48, "qr": "native", "cut": "partial" },
//!   "transport": { "namePrefixes": ["PT-"], "chunkDelayMs": 40 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MizanError, Result};
use crate::printer::PrinterProfile;
use crate::transport::TransportConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MizanConfig {
    pub profile: PrinterProfile,
    pub transport: TransportConfig,
}

impl MizanConfig {
    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)
            .map_err(|e| MizanError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if config.profile.columns < 32 {
            return Err(MizanError::Config(format!(
                "profile.columns must be at least 32 (got {})",
                config.profile.columns
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{CutMode, QrMode};

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(MizanConfig::from_json("{}").unwrap(), MizanConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = MizanConfig::from_json(
            r#"{"profile": {"columns": 48, "qr": "native", "cut": "partial"},
                "transport": {"chunkDelayMs": 40}}"#,
        )
        .unwrap();
        assert_eq!(cfg.profile.columns, 48);
        assert_eq!(cfg.profile.qr, QrMode::Native);
        assert_eq!(cfg.profile.cut, Some(CutMode::Partial));
        assert_eq!(cfg.profile.trailer_lines, 4);
        assert_eq!(cfg.transport.chunk_delay_ms, 40);
    }

    #[test]
    fn test_narrow_paper_rejected() {
        let err = MizanConfig::from_json(r#"{"profile": {"columns": 20}}"#).unwrap_err();
        assert!(matches!(err, MizanError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MizanConfig::load("/nonexistent/mizan.json").unwrap_err();
        assert!(matches!(err, MizanError::Io(_)));
    }
}

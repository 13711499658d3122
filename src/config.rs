//! Host configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::time::Duration;

use serde::Deserialize;

use crate::error::BridgeError;
use crate::export::DEFAULT_EXPORT_FILENAME;
use crate::scroll::{COMFORT_MARGIN_RATIO, SCROLL_SETTLE_DELAY};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Id of the element the application is mounted into.
    pub container_id: String,
    pub scroll_delay_ms: u32,
    pub margin_ratio: f64,
    pub export_filename: String,
    /// `tracing` filter directive, e.g. `"info"` or `"page_host=debug"`.
    pub log_filter: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            container_id: "main".to_string(),
            scroll_delay_ms: SCROLL_SETTLE_DELAY.as_millis() as u32,
            margin_ratio: COMFORT_MARGIN_RATIO,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        let config: HostConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.container_id.is_empty() {
            return Err(BridgeError::InvalidConfig(
                "container_id must not be empty".into(),
            ));
        }
        // At 0.5 the top and bottom margins meet and nothing is ever comfortable.
        if !(0.0..0.5).contains(&self.margin_ratio) {
            return Err(BridgeError::InvalidConfig(format!(
                "margin_ratio must be in [0, 0.5), got {}",
                self.margin_ratio
            )));
        }
        if self.export_filename.is_empty() {
            return Err(BridgeError::InvalidConfig(
                "export_filename must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.scroll_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.container_id, "main");
        assert_eq!(config.scroll_delay(), SCROLL_SETTLE_DELAY);
        assert_eq!(config.margin_ratio, 0.1);
        assert_eq!(config.export_filename, "export.txt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(HostConfig::from_json("{}").unwrap(), HostConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            HostConfig::from_json(r#"{"container_id":"app","scroll_delay_ms":50}"#).unwrap();
        assert_eq!(config.container_id, "app");
        assert_eq!(config.scroll_delay(), Duration::from_millis(50));
        assert_eq!(config.export_filename, DEFAULT_EXPORT_FILENAME);
    }

    #[test]
    fn test_rejects_bad_margin() {
        let err = HostConfig::from_json(r#"{"margin_ratio":0.5}"#).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
        assert!(HostConfig::from_json(r#"{"margin_ratio":-0.1}"#).is_err());
    }

    #[test]
    fn test_rejects_empty_container() {
        assert!(HostConfig::from_json(r#"{"container_id":""}"#).is_err());
    }

    #[test]
    fn test_artifact_type_is_not_configurable() {
        // Unknown keys are ignored, so a page cannot change the MIME type.
        let config = HostConfig::from_json(r#"{"export_mime":"text/html"}"#).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = HostConfig::from_json("{container_id:").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }
}

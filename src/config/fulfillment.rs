//! Fulfillment configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Fulfillment configuration (course artifacts and delivery pacing)
#[derive(Debug, Clone, Deserialize)]
pub struct FulfillmentConfig {
    /// Directory holding the deliverable course files
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Pause between consecutive sends, in milliseconds
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// Follow-up form link sent after the basic course
    pub followup_form_url: Option<String>,
}

impl FulfillmentConfig {
    /// Validate fulfillment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.artifact_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired(
                "FULFILLMENT__ARTIFACT_DIR",
            ));
        }
        // Flooding the Bot API gets sends rate-limited; keep at least a beat
        if self.send_delay_ms < 100 {
            return Err(ValidationError::InvalidSendDelay);
        }
        Ok(())
    }
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            send_delay_ms: default_send_delay_ms(),
            followup_form_url: None,
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("materials")
}

fn default_send_delay_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FulfillmentConfig::default();
        assert_eq!(config.artifact_dir, PathBuf::from("materials"));
        assert_eq!(config.send_delay_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_delay_too_small() {
        let config = FulfillmentConfig {
            send_delay_ms: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_dir() {
        let config = FulfillmentConfig {
            artifact_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

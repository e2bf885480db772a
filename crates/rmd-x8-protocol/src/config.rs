//! Per-actuator channel configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{RmdError, RmdResult};

/// Feedback timeout used by the drive's own watchdog.
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Highest 11-bit standard CAN identifier.
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Construction parameters for one actuator channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Frame identifier of the actuator.
    pub id: u32,
    /// Feedback older than this is stale (milliseconds).
    pub timeout_ms: u64,
    /// Mirror speed and current for a reversed mounting.
    pub invert: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            id: 1,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            invert: false,
        }
    }
}

impl ChannelConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not fit a standard identifier or the
    /// timeout is zero.
    pub fn validate(&self) -> RmdResult<()> {
        if self.id > MAX_STANDARD_ID {
            return Err(RmdError::invalid_configuration(format!(
                "id {:#x} exceeds standard identifier range (max {MAX_STANDARD_ID:#x})",
                self.id
            )));
        }
        if self.timeout_ms == 0 {
            return Err(RmdError::invalid_configuration(
                "timeout_ms must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn builder() -> ChannelConfigBuilder {
        ChannelConfigBuilder::default()
    }
}

/// Builder for `ChannelConfig`.
#[derive(Debug, Default)]
pub struct ChannelConfigBuilder {
    config: ChannelConfig,
}

impl ChannelConfigBuilder {
    #[must_use]
    pub fn id(mut self, id: u32) -> Self {
        self.config.id = id;
        self
    }

    #[must_use]
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.config.invert = invert;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> RmdResult<ChannelConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChannelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert!(!config.invert);
    }

    #[test]
    fn test_builder() -> RmdResult<()> {
        let config = ChannelConfig::builder()
            .id(0x141)
            .timeout_ms(20)
            .invert(true)
            .build()?;
        assert_eq!(config.id, 0x141);
        assert_eq!(config.timeout(), Duration::from_millis(20));
        assert!(config.invert);
        Ok(())
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = ChannelConfig::builder().timeout_ms(0).build();
        assert!(matches!(result, Err(RmdError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_extended_id() {
        let result = ChannelConfig::builder().id(0x800).build();
        assert!(matches!(result, Err(RmdError::InvalidConfiguration(_))));
        assert!(ChannelConfig::builder().id(MAX_STANDARD_ID).build().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() -> Result<(), serde_json::Error> {
        let config: ChannelConfig = serde_json::from_str(r#"{ "id": 291, "invert": true }"#)?;
        assert_eq!(config.id, 0x123);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.invert);
        Ok(())
    }
}

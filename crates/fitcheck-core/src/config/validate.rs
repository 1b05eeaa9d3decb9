//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        if self.server.upload_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "server.upload_dir must not be empty".into(),
            ));
        }
        if self.model.image_size == 0 {
            return Err(ConfigError::ValidationError(
                "model.image_size must be > 0".into(),
            ));
        }
        if self.openrouter.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "openrouter.endpoint must not be empty".into(),
            ));
        }
        if self.openrouter.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "openrouter.model must not be empty".into(),
            ));
        }
        if self.openrouter.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "openrouter.timeout_secs must be > 0".into(),
            ));
        }
        if self.limits.max_upload_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_upload_mb must be > 0".into(),
            ));
        }
        Ok(())
    }
}

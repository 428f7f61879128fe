//! Semantic validation of a loaded configuration.

use crate::config::AnalysisConfig;
use crate::error::{ConfigError, Result};

/// Reject configurations that deserialize fine but cannot work.
pub fn validate(config: &AnalysisConfig) -> Result<()> {
    let naming = &config.naming;
    if naming.max_attempts <= naming.start_suffix {
        return Err(ConfigError::invalid(
            "naming.max_attempts",
            format!(
                "must be greater than naming.start_suffix ({}), got {}",
                naming.start_suffix, naming.max_attempts
            ),
        ));
    }

    for ext in &config.filter.excluded_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::invalid(
                "filter.excluded_extensions",
                format!("'{ext}' is not an extension like '.cs'"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn rejects_attempt_bound_below_start() {
        let mut config = AnalysisConfig::default();
        config.naming.start_suffix = 10;
        config.naming.max_attempts = 10;

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("naming.max_attempts"));
    }

    #[test]
    fn rejects_extension_without_dot() {
        let mut config = AnalysisConfig::default();
        config.filter.excluded_extensions.push("dll".to_string());

        assert!(validate(&config).is_err());
    }
}

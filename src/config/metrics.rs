//! Metrics configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Metrics configuration.
///
/// Disabled by default so local development and tests emit nothing;
/// deployments opt in and name their environment, which becomes the
/// `env:` tag on every series.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Whether metric emission is enabled at all.
    #[serde(default)]
    pub enabled: bool,

    /// Prefix applied to every metric name.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Deployment environment reported in tags.
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl MetricsConfig {
    /// Tags attached to every emitted metric.
    pub fn default_tags(&self) -> Vec<String> {
        vec![format!("env:{}", self.environment)]
    }

    /// Validate metrics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.namespace.trim().is_empty() {
            return Err(ValidationError::InvalidMetricsNamespace);
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            namespace: default_namespace(),
            environment: default_environment(),
        }
    }
}

fn default_namespace() -> String {
    "tax_intake".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.namespace, "tax_intake");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn default_tags_carry_the_environment() {
        let config = MetricsConfig {
            environment: "production".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_tags(), vec!["env:production".to_string()]);
    }

    #[test]
    fn blank_namespace_fails_validation() {
        let config = MetricsConfig {
            namespace: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(MetricsConfig::default().validate().is_ok());
    }
}

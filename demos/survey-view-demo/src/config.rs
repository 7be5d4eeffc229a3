//! Configuration for survey-view-demo

use serde::{Deserialize, Serialize};
use survey_view_gate::ViewConfig;
use survey_view_types::LicenseState;

/// Demo configuration: deployment values, license and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Values threaded into every resolution
    #[serde(default)]
    pub view: ViewConfig,

    /// Already-evaluated license the entitlement resolver works from
    #[serde(default = "default_license")]
    pub license: LicenseState,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            license: default_license(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_license() -> LicenseState {
    LicenseState::active(survey_view_types::LicenseFeatures {
        multi_language: true,
    })
}

impl DemoConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `SURVEY_VIEW__`-prefixed environment variables (`__` separates levels).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        builder = builder.add_source(config::Config::try_from(&DemoConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SURVEY_VIEW")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = DemoConfig::load(None).unwrap();
        assert_eq!(config.view.webapp_url, "http://localhost:3000");
        assert!(config.license.active);
    }
}

use crate::adapters::StationDataset;
use crate::core::indicator::IndexMode;
use crate::domain::ports::StationLookup;
use crate::utils::error::{IndicatorError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub indicator: IndicatorConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub stations: StationDataset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub default_mode: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// `compact` (default) or `json`.
    pub format: Option<String>,
}

impl TomlConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IndicatorError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded {} stations from {}",
            config.stations.len(),
            path.as_ref().display()
        );
        Ok(config)
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IndicatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IndicatorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(mode) = self.indicator.default_mode {
            validation::validate_range("indicator.default_mode", mode, 0, 2)?;
        }

        for station in self.stations.station_ids() {
            validation::validate_non_empty_string("stations", station)?;
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validation::validate_log_level("logging.level", level)?;
            }
            if let Some(format) = &logging.format {
                let valid_formats = ["compact", "json"];
                if !valid_formats.contains(&format.as_str()) {
                    return Err(IndicatorError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            valid_formats.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Mode used when the caller gives none.
    pub fn default_mode(&self) -> i64 {
        self.indicator
            .default_mode
            .unwrap_or_else(|| IndexMode::default().code())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn dataset(&self) -> &StationDataset {
        &self.stations
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PopulationField;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[indicator]
default_mode = 2

[logging]
level = "debug"

[stations."08101001"]
POBLACION_500M = [52579,25616,26940,7585,35542,9280,36791,15545,19944,10495,21981]

[stations."08019004"]
POBLACION_500M = []
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.default_mode(), 2);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert_eq!(config.dataset().len(), 2);

        let record = config.dataset().lookup("08101001").unwrap();
        assert_eq!(record.len(), 11);
        assert_eq!(
            record.get(PopulationField::Age65AndOver).and_then(|v| v.as_f64()),
            Some(9280.0)
        );
        assert!(config.dataset().lookup("08019004").unwrap().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_mode(), 1);
        assert_eq!(config.log_level(), None);
        assert!(config.dataset().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AGING_INDEX_TEST_LEVEL", "warn");

        let toml_content = r#"
[logging]
level = "${AGING_INDEX_TEST_LEVEL}"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.log_level(), Some("warn"));
        assert!(config.json_logs());

        std::env::remove_var("AGING_INDEX_TEST_LEVEL");
    }

    #[test]
    fn test_config_validation() {
        let bad_mode = TomlConfig::from_toml_str("[indicator]\ndefault_mode = 5\n").unwrap();
        assert!(bad_mode.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let blank_station =
            TomlConfig::from_toml_str("[stations.\" \"]\nPOBLACION_500M = [1,0,1,0,1,0]\n").unwrap();
        assert!(blank_station.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[indicator\n").unwrap_err();
        assert!(matches!(err, IndicatorError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dataset().station_ids(), vec!["08019004", "08101001"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/aging-index.toml").unwrap_err();
        assert!(matches!(err, IndicatorError::IoError(_)));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Malformed population record for station '{station}': {reason}")]
    MalformedRecord { station: String, reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl IndicatorError {
    pub fn malformed(station: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            station: station.to_string(),
            reason: reason.into(),
        }
    }

    /// Upstream data corruption, as opposed to a bad invocation.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => {
                "Check the POBLACION_500M record of the station: it needs at least 6 numeric fields"
            }
            Self::IoError(_) => "Make sure the configuration file exists and is readable",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            Self::CsvError(_) | Self::SerializationError(_) => "Retry with another output format",
        }
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = IndicatorError::malformed("08101001", "expected at least 6 fields, found 4");
        assert!(err.is_data_error());
        assert_eq!(
            err.to_string(),
            "Malformed population record for station '08101001': expected at least 6 fields, found 4"
        );
    }

    #[test]
    fn test_config_errors_are_not_data_errors() {
        let err = IndicatorError::ConfigError {
            message: "missing file".to_string(),
        };
        assert!(!err.is_data_error());
        assert_eq!(err.recovery_suggestion(), "Fix the configuration file and run again");
    }
}

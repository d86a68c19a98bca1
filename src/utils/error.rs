use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing data: {what}")]
    MissingData { what: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MarketError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        MarketError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_data(what: impl Into<String>) -> Self {
        MarketError::MissingData { what: what.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MarketError::InvalidInput { .. } => ErrorCategory::Input,
            MarketError::MissingData { .. } => ErrorCategory::Data,
            MarketError::CsvError(_)
            | MarketError::IoError(_)
            | MarketError::SerializationError(_) => ErrorCategory::Output,
            MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. }
            | MarketError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Missing data is expected in an interactive selection and never aborts a run.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MarketError::MissingData { .. } => ErrorSeverity::Low,
            MarketError::IoError(_) => ErrorSeverity::Medium,
            MarketError::InvalidInput { .. }
            | MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. }
            | MarketError::MissingConfigError { .. } => ErrorSeverity::High,
            MarketError::CsvError(_) | MarketError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MarketError::InvalidInput { field, .. } => format!(
                "Check {}: counts must be non-negative, rates within 0-1 and revenue per user positive",
                field
            ),
            MarketError::MissingData { .. } => {
                "Widen the region selection or the penetration range".to_string()
            }
            MarketError::CsvError(_) | MarketError::SerializationError(_) => {
                "Report the dataset that failed to export".to_string()
            }
            MarketError::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            MarketError::ConfigError { .. } | MarketError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            MarketError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {}", field)
            }
            MarketError::MissingConfigError { field } => {
                format!("Add {} to the configuration", field)
            }
        }
    }

    /// Process exit code for the binaries; low-severity errors still succeed.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MarketError::InvalidInput { field, reason, .. } => {
                format!("Invalid market input ({}): {}", field, reason)
            }
            MarketError::MissingData { what } => format!("No data available: {}", what),
            MarketError::IoError(e) => format!("Could not write output: {}", e),
            MarketError::CsvError(e) => format!("Could not export CSV: {}", e),
            MarketError::SerializationError(e) => format!("Could not export JSON: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;

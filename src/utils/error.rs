use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Token signing failed: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Google Sheets API returned {status}: {message}")]
    SheetsApiError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    Authentication,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::UrlError(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::SelectorError { .. } => ErrorCategory::Configuration,
            Self::ParseError { .. } | Self::SerializationError(_) => ErrorCategory::Parsing,
            Self::AuthError { .. } | Self::JwtError(_) => ErrorCategory::Authentication,
            Self::CsvError(_) | Self::IoError(_) | Self::SheetsApiError { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient: rerunning later may succeed.
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::SheetsApiError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the supplier URLs, then rerun",
            ErrorCategory::Configuration => {
                "Check the environment variables / CLI flags and the supplier profile file"
            }
            ErrorCategory::Parsing => {
                "The supplier page layout may have changed; inspect it with `parse-page`"
            }
            ErrorCategory::Authentication => {
                "Verify GOOGLE_SERVICE_ACCOUNT_JSON points to a valid service account key"
            }
            ErrorCategory::Output => {
                "Check that the output path is writable or that the sheet is shared with the service account"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::SheetsApiError { status: 403, .. } => {
                "Google Sheets refused access to the spreadsheet".to_string()
            }
            Self::SheetsApiError { status: 404, .. } => {
                "Spreadsheet or worksheet not found".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_rate_limit_is_retryable() {
        let err = ScrapeError::SheetsApiError {
            status: 429,
            message: "quota".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = ScrapeError::SheetsApiError {
            status: 400,
            message: "bad range".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_missing_config_message() {
        let err = ScrapeError::MissingConfigError {
            field: "spreadsheet_id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(
            err.user_friendly_message(),
            "Required setting 'spreadsheet_id' is not set"
        );
    }
}

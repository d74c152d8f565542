use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebootError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    ApiStatusError {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponseError { endpoint: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Authentication,
    Response,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RebootError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RebootError::ApiError(_) => ErrorCategory::Network,
            RebootError::CsvError(_) | RebootError::ValidationError { .. } => ErrorCategory::Input,
            RebootError::IoError(_) => ErrorCategory::System,
            RebootError::SerializationError(_) | RebootError::UnexpectedResponseError { .. } => {
                ErrorCategory::Response
            }
            RebootError::ConfigValidationError { .. }
            | RebootError::MissingConfigError { .. }
            | RebootError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RebootError::ApiStatusError { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                _ => ErrorCategory::Network,
            },
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Authentication | ErrorCategory::Response => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::System => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Authentication => 3,
            ErrorCategory::Response => 4,
        }
    }

    /// Whether the request that produced this error may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            RebootError::ApiError(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
            }
            RebootError::ApiStatusError { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RebootError::ApiStatusError { status: 401, .. }
            | RebootError::ApiStatusError { status: 403, .. } => {
                "Check that API_KEY holds a valid Reboot Motion API key and that your account has API access".to_string()
            }
            RebootError::ApiStatusError { status: 422, .. } => {
                "The API rejected the request body; check the segment scope ids and dominant hand".to_string()
            }
            RebootError::ApiStatusError { status: 429, .. } => {
                "The API is rate limiting requests; wait a moment and try again".to_string()
            }
            RebootError::ApiStatusError { .. } | RebootError::ApiError(_) => {
                "Check network connectivity and the API base URL, then retry".to_string()
            }
            RebootError::CsvError(_) => {
                "Make sure the CSV has a header row with the play id and pitch type columns".to_string()
            }
            RebootError::IoError(_) => "Check that the file exists and is readable/writable".to_string(),
            RebootError::SerializationError(_) | RebootError::UnexpectedResponseError { .. } => {
                "The API response did not have the expected shape; see https://api.rebootmotion.com/docs".to_string()
            }
            RebootError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            RebootError::ConfigValidationError { field, .. }
            | RebootError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the config file or CLI flags", field)
            }
            RebootError::ValidationError { .. } => {
                "Check that the CSV contains rows for both the primary and comparison pitch types".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Authentication => format!("Authentication with the Reboot Motion API failed: {}", self),
            ErrorCategory::Network => format!("Could not complete the API request: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Invalid input data: {}", self),
            ErrorCategory::Response => format!("Unexpected API response: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RebootError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> RebootError {
        RebootError::ApiStatusError {
            endpoint: "player_group_segments".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_auth_statuses_map_to_authentication() {
        assert_eq!(status(401).category(), ErrorCategory::Authentication);
        assert_eq!(status(403).exit_code(), 3);
        assert!(!status(401).is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        for code in [429, 500, 502, 503, 504] {
            assert!(status(code).is_retryable(), "{} should be retryable", code);
        }
        assert!(!status(400).is_retryable());
        assert!(!status(422).is_retryable());
        assert_eq!(status(503).exit_code(), 2);
    }

    #[test]
    fn test_validation_error_exit_code() {
        let err = RebootError::ValidationError {
            message: "empty segment".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
    }
}

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Missing fields: {}", fields.join(", "))]
    MissingFieldsError { fields: Vec<String> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Remote service responded with HTTP {status}")]
    DownstreamError { status: u16, body: String },

    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected error: {message}")]
    UnexpectedError { message: String },
}

pub type Result<T> = std::result::Result<T, ContactError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Downstream,
    Transport,
    Unexpected,
}

impl ContactError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFieldsError {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFieldsError { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::DownstreamError { .. } => ErrorCategory::Downstream,
            Self::TransportError(_) => ErrorCategory::Transport,
            Self::SerializationError(_) | Self::IoError(_) | Self::UnexpectedError { .. } => {
                ErrorCategory::Unexpected
            }
        }
    }

    /// HTTP status the forwarding endpoint answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Configuration => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Downstream | ErrorCategory::Transport | ErrorCategory::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text placed in the `error` field of a failed relay response.
    ///
    /// Downstream failures carry the remote body verbatim; every other
    /// internal failure collapses to a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingFieldsError { .. } => "Missing fields".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "No endpoint configured".to_string(),
            Self::DownstreamError { body, .. } => body.clone(),
            _ => "Server error".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingFieldsError { fields } => {
                format!("Please fill in: {}", fields.join(", "))
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::MissingConfigError { field } => format!("{} is not configured", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            Self::DownstreamError { status, .. } => {
                format!("The contact service rejected the message (HTTP {})", status)
            }
            Self::TransportError(e) if e.is_timeout() => {
                "The contact service did not answer in time".to_string()
            }
            Self::TransportError(_) => "Could not reach the contact service".to_string(),
            Self::SerializationError(_) => "The request body is not valid JSON".to_string(),
            Self::IoError(e) => format!("I/O error: {}", e),
            Self::UnexpectedError { message } => message.clone(),
        }
    }
}

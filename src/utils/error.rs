use reqwest::StatusCode;
use thiserror::Error;

pub const UPSTREAM_UNREACHABLE_MESSAGE: &str = "Failed to communicate with NFR rest api!";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum FundingError {
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Unexpected response: {status} - {body}")]
    UpstreamRejected { status: u16, body: String },

    #[error("Failed to communicate with NFR rest api!")]
    UpstreamUnreachable,

    #[error("Malformed response from NFR rest api: {0}")]
    MalformedUpstreamResponse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something we refuse to act on.
    Client,
    /// The NFR registry rejected us or could not be reached.
    Upstream,
    Internal,
}

impl FundingError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::NotFound { .. } => ErrorCategory::Client,
            Self::UpstreamRejected { .. } | Self::UpstreamUnreachable => ErrorCategory::Upstream,
            _ => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamRejected { .. } | Self::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Detail string that is safe to hand back to the caller. Internal
    /// failures are reported generically; their cause only goes to the log.
    pub fn public_detail(&self) -> String {
        match self.category() {
            ErrorCategory::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FundingError>;

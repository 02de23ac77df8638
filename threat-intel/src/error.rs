use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for startup and programmer-error conditions
pub type Result<T> = std::result::Result<T, IntelError>;

/// Result type alias for classified query failures
pub type QueryResult<T> = std::result::Result<T, ErrorRecord>;

/// Unexpected failures that are not part of the classified taxonomy.
///
/// These indicate a broken configuration or a programming defect and are
/// allowed to propagate to the process boundary.
#[derive(Debug, Error)]
pub enum IntelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("FALCONFEEDS_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("Unknown prompt '{name}'")]
    UnknownPrompt { name: String },

    #[error("Prompt '{prompt}' requires argument '{argument}'")]
    MissingPromptArgument { prompt: String, argument: String },
}

impl IntelError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Closed set of error codes surfaced to the tool host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidParameter,
    InvalidCountry,
    InvalidIndustry,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    InternalError,
    UnknownError,
    Timeout,
    NetworkError,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "invalid_parameter",
            Self::InvalidCountry => "invalid_country",
            Self::InvalidIndustry => "invalid_industry",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::InternalError => "internal_error",
            Self::UnknownError => "unknown_error",
            Self::Timeout => "timeout",
            Self::NetworkError => "network_error",
        }
    }

    /// Whether the code is raised before any network I/O
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter | Self::InvalidCountry | Self::InvalidIndustry
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure: validation, HTTP status, timeout or transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ErrorRecord {
    /// Human readable description
    pub message: String,
    /// HTTP status, or the HTTP-equivalent for timeouts (408) and transport failures (0)
    pub status: Option<u16>,
    /// Classified error code
    pub code: ErrorCode,
}

impl ErrorRecord {
    pub fn new<S: Into<String>>(message: S, status: Option<u16>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            status,
            code,
        }
    }

    /// Pre-flight rejection of a malformed parameter
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::new(message, Some(400), ErrorCode::InvalidParameter)
    }

    /// Victim country outside the supported set
    pub fn invalid_country<S: Into<String>>(message: S) -> Self {
        Self::new(message, Some(400), ErrorCode::InvalidCountry)
    }

    /// Victim industry outside the supported set
    pub fn invalid_industry<S: Into<String>>(message: S) -> Self {
        Self::new(message, Some(400), ErrorCode::InvalidIndustry)
    }

    /// Non-2xx HTTP outcome classified by status
    pub fn from_status<S: Into<String>>(status: u16, message: S) -> Self {
        let code = crate::analysis::classify_status(status);
        Self::new(message, Some(status), code)
    }

    /// Deadline exceeded before the response completed
    pub fn timeout() -> Self {
        Self::new("Request timeout", Some(408), ErrorCode::Timeout)
    }

    /// Transport failure below HTTP (DNS, connection reset, ...)
    pub fn network<S: AsRef<str>>(detail: S) -> Self {
        Self::new(
            format!("Network error: {}", detail.as_ref()),
            Some(0),
            ErrorCode::NetworkError,
        )
    }

    /// Text shown to the tool host
    pub fn to_tool_text(&self) -> String {
        let status = self
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!(
            "Error: {} (Status: {}, Code: {})",
            self.message, status, self.code
        )
    }
}

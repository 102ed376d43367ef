use thiserror::Error;

/// Errors an adapter may raise while talking to its ad platform
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

// A payload that fails to deserialize is a malformed response, not an internal bug
impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::MalformedResponse(err.to_string())
    }
}

/// Registry errors - only raised for programmer mistakes during wiring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Provider name cannot be empty")]
    EmptyName,

    #[error("Provider name '{0}' exceeds maximum length of {1} characters")]
    NameTooLong(String, usize),

    #[error(
        "Provider name '{0}' contains invalid characters (only lowercase ascii, digits, underscore, hyphen allowed)"
    )]
    InvalidName(String),
}

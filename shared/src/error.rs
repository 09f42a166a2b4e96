use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("client id must be a GUID, got {0:?}")]
    InvalidClientId(String),
    #[error("at least one scope is required")]
    NoScopes,
    #[error("unknown provider {0:?}, expected \"redirect\" or \"mock\"")]
    InvalidProvider(String),
    #[error("agenda days must be between 1 and 31, got {0:?}")]
    InvalidDays(String),
}

/// Failures reading a sign-in redirect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("sign-in was rejected: {error}: {description}")]
    Denied { error: String, description: String },
    #[error("redirect is missing {0}")]
    MissingField(&'static str),
    #[error("invalid expires_in value {0:?}")]
    InvalidExpiry(String),
    #[error("redirect state does not match the sign-in request")]
    StateMismatch,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("no signed-in provider")]
    NotSignedIn,
    #[error("access token was rejected")]
    Unauthorized,
    #[error("network error: {0}")]
    Network(String),
    #[error("Graph returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse Graph response: {0}")]
    Parse(String),
    #[error("unsupported time zone {0:?}")]
    UnsupportedTimeZone(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

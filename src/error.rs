//! Error types for edushare

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Login expired, please log in again")]
    SessionExpired,

    #[error("You do not have permission to access this feature")]
    PermissionDenied,

    #[error("Login required. Redirected to /login")]
    LoginRequired,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource {0} not found")]
    ResourceNotFound(i64),

    #[error("Config file not found. Run 'edushare init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

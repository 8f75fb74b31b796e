use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(calsync::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calsync::config))]
    Config(String),

    #[error("Source calendar error: {0}")]
    #[diagnostic(code(calsync::source))]
    Source(String),

    #[error("Mirror store error: {0}")]
    #[diagnostic(code(calsync::mirror))]
    Mirror(String),

    #[error("Remote calendar API error: {0}")]
    #[diagnostic(code(calsync::remote_api))]
    RemoteApi(String),

    #[error(transparent)]
    #[diagnostic(code(calsync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calsync::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(calsync::other))]
    Other(String),
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for HTTP client errors
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteApi(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = std::result::Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create source calendar errors
pub fn source_error(message: &str) -> Error {
    Error::Source(message.to_string())
}

/// Helper to create mirror store errors
pub fn mirror_error(message: &str) -> Error {
    Error::Mirror(message.to_string())
}

/// Helper to create remote calendar API errors
pub fn remote_error(message: &str) -> Error {
    Error::RemoteApi(message.to_string())
}

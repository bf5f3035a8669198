use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unable to parse match page: {0}")]
    MalformedMarkup(String),

    #[error("Invalid player ID: '{0}' (use the numeric ID from the profile URL)")]
    InvalidPlayerId(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

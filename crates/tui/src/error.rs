//! Errors that abort the client. Recoverable HTTP failures are
//! [`crate::client::ClientError`] and end up as on-screen messages instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
    #[error("unknown timezone: {0}")]
    Timezone(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("local state error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}

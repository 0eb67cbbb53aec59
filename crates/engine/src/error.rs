//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is missing or not owned by the caller.
//! - [`Unauthorized`] thrown when a deactivated account is used.
//! - [`Conflict`] thrown when a unique value already belongs to someone else.
//! - [`InvalidAmount`], [`InvalidTitle`], [`InvalidCategory`] and
//!   [`InvalidSettings`] thrown when input fails validation.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Unauthorized`]: EngineError::Unauthorized
//!  [`Conflict`]: EngineError::Conflict
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidTitle`]: EngineError::InvalidTitle
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidSettings`]: EngineError::InvalidSettings
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid title: {0}")]
    InvalidTitle(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidTitle(a), Self::InvalidTitle(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidSettings(a), Self::InvalidSettings(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

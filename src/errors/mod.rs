//! Error handling module for the petition client.
//!
//! Provides the central error type, the client-side validation errors, and the
//! mapping from server rejections to user-facing messages.

mod messages;

pub use messages::*;

use thiserror::Error;

use crate::models::ImageSubject;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const REJECTED: &str = "REJECTED";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// A client-side validation failure, checked before any request is sent.
///
/// The display text of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must be between 1 and 128 characters long")]
    TitleLength,
    #[error("Description must be between 1 and 1024 characters long")]
    DescriptionLength,
    #[error("Category is required")]
    CategoryRequired,
    #[error("Tier title must be between 1 and 128 characters long")]
    TierTitleLength,
    #[error("Tier description must be between 1 and 1024 characters long")]
    TierDescriptionLength,
    #[error("Cost is required and must be a positive integer")]
    TierCost,
    #[error("Support tiers must have unique titles")]
    DuplicateTierTitle,
    #[error("A petition must have at least one support tier")]
    NoTiers,
    #[error("A petition can have at most 3 support tiers")]
    TooManyTiers,
    #[error("Support tier {0} already has supporters and can not be changed")]
    TierLocked(usize),
    #[error("Support tier {0} does not exist")]
    NoSuchTier(usize),
    #[error("{0} file type must be PNG, JPEG, or GIF")]
    ImageType(ImageSubject),
    #[error("{0} file must be smaller than 5MB")]
    ImageSize(ImageSubject),
    #[error("Hero Image is required")]
    ImageRequired,
    #[error("Max cost must be a positive integer")]
    MaxCost,
    #[error("First name must be between 1 and 64 characters long")]
    FirstNameLength,
    #[error("Last name must be between 1 and 64 characters long")]
    LastNameLength,
    #[error("Email must be between 1 and 256 characters long")]
    EmailLength,
    #[error("Email must be of the form 'adam@example.com'")]
    EmailFormat,
    #[error("Password must be between 6 and 64 characters long")]
    PasswordLength,
    #[error("Current password must be between 6 and 64 characters long")]
    CurrentPasswordLength,
    #[error("Petitions with supporters can not be deleted")]
    PetitionHasSupporters,
    #[error("You can not support your own petition")]
    OwnPetition,
    #[error("You already support this tier")]
    AlreadySupporting,
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Operation needs a session and none is stored
    #[error("not logged in")]
    Unauthenticated,
    /// Session exists but does not own the resource
    #[error("{0}")]
    Forbidden(String),
    /// Server answered with a non-success status
    #[error("{status}: {status_text}")]
    Rejected { status: u16, status_text: String },
    /// Connection, timeout, or protocol failure
    #[error("transport error: {0}")]
    Transport(String),
    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),
    /// Session storage failure
    #[error("storage error: {0}")]
    Storage(String),
    /// Invalid configuration value
    #[error("config error: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Unauthenticated => codes::UNAUTHENTICATED,
            ClientError::Forbidden(_) => codes::FORBIDDEN,
            ClientError::Rejected { .. } => codes::REJECTED,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("HTTP error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Session storage error: {:?}", err);
        ClientError::Storage(format!("Database error: {}", err))
    }
}

//! Client for the SMM backend API
//!
//! Every backend call goes through [`SmmClient`], which attaches the session
//! token as a bearer header and clears the session's authentication flag
//! whenever the backend answers 401.
//!
//! All endpoint methods return [`ApiResult`]. Read endpoints that the
//! backend may answer with a `reason` field (instead of data) yield
//! `Ok(None)`; the two write endpoints that validate user input map any
//! failure to a fixed, user-facing error.

mod client;
mod models;

pub use client::SmmClient;
pub use models::{
    AuthStatus, Bot, Channel, Organization, OrganizationInfo, OrganizationUser, UserProfile,
    UserPublicProfile, UserRight,
};

use smm_login::StorageError;

/// Coarse classification of [`ApiError`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The HTTP client could not be built
    Client,
    /// The request never produced a response
    Network,
    /// The backend answered 401
    Unauthorized,
    /// The backend answered with another non-success status
    Server,
    /// The backend refused the request with a `reason`
    Rejected,
    /// The response body did not have the expected shape
    Decode,
    /// The session token could not be persisted
    Storage,
}

/// Error types for backend API operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Client(String),

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Not authenticated ({endpoint}). Please log in again.")]
    Unauthorized { endpoint: String },

    #[error(
        "{endpoint} returned HTTP {status}{}",
        .reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default()
    )]
    Status {
        endpoint: String,
        status: u16,
        reason: Option<String>,
    },

    #[error("{endpoint} rejected the request: {reason}")]
    Rejected { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Invalid bot token")]
    InvalidBotToken {
        #[source]
        cause: Box<ApiError>,
    },

    #[error("Channel not found or already in use")]
    ChannelUnavailable {
        #[source]
        cause: Box<ApiError>,
    },

    #[error("Failed to persist session token: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Classify the error.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Client(_) => ApiErrorKind::Client,
            ApiError::Transport { .. } => ApiErrorKind::Network,
            ApiError::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            ApiError::Status { .. } => ApiErrorKind::Server,
            ApiError::Rejected { .. }
            | ApiError::InvalidBotToken { .. }
            | ApiError::ChannelUnavailable { .. } => ApiErrorKind::Rejected,
            ApiError::Decode { .. } => ApiErrorKind::Decode,
            ApiError::Storage(_) => ApiErrorKind::Storage,
        }
    }

    /// Whether this error (or the failure it wraps) was a 401.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Unauthorized { .. } => true,
            ApiError::InvalidBotToken { cause } | ApiError::ChannelUnavailable { cause } => {
                cause.is_unauthorized()
            }
            _ => false,
        }
    }
}

/// Result type for backend API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

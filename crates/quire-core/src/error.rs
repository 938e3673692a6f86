//! Error types for quire-core

use thiserror::Error;

use crate::graphql::{GraphqlError, GraphqlErrors};

/// Result type alias using quire-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quire-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Sign-up or sign-in was rejected by the server
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The server rejected the attached credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request never produced a response
    #[error("Transport failure: {0}")]
    Transport(String),

    /// HTTP client error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with GraphQL errors
    #[error("GraphQL error: {0}")]
    Graphql(GraphqlErrors),

    /// Non-success HTTP status without a GraphQL payload
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token storage error
    #[error("Token storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An authenticated operation was attempted without a session
    #[error("Not signed in")]
    NotSignedIn,
}

impl Error {
    /// Whether this error means the server rejected the session's credential.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::Graphql(errors) => errors.iter().any(GraphqlError::is_unauthorized),
            _ => false,
        }
    }

    /// Whether this error is a connectivity problem rather than a server answer.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http(error) => !error.is_status() && !error.is_decode(),
            _ => false,
        }
    }

    /// Recast a remote rejection of sign-up/sign-in credentials.
    ///
    /// Transport and local errors pass through unchanged.
    pub(crate) fn into_authentication_failure(self) -> Self {
        match self {
            Self::Graphql(errors) => Self::Authentication(errors.to_string()),
            Self::Unauthorized(message) => Self::Authentication(message),
            Self::Status { status, body } if (400..500).contains(&status) => {
                Self::Authentication(format!("{body} ({status})"))
            }
            other => other,
        }
    }
}

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quire_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Token storage error: {0}")]
    TokenStorage(String),
    #[error("Profile '{0}' is not signed in. Run `quire auth login` first.")]
    NotSignedIn(String),
}

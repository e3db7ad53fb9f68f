//! IDCS client error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdcsError {
    #[error("credentials file {0} not found. Run `ocikit idcs set-credentials` first")]
    CredentialsNotFound(PathBuf),

    #[error("syntax error in credentials file {0}")]
    CredentialsInvalid(PathBuf),

    #[error("cannot create credentials file {0}")]
    CredentialsWrite(PathBuf),

    #[error("user name not found: {0}")]
    UserNotFound(String),

    #[error("group name not found: {0}")]
    GroupNotFound(String),

    #[error("token request failed: {0}")]
    TokenRequest(String),

    #[error("API request error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IdcsError {
    /// Process exit code the CLI maps this error to.
    pub fn exit_code(&self) -> i32 {
        match self {
            IdcsError::CredentialsWrite(_) => 2,
            IdcsError::CredentialsNotFound(_) => 3,
            IdcsError::CredentialsInvalid(_) => 4,
            IdcsError::UserNotFound(_) => 5,
            IdcsError::GroupNotFound(_) => 6,
            _ => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdcsError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("config file {0} not found")]
    ConfigFileNotFound(PathBuf),

    #[error("profile '{profile}' not found in config file {path}")]
    ProfileNotFound { profile: String, path: PathBuf },

    #[error("profile '{profile}' is missing required key '{key}'")]
    ProfileIncomplete { profile: String, key: &'static str },

    #[error("cannot read config file {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    #[error("invalid OCID '{0}'")]
    InvalidOcid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Process exit code the CLI maps this error to.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::ConfigFileNotFound(_)
            | CoreError::ProfileNotFound { .. }
            | CoreError::ProfileIncomplete { .. }
            | CoreError::ConfigRead { .. } => 2,
            CoreError::InvalidOcid(_) => 1,
            CoreError::Io(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

//! Control-plane error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OciError {
    #[error("oci CLI not found. Please install it and run `oci setup config`")]
    CliNotFound,

    #[error("oci CLI command failed: {0}")]
    CommandFailed(String),

    #[error("{kind} with OCID '{id}' not found")]
    ResourceNotFound { kind: String, id: String },

    #[error("compartment '{0}' does not exist")]
    CompartmentNotFound(String),

    #[error("bucket {0} not found")]
    BucketNotFound(String),

    #[error("tag {namespace}.{key} does not exist on this resource")]
    TagNotFound { namespace: String, key: String },

    #[error("cannot update tags on this resource: {0}")]
    TagUpdateRejected(String),

    #[error("resource type {0} is not supported for this operation")]
    UnsupportedResource(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OciError {
    /// Process exit code the CLI maps this error to.
    pub fn exit_code(&self) -> i32 {
        match self {
            OciError::ResourceNotFound { .. } | OciError::CompartmentNotFound(_) => 3,
            OciError::BucketNotFound(_) => 4,
            OciError::TagNotFound { .. } => 5,
            OciError::TagUpdateRejected(_) => 6,
            OciError::UnsupportedResource(_) => 1,
            _ => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, OciError>;

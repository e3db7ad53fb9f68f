//! IDCS credentials file
//!
//! Two-line plaintext file under `~/.oci/`: the instance name, then
//! `base64(client_id:client_secret)`. The base64 pair goes verbatim into
//! the Basic auth header of the token request.

use crate::error::{IdcsError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the stored credentials.
pub fn credentials_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".oci")
        .join("idcs_credentials")
}

#[derive(Debug, Clone)]
pub struct IdcsCredentials {
    /// IDCS instance name, e.g. `idcs-f0f03632a0e346fdaccfaf527`.
    pub instance: String,
    /// `base64(client_id:client_secret)`.
    pub basic_auth: String,
}

impl IdcsCredentials {
    pub fn new(instance: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            instance: instance.to_string(),
            basic_auth: STANDARD.encode(format!("{}:{}", client_id, client_secret)),
        }
    }

    /// Write the credentials file (prerequisite to all other operations).
    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|_| IdcsError::CredentialsWrite(path.to_path_buf()))?;
        }
        fs::write(path, format!("{}\n{}\n", self.instance, self.basic_auth))
            .map_err(|_| IdcsError::CredentialsWrite(path.to_path_buf()))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&credentials_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IdcsError::CredentialsNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut lines = content.lines();
        let instance = lines.next().unwrap_or_default().trim();
        let basic_auth = lines.next().unwrap_or_default().trim();
        if instance.is_empty() || basic_auth.is_empty() {
            return Err(IdcsError::CredentialsInvalid(path.to_path_buf()));
        }

        Ok(Self {
            instance: instance.to_string(),
            basic_auth: basic_auth.to_string(),
        })
    }

    /// Base URL of the instance's REST endpoint.
    pub fn endpoint(&self) -> String {
        format!("https://{}.identity.oraclecloud.com", self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idcs_credentials");

        let creds = IdcsCredentials::new("idcs-abc123", "client-id", "s3cret");
        creds.store(&path).unwrap();

        let loaded = IdcsCredentials::load_from(&path).unwrap();
        assert_eq!(loaded.instance, "idcs-abc123");
        assert_eq!(loaded.basic_auth, STANDARD.encode("client-id:s3cret"));
        assert_eq!(
            loaded.endpoint(),
            "https://idcs-abc123.identity.oraclecloud.com"
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = IdcsCredentials::load_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, IdcsError::CredentialsNotFound(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_truncated_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idcs_credentials");
        fs::write(&path, "idcs-abc123\n").unwrap();

        let err = IdcsCredentials::load_from(&path).unwrap_err();
        assert!(matches!(err, IdcsError::CredentialsInvalid(_)));
    }
}

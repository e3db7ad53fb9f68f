//! OCI CLI profile configuration
//!
//! Profiles live in `~/.oci/config`, the INI file maintained by the vendor
//! CLI (`oci setup config`). ocikit only reads the metadata it needs to
//! address a tenancy; the private key referenced by `key_file` is never
//! touched here, signing stays with the vendor tooling.

use crate::error::{CoreError, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Default location of the provider CLI config file.
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".oci")
        .join("config")
}

/// A named profile from the provider CLI config file.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    /// Tenancy OCID. Doubles as the root compartment id.
    pub tenancy: String,
    pub user: String,
    pub fingerprint: String,
    pub key_file: Option<String>,
    pub region: String,
}

impl Profile {
    /// Load a profile from `~/.oci/config`.
    pub fn load(profile: &str) -> Result<Self> {
        Self::load_from(&config_path(), profile)
    }

    /// Load a profile from an explicit config file path.
    pub fn load_from(path: &Path, profile: &str) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigFileNotFound(path.to_path_buf()));
        }

        tracing::debug!("Loading profile '{}' from {}", profile, path.display());

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()
            .map_err(|e| CoreError::ConfigRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let section = settings
            .get_table(profile)
            .map_err(|_| CoreError::ProfileNotFound {
                profile: profile.to_string(),
                path: path.to_path_buf(),
            })?;

        let required = |key: &'static str| -> Result<String> {
            section
                .get(key)
                .and_then(|v| v.clone().into_string().ok())
                .ok_or(CoreError::ProfileIncomplete {
                    profile: profile.to_string(),
                    key,
                })
        };

        Ok(Self {
            name: profile.to_string(),
            tenancy: required("tenancy")?,
            user: required("user")?,
            fingerprint: required("fingerprint")?,
            key_file: section
                .get("key_file")
                .and_then(|v| v.clone().into_string().ok()),
            region: required("region")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
[DEFAULT]
tenancy     = ocid1.tenancy.oc1..aaaaaaaadefault
user        = ocid1.user.oc1..aaaaaaaadefault
fingerprint = 19:1d:7b:3a:17:00:00:00:00:00:00:00:00:00:00:00
key_file    = /home/demo/.oci/api_key.pem
region      = eu-frankfurt-1

[EMEAOSCF]
tenancy     = ocid1.tenancy.oc1..aaaaaaaaemea
user        = ocid1.user.oc1..aaaaaaaaemea
fingerprint = 20:2e:8c:4b:28:00:00:00:00:00:00:00:00:00:00:00
key_file    = /home/demo/.oci/api_key.pem
region      = uk-london-1
";

    #[test]
    fn test_load_named_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, SAMPLE).unwrap();

        let profile = Profile::load_from(&path, "EMEAOSCF").unwrap();
        assert_eq!(profile.tenancy, "ocid1.tenancy.oc1..aaaaaaaaemea");
        assert_eq!(profile.region, "uk-london-1");
        assert_eq!(
            profile.key_file.as_deref(),
            Some("/home/demo/.oci/api_key.pem")
        );
    }

    #[test]
    fn test_load_default_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, SAMPLE).unwrap();

        let profile = Profile::load_from(&path, DEFAULT_PROFILE).unwrap();
        assert_eq!(profile.region, "eu-frankfurt-1");
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, SAMPLE).unwrap();

        let err = Profile::load_from(&path, "NOSUCH").unwrap_err();
        assert!(matches!(err, CoreError::ProfileNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist");

        let err = Profile::load_from(&path, DEFAULT_PROFILE).unwrap_err();
        assert!(matches!(err, CoreError::ConfigFileNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_incomplete_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "[PARTIAL]\ntenancy = ocid1.tenancy.oc1..aaa\n").unwrap();

        let err = Profile::load_from(&path, "PARTIAL").unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProfileIncomplete { key: "user", .. }
        ));
    }
}

//! Core plumbing shared by the ocikit crates: profile configuration,
//! OCID parsing and the error taxonomy with its exit-code mapping.

pub mod error;
pub mod ocid;
pub mod profile;

pub use error::{CoreError, Result};
pub use ocid::{Ocid, ResourceKind};
pub use profile::{DEFAULT_PROFILE, Profile, config_path};

//! Identity cloud (IDCS) client for ocikit
//!
//! Talks to an IDCS instance's SCIM admin API directly over REST. An OAuth2
//! confidential application (client id + secret) must exist on the instance;
//! `ocikit idcs set-credentials` stores the pair once and every other
//! operation exchanges it for a bearer token on startup.

pub mod client;
pub mod credentials;
pub mod error;

pub use client::{IdcsClient, ScimGroup, ScimUser};
pub use credentials::{IdcsCredentials, credentials_path};
pub use error::{IdcsError, Result};

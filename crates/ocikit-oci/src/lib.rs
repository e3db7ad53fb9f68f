//! OCI control-plane access for ocikit
//!
//! This crate wraps the vendor `oci` CLI (JSON output mode) behind typed
//! async methods. Delegating to the installed CLI keeps API request signing
//! and pagination the vendor's problem: every list call passes `--all` and
//! every response is the documented JSON envelope.
//!
//! # Requirements
//!
//! - The `oci` CLI must be installed and configured
//! - Profiles are read from `~/.oci/config`, the same file ocikit-core parses
//!
//! # Example
//!
//! ```ignore
//! use ocikit_oci::OciCli;
//!
//! let oci = OciCli::new("DEFAULT");
//!
//! // List every compartment under the tenancy, deleted ones included
//! let compartments = oci.list_compartments(tenancy_id).await?;
//!
//! // Same client, pinned to another subscribed region
//! let frankfurt = oci.with_region("eu-frankfurt-1");
//! let instances = frankfurt.list_instances(compartment_id).await?;
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod schedule;
pub mod search;

pub use cli::{OciCli, supports_tag_operations};
pub use error::{OciError, Result};
pub use models::{
    AvailabilityDomain, Compartment, DbNode, DbSystem, DefinedTags, IcmpOptions,
    NetworkSecurityGroup, PortOptions, PortRange, PreauthRequest, RegionSubscription,
    ResourceSummary, RouteRule, RouteTable, SearchItem, SecurityList, SecurityRule, Subnet,
    TaggedResource, Vcn, tag_value,
};
pub use schedule::{
    ScheduleAction, TAG_KEY_START, TAG_KEY_STOP, TAG_NAMESPACE, current_hour_tag,
    db_system_action,
};

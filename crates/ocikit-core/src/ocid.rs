//! OCID parsing and resource-kind dispatch
//!
//! Every OCID embeds its resource type as the second dot-separated field
//! (`ocid1.instance.oc1.eu-frankfurt-1.abc...`). The tag commands dispatch
//! on that segment.

use crate::error::{CoreError, Result};

/// A validated resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ocid {
    raw: String,
    kind: ResourceKind,
}

impl Ocid {
    /// Parse and validate the `ocid1.<type>.<realm>...` shape.
    pub fn parse(raw: &str) -> Result<Self> {
        let fields: Vec<&str> = raw.split('.').collect();
        if fields.len() < 4 || fields[0] != "ocid1" || fields[1].is_empty() {
            return Err(CoreError::InvalidOcid(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            kind: ResourceKind::from_type_segment(fields[1]),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }
}

impl std::fmt::Display for Ocid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resource kind embedded in an OCID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    // compute
    Instance,
    Image,
    BootVolume,
    // block storage
    Volume,
    VolumeBackup,
    // database
    DbSystem,
    AutonomousDatabase,
    // object storage
    Bucket,
    // networking
    Vcn,
    Subnet,
    RouteTable,
    InternetGateway,
    Drg,
    NetworkSecurityGroup,
    SecurityList,
    DhcpOptions,
    LocalPeeringGateway,
    NatGateway,
    ServiceGateway,
    // identity
    Compartment,
    Tenancy,
    /// Anything this tool has no handler for.
    Unsupported(String),
}

impl ResourceKind {
    /// Map the OCID type segment (case-insensitive) to a kind.
    pub fn from_type_segment(segment: &str) -> Self {
        match segment.to_lowercase().as_str() {
            "instance" => ResourceKind::Instance,
            "image" => ResourceKind::Image,
            "bootvolume" => ResourceKind::BootVolume,
            "volume" => ResourceKind::Volume,
            "volumebackup" => ResourceKind::VolumeBackup,
            "dbsystem" => ResourceKind::DbSystem,
            "autonomousdatabase" => ResourceKind::AutonomousDatabase,
            "bucket" => ResourceKind::Bucket,
            "vcn" => ResourceKind::Vcn,
            "subnet" => ResourceKind::Subnet,
            "routetable" => ResourceKind::RouteTable,
            "internetgateway" => ResourceKind::InternetGateway,
            "drg" => ResourceKind::Drg,
            "networksecuritygroup" => ResourceKind::NetworkSecurityGroup,
            "securitylist" => ResourceKind::SecurityList,
            "dhcpoptions" => ResourceKind::DhcpOptions,
            "localpeeringgateway" => ResourceKind::LocalPeeringGateway,
            "natgateway" => ResourceKind::NatGateway,
            "servicegateway" => ResourceKind::ServiceGateway,
            "compartment" => ResourceKind::Compartment,
            "tenancy" => ResourceKind::Tenancy,
            other => ResourceKind::Unsupported(other.to_string()),
        }
    }

    /// Human-readable label used in messages.
    pub fn label(&self) -> &str {
        match self {
            ResourceKind::Instance => "compute instance",
            ResourceKind::Image => "custom image",
            ResourceKind::BootVolume => "boot volume",
            ResourceKind::Volume => "block volume",
            ResourceKind::VolumeBackup => "block volume backup",
            ResourceKind::DbSystem => "db system",
            ResourceKind::AutonomousDatabase => "autonomous database",
            ResourceKind::Bucket => "bucket",
            ResourceKind::Vcn => "VCN",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route table",
            ResourceKind::InternetGateway => "internet gateway",
            ResourceKind::Drg => "dynamic routing gateway",
            ResourceKind::NetworkSecurityGroup => "network security group",
            ResourceKind::SecurityList => "security list",
            ResourceKind::DhcpOptions => "DHCP options",
            ResourceKind::LocalPeeringGateway => "local peering gateway",
            ResourceKind::NatGateway => "NAT gateway",
            ResourceKind::ServiceGateway => "service gateway",
            ResourceKind::Compartment => "compartment",
            ResourceKind::Tenancy => "tenancy",
            ResourceKind::Unsupported(s) => s,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instance_ocid() {
        let ocid =
            Ocid::parse("ocid1.instance.oc1.eu-frankfurt-1.aaaaaaaabbbbbbbbcccccccc").unwrap();
        assert_eq!(ocid.kind(), &ResourceKind::Instance);
    }

    #[test]
    fn test_parse_tenancy_ocid_with_empty_region_field() {
        let ocid = Ocid::parse("ocid1.tenancy.oc1..aaaaaaaaw7e6nkszrry6d5h").unwrap();
        assert_eq!(ocid.kind(), &ResourceKind::Tenancy);
    }

    #[test]
    fn test_kind_segment_is_case_insensitive() {
        assert_eq!(
            ResourceKind::from_type_segment("AutonomousDatabase"),
            ResourceKind::AutonomousDatabase
        );
    }

    #[test]
    fn test_unknown_kind_is_unsupported_not_an_error() {
        let ocid = Ocid::parse("ocid1.cloudexadatainfrastructure.oc1.phx.aaaa").unwrap();
        assert_eq!(
            ocid.kind(),
            &ResourceKind::Unsupported("cloudexadatainfrastructure".to_string())
        );
    }

    #[test]
    fn test_reject_malformed_ocid() {
        assert!(Ocid::parse("not-an-ocid").is_err());
        assert!(Ocid::parse("ocid1..oc1.aaa").is_err());
        assert!(Ocid::parse("ocid2.instance.oc1.phx.aaa").is_err());
    }
}

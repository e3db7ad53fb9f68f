//! Vendor CLI wrapper
//!
//! Wraps `oci` CLI invocations for control-plane operations. Each method
//! shells out with `--output json` (and `--all` on list calls, so paginated
//! results come back complete) and deserializes the documented envelope.

use crate::error::{OciError, Result};
use crate::models::*;
use ocikit_core::ResourceKind;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use tokio::process::Command;

/// One client per (profile, region) pair.
#[derive(Debug, Clone)]
pub struct OciCli {
    profile: String,
    region: Option<String>,
}

impl OciCli {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: None,
        }
    }

    /// Same profile, pinned to another subscribed region.
    pub fn with_region(&self, region: impl Into<String>) -> Self {
        Self {
            profile: self.profile.clone(),
            region: Some(region.into()),
        }
    }

    /// Run an oci CLI command and return stdout.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("oci");
        cmd.arg("--profile").arg(&self.profile);
        if let Some(region) = &self.region {
            cmd.arg("--region").arg(region);
        }
        cmd.args(args);
        cmd.arg("--output").arg("json");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: oci --profile {} {}", self.profile, args.join(" "));

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OciError::CliNotFound
            } else {
                OciError::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OciError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a command and unwrap one `{"data": ...}` payload.
    async fn run_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T> {
        let output = self.run(args).await?;
        let envelope: Envelope<T> = serde_json::from_str(&output)?;
        Ok(envelope.data)
    }

    /// Run a list command. Services answer an empty body instead of an
    /// empty array when nothing matches.
    async fn run_list<T: DeserializeOwned>(&self, args: &[&str]) -> Result<Vec<T>> {
        let output = self.run(args).await?;
        if output.trim().is_empty() || output.trim() == "[]" {
            return Ok(Vec::new());
        }

        let envelope: Envelope<Vec<T>> = serde_json::from_str(&output)?;
        Ok(envelope.data)
    }

    // ---- identity

    /// All compartments under the tenancy, deleted ones included. Callers
    /// filter on lifecycle state.
    pub async fn list_compartments(&self, tenancy_id: &str) -> Result<Vec<Compartment>> {
        self.run_list(&[
            "iam",
            "compartment",
            "list",
            "--compartment-id",
            tenancy_id,
            "--compartment-id-in-subtree",
            "true",
            "--all",
        ])
        .await
    }

    /// Direct children of one compartment.
    pub async fn list_child_compartments(&self, compartment_id: &str) -> Result<Vec<Compartment>> {
        self.run_list(&[
            "iam",
            "compartment",
            "list",
            "--compartment-id",
            compartment_id,
            "--all",
        ])
        .await
    }

    pub async fn list_region_subscriptions(
        &self,
        tenancy_id: &str,
    ) -> Result<Vec<RegionSubscription>> {
        self.run_list(&["iam", "region-subscription", "list", "--tenancy-id", tenancy_id])
            .await
    }

    pub async fn list_availability_domains(
        &self,
        compartment_id: &str,
    ) -> Result<Vec<AvailabilityDomain>> {
        self.run_list(&[
            "iam",
            "availability-domain",
            "list",
            "--compartment-id",
            compartment_id,
        ])
        .await
    }

    // ---- search

    /// Structured search (see the provider's query syntax docs).
    pub async fn search_resources(&self, query: &str) -> Result<Vec<SearchItem>> {
        let output = self
            .run(&["search", "resource", "structured-search", "--query-text", query])
            .await?;
        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope<SearchCollection> = serde_json::from_str(&output)?;
        Ok(envelope.data.items)
    }

    // ---- compute

    /// Power action on an instance: START, STOP, SOFTSTOP, RESET...
    pub async fn instance_action(&self, instance_id: &str, action: &str) -> Result<()> {
        self.run(&[
            "compute",
            "instance",
            "action",
            "--instance-id",
            instance_id,
            "--action",
            action,
        ])
        .await?;
        Ok(())
    }

    // ---- database

    pub async fn list_db_systems(&self, compartment_id: &str) -> Result<Vec<DbSystem>> {
        self.run_list(&["db", "system", "list", "--compartment-id", compartment_id, "--all"])
            .await
    }

    pub async fn list_db_nodes(
        &self,
        compartment_id: &str,
        db_system_id: &str,
    ) -> Result<Vec<DbNode>> {
        self.run_list(&[
            "db",
            "node",
            "list",
            "--compartment-id",
            compartment_id,
            "--db-system-id",
            db_system_id,
        ])
        .await
    }

    pub async fn start_db_node(&self, node_id: &str) -> Result<()> {
        self.run(&["db", "node", "start", "--db-node-id", node_id]).await?;
        Ok(())
    }

    pub async fn stop_db_node(&self, node_id: &str) -> Result<()> {
        self.run(&["db", "node", "stop", "--db-node-id", node_id]).await?;
        Ok(())
    }

    // ---- networking

    pub async fn list_vcns(&self, compartment_id: &str) -> Result<Vec<Vcn>> {
        self.run_list(&["network", "vcn", "list", "--compartment-id", compartment_id, "--all"])
            .await
    }

    pub async fn list_subnets(&self, compartment_id: &str, vcn_id: &str) -> Result<Vec<Subnet>> {
        self.run_list(&[
            "network",
            "subnet",
            "list",
            "--compartment-id",
            compartment_id,
            "--vcn-id",
            vcn_id,
            "--all",
        ])
        .await
    }

    pub async fn get_route_table(&self, route_table_id: &str) -> Result<RouteTable> {
        self.run_json(&["network", "route-table", "get", "--rt-id", route_table_id])
            .await
    }

    pub async fn get_security_list(&self, security_list_id: &str) -> Result<SecurityList> {
        self.run_json(&[
            "network",
            "security-list",
            "get",
            "--security-list-id",
            security_list_id,
        ])
        .await
    }

    pub async fn list_network_security_groups(
        &self,
        compartment_id: &str,
        vcn_id: &str,
    ) -> Result<Vec<NetworkSecurityGroup>> {
        self.run_list(&[
            "network",
            "nsg",
            "list",
            "--compartment-id",
            compartment_id,
            "--vcn-id",
            vcn_id,
            "--all",
        ])
        .await
    }

    pub async fn list_nsg_rules(&self, nsg_id: &str) -> Result<Vec<SecurityRule>> {
        self.run_list(&["network", "nsg", "rules", "list", "--nsg-id", nsg_id, "--all"])
            .await
    }

    // ---- object storage

    /// The tenancy's object-storage namespace.
    pub async fn namespace(&self) -> Result<String> {
        self.run_json(&["os", "ns", "get"]).await
    }

    pub async fn list_buckets(
        &self,
        namespace: &str,
        compartment_id: &str,
    ) -> Result<Vec<ResourceSummary>> {
        self.run_list(&[
            "os",
            "bucket",
            "list",
            "--namespace-name",
            namespace,
            "--compartment-id",
            compartment_id,
            "--all",
        ])
        .await
    }

    pub async fn list_preauth_requests(
        &self,
        namespace: &str,
        bucket: &str,
    ) -> Result<Vec<PreauthRequest>> {
        self.run_list(&[
            "os",
            "preauth-request",
            "list",
            "--namespace-name",
            namespace,
            "--bucket-name",
            bucket,
            "--all",
        ])
        .await
        .map_err(|e| match e {
            OciError::CommandFailed(msg) if msg.contains("BucketNotFound") => {
                OciError::BucketNotFound(bucket.to_string())
            }
            other => other,
        })
    }

    pub async fn delete_preauth_request(
        &self,
        namespace: &str,
        bucket: &str,
        par_id: &str,
    ) -> Result<()> {
        self.run(&[
            "os",
            "preauth-request",
            "delete",
            "--namespace-name",
            namespace,
            "--bucket-name",
            bucket,
            "--par-id",
            par_id,
            "--force",
        ])
        .await?;
        Ok(())
    }

    // ---- generic listing (compartment inventory)

    /// Run an arbitrary list command and reduce rows to id / name / state.
    pub async fn list_generic(&self, args: &[&str]) -> Result<Vec<ResourceSummary>> {
        self.run_list(args).await
    }

    // ---- defined tags on arbitrary resources

    /// Fetch name and defined-tags for any resource the dispatch table
    /// covers. Failures from the service collapse to "not found" so callers
    /// report the original scripts' message.
    pub async fn get_tagged_resource(
        &self,
        kind: &ResourceKind,
        ocid: &str,
    ) -> Result<TaggedResource> {
        let endpoint = tag_endpoint(kind)
            .ok_or_else(|| OciError::UnsupportedResource(kind.label().to_string()))?;

        let mut args: Vec<&str> = endpoint.path.to_vec();
        args.push("get");
        args.push(endpoint.id_flag);
        args.push(ocid);

        self.run_json(&args).await.map_err(|e| match e {
            OciError::CommandFailed(_) | OciError::Json(_) => OciError::ResourceNotFound {
                kind: kind.label().to_string(),
                id: ocid.to_string(),
            },
            other => other,
        })
    }

    /// Replace the defined-tags map on any resource the dispatch table
    /// covers.
    pub async fn update_resource_tags(
        &self,
        kind: &ResourceKind,
        ocid: &str,
        tags: &DefinedTags,
    ) -> Result<()> {
        let endpoint = tag_endpoint(kind)
            .ok_or_else(|| OciError::UnsupportedResource(kind.label().to_string()))?;

        let tags_json = serde_json::to_string(tags)?;
        let mut args: Vec<&str> = endpoint.path.to_vec();
        args.push("update");
        args.push(endpoint.id_flag);
        args.push(ocid);
        args.push("--defined-tags");
        args.push(&tags_json);
        args.push("--force");

        self.run(&args).await.map_err(|e| match e {
            OciError::CommandFailed(msg) => OciError::TagUpdateRejected(msg),
            other => other,
        })?;
        Ok(())
    }
}

/// Service path and id flag for each resource kind the tag commands cover.
struct TagEndpoint {
    path: &'static [&'static str],
    id_flag: &'static str,
}

fn tag_endpoint(kind: &ResourceKind) -> Option<TagEndpoint> {
    let (path, id_flag): (&'static [&'static str], &'static str) = match kind {
        ResourceKind::Instance => (&["compute", "instance"], "--instance-id"),
        ResourceKind::Image => (&["compute", "image"], "--image-id"),
        ResourceKind::BootVolume => (&["bv", "boot-volume"], "--boot-volume-id"),
        ResourceKind::Volume => (&["bv", "volume"], "--volume-id"),
        ResourceKind::VolumeBackup => (&["bv", "backup"], "--volume-backup-id"),
        ResourceKind::DbSystem => (&["db", "system"], "--db-system-id"),
        ResourceKind::AutonomousDatabase => {
            (&["db", "autonomous-database"], "--autonomous-database-id")
        }
        ResourceKind::Vcn => (&["network", "vcn"], "--vcn-id"),
        ResourceKind::Subnet => (&["network", "subnet"], "--subnet-id"),
        ResourceKind::RouteTable => (&["network", "route-table"], "--rt-id"),
        ResourceKind::InternetGateway => (&["network", "internet-gateway"], "--ig-id"),
        ResourceKind::Drg => (&["network", "drg"], "--drg-id"),
        ResourceKind::NetworkSecurityGroup => (&["network", "nsg"], "--nsg-id"),
        ResourceKind::SecurityList => (&["network", "security-list"], "--security-list-id"),
        ResourceKind::DhcpOptions => (&["network", "dhcp-options"], "--dhcp-id"),
        ResourceKind::LocalPeeringGateway => {
            (&["network", "local-peering-gateway"], "--local-peering-gateway-id")
        }
        ResourceKind::NatGateway => (&["network", "nat-gateway"], "--nat-gateway-id"),
        ResourceKind::ServiceGateway => (&["network", "service-gateway"], "--service-gateway-id"),
        // Buckets are addressed by name + namespace, not by OCID; the
        // OCID-driven tag commands cannot reach them.
        _ => return None,
    };

    Some(TagEndpoint { path, id_flag })
}

/// Whether the OCID-driven tag commands cover this resource kind.
pub fn supports_tag_operations(kind: &ResourceKind) -> bool {
    tag_endpoint(kind).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_dispatch_covers_networking() {
        let endpoint = tag_endpoint(&ResourceKind::SecurityList).unwrap();
        assert_eq!(endpoint.path, &["network", "security-list"]);
        assert_eq!(endpoint.id_flag, "--security-list-id");
    }

    #[test]
    fn test_tag_dispatch_rejects_buckets_and_unknown() {
        assert!(!supports_tag_operations(&ResourceKind::Bucket));
        assert!(!supports_tag_operations(&ResourceKind::Unsupported(
            "cluster".to_string()
        )));
        assert!(supports_tag_operations(&ResourceKind::AutonomousDatabase));
    }

    #[test]
    fn test_missing_cli_binary_maps_to_cli_not_found() {
        // Point PATH at an empty directory so `oci` cannot resolve.
        let empty = tempfile::tempdir().unwrap();
        temp_env::with_var("PATH", Some(empty.path().as_os_str()), || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(OciCli::new("DEFAULT").namespace());
            assert!(matches!(result, Err(OciError::CliNotFound)));
        });
    }
}

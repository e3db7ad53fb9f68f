//! serde models for the vendor CLI's JSON output
//!
//! The CLI wraps every payload in `{"data": ...}` and uses kebab-case keys.
//! Only the fields the commands actually print are modelled.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// The `{"data": ...}` wrapper around every CLI response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Defined tags: namespace -> key -> value.
pub type DefinedTags = HashMap<String, HashMap<String, serde_json::Value>>;

/// Render a tag value for display. Tag values are strings in practice but
/// the API models them as free-form JSON.
pub fn tag_value(tags: &DefinedTags, namespace: &str, key: &str) -> Option<String> {
    let value = tags.get(namespace)?.get(key)?;
    Some(match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct Compartment {
    pub id: String,
    /// Parent compartment id.
    #[serde(rename = "compartment-id")]
    pub compartment_id: Option<String>,
    pub name: String,
    #[serde(rename = "lifecycle-state")]
    pub lifecycle_state: String,
}

impl Compartment {
    pub fn is_deleted(&self) -> bool {
        self.lifecycle_state == "DELETED"
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle_state == "ACTIVE"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSubscription {
    #[serde(rename = "region-name")]
    pub region_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityDomain {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbSystem {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "lifecycle-state")]
    pub lifecycle_state: String,
    #[serde(rename = "compartment-id")]
    pub compartment_id: String,
    #[serde(rename = "defined-tags", default)]
    pub defined_tags: DefinedTags,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbNode {
    pub id: String,
    #[serde(rename = "lifecycle-state")]
    pub lifecycle_state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vcn {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "cidr-block")]
    pub cidr_block: String,
    #[serde(rename = "dns-label")]
    pub dns_label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subnet {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "cidr-block")]
    pub cidr_block: String,
    #[serde(rename = "dns-label")]
    pub dns_label: Option<String>,
    #[serde(rename = "route-table-id")]
    pub route_table_id: String,
    #[serde(rename = "security-list-ids", default)]
    pub security_list_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteTable {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "route-rules", default)]
    pub route_rules: Vec<RouteRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRule {
    pub destination: Option<String>,
    #[serde(rename = "network-entity-id")]
    pub network_entity_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityList {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "ingress-security-rules", default)]
    pub ingress_security_rules: Vec<SecurityRule>,
    #[serde(rename = "egress-security-rules", default)]
    pub egress_security_rules: Vec<SecurityRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSecurityGroup {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
}

/// A security rule, from either a security list or an NSG. NSG rules carry
/// a direction; list rules come pre-split into ingress and egress.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityRule {
    pub protocol: String,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub direction: Option<String>,
    #[serde(rename = "icmp-options")]
    pub icmp_options: Option<IcmpOptions>,
    #[serde(rename = "tcp-options")]
    pub tcp_options: Option<PortOptions>,
    #[serde(rename = "udp-options")]
    pub udp_options: Option<PortOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IcmpOptions {
    #[serde(rename = "type")]
    pub icmp_type: Option<i64>,
    pub code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortOptions {
    #[serde(rename = "destination-port-range")]
    pub destination_port_range: Option<PortRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreauthRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "object-name")]
    pub object_name: Option<String>,
    #[serde(rename = "time-expires")]
    pub time_expires: DateTime<Utc>,
}

impl PreauthRequest {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.time_expires <= now
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCollection {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub identifier: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(rename = "resource-type")]
    pub resource_type: String,
    #[serde(rename = "compartment-id")]
    pub compartment_id: String,
    #[serde(rename = "lifecycle-state")]
    pub lifecycle_state: Option<String>,
    #[serde(rename = "defined-tags", default)]
    pub defined_tags: DefinedTags,
}

/// Generic row used by the compartment inventory: every list endpoint
/// reports some subset of id / name / state.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSummary {
    #[serde(default, alias = "topic-id")]
    pub id: Option<String>,
    #[serde(
        rename = "display-name",
        alias = "name",
        alias = "email-address",
        default
    )]
    pub name: Option<String>,
    #[serde(rename = "lifecycle-state", default)]
    pub lifecycle_state: Option<String>,
}

/// Any resource reduced to the two fields the tag commands need.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggedResource {
    #[serde(rename = "display-name", alias = "name", default)]
    pub display_name: Option<String>,
    #[serde(rename = "defined-tags", default)]
    pub defined_tags: DefinedTags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compartment_envelope() {
        let json = r#"{
          "data": [
            {
              "compartment-id": "ocid1.tenancy.oc1..aaa",
              "id": "ocid1.compartment.oc1..bbb",
              "name": "sandbox",
              "lifecycle-state": "ACTIVE"
            }
          ]
        }"#;

        let env: Envelope<Vec<Compartment>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.data.len(), 1);
        assert!(env.data[0].is_active());
        assert_eq!(
            env.data[0].compartment_id.as_deref(),
            Some("ocid1.tenancy.oc1..aaa")
        );
    }

    #[test]
    fn test_db_system_defined_tags() {
        let json = r#"{
          "id": "ocid1.dbsystem.oc1.phx.aaa",
          "display-name": "erp-db",
          "lifecycle-state": "AVAILABLE",
          "compartment-id": "ocid1.compartment.oc1..bbb",
          "defined-tags": {"osc": {"automatic_shutdown": "20:00_UTC"}}
        }"#;

        let dbs: DbSystem = serde_json::from_str(json).unwrap();
        assert_eq!(
            tag_value(&dbs.defined_tags, "osc", "automatic_shutdown").as_deref(),
            Some("20:00_UTC")
        );
        assert_eq!(
            tag_value(&dbs.defined_tags, "osc", "automatic_startup"),
            None
        );
    }

    #[test]
    fn test_resource_summary_name_aliases() {
        let by_display: ResourceSummary =
            serde_json::from_str(r#"{"id": "x", "display-name": "web", "lifecycle-state": "AVAILABLE"}"#)
                .unwrap();
        assert_eq!(by_display.name.as_deref(), Some("web"));

        let by_name: ResourceSummary =
            serde_json::from_str(r#"{"id": "y", "name": "zone.example.com"}"#).unwrap();
        assert_eq!(by_name.name.as_deref(), Some("zone.example.com"));

        let sender: ResourceSummary =
            serde_json::from_str(r#"{"email-address": "no-reply@example.com"}"#).unwrap();
        assert_eq!(sender.name.as_deref(), Some("no-reply@example.com"));
        assert!(sender.id.is_none());
    }

    #[test]
    fn test_preauth_expiry() {
        let json = r#"{
          "id": "par-1",
          "name": "weekly-export",
          "object-name": "export.csv",
          "time-expires": "2020-03-25T10:00:00+00:00"
        }"#;

        let par: PreauthRequest = serde_json::from_str(json).unwrap();
        let before = "2020-03-24T00:00:00Z".parse().unwrap();
        let after = "2020-03-26T00:00:00Z".parse().unwrap();
        assert!(!par.is_expired(before));
        assert!(par.is_expired(after));
    }

    #[test]
    fn test_search_collection_defaults_empty() {
        let empty: SearchCollection = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());

        let json = r#"{
          "items": [
            {
              "identifier": "ocid1.instance.oc1.phx.aaa",
              "display-name": "web-1",
              "resource-type": "Instance",
              "compartment-id": "ocid1.compartment.oc1..bbb",
              "lifecycle-state": "RUNNING",
              "defined-tags": {"osc": {"automatic_startup": "07:00_UTC"}}
            }
          ]
        }"#;
        let found: SearchCollection = serde_json::from_str(json).unwrap();
        assert_eq!(found.items[0].resource_type, "Instance");
    }
}

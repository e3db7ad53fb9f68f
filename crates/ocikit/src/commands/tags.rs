//! Defined-tag plumbing on arbitrary resources, dispatched on the
//! resource type embedded in the OCID.

use crate::utils;
use colored::Colorize;
use ocikit_core::{Ocid, Profile};
use ocikit_oci::{OciCli, OciError, search, supports_tag_operations};

pub async fn handle_show(profile: &str, ocid: &str) -> anyhow::Result<()> {
    let ocid = Ocid::parse(ocid)?;
    if !supports_tag_operations(ocid.kind()) {
        println!(
            "SORRY: resource type {} is not yet supported by this command",
            ocid.kind()
        );
        return Ok(());
    }

    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);
    let resource = oci.get_tagged_resource(ocid.kind(), ocid.as_str()).await?;

    println!("{}", serde_json::to_string_pretty(&resource.defined_tags)?);
    Ok(())
}

pub async fn handle_add(
    profile: &str,
    ocid: &str,
    namespace: &str,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let ocid = Ocid::parse(ocid)?;
    if !supports_tag_operations(ocid.kind()) {
        println!(
            "SORRY: resource type {} is not yet supported by this command",
            ocid.kind()
        );
        return Ok(());
    }

    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    // Read-modify-write: the update replaces the whole defined-tags map.
    let resource = oci.get_tagged_resource(ocid.kind(), ocid.as_str()).await?;
    let mut tags = resource.defined_tags;
    tags.entry(namespace.to_string())
        .or_default()
        .insert(key.to_string(), serde_json::Value::String(value.to_string()));

    oci.update_resource_tags(ocid.kind(), ocid.as_str(), &tags)
        .await?;

    println!(
        "{}",
        format!(
            "✓ tag {}.{} = {} set on {} {}",
            namespace,
            key,
            value,
            ocid.kind(),
            resource.display_name.as_deref().unwrap_or(ocid.as_str())
        )
        .green()
    );
    Ok(())
}

pub async fn handle_remove(
    profile: &str,
    ocid: &str,
    namespace: &str,
    key: &str,
) -> anyhow::Result<()> {
    let ocid = Ocid::parse(ocid)?;
    if !supports_tag_operations(ocid.kind()) {
        println!(
            "SORRY: resource type {} is not yet supported by this command",
            ocid.kind()
        );
        return Ok(());
    }

    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let resource = oci.get_tagged_resource(ocid.kind(), ocid.as_str()).await?;
    let mut tags = resource.defined_tags;

    let tag_not_found = || OciError::TagNotFound {
        namespace: namespace.to_string(),
        key: key.to_string(),
    };
    let keys = tags.get_mut(namespace).ok_or_else(tag_not_found)?;
    keys.remove(key).ok_or_else(tag_not_found)?;

    oci.update_resource_tags(ocid.kind(), ocid.as_str(), &tags)
        .await?;

    println!(
        "{}",
        format!(
            "✓ tag {}.{} removed from {} {}",
            namespace,
            key,
            ocid.kind(),
            resource.display_name.as_deref().unwrap_or(ocid.as_str())
        )
        .green()
    );
    Ok(())
}

pub async fn handle_search(
    profile: &str,
    namespace: &str,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let compartments = oci.list_compartments(&profile.tenancy).await?;
    let query = search::resources_with_tag(namespace, key, value);
    let items = oci.search_resources(&query).await?;

    if !items.is_empty() {
        println!("{}", "Resource type, Compartment, Display name, OCID".bold());
    }
    for item in items {
        println!(
            "{}, {}, {}, {}",
            item.resource_type,
            utils::compartment_name(&compartments, &item.compartment_id),
            item.display_name,
            item.identifier
        );
    }

    Ok(())
}

//! Tag-driven compute instance operations.
//!
//! `schedule` is meant to run from cron every hour: instances carrying the
//! `osc.automatic_shutdown` / `osc.automatic_startup` tags are stopped or
//! started when the tag value matches the current UTC hour.

use crate::utils;
use chrono::Utc;
use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{OciCli, TAG_KEY_START, TAG_KEY_STOP, TAG_NAMESPACE, current_hour_tag, search, tag_value};

pub async fn handle_list_tagged(
    profile: &str,
    namespace: &str,
    key: &str,
    all_regions: bool,
) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let compartments = oci.list_compartments(&profile.tenancy).await?;
    let regions = utils::region_names(&oci, &profile, all_regions).await?;
    let query = search::instances_with_tag_key(namespace, key);

    println!("{}", "Region, Compartment, Display name, OCID, Tag".bold());
    for region in &regions {
        let roci = oci.with_region(region);
        for item in roci.search_resources(&query).await? {
            let value =
                tag_value(&item.defined_tags, namespace, key).unwrap_or_else(|| "-".to_string());
            println!(
                "{}, {}, {}, {}, {}.{} = {}",
                region,
                utils::compartment_name(&compartments, &item.compartment_id),
                item.display_name,
                item.identifier,
                namespace,
                key,
                value
            );
        }
    }

    Ok(())
}

pub async fn handle_schedule(
    profile: &str,
    all_regions: bool,
    confirm_stop: bool,
    confirm_start: bool,
) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);
    let pid = std::process::id();

    println!(
        "{}: BEGIN SCRIPT PID={}",
        Utc::now().format("%Y/%m/%d %H:%M:%S"),
        pid
    );

    let hour_tag = current_hour_tag(Utc::now());
    let compartments = oci.list_compartments(&profile.tenancy).await?;
    let regions = utils::region_names(&oci, &profile, all_regions).await?;

    // Instances to stop: RUNNING with a matching shutdown tag.
    let stop_query =
        search::instances_in_state_with_tag("RUNNING", TAG_NAMESPACE, TAG_KEY_STOP, &hour_tag);
    for region in &regions {
        let roci = oci.with_region(region);
        for item in roci.search_resources(&stop_query).await? {
            print!(
                "{}, {}, {}: ",
                Utc::now().format("%H:%M:%S"),
                region,
                utils::compartment_name(&compartments, &item.compartment_id)
            );
            if confirm_stop {
                println!(
                    "{}",
                    format!(
                        "STOPPING instance {} ({})",
                        item.display_name, item.identifier
                    )
                    .red()
                );
                roci.instance_action(&item.identifier, "SOFTSTOP").await?;
            } else {
                println!(
                    "Instance {} ({}) SHOULD BE STOPPED --> re-run with --confirm-stop to actually stop instances",
                    item.display_name, item.identifier
                );
            }
        }
    }

    // Instances to start: STOPPED with a matching startup tag.
    let start_query =
        search::instances_in_state_with_tag("STOPPED", TAG_NAMESPACE, TAG_KEY_START, &hour_tag);
    for region in &regions {
        let roci = oci.with_region(region);
        for item in roci.search_resources(&start_query).await? {
            print!(
                "{}, {}, {}: ",
                Utc::now().format("%H:%M:%S"),
                region,
                utils::compartment_name(&compartments, &item.compartment_id)
            );
            if confirm_start {
                println!(
                    "{}",
                    format!(
                        "STARTING instance {} ({})",
                        item.display_name, item.identifier
                    )
                    .green()
                );
                roci.instance_action(&item.identifier, "START").await?;
            } else {
                println!(
                    "Instance {} ({}) SHOULD BE STARTED --> re-run with --confirm-start to actually start instances",
                    item.display_name, item.identifier
                );
            }
        }
    }

    println!(
        "{}: END SCRIPT PID={}",
        Utc::now().format("%Y/%m/%d %H:%M:%S"),
        pid
    );
    Ok(())
}

//! Tag-driven VM DB system operations.
//!
//! Unlike compute instances, DB power state lives on the DB node, which the
//! search service does not index. The scheduler therefore scans every
//! active compartment and inspects the first node of each system.

use crate::utils;
use chrono::Utc;
use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{
    Compartment, OciCli, ScheduleAction, TAG_KEY_START, TAG_KEY_STOP, TAG_NAMESPACE,
    current_hour_tag, db_system_action, tag_value,
};

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

    for region in &regions {
        let roci = oci.with_region(region);
        for compartment in compartments.iter().filter(|c| !c.is_deleted()) {
            process_compartment(
                &roci,
                region,
                compartment,
                &hour_tag,
                confirm_stop,
                confirm_start,
            )
            .await?;
        }
    }

    println!(
        "{}: END SCRIPT PID={}",
        Utc::now().format("%Y/%m/%d %H:%M:%S"),
        pid
    );
    Ok(())
}

async fn process_compartment(
    oci: &OciCli,
    region: &str,
    compartment: &Compartment,
    hour_tag: &str,
    confirm_stop: bool,
    confirm_start: bool,
) -> anyhow::Result<()> {
    for dbs in oci.list_db_systems(&compartment.id).await? {
        if dbs.lifecycle_state == "TERMINATED" {
            continue;
        }

        let stop_value = tag_value(&dbs.defined_tags, TAG_NAMESPACE, TAG_KEY_STOP);
        let start_value = tag_value(&dbs.defined_tags, TAG_NAMESPACE, TAG_KEY_START);

        let nodes = oci.list_db_nodes(&compartment.id, &dbs.id).await?;
        let Some(node) = nodes.first() else {
            continue;
        };

        match db_system_action(
            &node.lifecycle_state,
            stop_value.as_deref(),
            start_value.as_deref(),
            hour_tag,
        ) {
            Some(ScheduleAction::Stop) => {
                print!(
                    "{}, {}, {}: ",
                    Utc::now().format("%H:%M:%S"),
                    region,
                    compartment.name
                );
                if confirm_stop {
                    println!(
                        "{}",
                        format!("STOPPING DB node for {} ({})", dbs.display_name, dbs.id).red()
                    );
                    oci.stop_db_node(&node.id).await?;
                } else {
                    println!(
                        "DB node for DB system {} ({}) SHOULD BE STOPPED --> re-run with --confirm-stop to actually stop databases",
                        dbs.display_name, dbs.id
                    );
                }
            }
            Some(ScheduleAction::Start) => {
                print!(
                    "{}, {}, {}: ",
                    Utc::now().format("%H:%M:%S"),
                    region,
                    compartment.name
                );
                if confirm_start {
                    println!(
                        "{}",
                        format!("STARTING DB node for {} ({})", dbs.display_name, dbs.id).green()
                    );
                    oci.start_db_node(&node.id).await?;
                } else {
                    println!(
                        "DB node for DB system {} ({}) SHOULD BE STARTED --> re-run with --confirm-start to actually start databases",
                        dbs.display_name, dbs.id
                    );
                }
            }
            None => {}
        }
    }

    Ok(())
}

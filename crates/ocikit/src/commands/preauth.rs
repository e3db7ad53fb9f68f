//! Object-storage preauthenticated requests: list and expired cleanup.

use crate::utils;
use chrono::Utc;
use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{OciCli, PreauthRequest};

pub async fn handle_list(profile: &str, bucket: &str) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let namespace = oci.namespace().await?;
    let requests = oci.list_preauth_requests(&namespace, bucket).await?;

    if requests.is_empty() {
        println!("No pre-authenticated requests found for this bucket !");
        return Ok(());
    }

    let now = Utc::now();

    println!(
        "{}{}{}",
        "List of ACTIVE pre-authenticated requests for bucket ".bold(),
        bucket.yellow(),
        ": (name, object-name, time-expires)".bold()
    );
    for request in requests.iter().filter(|r| !r.is_expired(now)) {
        print_request(request, false);
    }

    println!();
    println!(
        "{}{}{}",
        "List of EXPIRED pre-authenticated requests for bucket ".bold(),
        bucket.yellow(),
        ": (name, object-name, time-expires)".bold()
    );
    for request in requests.iter().filter(|r| r.is_expired(now)) {
        print_request(request, true);
    }

    Ok(())
}

pub async fn handle_clean(profile: &str, bucket: &str, confirm: bool) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let namespace = oci.namespace().await?;
    let requests = oci.list_preauth_requests(&namespace, bucket).await?;

    if requests.is_empty() {
        println!("No pre-authenticated requests found for this bucket !");
        return Ok(());
    }

    let now = Utc::now();
    let expired: Vec<&PreauthRequest> = requests.iter().filter(|r| r.is_expired(now)).collect();
    if expired.is_empty() {
        println!("No expired pre-authenticated requests found for this bucket !");
        return Ok(());
    }

    println!(
        "List of expired pre-authenticated requests for bucket {}:",
        bucket
    );
    for request in &expired {
        print_request(request, true);
    }

    println!();
    if !confirm && !utils::confirm("Do you confirm deletion of those requests ? (y/n): ")? {
        println!("Deletion not confirmed. Exiting !");
        std::process::exit(5);
    }

    for request in &expired {
        oci.delete_preauth_request(&namespace, bucket, &request.id)
            .await?;
    }

    println!("{}", "Pre-authenticated requests deleted !".green());
    Ok(())
}

fn print_request(request: &PreauthRequest, expired: bool) {
    let line = format!(
        "- {:<50} {:<55} {}",
        request.name,
        request.object_name.as_deref().unwrap_or("-"),
        request.time_expires
    );
    if expired {
        println!("{}", line.red());
    } else {
        println!("{}", line.green());
    }
}

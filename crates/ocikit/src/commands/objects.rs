//! Compartment inventory: every supported object type, section by section.

use crate::utils;
use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{AvailabilityDomain, OciCli, ResourceSummary};

/// One inventory section: banner title plus the vendor list command.
/// `per_ad` sections must be queried once per availability domain.
struct Section {
    title: &'static str,
    args: &'static [&'static str],
    per_ad: bool,
}

/// Objects common to all regions, printed once.
const COMMON_SECTIONS: &[Section] = &[
    Section {
        title: "NETWORKING: DNS zones",
        args: &["dns", "zone", "list"],
        per_ad: false,
    },
    Section {
        title: "IDENTITY: Policies",
        args: &["iam", "policy", "list"],
        per_ad: false,
    },
    Section {
        title: "GOVERNANCE: Tag namespaces",
        args: &["iam", "tag-namespace", "list"],
        per_ad: false,
    },
];

/// Region-specific sections up to object storage.
const COMPUTE_AND_BLOCK_SECTIONS: &[Section] = &[
    Section {
        title: "COMPUTE: Instances",
        args: &["compute", "instance", "list"],
        per_ad: false,
    },
    Section {
        title: "COMPUTE: Dedicated virtual machine hosts",
        args: &["compute", "dedicated-vm-host", "list"],
        per_ad: false,
    },
    Section {
        title: "COMPUTE: Instance configurations",
        args: &["compute-management", "instance-configuration", "list"],
        per_ad: false,
    },
    Section {
        title: "COMPUTE: Instance pools",
        args: &["compute-management", "instance-pool", "list"],
        per_ad: false,
    },
    Section {
        title: "COMPUTE: Images",
        args: &["compute", "image", "list"],
        per_ad: false,
    },
    Section {
        title: "COMPUTE: Boot volumes",
        args: &["bv", "boot-volume", "list"],
        per_ad: true,
    },
    Section {
        title: "COMPUTE: Boot volume backups",
        args: &["bv", "boot-volume-backup", "list"],
        per_ad: false,
    },
    Section {
        title: "BLOCK STORAGE: Block volumes",
        args: &["bv", "volume", "list"],
        per_ad: true,
    },
    Section {
        title: "BLOCK STORAGE: Block volume backups",
        args: &["bv", "backup", "list"],
        per_ad: false,
    },
    Section {
        title: "BLOCK STORAGE: Volume groups",
        args: &["bv", "volume-group", "list"],
        per_ad: true,
    },
    Section {
        title: "BLOCK STORAGE: Volume group backups",
        args: &["bv", "volume-group-backup", "list"],
        per_ad: false,
    },
];

/// Region-specific sections between object storage and email delivery.
const STORAGE_TO_EMAIL_SECTIONS: &[Section] = &[
    Section {
        title: "FILE STORAGE: File systems",
        args: &["fs", "file-system", "list"],
        per_ad: true,
    },
    Section {
        title: "FILE STORAGE: Mount targets",
        args: &["fs", "mount-target", "list"],
        per_ad: true,
    },
    Section {
        title: "NETWORKING: Virtual Cloud Networks (VCNs)",
        args: &["network", "vcn", "list"],
        per_ad: false,
    },
    Section {
        title: "NETWORKING: Dynamic Routing Gateways (DRGs)",
        args: &["network", "drg", "list"],
        per_ad: false,
    },
    Section {
        title: "NETWORKING: Customer Premises Equipments (CPEs)",
        args: &["network", "cpe", "list"],
        per_ad: false,
    },
    Section {
        title: "NETWORKING: IPsec connections",
        args: &["network", "ip-sec-connection", "list"],
        per_ad: false,
    },
    Section {
        title: "NETWORKING: Load balancers",
        args: &["lb", "load-balancer", "list"],
        per_ad: false,
    },
    Section {
        title: "NETWORKING: Reserved public IPs",
        args: &[
            "network",
            "public-ip",
            "list",
            "--scope",
            "REGION",
            "--lifetime",
            "RESERVED",
        ],
        per_ad: false,
    },
    Section {
        title: "DATABASE: DB systems",
        args: &["db", "system", "list"],
        per_ad: false,
    },
    Section {
        title: "DATABASE: DB system backups",
        args: &["db", "backup", "list"],
        per_ad: false,
    },
    Section {
        title: "DATABASE: Autonomous databases (ATP/ADW)",
        args: &["db", "autonomous-database", "list"],
        per_ad: false,
    },
    Section {
        title: "DATABASE: Autonomous database backups",
        args: &["db", "autonomous-database-backup", "list"],
        per_ad: false,
    },
    Section {
        title: "DATABASE: NoSQL database tables",
        args: &["nosql", "table", "list"],
        per_ad: false,
    },
    Section {
        title: "RESOURCE MANAGER: Stacks",
        args: &["resource-manager", "stack", "list"],
        per_ad: false,
    },
    Section {
        title: "EMAIL DELIVERY: Approved senders",
        args: &["email", "sender", "list"],
        per_ad: false,
    },
];

/// Region-specific sections after email delivery.
const TAIL_SECTIONS: &[Section] = &[
    Section {
        title: "APPLICATION INTEGRATION: Notifications topics",
        args: &["ons", "topic", "list"],
        per_ad: false,
    },
    Section {
        title: "APPLICATION INTEGRATION: Events rules",
        args: &["events", "rule", "list"],
        per_ad: false,
    },
    Section {
        title: "DEVELOPER SERVICES: Container clusters (OKE)",
        args: &["ce", "cluster", "list"],
        per_ad: false,
    },
    Section {
        title: "DEVELOPER SERVICES: Functions applications",
        args: &["fn", "application", "list"],
        per_ad: false,
    },
];

pub async fn handle_list(
    profile: &str,
    compartment: &str,
    all_regions: bool,
    recursive: bool,
) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let compartments = oci.list_compartments(&profile.tenancy).await?;
    let initial = utils::resolve_compartment(&profile.tenancy, &compartments, compartment)?;
    let targets = compartment_walk(&oci, initial, recursive).await?;

    let regions = oci.list_region_subscriptions(&profile.tenancy).await?;
    if all_regions {
        println!(
            "{}",
            "==================== Subscribed regions in tenancy".red()
        );
        for region in &regions {
            println!("{}", region.region_name);
        }
    }

    for (id, name) in &targets {
        println!(
            "{}{}",
            "==================== BEGIN: objects common to all regions in compartment ".red(),
            name.yellow()
        );
        for section in COMMON_SECTIONS {
            print_section(&oci, section, id, &[]).await?;
        }
        println!(
            "{}{}",
            "==================== END: objects common to all regions in compartment ".red(),
            name.yellow()
        );
    }

    let region_names: Vec<String> = if all_regions {
        regions.iter().map(|r| r.region_name.clone()).collect()
    } else {
        vec![profile.region.clone()]
    };

    for region in &region_names {
        let roci = oci.with_region(region);
        let ads = roci.list_availability_domains(&profile.tenancy).await?;
        let namespace = roci.namespace().await?;

        for (id, name) in &targets {
            println!(
                "{}{}{}{}",
                "==================== BEGIN: objects specific to region ".red(),
                region.yellow(),
                " in compartment ".red(),
                name.yellow()
            );

            for section in COMPUTE_AND_BLOCK_SECTIONS {
                print_section(&roci, section, id, &ads).await?;
            }

            print_banner(&format!("OBJECT STORAGE: Buckets (namespace {})", namespace));
            for bucket in roci.list_buckets(&namespace, id).await? {
                println!("{}", bucket.name.as_deref().unwrap_or("-"));
            }

            for section in STORAGE_TO_EMAIL_SECTIONS {
                print_section(&roci, section, id, &ads).await?;
            }

            // The suppressions list can only exist in the root compartment.
            if id == &profile.tenancy {
                print_banner("EMAIL DELIVERY: Suppressions list");
                let args = ["email", "suppression", "list", "--compartment-id", id, "--all"];
                print_rows(&roci.list_generic(&args).await?);
            }

            for section in TAIL_SECTIONS {
                print_section(&roci, section, id, &ads).await?;
            }

            println!(
                "{}{}{}{}",
                "==================== END: objects specific to region ".red(),
                region.yellow(),
                " in compartment ".red(),
                name.yellow()
            );
        }
    }

    Ok(())
}

/// Preorder walk over the initial compartment and, when recursing, its
/// active sub-compartments.
async fn compartment_walk(
    oci: &OciCli,
    initial: (String, String),
    recursive: bool,
) -> anyhow::Result<Vec<(String, String)>> {
    let mut targets = Vec::new();
    let mut stack = vec![initial];

    while let Some((id, name)) = stack.pop() {
        if recursive {
            let children = oci.list_child_compartments(&id).await?;
            for child in children.into_iter().filter(|c| c.is_active()).rev() {
                stack.push((child.id, child.name));
            }
        }
        targets.push((id, name));
    }

    Ok(targets)
}

async fn print_section(
    oci: &OciCli,
    section: &Section,
    compartment_id: &str,
    ads: &[AvailabilityDomain],
) -> anyhow::Result<()> {
    print_banner(section.title);

    if section.per_ad {
        for ad in ads {
            println!("{}", format!("== Availability-domain {}", ad.name).blue());
            let mut args: Vec<&str> = section.args.to_vec();
            args.extend_from_slice(&[
                "--availability-domain",
                &ad.name,
                "--compartment-id",
                compartment_id,
                "--all",
            ]);
            print_rows(&oci.list_generic(&args).await?);
        }
    } else {
        let mut args: Vec<&str> = section.args.to_vec();
        args.extend_from_slice(&["--compartment-id", compartment_id, "--all"]);
        print_rows(&oci.list_generic(&args).await?);
    }

    Ok(())
}

fn print_banner(title: &str) {
    println!("{}", format!("========== {}", title).green());
}

fn print_rows(rows: &[ResourceSummary]) {
    for row in rows {
        println!(
            "{:<100} {:<30} {}",
            row.id.as_deref().unwrap_or("-"),
            row.name.as_deref().unwrap_or("-"),
            row.lifecycle_state.as_deref().unwrap_or("-")
        );
    }
}

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "ocikit")]
#[command(version)]
#[command(about = "Tenancy operations toolkit for Oracle Cloud Infrastructure", long_about = None)]
struct Cli {
    /// Profile from ~/.oci/config
    #[arg(
        short,
        long,
        global = true,
        env = "OCI_CLI_PROFILE",
        default_value = ocikit_core::DEFAULT_PROFILE
    )]
    profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compartments of the tenancy
    #[command(subcommand)]
    Compartments(CompartmentCommands),
    /// Compute instances
    #[command(subcommand)]
    Instances(InstanceCommands),
    /// VM DB systems
    #[command(subcommand)]
    Dbsystems(DbSystemCommands),
    /// Objects in a compartment
    #[command(subcommand)]
    Objects(ObjectCommands),
    /// Virtual cloud networks
    #[command(subcommand)]
    Vcns(VcnCommands),
    /// Defined tags on arbitrary resources
    #[command(subcommand)]
    Tags(TagCommands),
    /// Object-storage preauthenticated requests
    #[command(subcommand)]
    Preauth(PreauthCommands),
    /// Identity cloud (IDCS) users and groups
    #[command(subcommand)]
    Idcs(IdcsCommands),
}

#[derive(Subcommand)]
pub(crate) enum CompartmentCommands {
    /// Flat listing of all compartments and sub-compartments
    List {
        /// Also list deleted compartments
        #[arg(short = 'd', long)]
        deleted: bool,
    },
    /// Render the compartment hierarchy as a tree
    Tree {
        /// Also list deleted compartments
        #[arg(short = 'd', long)]
        deleted: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum InstanceCommands {
    /// List instances carrying a defined tag key
    ListTagged {
        /// Tag namespace
        namespace: String,
        /// Tag key
        key: String,
        /// Process all subscribed regions instead of the profile region
        #[arg(short = 'a', long)]
        all_regions: bool,
    },
    /// Stop/start instances whose schedule tag matches the current UTC hour
    Schedule {
        /// Process all subscribed regions instead of the profile region
        #[arg(short = 'a', long)]
        all_regions: bool,
        /// Actually stop matching instances (otherwise they are only listed)
        #[arg(long)]
        confirm_stop: bool,
        /// Actually start matching instances (otherwise they are only listed)
        #[arg(long)]
        confirm_start: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum DbSystemCommands {
    /// Stop/start VM DB systems whose schedule tag matches the current UTC hour
    Schedule {
        /// Process all subscribed regions instead of the profile region
        #[arg(short = 'a', long)]
        all_regions: bool,
        /// Actually stop matching DB nodes (otherwise they are only listed)
        #[arg(long)]
        confirm_stop: bool,
        /// Actually start matching DB nodes (otherwise they are only listed)
        #[arg(long)]
        confirm_start: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ObjectCommands {
    /// Inventory of every supported object type in a compartment
    List {
        /// Compartment name, compartment OCID or the literal `root`
        compartment: String,
        /// Process all subscribed regions instead of the profile region
        #[arg(short = 'a', long)]
        all_regions: bool,
        /// Also walk active sub-compartments
        #[arg(short = 'r', long)]
        recursive: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum VcnCommands {
    /// VCNs with their subnets, route tables, security lists and NSGs
    Show {
        /// Compartment name, compartment OCID or the literal `root`
        compartment: String,
        /// Also display object OCIDs
        #[arg(short = 'i', long)]
        ocids: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum TagCommands {
    /// Show the defined tags of a resource
    Show {
        /// Resource OCID
        ocid: String,
    },
    /// Add or update a defined tag on a resource
    Add {
        /// Resource OCID
        ocid: String,
        /// Tag namespace
        namespace: String,
        /// Tag key
        key: String,
        /// Tag value
        value: String,
    },
    /// Remove a defined tag from a resource
    Remove {
        /// Resource OCID
        ocid: String,
        /// Tag namespace
        namespace: String,
        /// Tag key
        key: String,
    },
    /// Search all resources carrying a defined tag value
    Search {
        /// Tag namespace
        namespace: String,
        /// Tag key
        key: String,
        /// Tag value
        value: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum PreauthCommands {
    /// Active and expired preauthenticated requests of a bucket
    List {
        /// Bucket name
        bucket: String,
    },
    /// Delete the expired preauthenticated requests of a bucket
    Clean {
        /// Bucket name
        bucket: String,
        /// Delete without asking for confirmation
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum IdcsCommands {
    /// Store the OAuth2 client credentials (prerequisite to all operations)
    SetCredentials {
        /// IDCS instance name, e.g. idcs-f0f03632a0e346fdaccfaf527
        instance: String,
        /// OAuth2 client id
        client_id: String,
        /// OAuth2 client secret
        client_secret: String,
    },
    /// User operations
    #[command(subcommand)]
    Users(IdcsUserCommands),
    /// Group operations
    #[command(subcommand)]
    Groups(IdcsGroupCommands),
}

#[derive(Subcommand)]
pub(crate) enum IdcsUserCommands {
    /// List users
    List {
        /// Also show title, creation date and creator, sorted by creation date
        #[arg(long)]
        long: bool,
    },
    /// Full SCIM document of a user
    Show { name: String },
    /// Create a user
    Add {
        name: String,
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Activate a user
    Activate { name: String },
    /// Deactivate a user
    Deactivate { name: String },
    /// Delete a user
    Delete {
        name: String,
        /// Delete without asking for confirmation
        #[arg(long)]
        confirm: bool,
    },
    /// Groups a user belongs to
    Groups { name: String },
}

#[derive(Subcommand)]
pub(crate) enum IdcsGroupCommands {
    /// List groups
    List,
    /// Full SCIM document of a group
    Show { name: String },
    /// Create a group
    Add { name: String, description: String },
    /// Delete a group
    Delete {
        name: String,
        /// Delete without asking for confirmation
        #[arg(long)]
        confirm: bool,
    },
    /// Members of a group
    Members { name: String },
    /// Add a user to a group
    AddMember { user: String, group: String },
    /// Remove a user from a group
    RemoveMember { user: String, group: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", "ERROR:".red().bold());
        std::process::exit(utils::exit_code(&err));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli.profile.as_str();

    match cli.command {
        Commands::Compartments(cmd) => match cmd {
            CompartmentCommands::List { deleted } => {
                commands::compartments::handle_list(profile, deleted).await?;
            }
            CompartmentCommands::Tree { deleted } => {
                commands::compartments::handle_tree(profile, deleted).await?;
            }
        },
        Commands::Instances(cmd) => match cmd {
            InstanceCommands::ListTagged {
                namespace,
                key,
                all_regions,
            } => {
                commands::instances::handle_list_tagged(profile, &namespace, &key, all_regions)
                    .await?;
            }
            InstanceCommands::Schedule {
                all_regions,
                confirm_stop,
                confirm_start,
            } => {
                commands::instances::handle_schedule(
                    profile,
                    all_regions,
                    confirm_stop,
                    confirm_start,
                )
                .await?;
            }
        },
        Commands::Dbsystems(cmd) => match cmd {
            DbSystemCommands::Schedule {
                all_regions,
                confirm_stop,
                confirm_start,
            } => {
                commands::dbsystems::handle_schedule(
                    profile,
                    all_regions,
                    confirm_stop,
                    confirm_start,
                )
                .await?;
            }
        },
        Commands::Objects(cmd) => match cmd {
            ObjectCommands::List {
                compartment,
                all_regions,
                recursive,
            } => {
                commands::objects::handle_list(profile, &compartment, all_regions, recursive)
                    .await?;
            }
        },
        Commands::Vcns(cmd) => match cmd {
            VcnCommands::Show { compartment, ocids } => {
                commands::vcns::handle_show(profile, &compartment, ocids).await?;
            }
        },
        Commands::Tags(cmd) => match cmd {
            TagCommands::Show { ocid } => {
                commands::tags::handle_show(profile, &ocid).await?;
            }
            TagCommands::Add {
                ocid,
                namespace,
                key,
                value,
            } => {
                commands::tags::handle_add(profile, &ocid, &namespace, &key, &value).await?;
            }
            TagCommands::Remove {
                ocid,
                namespace,
                key,
            } => {
                commands::tags::handle_remove(profile, &ocid, &namespace, &key).await?;
            }
            TagCommands::Search {
                namespace,
                key,
                value,
            } => {
                commands::tags::handle_search(profile, &namespace, &key, &value).await?;
            }
        },
        Commands::Preauth(cmd) => match cmd {
            PreauthCommands::List { bucket } => {
                commands::preauth::handle_list(profile, &bucket).await?;
            }
            PreauthCommands::Clean { bucket, confirm } => {
                commands::preauth::handle_clean(profile, &bucket, confirm).await?;
            }
        },
        Commands::Idcs(cmd) => match cmd {
            IdcsCommands::SetCredentials {
                instance,
                client_id,
                client_secret,
            } => {
                commands::idcs::handle_set_credentials(&instance, &client_id, &client_secret)?;
            }
            IdcsCommands::Users(users_cmd) => {
                commands::idcs::handle_users(users_cmd).await?;
            }
            IdcsCommands::Groups(groups_cmd) => {
                commands::idcs::handle_groups(groups_cmd).await?;
            }
        },
    }

    Ok(())
}

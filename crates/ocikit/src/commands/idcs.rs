//! Identity cloud (IDCS) user and group operations over the SCIM API.

use crate::utils;
use crate::{IdcsGroupCommands, IdcsUserCommands};
use colored::Colorize;
use ocikit_idcs::{IdcsClient, IdcsCredentials, credentials_path};

pub fn handle_set_credentials(
    instance: &str,
    client_id: &str,
    client_secret: &str,
) -> anyhow::Result<()> {
    let credentials = IdcsCredentials::new(instance, client_id, client_secret);
    let path = credentials_path();
    credentials.store(&path)?;

    println!(
        "{}",
        format!("✓ credentials stored in {}", path.display()).green()
    );
    Ok(())
}

async fn connect() -> anyhow::Result<IdcsClient> {
    let credentials = IdcsCredentials::load()?;
    Ok(IdcsClient::connect(&credentials).await?)
}

pub async fn handle_users(command: IdcsUserCommands) -> anyhow::Result<()> {
    let client = connect().await?;

    match command {
        IdcsUserCommands::List { long } => {
            let mut users = client.list_users().await?;
            if long {
                // Oldest account first.
                users.sort_by(|a, b| a.created().cmp(b.created()));
                println!(
                    "{}",
                    format!(
                        "{:<25} {:<7} {:<34} {:<20} {:<26} {}",
                        "USER NAME", "ACTIVE", "USER ID", "TITLE", "CREATED", "CREATED BY"
                    )
                    .bold()
                );
                for user in &users {
                    println!(
                        "{:<25} {:<7} {:<34} {:<20} {:<26} {}",
                        user.user_name,
                        user.active,
                        user.id,
                        user.title.as_deref().unwrap_or(""),
                        user.created(),
                        user.created_by_display()
                    );
                }
            } else {
                users.sort_by(|a, b| a.user_name.cmp(&b.user_name));
                println!(
                    "{}",
                    format!("{:<25} {:<7} {}", "USER NAME", "ACTIVE", "USER ID").bold()
                );
                for user in &users {
                    println!("{:<25} {:<7} {}", user.user_name, user.active, user.id);
                }
            }
        }
        IdcsUserCommands::Show { name } => {
            let user_id = client.user_id(&name).await?;
            let document = client.show_user(&user_id).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        IdcsUserCommands::Add {
            name,
            first_name,
            last_name,
            email,
        } => {
            let document = client
                .create_user(&name, &first_name, &last_name, &email)
                .await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        IdcsUserCommands::Activate { name } => {
            let user_id = client.user_id(&name).await?;
            client.set_user_active(&user_id, true).await?;
            println!("{}", format!("✓ user {} activated", name).green());
        }
        IdcsUserCommands::Deactivate { name } => {
            let user_id = client.user_id(&name).await?;
            client.set_user_active(&user_id, false).await?;
            println!("{}", format!("✓ user {} deactivated", name).yellow());
        }
        IdcsUserCommands::Delete { name, confirm } => {
            let user_id = client.user_id(&name).await?;
            if !confirm {
                let prompt = format!(
                    "Do you confirm deletion of user {} (Id {}) ? (y/n): ",
                    name, user_id
                );
                if !utils::confirm(&prompt)? {
                    println!("User deletion cancelled !");
                    return Ok(());
                }
            }
            client.delete_user(&user_id).await?;
            println!("User {} (Id {}) deleted !", name, user_id);
        }
        IdcsUserCommands::Groups { name } => {
            let user_id = client.user_id(&name).await?;
            let groups = client.user_groups(&user_id).await?;
            if groups.is_empty() {
                println!();
            }
            for group in groups {
                println!("{}", group);
            }
        }
    }

    Ok(())
}

pub async fn handle_groups(command: IdcsGroupCommands) -> anyhow::Result<()> {
    let client = connect().await?;

    match command {
        IdcsGroupCommands::List => {
            println!(
                "{}",
                format!("{:<34} {}", "GROUP ID", "GROUP NAME").bold()
            );
            for group in client.list_groups().await? {
                println!("{:<34} {}", group.id, group.display_name);
            }
        }
        IdcsGroupCommands::Show { name } => {
            let group_id = client.group_id(&name).await?;
            let document = client.show_group(&group_id).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        IdcsGroupCommands::Add { name, description } => {
            let document = client.create_group(&name, &description).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        IdcsGroupCommands::Delete { name, confirm } => {
            let group_id = client.group_id(&name).await?;
            if !confirm {
                let prompt = format!(
                    "Do you confirm deletion of group {} (Id {}) ? (y/n): ",
                    name, group_id
                );
                if !utils::confirm(&prompt)? {
                    println!("Group deletion cancelled !");
                    return Ok(());
                }
            }
            client.delete_group(&group_id).await?;
            println!("Group {} (Id {}) deleted !", name, group_id);
        }
        IdcsGroupCommands::Members { name } => {
            let group_id = client.group_id(&name).await?;
            let members = client.group_members(&group_id).await?;
            if members.is_empty() {
                println!();
            }
            for member in members {
                println!("{}", member);
            }
        }
        IdcsGroupCommands::AddMember { user, group } => {
            let user_id = client.user_id(&user).await?;
            let group_id = client.group_id(&group).await?;
            client.add_group_member(&group_id, &user_id).await?;
            println!(
                "{}",
                format!("✓ user {} added to group {}", user, group).green()
            );
        }
        IdcsGroupCommands::RemoveMember { user, group } => {
            let user_id = client.user_id(&user).await?;
            let group_id = client.group_id(&group).await?;
            client.remove_group_member(&group_id, &user_id).await?;
            println!(
                "{}",
                format!("✓ user {} removed from group {}", user, group).yellow()
            );
        }
    }

    Ok(())
}

use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{Compartment, OciCli};

pub async fn handle_list(profile: &str, include_deleted: bool) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);
    let compartments = oci.list_compartments(&profile.tenancy).await?;

    println!(
        "{}",
        format!(
            "{:<30} {:<9} {}",
            "Compartment name", "State", "Compartment OCID"
        )
        .bold()
    );
    println!("{:<30} {:<9} {}", "RootCompartment", "ACTIVE", profile.tenancy);

    for c in &compartments {
        if include_deleted || !c.is_deleted() {
            let state = if c.is_deleted() {
                c.lifecycle_state.red()
            } else {
                c.lifecycle_state.green()
            };
            println!("{:<30} {:<9} {}", c.name, state, c.id);
        }
    }

    Ok(())
}

pub async fn handle_tree(profile: &str, include_deleted: bool) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);
    let compartments = oci.list_compartments(&profile.tenancy).await?;

    for row in tree_rows(&profile.tenancy, &compartments, include_deleted) {
        print!("{}{}", row.prefix.cyan(), row.connector.cyan());
        if row.deleted {
            println!("{} {}{}", row.name.blue(), row.id.dimmed(), " DELETED".red());
        } else {
            println!("{} {}{}", row.name.green(), row.id, " ACTIVE".yellow());
        }
    }

    Ok(())
}

/// One rendered line of the compartment tree.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TreeRow {
    /// Continuation columns for the ancestor levels.
    pub prefix: String,
    pub connector: &'static str,
    pub name: String,
    pub id: String,
    pub deleted: bool,
}

/// Depth-first tree over the parent links, tracking per level whether the
/// sibling list is exhausted so the connectors line up.
pub(crate) fn tree_rows(
    tenancy: &str,
    compartments: &[Compartment],
    include_deleted: bool,
) -> Vec<TreeRow> {
    let mut rows = vec![TreeRow {
        prefix: String::new(),
        connector: "",
        name: "root".to_string(),
        id: tenancy.to_string(),
        deleted: false,
    }];

    let mut ancestors = Vec::new();
    push_children(tenancy, compartments, include_deleted, &mut ancestors, &mut rows);
    rows
}

fn push_children(
    parent: &str,
    compartments: &[Compartment],
    include_deleted: bool,
    ancestors: &mut Vec<bool>,
    rows: &mut Vec<TreeRow>,
) {
    let children: Vec<&Compartment> = compartments
        .iter()
        .filter(|c| c.compartment_id.as_deref() == Some(parent))
        .filter(|c| include_deleted || !c.is_deleted())
        .collect();

    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let prefix: String = ancestors
            .iter()
            .map(|exhausted| if *exhausted { "       " } else { "│      " })
            .collect();

        rows.push(TreeRow {
            prefix,
            connector: if is_last { "└───── " } else { "├───── " },
            name: child.name.clone(),
            id: child.id.clone(),
            deleted: child.is_deleted(),
        });

        ancestors.push(is_last);
        push_children(&child.id, compartments, include_deleted, ancestors, rows);
        ancestors.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "ocid1.tenancy.oc1..root";

    fn compartment(id: &str, parent: &str, name: &str, state: &str) -> Compartment {
        Compartment {
            id: id.to_string(),
            compartment_id: Some(parent.to_string()),
            name: name.to_string(),
            lifecycle_state: state.to_string(),
        }
    }

    #[test]
    fn test_tree_connectors_and_prefixes() {
        let compartments = vec![
            compartment("cpt-a", ROOT, "alpha", "ACTIVE"),
            compartment("cpt-b", ROOT, "beta", "ACTIVE"),
            compartment("cpt-a1", "cpt-a", "alpha-child", "ACTIVE"),
        ];

        let rows = tree_rows(ROOT, &compartments, false);
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].name, "root");
        assert_eq!(rows[0].connector, "");

        // alpha has a sibling after it, so it gets a tee and its child
        // inherits a continuation column.
        assert_eq!(rows[1].name, "alpha");
        assert_eq!(rows[1].connector, "├───── ");
        assert_eq!(rows[2].name, "alpha-child");
        assert_eq!(rows[2].prefix, "│      ");
        assert_eq!(rows[2].connector, "└───── ");

        assert_eq!(rows[3].name, "beta");
        assert_eq!(rows[3].connector, "└───── ");
        assert_eq!(rows[3].prefix, "");
    }

    #[test]
    fn test_last_siblings_child_gets_blank_column() {
        let compartments = vec![
            compartment("cpt-a", ROOT, "alpha", "ACTIVE"),
            compartment("cpt-a1", "cpt-a", "leaf", "ACTIVE"),
        ];

        let rows = tree_rows(ROOT, &compartments, false);
        assert_eq!(rows[1].connector, "└───── ");
        assert_eq!(rows[2].prefix, "       ");
    }

    #[test]
    fn test_deleted_compartments_are_pruned_with_their_subtree_position() {
        let compartments = vec![
            compartment("cpt-a", ROOT, "alpha", "DELETED"),
            compartment("cpt-b", ROOT, "beta", "ACTIVE"),
        ];

        let pruned = tree_rows(ROOT, &compartments, false);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[1].name, "beta");
        assert_eq!(pruned[1].connector, "└───── ");

        let full = tree_rows(ROOT, &compartments, true);
        assert_eq!(full.len(), 3);
        assert!(full[1].deleted);
        assert_eq!(full[1].connector, "├───── ");
    }
}

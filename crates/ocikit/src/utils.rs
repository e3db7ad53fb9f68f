use ocikit_core::{CoreError, Profile};
use ocikit_idcs::IdcsError;
use ocikit_oci::{Compartment, OciCli, OciError};
use std::io::Write;

/// Map a failed command to its process exit code. Each error taxonomy
/// carries its own numbering; anything unrecognized is a plain failure.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CoreError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<OciError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<IdcsError>() {
            return e.exit_code();
        }
    }
    1
}

/// Name of a compartment, falling back to "root" for the tenancy itself.
pub fn compartment_name<'a>(compartments: &'a [Compartment], id: &str) -> &'a str {
    compartments
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or("root")
}

/// Resolve a compartment argument: name, OCID or the literal `root`.
pub fn resolve_compartment(
    tenancy: &str,
    compartments: &[Compartment],
    wanted: &str,
) -> Result<(String, String), OciError> {
    if wanted == "root" || wanted == tenancy {
        return Ok((tenancy.to_string(), "root".to_string()));
    }

    compartments
        .iter()
        .find(|c| c.id == wanted || c.name == wanted)
        .map(|c| (c.id.clone(), c.name.clone()))
        .ok_or_else(|| OciError::CompartmentNotFound(wanted.to_string()))
}

/// The regions a command operates on: every subscribed region with `-a`,
/// the profile region otherwise.
pub async fn region_names(
    oci: &OciCli,
    profile: &Profile,
    all_regions: bool,
) -> anyhow::Result<Vec<String>> {
    if all_regions {
        Ok(oci
            .list_region_subscriptions(&profile.tenancy)
            .await?
            .into_iter()
            .map(|r| r.region_name)
            .collect())
    } else {
        Ok(vec![profile.region.clone()])
    }
}

/// Interactive y/n confirmation on stdin.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim() == "y")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compartment(id: &str, name: &str) -> Compartment {
        Compartment {
            id: id.to_string(),
            compartment_id: Some("ocid1.tenancy.oc1..root".to_string()),
            name: name.to_string(),
            lifecycle_state: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn test_compartment_name_falls_back_to_root() {
        let compartments = vec![compartment("ocid1.compartment.oc1..a", "sandbox")];
        assert_eq!(
            compartment_name(&compartments, "ocid1.compartment.oc1..a"),
            "sandbox"
        );
        assert_eq!(compartment_name(&compartments, "ocid1.tenancy.oc1..root"), "root");
    }

    #[test]
    fn test_resolve_compartment_by_name_id_and_root() {
        let tenancy = "ocid1.tenancy.oc1..root";
        let compartments = vec![compartment("ocid1.compartment.oc1..a", "sandbox")];

        assert_eq!(
            resolve_compartment(tenancy, &compartments, "sandbox").unwrap(),
            ("ocid1.compartment.oc1..a".to_string(), "sandbox".to_string())
        );
        assert_eq!(
            resolve_compartment(tenancy, &compartments, "ocid1.compartment.oc1..a")
                .unwrap()
                .1,
            "sandbox"
        );
        assert_eq!(
            resolve_compartment(tenancy, &compartments, "root").unwrap(),
            (tenancy.to_string(), "root".to_string())
        );

        let err = resolve_compartment(tenancy, &compartments, "nope").unwrap_err();
        assert!(matches!(err, OciError::CompartmentNotFound(_)));
        assert_eq!(err.exit_code(), 3);
    }
}

//! Structured-search query builders
//!
//! Query syntax reference:
//! https://docs.cloud.oracle.com/en-us/iaas/Content/Search/Concepts/querysyntax.htm

/// All resources carrying a defined tag with this exact value.
pub fn resources_with_tag(namespace: &str, key: &str, value: &str) -> String {
    format!(
        "query all resources where (definedTags.namespace = '{}' && definedTags.key = '{}' && definedTags.value = '{}')",
        namespace, key, value
    )
}

/// All compute instances carrying a defined tag key, whatever the value.
pub fn instances_with_tag_key(namespace: &str, key: &str) -> String {
    format!(
        "query instance resources where (definedTags.namespace = '{}' && definedTags.key = '{}')",
        namespace, key
    )
}

/// Compute instances in a lifecycle state whose tag value matches exactly.
/// This is what the scheduler runs for its stop and start sets.
pub fn instances_in_state_with_tag(
    state: &str,
    namespace: &str,
    key: &str,
    value: &str,
) -> String {
    format!(
        "query instance resources where (lifeCycleState = '{}' && definedTags.namespace = '{}' && definedTags.key = '{}' && definedTags.value = '{}')",
        state, namespace, key, value
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_with_tag() {
        assert_eq!(
            resources_with_tag("osc", "owner", "alice"),
            "query all resources where (definedTags.namespace = 'osc' && definedTags.key = 'owner' && definedTags.value = 'alice')"
        );
    }

    #[test]
    fn test_instances_with_tag_key() {
        assert_eq!(
            instances_with_tag_key("osc", "automatic_shutdown"),
            "query instance resources where (definedTags.namespace = 'osc' && definedTags.key = 'automatic_shutdown')"
        );
    }

    #[test]
    fn test_scheduler_stop_set() {
        assert_eq!(
            instances_in_state_with_tag("RUNNING", "osc", "automatic_shutdown", "20:00_UTC"),
            "query instance resources where (lifeCycleState = 'RUNNING' && definedTags.namespace = 'osc' && definedTags.key = 'automatic_shutdown' && definedTags.value = '20:00_UTC')"
        );
    }
}

//! Time-tag scheduling rules
//!
//! Resources opt into cron-driven power management by carrying the
//! `osc.automatic_shutdown` / `osc.automatic_startup` defined tags. A tag
//! matches when its value equals the current UTC hour rendered `HH:00_UTC`
//! (tenancy admins can also set the value `off`, which never matches).

use chrono::{DateTime, Timelike, Utc};

pub const TAG_NAMESPACE: &str = "osc";
pub const TAG_KEY_STOP: &str = "automatic_shutdown";
pub const TAG_KEY_START: &str = "automatic_startup";

/// Tag value matching the given instant: `07:00_UTC`, `20:00_UTC`, ...
pub fn current_hour_tag(now: DateTime<Utc>) -> String {
    format!("{:02}:00_UTC", now.hour())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Stop,
    Start,
}

/// Decide what to do with a VM DB system given its node power state and its
/// two schedule tag values. Stop wins only on a running node, start only on
/// a stopped one, so a resource tagged for both hours never flaps.
pub fn db_system_action(
    node_state: &str,
    stop_value: Option<&str>,
    start_value: Option<&str>,
    hour_tag: &str,
) -> Option<ScheduleAction> {
    if node_state == "STOPPED" && start_value == Some(hour_tag) {
        Some(ScheduleAction::Start)
    } else if node_state == "AVAILABLE" && stop_value == Some(hour_tag) {
        Some(ScheduleAction::Stop)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hour_tag_is_zero_padded() {
        let morning = Utc.with_ymd_and_hms(2020, 4, 27, 7, 35, 12).unwrap();
        assert_eq!(current_hour_tag(morning), "07:00_UTC");

        let evening = Utc.with_ymd_and_hms(2020, 4, 27, 20, 0, 0).unwrap();
        assert_eq!(current_hour_tag(evening), "20:00_UTC");
    }

    #[test]
    fn test_stop_requires_running_node() {
        let action = db_system_action("AVAILABLE", Some("20:00_UTC"), None, "20:00_UTC");
        assert_eq!(action, Some(ScheduleAction::Stop));

        let already_stopped = db_system_action("STOPPED", Some("20:00_UTC"), None, "20:00_UTC");
        assert_eq!(already_stopped, None);
    }

    #[test]
    fn test_start_requires_stopped_node() {
        let action = db_system_action("STOPPED", None, Some("07:00_UTC"), "07:00_UTC");
        assert_eq!(action, Some(ScheduleAction::Start));

        let already_running = db_system_action("AVAILABLE", None, Some("07:00_UTC"), "07:00_UTC");
        assert_eq!(already_running, None);
    }

    #[test]
    fn test_untagged_and_off_values_never_match() {
        assert_eq!(db_system_action("AVAILABLE", None, None, "20:00_UTC"), None);
        assert_eq!(
            db_system_action("AVAILABLE", Some("off"), None, "20:00_UTC"),
            None
        );
    }
}

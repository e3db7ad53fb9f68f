use assert_cmd::Command;
use predicates::prelude::*;

/// Top-level help lists the command families.
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tenancy operations toolkit"))
        .stdout(predicate::str::contains("compartments"))
        .stdout(predicate::str::contains("instances"))
        .stdout(predicate::str::contains("tags"))
        .stdout(predicate::str::contains("preauth"))
        .stdout(predicate::str::contains("idcs"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ocikit"));
}

/// The global profile option is documented with its env fallback.
#[test]
fn test_profile_option_in_help() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("OCI_CLI_PROFILE"));
}

#[test]
fn test_compartments_help() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["compartments", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("tree"));
}

#[test]
fn test_compartments_list_deleted_flag() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["compartments", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--deleted"));
}

#[test]
fn test_instances_schedule_confirm_flags() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["instances", "schedule", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--confirm-stop"))
        .stdout(predicate::str::contains("--confirm-start"))
        .stdout(predicate::str::contains("--all-regions"));
}

#[test]
fn test_objects_list_flags() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["objects", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<COMPARTMENT>"))
        .stdout(predicate::str::contains("--recursive"))
        .stdout(predicate::str::contains("--all-regions"));
}

#[test]
fn test_tags_add_requires_all_positionals() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["tags", "add", "ocid1.instance.oc1.phx.aaa", "osc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_idcs_users_help() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["idcs", "users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("deactivate"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// A profile that cannot exist maps to exit code 2.
#[test]
fn test_unknown_profile_exit_code() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.env("HOME", home.path())
        .args(["compartments", "list"])
        .assert()
        .failure()
        .code(2);
}

/// A malformed OCID is a usage-level failure, not a crash.
#[test]
fn test_malformed_ocid_rejected() {
    let mut cmd = Command::cargo_bin("ocikit").unwrap();
    cmd.args(["tags", "show", "not-an-ocid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid OCID"));
}

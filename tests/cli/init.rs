//! Tests for `crumb init`.

use crate::support::*;
use std::fs;

#[test]
fn test_init_creates_project_file() {
    let t = Test::new();

    let output = t.run(&["init"]);
    assert_success(&output);
    assert_stdout_contains(&output, "created .crumb.yaml");

    let contents = fs::read_to_string(t.dir.path().join(".crumb.yaml")).unwrap();
    assert!(contents.contains("version"));
    assert!(contents.contains("1.0"));
    assert!(contents.contains("default"));
}

#[test]
fn test_init_needs_no_profile() {
    let t = Test::new();
    assert_success(&t.run(&["init"]));
    assert!(!t.config_dir().exists());
}

#[test]
fn test_init_declined_keeps_file() {
    let t = Test::new();
    t.write(".crumb.yaml", BILLING_CONFIG);

    let output = t.run_with_input(&["init"], "n\n");
    assert_success(&output);
    assert_stderr_contains(&output, "already exists");
    assert_stderr_contains(&output, "operation cancelled");

    let contents = fs::read_to_string(t.dir.path().join(".crumb.yaml")).unwrap();
    assert_eq!(contents, BILLING_CONFIG);
}

#[test]
fn test_init_confirmed_overwrites() {
    let t = Test::new();
    t.write(".crumb.yaml", BILLING_CONFIG);

    assert_success(&t.run_with_input(&["init"], "y\n"));

    let contents = fs::read_to_string(t.dir.path().join(".crumb.yaml")).unwrap();
    assert!(!contents.contains("billing-svc"));
}

#[test]
fn test_init_force() {
    let t = Test::new();
    t.write(".crumb.yaml", BILLING_CONFIG);

    assert_success(&t.run(&["init", "--force"]));

    let contents = fs::read_to_string(t.dir.path().join(".crumb.yaml")).unwrap();
    assert!(!contents.contains("billing-svc"));
}

#[cfg(unix)]
#[test]
fn test_init_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::new();
    assert_success(&t.run(&["init"]));

    let mode = fs::metadata(t.dir.path().join(".crumb.yaml"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

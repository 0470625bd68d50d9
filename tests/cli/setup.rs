//! Tests for `crumb setup`.

use crate::support::*;
use std::fs;

#[test]
fn test_setup_with_defaults() {
    let t = Test::setup();

    let config = fs::read_to_string(t.config_dir().join("config.yaml")).unwrap();
    assert!(config.contains("default:"));
    assert!(config.contains("public_key_path"));
    assert!(config.contains("id_ed25519.pub"));

    assert!(t.storage().exists(), "storage file should exist after setup");

    let output = t.ls(None);
    assert_success(&output);
    assert_stdout_contains(&output, "no secrets found");
}

#[test]
fn test_setup_reports_paths() {
    let t = Test::new();
    t.write_keys("id_ed25519");

    let output = t.setup_cmd("\n\n");
    assert_success(&output);
    assert_stdout_contains(&output, "profile 'default' is ready");
    assert_stdout_contains(&output, "config.yaml");
}

#[test]
fn test_setup_with_explicit_key_paths() {
    let t = Test::new();
    let (public, private) = t.write_keys("custom");

    let input = format!("{}\n{}\n", public.display(), private.display());
    let output = t.setup_cmd(&input);
    assert_success(&output);

    let config = fs::read_to_string(t.config_dir().join("config.yaml")).unwrap();
    assert!(config.contains("custom.pub"));
}

#[test]
fn test_setup_accepts_tilde_paths() {
    let t = Test::new();
    t.write_keys("tilde");

    let output = t.setup_cmd("~/.ssh/tilde.pub\n~/.ssh/tilde\n");
    assert_success(&output);

    let config = fs::read_to_string(t.config_dir().join("config.yaml")).unwrap();
    assert!(!config.contains('~'), "stored key paths should be expanded");
}

#[test]
fn test_setup_missing_keys_fails() {
    let t = Test::new();

    let output = t.setup_cmd("\n\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read key file");
    assert!(!t.config_dir().join("config.yaml").exists());
}

#[test]
fn test_setup_mismatched_keys_fails() {
    let t = Test::new();
    let (public, _) = t.write_keys("one");
    let (_, private) = t.write_keys("two");

    let input = format!("{}\n{}\n", public.display(), private.display());
    let output = t.setup_cmd(&input);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not match");
    assert_stderr_contains(&output, "ssh-keygen");
}

#[test]
fn test_setup_rejects_garbage_public_key() {
    let t = Test::new();
    let (public, private) = t.write_keys("id_ed25519");
    fs::write(&public, "not a key\n").unwrap();

    let input = format!("{}\n{}\n", public.display(), private.display());
    let output = t.setup_cmd(&input);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid public key");
}

#[test]
fn test_setup_named_profile_uses_suggested_storage() {
    let t = Test::new();
    t.write_keys("work");

    let output = t.run_with_input(&["--profile", "work", "setup"], "\n\n\n");
    assert_success(&output);
    assert!(t.config_dir().join("secrets-work").exists());
    assert!(!t.storage().exists());
}

#[test]
fn test_setup_named_profile_custom_storage() {
    let t = Test::new();
    t.write_keys("work");
    let custom = t.dir.path().join("vault").join("work-secrets");

    let input = format!("\n\n{}\n", custom.display());
    let output = t.run_with_input(&["--profile", "work", "setup"], &input);
    assert_success(&output);
    assert!(custom.exists(), "custom storage and its parent should be created");
}

#[test]
fn test_setup_storage_flag() {
    let t = Test::new();
    t.write_keys("id_ed25519");
    let custom = t.dir.path().join("flagged");

    let output = t.run_with_input(
        &["--storage", custom.to_str().unwrap(), "setup"],
        "\n\n",
    );
    assert_success(&output);
    assert!(custom.exists());
}

#[test]
fn test_setup_keeps_other_profiles() {
    let t = Test::setup();
    t.write_keys("work");

    let output = t.run_with_input(&["--profile", "work", "setup"], "\n\n\n");
    assert_success(&output);

    let config = fs::read_to_string(t.config_dir().join("config.yaml")).unwrap();
    assert!(config.contains("default:"));
    assert!(config.contains("work:"));
}

#[test]
fn test_setup_again_keeps_secrets() {
    let t = Test::with_secrets(&[("/keep/me", "still-here")]);

    let output = t.setup_cmd("\n\n");
    assert_success(&output);
    assert_stderr_contains(&output, "keeping existing storage");

    let output = t.get("/keep/me");
    assert_success(&output);
    assert_stdout_contains(&output, "still-here");
}

#[cfg(unix)]
#[test]
fn test_setup_files_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::setup();

    let mode = |p: std::path::PathBuf| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(t.config_dir()), 0o700);
    assert_eq!(mode(t.config_dir().join("config.yaml")), 0o600);
    assert_eq!(mode(t.storage()), 0o600);
}

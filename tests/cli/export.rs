//! Tests for `crumb export`.

use crate::support::*;
use std::fs;

fn billing() -> Test {
    let t = Test::with_secrets(BILLING_SECRETS);
    t.write(".crumb.yaml", BILLING_CONFIG);
    t
}

#[test]
fn test_export_default_environment() {
    let t = billing();

    let output = t.export(&[]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "# Exported from /prod/billing-svc\n\
         export AUTH_TOKEN=tok\n\
         export DATABASE_URL=postgres://db/billing\n\
         export DB_TYPE=postgres\n\
         export DB_URL=postgres://db/billing\n\
         export MG_KEY=mg-123\n"
    );
}

#[test]
fn test_export_skips_missing_and_foreign_paths() {
    let t = billing();

    let output = t.export(&[]);
    assert_stdout_excludes(&output, "MISSING");
    assert_stdout_excludes(&output, "VARS_MG");
    assert_stdout_excludes(&output, "other");
}

#[test]
fn test_export_literal_only_environment() {
    let t = billing();

    let output = t.export(&["--env", "literal-only"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "export MODE='local dev'\n");
}

#[test]
fn test_export_fish() {
    let t = billing();

    let output = t.export(&["--shell", "fish"]);
    assert_success(&output);
    assert_stdout_contains(&output, "set -x AUTH_TOKEN tok\n");
    assert_stdout_contains(&output, "set -x MG_KEY mg-123\n");
    assert_stdout_excludes(&output, "export ");
}

#[test]
fn test_export_shell_from_settings() {
    let t = billing();
    fs::write(t.config_dir().join("crumb.toml"), "shell = \"fish\"\n").unwrap();

    let output = t.export(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "set -x DB_TYPE postgres");

    // The flag still wins.
    let output = t.export(&["--shell", "bash"]);
    assert_stdout_contains(&output, "export DB_TYPE=postgres");
}

#[test]
fn test_export_by_path() {
    let t = billing();

    let output = t.export(&["--path", "/prod/billing-svc/"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "# Exported from /prod/billing-svc\n\
         export AUTH_TOKEN=tok\n\
         export MG=mg-123\n\
         export URL=postgres://db/billing\n"
    );
}

#[test]
fn test_export_by_path_ignores_project_file() {
    let t = Test::with_secrets(&[("/x/key", "v")]);

    let output = t.export(&["--path", "/x"]);
    assert_success(&output);
    assert_stdout_contains(&output, "export KEY=v");
}

#[test]
fn test_export_custom_file() {
    let t = Test::with_secrets(BILLING_SECRETS);
    t.write("deploy.yaml", BILLING_CONFIG);

    let output = t.export(&["--file", "deploy.yaml"]);
    assert_success(&output);
    assert_stdout_contains(&output, "export MG_KEY=mg-123");
}

#[test]
fn test_export_without_project_file() {
    let t = Test::setup();

    let output = t.export(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no .crumb.yaml found");
    assert_stderr_contains(&output, "crumb init");
}

#[test]
fn test_export_unknown_environment() {
    let t = billing();

    let output = t.export(&["--env", "staging"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "environment 'staging' not found");
}

#[test]
fn test_export_nothing_resolved() {
    let t = Test::with_secrets(&[("/elsewhere/key", "v")]);
    t.write(
        ".crumb.yaml",
        "version: \"1.0\"\nenvironments:\n  default:\n    path: /prod/empty\n",
    );

    let output = t.export(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found to export");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_export_unsupported_shell() {
    let t = billing();

    let output = t.export(&["--shell", "powershell"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported shell format: powershell");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_export_missing_version() {
    let t = Test::with_secrets(BILLING_SECRETS);
    t.write(
        ".crumb.yaml",
        "environments:\n  default:\n    path: /prod/billing-svc\n",
    );

    let output = t.export(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing version");
}

#[test]
fn test_export_malformed_yaml() {
    let t = Test::with_secrets(BILLING_SECRETS);
    t.write(".crumb.yaml", "version: [unclosed\n");

    let output = t.export(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse");
}

#[test]
fn test_export_after_init() {
    let t = Test::with_secrets(&[("/a", "1")]);
    assert_success(&t.run(&["init"]));

    // The fresh config has an empty default environment.
    let output = t.export(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found to export");
}

//! Tests for `crumb ls/set/get/delete/move`.

use crate::support::*;
use std::fs;

#[test]
fn test_set_and_get_roundtrip() {
    let t = Test::setup();

    let output = t.set("/prod/db/url", "postgres://localhost/db");
    assert_success(&output);
    assert_stdout_contains(&output, "/prod/db/url");

    let output = t.get("/prod/db/url");
    assert_success(&output);
    assert_eq!(stdout(&output), "postgres://localhost/db\n");
}

#[test]
fn test_values_with_equals_and_spaces() {
    let t = Test::setup();
    assert_roundtrip(&t, "/a/conn", "host=db user=app");
    assert_roundtrip(&t, "/a/empty", "");
}

#[test]
fn test_set_rejects_value_with_newline() {
    let t = Test::with_secrets(&[("/a", "1")]);

    let output = t.set("/a/cert", "line1\n/evil/injected=pwned");
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot contain newlines");

    assert_eq!(stdout(&t.ls(None)), "/a\n");
}

#[test]
fn test_get_is_masked_by_default() {
    let t = Test::with_secrets(&[("/api/key", "sk-live-123")]);

    let output = t.run(&["get", "/api/key"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "****\n");
    assert_stdout_excludes(&output, "sk-live-123");
}

#[test]
fn test_get_export_uses_final_segment() {
    let t = Test::with_secrets(&[("/prod/my-service/auth-token", "tok")]);

    let output = t.run(&["get", "/prod/my-service/auth-token", "--export"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "export AUTH_TOKEN=tok\n");

    let output = t.run(&[
        "get",
        "/prod/my-service/auth-token",
        "--export",
        "--shell",
        "fish",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "set -x AUTH_TOKEN tok\n");
}

#[test]
fn test_get_export_quotes_values() {
    let t = Test::with_secrets(&[("/x/greeting", "hello world")]);

    let output = t.run(&["get", "/x/greeting", "--export"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "export GREETING='hello world'\n");
}

#[test]
fn test_get_missing_key_fails() {
    let t = Test::setup();

    let output = t.get("/nope");
    assert_failure(&output);
    assert_stderr_contains(&output, "key not found: /nope");
}

#[test]
fn test_invalid_paths_rejected() {
    let t = Test::setup();

    let output = t.set("no-slash", "v");
    assert_failure(&output);
    assert_stderr_contains(&output, "must start with '/'");

    let output = t.set("/has=equals", "v");
    assert_failure(&output);

    let output = t.set("/has space", "v");
    assert_failure(&output);

    let output = t.set("", "v");
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot be empty");
}

#[test]
fn test_overwrite_declined_keeps_value() {
    let t = Test::with_secrets(&[("/k", "original")]);

    let output = t.set_answering("/k", "replacement", "n");
    assert_success(&output);
    assert_stderr_contains(&output, "operation cancelled");

    let output = t.get("/k");
    assert_stdout_contains(&output, "original");
}

#[test]
fn test_overwrite_without_answer_keeps_value() {
    let t = Test::with_secrets(&[("/k", "original")]);

    let output = t.set("/k", "replacement");
    assert_success(&output);
    assert_stderr_contains(&output, "already exists");

    let output = t.get("/k");
    assert_stdout_contains(&output, "original");
}

#[test]
fn test_overwrite_confirmed() {
    let t = Test::with_secrets(&[("/k", "original")]);

    let output = t.set_answering("/k", "replacement", "y");
    assert_success(&output);

    let output = t.get("/k");
    assert_eq!(stdout(&output), "replacement\n");
}

#[test]
fn test_ls_sorted_and_filtered() {
    let t = Test::with_secrets(&[
        ("/prod/b", "2"),
        ("/prod/a", "1"),
        ("/production/x", "3"),
        ("/dev/a", "4"),
    ]);

    let output = t.ls(None);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "/dev/a\n/prod/a\n/prod/b\n/production/x\n"
    );

    let with_slash = stdout(&t.ls(Some("/prod/")));
    let without = stdout(&t.ls(Some("/prod")));
    assert_eq!(with_slash, without);
    assert_eq!(with_slash, "/prod/a\n/prod/b\n/production/x\n");

    let root = stdout(&t.ls(Some("/")));
    assert_eq!(root, stdout(&t.ls(None)));
}

#[test]
fn test_ls_never_prints_values() {
    let t = Test::with_secrets(&[("/k", "sensitive-value")]);

    let output = t.ls(None);
    assert_stdout_excludes(&output, "sensitive-value");
}

#[test]
fn test_delete_with_confirmation() {
    let t = Test::with_secrets(&[("/a", "1"), ("/b", "2")]);

    let output = t.delete("/a", "/a");
    assert_success(&output);
    assert_stdout_contains(&output, "deleted");

    assert_eq!(stdout(&t.ls(None)), "/b\n");
}

#[test]
fn test_delete_wrong_confirmation_keeps_secret() {
    let t = Test::with_secrets(&[("/a", "1")]);

    let output = t.delete("/a", "/b");
    assert_success(&output);
    assert_stderr_contains(&output, "operation cancelled");

    assert_eq!(stdout(&t.ls(None)), "/a\n");
}

#[test]
fn test_delete_missing_key_fails() {
    let t = Test::setup();

    let output = t.delete("/missing", "/missing");
    assert_failure(&output);
    assert_stderr_contains(&output, "key not found");
}

#[test]
fn test_move() {
    let t = Test::with_secrets(&[("/old", "v")]);

    let output = t.mv("/old", "/new", "");
    assert_success(&output);

    assert_eq!(stdout(&t.ls(None)), "/new\n");
    assert_eq!(stdout(&t.get("/new")), "v\n");
}

#[test]
fn test_move_onto_existing_declined() {
    let t = Test::with_secrets(&[("/old", "1"), ("/new", "2")]);

    let output = t.mv("/old", "/new", "n");
    assert_success(&output);
    assert_stderr_contains(&output, "operation cancelled");

    assert_eq!(stdout(&t.get("/old")), "1\n");
    assert_eq!(stdout(&t.get("/new")), "2\n");
}

#[test]
fn test_move_onto_existing_confirmed() {
    let t = Test::with_secrets(&[("/old", "1"), ("/new", "2")]);

    let output = t.mv("/old", "/new", "yes");
    assert_success(&output);

    assert_eq!(stdout(&t.ls(None)), "/new\n");
    assert_eq!(stdout(&t.get("/new")), "1\n");
}

#[test]
fn test_move_missing_source_fails() {
    let t = Test::setup();

    let output = t.mv("/ghost", "/new", "");
    assert_failure(&output);
    assert_stderr_contains(&output, "key not found: /ghost");
}

#[test]
fn test_storage_file_is_encrypted() {
    let t = Test::with_secrets(&[("/visible/path", "visible-value")]);

    let raw = fs::read(t.storage()).unwrap();
    let raw = String::from_utf8_lossy(&raw);
    assert!(raw.starts_with("age-encryption.org/v1"));
    assert!(!raw.contains("/visible/path"));
    assert!(!raw.contains("visible-value"));
}

#[test]
fn test_aliases() {
    let t = Test::with_secrets(&[("/a", "1")]);

    assert_success(&t.run(&["list"]));
    assert_success(&t.run_with_input(&["mv", "/a", "/b"], ""));
    assert_success(&t.run_with_input(&["rm", "/b"], "/b\n"));
    assert_stdout_contains(&t.ls(None), "no secrets found");
}

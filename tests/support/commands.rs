//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a crumb command isolated to this test.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - No inherited `CRUMB_*` variables and colors off
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("crumb").expect("failed to find crumb binary");
        cmd.env("HOME", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in ["CRUMB_CONFIG_DIR", "CRUMB_PROFILE", "CRUMB_STORAGE", "CRUMB_LOG"] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run with arguments and no stdin.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run crumb")
    }

    /// Run with arguments, feeding `input` to stdin.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        self.cmd()
            .args(args)
            .write_stdin(input)
            .output()
            .expect("failed to run crumb")
    }

    /// Shortcut for `crumb setup`, answering prompts from `input`.
    pub fn setup_cmd(&self, input: &str) -> Output {
        self.run_with_input(&["setup"], input)
    }

    /// Shortcut for `crumb set`.
    pub fn set(&self, path: &str, value: &str) -> Output {
        self.run(&["set", path, value])
    }

    /// Shortcut for `crumb set` answering the overwrite prompt.
    pub fn set_answering(&self, path: &str, value: &str, answer: &str) -> Output {
        self.run_with_input(&["set", path, value], &format!("{}\n", answer))
    }

    /// Shortcut for `crumb get --show`.
    pub fn get(&self, path: &str) -> Output {
        self.run(&["get", path, "--show"])
    }

    /// Shortcut for `crumb ls`.
    pub fn ls(&self, filter: Option<&str>) -> Output {
        match filter {
            Some(filter) => self.run(&["ls", filter]),
            None => self.run(&["ls"]),
        }
    }

    /// Shortcut for `crumb delete`, typing `confirmation` at the prompt.
    pub fn delete(&self, path: &str, confirmation: &str) -> Output {
        self.run_with_input(&["delete", path], &format!("{}\n", confirmation))
    }

    /// Shortcut for `crumb move` answering the overwrite prompt.
    pub fn mv(&self, old: &str, new: &str, answer: &str) -> Output {
        self.run_with_input(&["move", old, new], &format!("{}\n", answer))
    }

    /// Shortcut for `crumb export` with extra arguments.
    pub fn export(&self, args: &[&str]) -> Output {
        let mut all = vec!["export"];
        all.extend_from_slice(args);
        self.run(&all)
    }

    /// Shortcut for `crumb import` answering the overwrite prompt.
    pub fn import(&self, file: &str, base: &str, answer: &str) -> Output {
        self.run_with_input(
            &["import", "--file", file, "--path", base],
            &format!("{}\n", answer),
        )
    }
}

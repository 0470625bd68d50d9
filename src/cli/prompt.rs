//! Interactive prompts.
//!
//! On a terminal these use dialoguer. When stdin is piped they print the
//! prompt to stderr and read one line, so scripts and tests can answer.

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Confirm as ConfirmPrompt, Input};
use tracing::warn;

use crate::core::confirm::Confirm;
use crate::error::{Error, Result};

/// Ask a yes/no question; anything but `y`/`yes` is no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if io::stdin().is_terminal() {
        return Ok(ConfirmPrompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?);
    }

    let answer = read_line(&format!("{} (y/n): ", prompt))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Ask for a line of text. Returns the trimmed answer, possibly empty.
pub fn input(prompt: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        return Ok(answer.trim().to_string());
    }

    read_line(&format!("{}: ", prompt))
}

fn read_line(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// [`Confirm`] backed by the terminal.
///
/// A prompt failure answers no and is kept, so [`TerminalConfirm::finish`]
/// can report it instead of the cancellation it caused.
#[derive(Debug, Default)]
pub struct TerminalConfirm {
    failure: RefCell<Option<Error>>,
}

impl TerminalConfirm {
    /// The prompt failure if one happened, otherwise `result`.
    pub fn finish<T>(self, result: Result<T>) -> Result<T> {
        match self.failure.into_inner() {
            Some(e) => Err(e),
            None => result,
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match confirm(prompt) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "confirmation prompt failed");
                self.failure.replace(Some(e));
                false
            }
        }
    }
}

//! Terminal output.
//!
//! Data (listings, values, assignments, reports) goes to stdout. Errors,
//! warnings and hints go to stderr so `eval "$(crumb export)"` only ever
//! sees assignments. Color is skipped when `NO_COLOR` is set.

use std::fmt::Display;

use console::style;

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Caution,
    Accent,
    Muted,
    Strong,
}

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: impl Display, tone: Tone, stderr: bool) -> String {
    if !colors_enabled() {
        return text.to_string();
    }
    let styled = style(text);
    let styled = if stderr { styled.for_stderr() } else { styled };
    match tone {
        Tone::Good => styled.green(),
        Tone::Bad => styled.red(),
        Tone::Caution => styled.yellow(),
        Tone::Accent => styled.cyan(),
        Tone::Muted => styled.dim(),
        Tone::Strong => styled.bold(),
    }
    .to_string()
}

/// `✓ set /prod/api/key`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", Tone::Good, false), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", Tone::Bad, true), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", Tone::Caution, true), msg);
}

/// `→ run: crumb setup`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        paint("→", Tone::Accent, true),
        paint(msg, Tone::Accent, true)
    );
}

/// Indented `label  value` line for summaries.
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(label, Tone::Muted, false),
        paint(value, Tone::Strong, false)
    );
}

pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Secondary information, such as an empty listing.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, Tone::Muted, false));
}

/// Highlight a secret path inside a message.
pub fn key(k: &str) -> String {
    paint(k, Tone::Accent, false)
}

/// Highlight a filesystem path inside a message.
pub fn path(p: impl Display) -> String {
    paint(p, Tone::Accent, false)
}

//! Crumb - local encrypted secret storage with shell export.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crumb::cli::output;
use crumb::cli::{execute, Cli};
use crumb::error::{CipherError, ConfigError, Error, ExportError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("CRUMB_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("crumb=debug")
        } else {
            EnvFilter::new("crumb=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(()) => {}
        // A declined confirmation is a no-op, not a failure.
        Err(Error::Cancelled) => output::warn("operation cancelled"),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = hint(&e) {
                output::hint(hint);
            }
            std::process::exit(1);
        }
    }
}

fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NotInitialized) => Some("run: crumb setup"),
        Error::Config(ConfigError::NotFound(_)) => Some("run: crumb init"),
        Error::Config(ConfigError::UnsupportedShell(_)) => Some("use --shell bash or --shell fish"),
        Error::Cipher(CipherError::InvalidIdentity(_) | CipherError::InvalidRecipient(_)) => {
            Some("generate a key pair with: ssh-keygen -t ed25519")
        }
        Error::Cipher(CipherError::DecryptionFailed(_)) => {
            Some("check that the profile's private key matches the storage file")
        }
        Error::Export(ExportError::NoSecrets) => {
            Some("check the path prefix and env entries in .crumb.yaml")
        }
        _ => None,
    }
}

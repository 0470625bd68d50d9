//! Command-line interface.

pub mod export;
pub mod import;
pub mod init;
pub mod output;
pub mod prompt;
pub mod secrets;
pub mod session;
pub mod setup;
pub mod storage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::ConfigDir;
use crate::core::constants;
use crate::error::Result;

pub use session::{Context, Session};

/// Crumb - encrypted secrets on your own disk, exported to your shell.
#[derive(Parser)]
#[command(
    name = "crumb",
    about = "Local encrypted secret storage with shell export",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Profile to use
    #[arg(
        long,
        global = true,
        env = "CRUMB_PROFILE",
        default_value = constants::DEFAULT_PROFILE
    )]
    pub profile: String,

    /// Storage file path (overrides the profile setting)
    #[arg(long, global = true, env = "CRUMB_STORAGE")]
    pub storage: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Configure key pair and storage for a profile
    Setup,

    /// List secret paths, optionally under a prefix
    #[command(alias = "list")]
    Ls {
        /// Path prefix filter (e.g., /prod/)
        path: Option<String>,
    },

    /// Set a secret value
    Set {
        /// Secret path (e.g., /prod/api/key)
        path: String,
        /// Secret value
        value: String,
    },

    /// Show a secret (masked unless --show)
    Get {
        /// Secret path
        path: String,
        /// Print the value in clear text
        #[arg(long)]
        show: bool,
        /// Print as a shell assignment named after the last path segment
        #[arg(long)]
        export: bool,
        /// Shell format for --export (bash, fish)
        #[arg(long)]
        shell: Option<String>,
    },

    /// Delete a secret after typing its path to confirm
    #[command(alias = "rm")]
    Delete {
        /// Secret path
        path: String,
    },

    /// Move a secret to a new path
    #[command(alias = "mv")]
    Move {
        /// Current path
        old: String,
        /// New path
        new: String,
    },

    /// Create a .crumb.yaml export config in the current directory
    Init {
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Print shell assignments for an environment or a path prefix
    Export {
        /// Shell format (bash, fish)
        #[arg(long)]
        shell: Option<String>,
        /// Project config file
        #[arg(short, long, default_value = constants::PROJECT_FILE)]
        file: PathBuf,
        /// Environment inside the project config
        #[arg(long, default_value = constants::DEFAULT_ENVIRONMENT)]
        env: String,
        /// Export everything under this prefix instead of using the config
        #[arg(long)]
        path: Option<String>,
    },

    /// Import variables from a .env file under a base path
    Import {
        /// .env file to read
        #[arg(long)]
        file: PathBuf,
        /// Base secret path (e.g., /dev/my-app)
        #[arg(long)]
        path: String,
    },

    /// Manage the storage file of the current profile
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

/// Storage subcommands.
#[derive(Subcommand)]
pub enum StorageAction {
    /// Use a custom storage file for this profile
    Set {
        /// Storage file path
        path: String,
    },

    /// Show the storage file in use
    Get,

    /// Go back to the default storage file
    Clear,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let ctx = Context {
        dir: ConfigDir::from_env()?,
        profile: cli.profile,
        storage: cli.storage,
    };

    match cli.command {
        Setup => setup::execute(&ctx),
        Ls { path } => secrets::ls(&ctx, path.as_deref()),
        Set { path, value } => secrets::set(&ctx, &path, &value),
        Get {
            path,
            show,
            export,
            shell,
        } => secrets::get(&ctx, &path, show, export, shell.as_deref()),
        Delete { path } => secrets::delete(&ctx, &path),
        Move { old, new } => secrets::move_secret(&ctx, &old, &new),
        Init { force } => init::execute(force),
        Export {
            shell,
            file,
            env,
            path,
        } => export::execute(&ctx, shell.as_deref(), &file, &env, path.as_deref()),
        Import { file, path } => import::execute(&ctx, &file, &path),
        Storage { action } => match action {
            StorageAction::Set { path } => storage::set(&ctx, &path),
            StorageAction::Get => storage::get(&ctx),
            StorageAction::Clear => storage::clear(&ctx),
        },
    }
}

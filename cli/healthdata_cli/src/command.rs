use clap::{Parser, Subcommand};
use healthdata_session::Role;
use redact::Secret;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Expose the full error chain when reporting errors.
    ///
    /// It will also emit tracing output to stderr.
    /// Use `RUST_LOG` to control which events are emitted.
    #[clap(long, env = "HEALTHDATA_DEBUG")]
    pub debug: bool,
    /// A YAML file to load configuration values from.
    ///
    /// Values can also be set via `HEALTHDATA_`-prefixed environment variables,
    /// which take precedence over the file.
    #[clap(long, value_parser)]
    pub config: Option<PathBuf>,
    /// The directory where the session is persisted.
    ///
    /// Defaults to `~/.healthdata`.
    #[clap(long, value_parser)]
    pub profile_dir: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in as a doctor or as a staff member.
    Login {
        #[clap(long)]
        id: Option<String>,
        #[clap(long)]
        password: Option<Secret<String>>,
        /// Either `doctor` or `staff`.
        #[clap(long)]
        role: Option<Role>,
        /// The page you were trying to reach before signing in.
        #[clap(long)]
        return_to: Option<String>,
    },
    /// Sign out.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Show what would be rendered for <PATH>.
    Navigate {
        #[arg(index = 1)]
        path: String,
    },
    /// Show the navigation menu available to the current user.
    Menu,
}

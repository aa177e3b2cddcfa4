//! The `healthdata` CLI.
//!
//! Each invocation behaves like a fresh start of the application: the persisted
//! session is restored from the profile directory, one command runs and any
//! change to the session is persisted before exiting.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use healthdata_access::{Navigation, Screen, Shell};
use healthdata_session::errors::LoginError;
use healthdata_session::{SessionStorage, SessionStore};
use healthdata_session_fs_store::FsSessionStore;
use redact::Secret;

pub mod command;
pub mod config;

use command::Command;
use config::Config;

/// Pick the profile directory: the command-line flag wins over the configuration,
/// which wins over `~/.healthdata`.
pub fn profile_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf, anyhow::Error> {
    if let Some(dir) = flag.or_else(|| config.profile_dir.clone()) {
        return Ok(dir);
    }
    let system_home_dir = xdg_home::home_dir()
        .context("Failed to get the system home directory from the environment")?;
    Ok(system_home_dir.join(".healthdata"))
}

/// Run a single command against the session persisted in `profile_dir`.
///
/// Human-readable output is written to `out`.
/// Rejected logins are reported as errors, carrying the reason shown to the user.
pub fn run(
    command: Command,
    config: &Config,
    profile_dir: &Path,
    out: &mut impl Write,
) -> Result<(), anyhow::Error> {
    let storage = SessionStorage::new(FsSessionStore::new(profile_dir));
    let mut store = SessionStore::new(storage, &config.session);
    store.restore();
    let shell = Shell::healthdata(config.access.clone())
        .context("Failed to build the route table")?;

    match command {
        Command::Login {
            id,
            password,
            role,
            return_to,
        } => {
            let password = password.unwrap_or_else(|| Secret::new(String::new()));
            let identity = match store.login(
                id.as_deref().unwrap_or_default(),
                password.expose_secret(),
                role,
            ) {
                Ok(identity) => identity,
                Err(e @ LoginError::Validation(_)) => return Err(e.into()),
                Err(e) => return Err(e).context("Failed to sign in"),
            };
            writeln!(
                out,
                "Welcome, {} ({})",
                identity.name(),
                identity.role().label()
            )?;
            let destination = shell.post_login_destination(&identity, return_to.as_deref());
            writeln!(out, "Next: {destination}")?;
        }
        Command::Logout => {
            store.logout().context("Failed to sign out")?;
            writeln!(out, "Signed out")?;
        }
        Command::Whoami => match store.identity() {
            Some(identity) => writeln!(
                out,
                "{} ({}, {})",
                identity.name(),
                identity.role().label(),
                identity.id()
            )?,
            None => writeln!(out, "Not signed in")?,
        },
        Command::Navigate { path } => {
            let step = shell.navigate(store.state(), &path);
            writeln!(out, "Navigation: {}", describe_step(&step))?;
            let resolved = shell.resolve(store.state(), &path)?;
            writeln!(
                out,
                "Screen: {}",
                describe_screen(&resolved.screen, &resolved.path)
            )?;
            if let Screen::View { menu, .. } = &resolved.screen {
                for entry in menu.iter() {
                    writeln!(out, "  - {} ({})", entry.label, entry.path)?;
                }
            }
        }
        Command::Menu => {
            let menu = shell.menu(store.state());
            if menu.is_empty() {
                writeln!(out, "Not signed in")?;
            }
            for entry in menu {
                writeln!(out, "{:<10} {:<20} {}", entry.label, entry.path, entry.icon)?;
            }
        }
    }
    Ok(())
}

/// The first step taken towards the requested path: either the shell renders
/// something right away or it redirects elsewhere.
fn describe_step(step: &Navigation<'_>) -> String {
    match step {
        Navigation::Render(_) => "render".to_owned(),
        Navigation::Redirect {
            target,
            return_to: Some(return_to),
        } => format!("redirect to {target} (return to {return_to})"),
        Navigation::Redirect {
            target,
            return_to: None,
        } => format!("redirect to {target}"),
    }
}

fn describe_screen(screen: &Screen<'_>, path: &str) -> String {
    match screen {
        Screen::Loading => "loading".to_owned(),
        Screen::Login { return_to: None } => format!("login at {path}"),
        Screen::Login {
            return_to: Some(return_to),
        } => format!("login at {path} (return to {return_to})"),
        Screen::View {
            route, identity, ..
        } => format!("{} at {path}, as {}", route.name, identity.name()),
        Screen::NotFound { path: missing } => format!("not found: {missing}"),
    }
}

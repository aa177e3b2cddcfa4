use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use healthdata_cli::command::Cli;
use healthdata_cli::config::Config;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let debug = cli.debug;
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if debug {
                eprintln!("{}: {e:?}", "ERROR".bold().red());
            } else {
                eprintln!("{}: {e}", "ERROR".bold().red());
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), anyhow::Error> {
    if cli.debug {
        init_telemetry()?;
    }
    let config = Config::load(cli.config.as_deref())?;
    let profile_dir = healthdata_cli::profile_dir(cli.profile_dir, &config)?;
    tracing::debug!(profile_dir = %profile_dir.display(), "Using profile directory");

    let mut stdout = std::io::stdout().lock();
    healthdata_cli::run(cli.command, &config, &profile_dir, &mut stdout)
}

fn init_telemetry() -> Result<(), anyhow::Error> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime());
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,healthdata=debug"))
        .context("Invalid log filter configuration")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;
    Ok(())
}

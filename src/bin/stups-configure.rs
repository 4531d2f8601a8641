// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line entry point for the interactive STUPS configurator.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use stups_config::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configure the STUPS command line tools for your organization's domain.
#[derive(Debug, Parser)]
#[command(name = "stups-configure", version, about)]
struct Cli {
    /// STUPS domain to configure (e.g. "stups.example.org")
    domain: Option<String>,

    /// Directory holding the per-tool configuration sections
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Do not run "mai create-all" after configuring
    #[arg(long)]
    no_mai: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = ConfiguratorSettings::default().with_account_tool(!cli.no_mai);
    let mut builder = DomainConfigurator::builder().with_settings(settings);
    if let Some(dir) = &cli.config_dir {
        builder = builder.with_store(Box::new(YamlFileStore::with_root(dir)));
    }

    let mut configurator = builder.build()?;
    configurator.configure(cli.domain.as_deref())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

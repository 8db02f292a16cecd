//! `tribute` — find dependency license files, classify them, and export attribution data.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Walk the project for license files, following `Package.resolved`
//!    lockfiles into the package cache ([`discovery`]).
//! 4. Classify each license text by family ([`license`]).
//! 5. Run the requested command ([`commands`]) and render its output ([`report`]).
//!    Mistyped library, license or format names get "did you mean" hints ([`suggest`]).
//! 6. Exit `0` on success, `1` with a message on any failure.

mod cli;
mod commands;
mod config;
mod discovery;
mod error;
mod license;
mod models;
mod report;
mod suggest;

use anyhow::Result;
use clap::Parser;
use log::info;

use cli::{Cli, Command};
use commands::Scan;
use config::load_config;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting tribute v{}", env!("CARGO_PKG_VERSION"));

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    match &cli.command {
        Command::List { scan } => {
            let libraries = commands::list(&Scan::new(&path, scan, &config, cli.quiet))?;
            report::terminal::render(&libraries, cli.quiet);
        }
        Command::Export {
            output,
            scan,
            allow,
            format,
            template,
        } => {
            let allow: Vec<String> = config
                .policy
                .allow
                .iter()
                .chain(allow)
                .cloned()
                .collect();
            let message = commands::export(
                &Scan::new(&path, scan, &config, cli.quiet),
                &allow,
                format.as_deref(),
                template.as_deref(),
                output.as_deref(),
            )?;
            println!("{}", message);
        }
        Command::Check {
            licenses_file,
            scan,
        } => {
            let message =
                commands::check(&Scan::new(&path, scan, &config, cli.quiet), licenses_file)?;
            println!("{}", message);
        }
        Command::CheckUnsupported { scan, unsupported } => {
            let unsupported = commands::unsupported_families(unsupported, &config);
            let message = commands::check_unsupported(
                &Scan::new(&path, scan, &config, cli.quiet),
                unsupported,
            )?;
            println!("{}", message);
        }
    }

    Ok(())
}

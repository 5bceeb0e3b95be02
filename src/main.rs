//! `lssecrets`: print the contents of the Secret Service keyring.

use std::io::{self, Write};

use clap::Parser;
use lssecrets::errors::Error;
use lssecrets::options::{Cli, version_string};
use lssecrets::{Service, render, report};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LSSECRETS_LOG";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_string());
        return;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Service(#[from] Error),
    #[error("Couldn't write the report. {0}")]
    Io(#[from] io::Error),
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let options = cli.options();
    let service = Service::connect(options.detail.wants_secrets())?;
    let report = report::scan(&service, &options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_report(&mut out, &report)?;
    out.flush()?;
    Ok(())
}

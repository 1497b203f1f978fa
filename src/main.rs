//! # msvcgen CLI
//!
//! Binary entry point. Parses the command line, initializes logging and
//! runs the library pipeline; the logic lives in the `msvcgen` library.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = cli::Cli::parse();
    cli.execute()
}

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use pgate_cli::{Cli, execute};
use pgate_kernel::config::ConfigLoader;
use pgate_kernel::domain::config::AppConfig;
use pgate_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: AppConfig = ConfigLoader::new(cli.config.as_ref())
        .load()
        .context("Critical: Configuration is malformed")?;
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
    }

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    let output = execute(&cli.command, &cfg)?;
    println!("{output}");

    Ok(())
}

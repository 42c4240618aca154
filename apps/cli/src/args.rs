//! # CLI Argument Definitions
//!
//! Command-line structure for the `pgate` binary, built with `clap` derive.

use clap::{Parser, Subcommand};
use pgate_resolver::{ProfileGroup, ProfileId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pgate")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Resolve which optional profiles are enabled on this platform")]
pub struct Cli {
    /// Config file or stem (`profiles` probes `profiles.toml`, `profiles.json`, ...)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `logging.level` from the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve the enabled profile set and bitmask
    Resolve {
        /// Profiles to retract after resolution (comma separated)
        #[arg(long, value_delimiter = ',')]
        remove: Vec<ProfileId>,
        /// Extra capability bit positions to set in the mask
        #[arg(long = "supplemental-bit", value_name = "INDEX")]
        supplemental_bits: Vec<u32>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in catalog in resolution order
    Catalog {},
    /// Evaluate a single feature flag against the configured stores
    Flag {
        name: String,
        /// Value used when neither store defines the flag
        #[arg(long)]
        default: bool,
    },
    /// List the static members of a profile group
    Group { group: ProfileGroup },
}

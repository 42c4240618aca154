//! Library side of the `pgate` binary: argument model and command handlers.

pub mod args;
pub mod handlers;

pub use crate::args::{Cli, Command};
pub use crate::handlers::execute;

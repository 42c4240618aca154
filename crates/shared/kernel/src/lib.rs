//! Kernel utilities shared by the resolver entry points.
//! Keep this crate lightweight; it re-exports the domain crate and owns config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use pgate_kernel::config::load_config;
//! use pgate_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("profiles")).unwrap();
//! ```
pub mod config;
mod error;

pub use crate::error::{ConfigError, ConfigErrorExt};
pub use pgate_domain as domain;

//! # Domain Models
//!
//! Pure domain types for profile resolution with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O or resolution logic, just identifiers, masks and config shapes.

pub mod config;
pub mod mask;
pub mod profile;

pub use mask::ProfileMask;
pub use profile::{ProfileGroup, ProfileId};

//! # Profile Resolver
//!
//! Decides, at startup, which optional profile subsystems are enabled.
//!
//! ## Overview
//!
//! A [`Catalog`] lists every known profile with its default source, optional
//! feature flag and mask bit. [`FeatureResolver::resolve`] combines the layered
//! sources reachable through a [`ResolverContext`]:
//!
//! * **Defaults**: a boolean resource per profile, or a platform property for
//!   entries without one.
//! * **Feature flags**: settings store first, then `sys.fflag.override.*`
//!   (see [`resolve_flag`]), applied as replace or upgrade-only per entry.
//! * **Component overrides**: an explicit enable-list that forces profiles on.
//! * **Disabled mask**: a global deny-bitmask that vetoes everything above.
//!
//! The result is an ordered enabled set plus a [`ProfileMask`], which can be
//! trimmed afterwards with [`FeatureResolver::remove_entries`] or extended with
//! [`FeatureResolver::add_supplemental_bit`].
//!
//! # Example
//!
//! ```rust
//! use pgate_resolver::{ConfigPlatform, FeatureResolver};
//! use pgate_resolver::domain::{ProfileId, ProfileMask};
//!
//! let platform = ConfigPlatform::new()
//!     .with_resource("profile_supported_a2dp", true)
//!     .with_resource("profile_supported_pan", false);
//!
//! let resolver = FeatureResolver::default();
//! resolver.resolve(Some(&platform.context()));
//!
//! assert_eq!(resolver.enabled_set(), vec![ProfileId::A2dp]);
//! assert_eq!(resolver.compute_bitmask(), ProfileMask::A2DP);
//! ```

pub mod catalog;
pub mod flags;
mod platform;
mod resolver;
pub mod sources;

pub use crate::catalog::{Catalog, DefaultSource, FeatureEntry, FlagOverride, OverridePolicy};
pub use crate::flags::{FLAG_OVERRIDE_PREFIX, resolve_flag};
pub use crate::platform::{ConfigPlatform, DISABLED_PROFILES_SETTING};
pub use crate::resolver::{FeatureResolver, Resolution};
pub use crate::sources::ResolverContext;
pub use pgate_domain as domain;
pub use pgate_domain::{ProfileGroup, ProfileId, ProfileMask};

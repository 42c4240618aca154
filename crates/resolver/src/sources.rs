//! Collaborator contracts the resolver reads from.
//!
//! Implementations belong to the hosting platform. [`crate::ConfigPlatform`] is the
//! in-tree implementation backed by a loaded configuration file.

use pgate_domain::ProfileMask;
use pgate_domain::config::DEFAULT_PACKAGE;
use std::fmt;

/// Compiled-in boolean resources, keyed by resource name.
pub trait ResourceDefaults: Send + Sync {
    fn get(&self, key: &str) -> Option<bool>;
}

/// Dynamic, possibly remotely configured, string settings.
pub trait FeatureFlagStore: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Local override channel, consulted after [`FeatureFlagStore`].
///
/// Keys arrive already prefixed with [`crate::flags::FLAG_OVERRIDE_PREFIX`].
pub trait FeatureFlagOverride: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Platform properties backing entries without a resource default.
pub trait PlatformProperties: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Explicit enable-list from system configuration.
///
/// `None` means the override service is unavailable; `Some(vec![])` means nothing is forced.
pub trait ComponentOverrides: Send + Sync {
    fn list_enabled(&self, package: &str) -> Option<Vec<String>>;
}

/// Global deny-bitmask.
pub trait DisabledMaskSetting: Send + Sync {
    fn get(&self) -> u64;
}

/// Borrowed view over every collaborator a resolution pass may consult.
///
/// Every collaborator is optional. Without [`ResourceDefaults`] a resolution pass
/// is a no-op; the others degrade to "no value".
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    resources: Option<&'a dyn ResourceDefaults>,
    settings: Option<&'a dyn FeatureFlagStore>,
    overrides: Option<&'a dyn FeatureFlagOverride>,
    properties: Option<&'a dyn PlatformProperties>,
    components: Option<&'a dyn ComponentOverrides>,
    disabled: Option<&'a dyn DisabledMaskSetting>,
    package: &'a str,
}

impl<'a> ResolverContext<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resources: None,
            settings: None,
            overrides: None,
            properties: None,
            components: None,
            disabled: None,
            package: DEFAULT_PACKAGE,
        }
    }

    #[must_use]
    pub const fn resources(mut self, resources: &'a dyn ResourceDefaults) -> Self {
        self.resources = Some(resources);
        self
    }

    #[must_use]
    pub const fn settings(mut self, settings: &'a dyn FeatureFlagStore) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub const fn overrides(mut self, overrides: &'a dyn FeatureFlagOverride) -> Self {
        self.overrides = Some(overrides);
        self
    }

    #[must_use]
    pub const fn properties(mut self, properties: &'a dyn PlatformProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub const fn components(mut self, components: &'a dyn ComponentOverrides) -> Self {
        self.components = Some(components);
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: &'a dyn DisabledMaskSetting) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Package name passed to [`ComponentOverrides::list_enabled`].
    #[must_use]
    pub const fn package(mut self, package: &'a str) -> Self {
        self.package = package;
        self
    }

    #[must_use]
    pub const fn has_resources(&self) -> bool {
        self.resources.is_some()
    }

    pub(crate) fn resource(&self, key: &str) -> Option<bool> {
        self.resources.and_then(|r| r.get(key))
    }

    pub(crate) fn setting(&self, name: &str) -> Option<String> {
        self.settings.and_then(|s| s.lookup(name))
    }

    pub(crate) fn flag_override(&self, name: &str) -> Option<String> {
        self.overrides.and_then(|o| o.lookup(name))
    }

    pub(crate) fn property(&self, name: &str) -> Option<String> {
        self.properties.and_then(|p| p.get(name))
    }

    pub(crate) fn enabled_components(&self) -> Option<Vec<String>> {
        self.components.and_then(|c| c.list_enabled(self.package))
    }

    pub(crate) fn disabled_mask(&self) -> ProfileMask {
        self.disabled.map_or_else(ProfileMask::empty, |d| ProfileMask::from_bits_retain(d.get()))
    }
}

impl Default for ResolverContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolverContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverContext")
            .field("resources", &self.resources.is_some())
            .field("settings", &self.settings.is_some())
            .field("overrides", &self.overrides.is_some())
            .field("properties", &self.properties.is_some())
            .field("components", &self.components.is_some())
            .field("disabled", &self.disabled.is_some())
            .field("package", &self.package)
            .finish()
    }
}

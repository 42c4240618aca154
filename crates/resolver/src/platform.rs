use crate::sources::{
    ComponentOverrides, DisabledMaskSetting, FeatureFlagOverride, FeatureFlagStore,
    PlatformProperties, ResolverContext, ResourceDefaults,
};
use fxhash::FxHashMap;
use pgate_domain::config::{DEFAULT_PACKAGE, PlatformConfig};
use tracing::debug;

/// Global setting holding the deny-bitmask.
pub const DISABLED_PROFILES_SETTING: &str = "bluetooth_disabled_profiles";

/// Platform stores backed by a loaded [`PlatformConfig`].
///
/// Settings feed [`FeatureFlagStore`] and [`DisabledMaskSetting`]; properties feed
/// [`FeatureFlagOverride`] and [`PlatformProperties`].
#[derive(Debug, Clone)]
pub struct ConfigPlatform {
    resources: FxHashMap<String, bool>,
    settings: FxHashMap<String, String>,
    properties: FxHashMap<String, String>,
    package: String,
    components: Option<FxHashMap<String, Vec<String>>>,
}

impl ConfigPlatform {
    /// Empty stores: every lookup is absent and the override service is unavailable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: FxHashMap::default(),
            settings: FxHashMap::default(),
            properties: FxHashMap::default(),
            package: DEFAULT_PACKAGE.to_owned(),
            components: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &PlatformConfig) -> Self {
        Self {
            resources: config.resources.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            settings: config.settings.clone().into_iter().collect(),
            properties: config.properties.clone().into_iter().collect(),
            package: config.package.clone(),
            components: config
                .component_overrides
                .as_ref()
                .map(|map| map.clone().into_iter().collect()),
        }
    }

    #[must_use]
    pub fn with_resource(mut self, key: impl Into<String>, value: bool) -> Self {
        self.resources.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Makes the override service available and sets the list for `package`.
    #[must_use]
    pub fn with_component_overrides<I, S>(mut self, package: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components
            .get_or_insert_with(FxHashMap::default)
            .insert(package.into(), names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_disabled_mask(self, mask: u64) -> Self {
        self.with_setting(DISABLED_PROFILES_SETTING, mask.to_string())
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// A context wired to every store of this platform.
    #[must_use]
    pub fn context(&self) -> ResolverContext<'_> {
        ResolverContext::new()
            .resources(self)
            .settings(self)
            .overrides(self)
            .properties(self)
            .components(self)
            .disabled(self)
            .package(&self.package)
    }
}

impl Default for ConfigPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&PlatformConfig> for ConfigPlatform {
    fn from(config: &PlatformConfig) -> Self {
        Self::from_config(config)
    }
}

impl ResourceDefaults for ConfigPlatform {
    fn get(&self, key: &str) -> Option<bool> {
        self.resources.get(key).copied()
    }
}

impl FeatureFlagStore for ConfigPlatform {
    fn lookup(&self, name: &str) -> Option<String> {
        self.settings.get(name).cloned()
    }
}

impl FeatureFlagOverride for ConfigPlatform {
    fn lookup(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

impl PlatformProperties for ConfigPlatform {
    fn get(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

impl ComponentOverrides for ConfigPlatform {
    fn list_enabled(&self, package: &str) -> Option<Vec<String>> {
        let components = self.components.as_ref()?;
        Some(components.get(package).cloned().unwrap_or_default())
    }
}

impl DisabledMaskSetting for ConfigPlatform {
    fn get(&self) -> u64 {
        let Some(raw) = self.settings.get(DISABLED_PROFILES_SETTING) else {
            return 0;
        };
        let raw = raw.trim();
        raw.parse::<u64>()
            .or_else(|_| raw.parse::<i64>().map(i64::cast_unsigned))
            .unwrap_or_else(|e| {
                debug!(value = raw, error = %e, "Unparsable disabled profile mask, using 0");
                0
            })
    }
}

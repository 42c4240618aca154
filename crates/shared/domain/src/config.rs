use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Package name used when asking for component overrides.
pub const DEFAULT_PACKAGE: &str = "com.android.bluetooth";

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub logging: LoggingConfig,
    pub platform: PlatformConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Extra module directives, e.g. `pgate_resolver=debug`.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for rolling log files. No file output when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Snapshot of the platform stores the resolver reads from.
///
/// Keys mirror the names used on the platform: resource booleans such as
/// `profile_supported_a2dp`, global settings such as `settings_bluetooth_battery`
/// or `bluetooth_disabled_profiles`, and system properties such as
/// `sys.fflag.override.settings_bluetooth_hearing_aid`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub resources: BTreeMap<String, bool>,
    pub settings: BTreeMap<String, String>,
    pub properties: BTreeMap<String, String>,
    pub package: String,
    /// Enabled component overrides per package. `None` means the override
    /// service is unavailable, which is distinct from an empty list.
    pub component_overrides: Option<BTreeMap<String, Vec<String>>>,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            settings: BTreeMap::new(),
            properties: BTreeMap::new(),
            package: DEFAULT_PACKAGE.to_owned(),
            component_overrides: None,
        }
    }
}

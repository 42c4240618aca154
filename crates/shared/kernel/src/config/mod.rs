use crate::error::{ConfigError, ConfigErrorExt};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default config file stem, resolved against the current working directory.
pub const DEFAULT_CONFIG_PATH: &str = "profiles";

/// Prefix for environment overrides (`PGATE__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "PGATE";

const ENV_SEPARATOR: &str = "__";

/// Layered configuration loader: a required file overlaid with environment variables.
///
/// The file format is picked from the extension (`toml`, `json`, `yaml`, ...). A path
/// without an extension is probed for every supported format.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    env: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    /// Creates a loader for `path`, or for [`DEFAULT_CONFIG_PATH`] when `None`.
    #[must_use]
    pub fn new(path: Option<impl AsRef<Path>>) -> Self {
        let path = path.map_or_else(
            || PathBuf::from(DEFAULT_CONFIG_PATH),
            |p| p.as_ref().to_path_buf(),
        );
        Self { path, env: None }
    }

    /// Replaces the process environment with an explicit set of variables.
    ///
    /// Variable names still go through prefix and separator handling, so tests
    /// can exercise overrides without touching the real environment.
    #[must_use = "The loader must be used to load a configuration."]
    pub fn env_source<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds the layered configuration and deserializes it into `T`.
    ///
    /// # Errors
    /// * [`ConfigError::NotFound`] if an explicit file path (with extension) does not exist.
    /// * [`ConfigError::Config`] if no file matches, a value is malformed, or
    ///   the merged tree does not match `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        if self.path.extension().is_some() && !self.path.exists() {
            return Err(ConfigError::NotFound {
                path: self.path.display().to_string(),
                context: Some("Explicit config path".into()),
            });
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .source(self.env);

        info!("Loading config from {}", self.path.display());

        let config = Config::builder()
            .add_source(File::from(self.path.as_path()).required(true))
            .add_source(environment)
            .build()
            .context("Failed to build config")?;

        debug!("Config layers merged");

        config.try_deserialize::<T>().context("Failed to deserialize config")
    }
}

/// Loads `T` from a file plus `PGATE__*` environment overrides.
///
/// This is the shorthand for [`ConfigLoader::new`] followed by [`ConfigLoader::load`]:
/// 1. **Base File**: `path`, or `profiles.{toml,json,yaml,...}` when `None`.
/// 2. **Environment Overrides**: variables prefixed with `PGATE__`; nested keys are
///    joined with double underscores (`PGATE__PLATFORM__PACKAGE` maps to `platform.package`).
///
/// # Errors
/// Returns [`ConfigError`] if the file cannot be found or its content does not match `T`.
///
/// # Example
/// ```rust
/// use pgate_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    ConfigLoader::new(path).load()
}

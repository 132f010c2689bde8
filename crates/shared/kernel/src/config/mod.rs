use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`LYCEUM__DATABASE__URL`).
pub const ENV_PREFIX: &str = "LYCEUM";

/// Config file used when no path is given.
pub const DEFAULT_CONFIG: &str = "lyceum";

/// Error raised while loading configuration.
#[lyceum_derive::lyceum_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file layered with environment overrides.
///
/// 1. **Base file**: `path`, or `lyceum` (any format `config` understands,
///    e.g. `lyceum.toml`) in the working directory. The file is optional:
///    missing files fall back to `T`'s serde defaults.
/// 2. **Environment**: variables prefixed with `LYCEUM__`, nested with `__`
///    (`LYCEUM__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if a source is malformed or the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use lyceum_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     port: u16,
/// }
///
/// let cfg: Settings = load_config(Some("does-not-exist")).unwrap();
/// assert_eq!(cfg.port, 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

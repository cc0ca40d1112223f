use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `STK__SERVER__DATA_DIR`.
pub const ENV_PREFIX: &str = "STK";

/// Custom error type for config loading.
#[stk_derive::stk_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering a TOML file and environment overrides.
///
/// 1. **Base file**: `path` is read as TOML and must exist.
/// 2. **Environment overrides**: variables prefixed with `STK__` overlay the file. Nested
///    keys are separated by double underscores (`STK__GLOBAL__ENTITY__MAX_STACK_SIZE` maps to
///    `global.entity.max_stack_size`).
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing or unreadable, or when the merged
/// values do not match the structure of `T`.
///
/// # Example
/// ```rust,no_run
/// use stk_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config("config/local.toml").unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    info!(path = %path.display(), "Loading config");

    build(Some(path))
}

/// Like [`load_config`], but a missing file is skipped: `T` is built from the environment
/// alone, so fields without a value need `#[serde(default)]`.
///
/// # Errors
/// Returns [`ConfigError::Config`] when an existing file is malformed or the merged values do
/// not match `T`.
pub fn load_config_or_default<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    debug!(path = %path.display(), "Config file not found, using defaults");
    build(None)
}

fn build<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

use crate::version::GameVersion;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Global settings of the stacker, loaded from `stacker.toml`.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StackerConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub global: GlobalConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into registries.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct StackerConfig {
    #[serde(flatten, default)]
    inner: Arc<StackerConfigInner>,
}

impl Deref for StackerConfig {
    type Target = StackerConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for StackerConfig {
    fn deref_mut(&mut self) -> &mut StackerConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Host environment the settings are loaded for.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory holding the per-category settings files.
    pub data_dir: PathBuf,
    pub game_version: GameVersion,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    /// Rolling log directory; file logging is off when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// Extra `EnvFilter` directives, e.g. `stk_settings=debug`.
    pub filter: Option<String>,
    /// `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    /// Rotated files kept in `directory`.
    pub max_files: usize,
}

/// Values per-type settings fall back to when they are configured as `-1`.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub block: CategoryLimits,
    pub entity: EntityGlobals,
    pub item: CategoryLimits,
    pub spawner: CategoryLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryLimits {
    pub max_stack_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntityGlobals {
    pub max_stack_size: u32,
    pub min_stack_size: u32,
    pub merge_radius: u32,
    pub dont_stack_custom_named: bool,
    pub only_stack_on_ground: bool,
    pub dont_stack_if_in_water: bool,
    pub dont_stack_if_leashed: bool,
    pub dont_stack_if_invulnerable: bool,
    pub dont_stack_if_has_equipment: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("."), game_version: GameVersion::default() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            directory: None,
            json: false,
            filter: None,
            rotation: "daily".to_owned(),
            max_files: 10,
        }
    }
}

impl Default for CategoryLimits {
    fn default() -> Self {
        Self { max_stack_size: 2048 }
    }
}

impl Default for EntityGlobals {
    fn default() -> Self {
        Self {
            max_stack_size: 128,
            min_stack_size: 2,
            merge_radius: 5,
            dont_stack_custom_named: false,
            only_stack_on_ground: false,
            dont_stack_if_in_water: false,
            dont_stack_if_leashed: true,
            dont_stack_if_invulnerable: true,
            dont_stack_if_has_equipment: true,
        }
    }
}

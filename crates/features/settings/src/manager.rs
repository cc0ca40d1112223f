use crate::block::BlockSettings;
use crate::entity::EntitySettings;
use crate::item::ItemSettings;
use crate::registry::{ReloadReport, SettingsRegistry};
use crate::spawner::SpawnerSettings;
use crate::types::TypeSettings;
use std::path::Path;
use std::sync::Arc;
use stk_domain::config::StackerConfig;
use stk_domain::{Material, StackCategory};
use strum::IntoEnumIterator;
use tracing::info;

/// Owns the settings registries of all four categories.
#[derive(Debug)]
pub struct StackSettingManager {
    config: StackerConfig,
    blocks: SettingsRegistry<BlockSettings>,
    entities: SettingsRegistry<EntitySettings>,
    items: SettingsRegistry<ItemSettings>,
    spawners: SettingsRegistry<SpawnerSettings>,
}

impl StackSettingManager {
    /// Creates the registries without loading anything; call [`Self::reload_all`] next.
    #[must_use]
    pub fn new(config: StackerConfig) -> Self {
        Self {
            blocks: SettingsRegistry::new(config.clone()),
            entities: SettingsRegistry::new(config.clone()),
            items: SettingsRegistry::new(config.clone()),
            spawners: SettingsRegistry::new(config.clone()),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StackerConfig {
        &self.config
    }

    #[must_use]
    pub const fn blocks(&self) -> &SettingsRegistry<BlockSettings> {
        &self.blocks
    }

    #[must_use]
    pub const fn entities(&self) -> &SettingsRegistry<EntitySettings> {
        &self.entities
    }

    #[must_use]
    pub const fn items(&self) -> &SettingsRegistry<ItemSettings> {
        &self.items
    }

    #[must_use]
    pub const fn spawners(&self) -> &SettingsRegistry<SpawnerSettings> {
        &self.spawners
    }

    pub fn reload(&self, category: StackCategory) -> ReloadReport {
        match category {
            StackCategory::Block => self.blocks.reload(),
            StackCategory::Entity => self.entities.reload(),
            StackCategory::Item => self.items.reload(),
            StackCategory::Spawner => self.spawners.reload(),
        }
    }

    /// Reloads every category, in declaration order.
    pub fn reload_all(&self) -> Vec<ReloadReport> {
        StackCategory::iter().map(|category| self.reload(category)).collect()
    }

    /// Drops all loaded settings, leaving every type unsupported until the next reload.
    pub fn disable(&self) {
        self.blocks.clear();
        self.entities.clear();
        self.items.clear();
        self.spawners.clear();
        info!("Stack settings disabled");
    }

    /// Path of the settings file backing `category`.
    #[must_use]
    pub fn settings_file(&self, category: StackCategory) -> &Path {
        match category {
            StackCategory::Block => self.blocks.path(),
            StackCategory::Entity => self.entities.path(),
            StackCategory::Item => self.items.path(),
            StackCategory::Spawner => self.spawners.path(),
        }
    }

    /// Number of loaded entries of `category`.
    #[must_use]
    pub fn entry_count(&self, category: StackCategory) -> usize {
        match category {
            StackCategory::Block => self.blocks.len(),
            StackCategory::Entity => self.entities.len(),
            StackCategory::Item => self.items.len(),
            StackCategory::Spawner => self.spawners.len(),
        }
    }

    /// Number of loaded entries of `category` with stacking enabled.
    #[must_use]
    pub fn stackable_count(&self, category: StackCategory) -> usize {
        match category {
            StackCategory::Block => self.blocks.stackable_types().len(),
            StackCategory::Entity => self.entities.stackable_types().len(),
            StackCategory::Item => self.items.stackable_types().len(),
            StackCategory::Spawner => self.spawners.stackable_types().len(),
        }
    }

    /// Entity settings of the species hatched by the spawn egg `material`.
    #[must_use]
    pub fn entity_settings_for_spawn_egg(
        &self,
        material: Material,
    ) -> Option<Arc<EntitySettings>> {
        let kind = material.spawned_entity()?;
        self.entities.get(kind).filter(|settings| settings.spawn_egg() == Some(material))
    }

    /// Display name configured for `key` in `category`, if the type is loaded.
    #[must_use]
    pub fn display_name(&self, category: StackCategory, key: &str) -> Option<String> {
        fn lookup<S: TypeSettings>(registry: &SettingsRegistry<S>, key: &str) -> Option<String> {
            registry
                .find(|settings| settings.key().as_ref() == key)
                .map(|settings| settings.display_name().to_owned())
        }

        match category {
            StackCategory::Block => lookup(&self.blocks, key),
            StackCategory::Entity => lookup(&self.entities, key),
            StackCategory::Item => lookup(&self.items, key),
            StackCategory::Spawner => lookup(&self.spawners, key),
        }
    }
}

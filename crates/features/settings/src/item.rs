use crate::error::SettingsError;
use crate::types::{CommonSettings, TypeSettings};
use stk_domain::config::StackerConfig;
use stk_domain::{Material, StackCategory, StackedItem, display_name};
use stk_persist::ConfigFile;

/// Stacking policy of one dropped item material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSettings {
    material: Material,
    common: CommonSettings,
    has_changes: bool,
}

impl ItemSettings {
    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }
}

impl TypeSettings for ItemSettings {
    type Key = Material;
    type Candidate = StackedItem;

    const CATEGORY: StackCategory = StackCategory::Item;

    fn domain(_config: &StackerConfig) -> Vec<Material> {
        Material::alphabetical()
    }

    fn build(
        material: Material,
        file: &mut ConfigFile,
        config: &StackerConfig,
    ) -> Result<Self, SettingsError> {
        let mut section = file.section(material.as_ref());
        let common = CommonSettings::load(
            &mut section,
            &display_name(material.as_ref()),
            config.global.item.max_stack_size,
        );

        Ok(Self { material, common, has_changes: section.has_changes() })
    }

    fn key(&self) -> Material {
        self.material
    }

    fn stacking_enabled(&self) -> bool {
        self.common.stacking_enabled
    }

    fn max_stack_size(&self) -> u32 {
        self.common.max_stack_size
    }

    fn has_changes(&self) -> bool {
        self.has_changes
    }

    fn display_name(&self) -> &str {
        &self.common.display_name
    }
}

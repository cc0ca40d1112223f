use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The four families of stackable objects, each with its own settings file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StackCategory {
    Block,
    Entity,
    Item,
    Spawner,
}

impl StackCategory {
    /// Name of the category's settings file inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Block => "block_settings.toml",
            Self::Entity => "entity_settings.toml",
            Self::Item => "item_settings.toml",
            Self::Spawner => "spawner_settings.toml",
        }
    }
}

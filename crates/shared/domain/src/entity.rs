use crate::material::Material;
use crate::version::GameVersion;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Species known to the engine.
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
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    ArmorStand,
    Axolotl,
    Bat,
    Bee,
    Blaze,
    Cat,
    CaveSpider,
    Chicken,
    Cow,
    Creeper,
    Donkey,
    Drowned,
    Enderman,
    Fox,
    Frog,
    Ghast,
    Goat,
    Horse,
    IronGolem,
    Llama,
    MagmaCube,
    Mooshroom,
    Panda,
    Parrot,
    Pig,
    Player,
    Rabbit,
    Sheep,
    Skeleton,
    Slime,
    Snowman,
    Spider,
    Squid,
    Strider,
    Turtle,
    Villager,
    Witch,
    Wolf,
    Zombie,
    ZombifiedPiglin,
}

impl EntityKind {
    /// First game version in which the species exists.
    #[must_use]
    pub const fn since(self) -> GameVersion {
        match self {
            Self::Cat | Self::Fox | Self::Panda => GameVersion::release(14),
            Self::Bee => GameVersion::release(15),
            Self::Strider | Self::ZombifiedPiglin => GameVersion::release(16),
            Self::Axolotl | Self::Goat => GameVersion::release(17),
            Self::Frog => GameVersion::release(19),
            _ => GameVersion::BASELINE,
        }
    }

    #[must_use]
    pub fn is_available(self, version: GameVersion) -> bool {
        self.since() <= version
    }

    /// Whether the kind is a mob that can be merged at all.
    #[must_use]
    pub const fn is_stackable(self) -> bool {
        !matches!(self, Self::Player | Self::ArmorStand)
    }

    #[must_use]
    pub fn spawn_egg(self) -> Option<Material> {
        Material::iter().find(|material| material.spawned_entity() == Some(self))
    }

    /// Stackable kinds available in `version`, sorted by canonical name.
    #[must_use]
    pub fn alphabetical_stackable(version: GameVersion) -> Vec<Self> {
        let mut kinds: Vec<Self> =
            Self::iter().filter(|kind| kind.is_stackable() && kind.is_available(version)).collect();
        kinds.sort_by_key(|kind| <&'static str>::from(*kind));
        kinds
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DyeColor {
    #[default]
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

/// Species-specific state of a live entity, as observed by the caller.
///
/// `Unspecified` means the caller has no species details; species predicates never reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpeciesState {
    #[default]
    Unspecified,
    Bat {
        awake: bool,
    },
    Bee {
        angry: bool,
        has_nectar: bool,
        has_stung: bool,
    },
    Creeper {
        charged: bool,
    },
    Goat {
        screaming: bool,
    },
    Horse {
        tamed: bool,
        saddled: bool,
    },
    /// Saddle-wearing species (pig, strider).
    Saddleable {
        saddled: bool,
    },
    Sheep {
        sheared: bool,
        color: DyeColor,
    },
    Slime {
        size: u8,
    },
    Snowman {
        has_pumpkin: bool,
    },
    Turtle {
        has_egg: bool,
    },
    Villager {
        profession: String,
        level: u8,
    },
    Wolf {
        tamed: bool,
        angry: bool,
    },
    Zombie {
        converting: bool,
    },
    /// Coloured species without further state (axolotl, llama).
    Colored {
        color: String,
    },
    /// Species distinguished only by a variant name (cat, fox, parrot, rabbit, frog).
    Variant {
        variant: String,
    },
}

/// Everything the evaluator may inspect about one live entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityData {
    pub custom_name: Option<String>,
    pub baby: bool,
    pub leashed: bool,
    pub invulnerable: bool,
    pub has_equipment: bool,
    pub from_spawner: bool,
    pub on_ground: bool,
    pub in_water: bool,
    pub species: SpeciesState,
}

impl Default for EntityData {
    fn default() -> Self {
        Self {
            custom_name: None,
            baby: false,
            leashed: false,
            invulnerable: false,
            has_equipment: false,
            from_spawner: false,
            on_ground: true,
            in_water: false,
            species: SpeciesState::Unspecified,
        }
    }
}

impl EntityData {
    #[must_use]
    pub fn with_species(species: SpeciesState) -> Self {
        Self { species, ..Self::default() }
    }
}

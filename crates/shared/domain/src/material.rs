use crate::entity::EntityKind;
use bitflags::bitflags;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

bitflags! {
    /// Physical properties of a material that decide which categories it may belong to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct MaterialFlags: u8 {
        /// Can be placed in the world.
        const BLOCK = 1 << 0;
        /// Occupies a full, collidable block space.
        const SOLID = 1 << 1;
        /// Opens an interface or holds state when used (chests, furnaces, beacons).
        const INTERACTABLE = 1 << 2;
        /// Falls when unsupported.
        const GRAVITY = 1 << 3;
        /// Spawns an entity when used.
        const SPAWN_EGG = 1 << 4;

        const FULL_BLOCK = Self::BLOCK.bits() | Self::SOLID.bits();
    }
}

/// Block and item identifiers known to the engine.
///
/// Declared in canonical-name order; [`Material::alphabetical`] does not rely on it.
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
pub enum Material {
    AcaciaLog,
    Andesite,
    Apple,
    Arrow,
    AxolotlSpawnEgg,
    BatSpawnEgg,
    Beacon,
    BeeSpawnEgg,
    BirchLog,
    Bone,
    BoneBlock,
    Bookshelf,
    Bread,
    Bricks,
    CatSpawnEgg,
    Chest,
    ChickenSpawnEgg,
    Clay,
    CoalBlock,
    CoalOre,
    Cobblestone,
    CowSpawnEgg,
    CraftingTable,
    CreeperSpawnEgg,
    Diamond,
    DiamondBlock,
    DiamondOre,
    DiamondSword,
    Diorite,
    Dirt,
    Egg,
    Emerald,
    EmeraldBlock,
    EndStone,
    Feather,
    FoxSpawnEgg,
    FrogSpawnEgg,
    Furnace,
    Glass,
    Glowstone,
    GoatSpawnEgg,
    GoldBlock,
    GoldIngot,
    Granite,
    GrassBlock,
    Gravel,
    Gunpowder,
    HayBlock,
    HorseSpawnEgg,
    IronBlock,
    IronIngot,
    LapisBlock,
    Leather,
    LlamaSpawnEgg,
    MagmaCubeSpawnEgg,
    Melon,
    NetheriteBlock,
    Netherrack,
    OakLog,
    Obsidian,
    ParrotSpawnEgg,
    PigSpawnEgg,
    Pumpkin,
    QuartzBlock,
    RabbitSpawnEgg,
    RedstoneBlock,
    RottenFlesh,
    Saddle,
    Sand,
    Sandstone,
    SheepSpawnEgg,
    SkeletonSpawnEgg,
    SlimeSpawnEgg,
    Slimeball,
    Snowball,
    Spawner,
    SpiderSpawnEgg,
    Sponge,
    Stone,
    Torch,
    TurtleSpawnEgg,
    VillagerSpawnEgg,
    Wheat,
    WolfSpawnEgg,
    ZombieSpawnEgg,
}

impl Material {
    #[must_use]
    pub const fn flags(self) -> MaterialFlags {
        use Material::{
            AcaciaLog, Andesite, Beacon, BirchLog, BoneBlock, Bookshelf, Bricks, Chest, Clay,
            CoalBlock, CoalOre, Cobblestone, CraftingTable, DiamondBlock, DiamondOre, Diorite,
            Dirt, EmeraldBlock, EndStone, Furnace, Glass, Glowstone, GoldBlock, Granite,
            GrassBlock, Gravel, HayBlock, IronBlock, LapisBlock, Melon, NetheriteBlock,
            Netherrack, OakLog, Obsidian, Pumpkin, QuartzBlock, RedstoneBlock, Sand, Sandstone,
            Spawner, Sponge, Stone, Torch,
        };

        match self {
            AcaciaLog | Andesite | BirchLog | BoneBlock | Bookshelf | Bricks | Clay | CoalBlock
            | CoalOre | Cobblestone | DiamondBlock | DiamondOre | Diorite | Dirt
            | EmeraldBlock | EndStone | Glass | Glowstone | GoldBlock | Granite | GrassBlock
            | HayBlock | IronBlock | LapisBlock | Melon | NetheriteBlock | Netherrack | OakLog
            | Obsidian | Pumpkin | QuartzBlock | RedstoneBlock | Sandstone | Spawner | Sponge
            | Stone => MaterialFlags::FULL_BLOCK,
            Beacon | Chest | CraftingTable | Furnace => {
                MaterialFlags::FULL_BLOCK.union(MaterialFlags::INTERACTABLE)
            },
            Gravel | Sand => MaterialFlags::FULL_BLOCK.union(MaterialFlags::GRAVITY),
            Torch => MaterialFlags::BLOCK,
            other if other.spawned_entity().is_some() => MaterialFlags::SPAWN_EGG,
            _ => MaterialFlags::empty(),
        }
    }

    #[must_use]
    pub const fn is_block(self) -> bool {
        self.flags().contains(MaterialFlags::BLOCK)
    }

    #[must_use]
    pub const fn is_spawn_egg(self) -> bool {
        self.spawned_entity().is_some()
    }

    /// Whether a placed block of this material may form a block stack.
    ///
    /// Spawners are excluded here; they are stacked through their own category.
    #[must_use]
    pub const fn is_stackable_block(self) -> bool {
        let flags = self.flags();
        flags.contains(MaterialFlags::FULL_BLOCK)
            && !flags.intersects(MaterialFlags::INTERACTABLE.union(MaterialFlags::GRAVITY))
            && !matches!(self, Self::Spawner)
    }

    /// Species an egg spawns.
    #[must_use]
    pub const fn spawned_entity(self) -> Option<EntityKind> {
        Some(match self {
            Self::AxolotlSpawnEgg => EntityKind::Axolotl,
            Self::BatSpawnEgg => EntityKind::Bat,
            Self::BeeSpawnEgg => EntityKind::Bee,
            Self::CatSpawnEgg => EntityKind::Cat,
            Self::ChickenSpawnEgg => EntityKind::Chicken,
            Self::CowSpawnEgg => EntityKind::Cow,
            Self::CreeperSpawnEgg => EntityKind::Creeper,
            Self::FoxSpawnEgg => EntityKind::Fox,
            Self::FrogSpawnEgg => EntityKind::Frog,
            Self::GoatSpawnEgg => EntityKind::Goat,
            Self::HorseSpawnEgg => EntityKind::Horse,
            Self::LlamaSpawnEgg => EntityKind::Llama,
            Self::MagmaCubeSpawnEgg => EntityKind::MagmaCube,
            Self::ParrotSpawnEgg => EntityKind::Parrot,
            Self::PigSpawnEgg => EntityKind::Pig,
            Self::RabbitSpawnEgg => EntityKind::Rabbit,
            Self::SheepSpawnEgg => EntityKind::Sheep,
            Self::SkeletonSpawnEgg => EntityKind::Skeleton,
            Self::SlimeSpawnEgg => EntityKind::Slime,
            Self::SpiderSpawnEgg => EntityKind::Spider,
            Self::TurtleSpawnEgg => EntityKind::Turtle,
            Self::VillagerSpawnEgg => EntityKind::Villager,
            Self::WolfSpawnEgg => EntityKind::Wolf,
            Self::ZombieSpawnEgg => EntityKind::Zombie,
            _ => return None,
        })
    }

    /// Every material, sorted by canonical name.
    #[must_use]
    pub fn alphabetical() -> Vec<Self> {
        let mut all: Vec<Self> = Self::iter().collect();
        all.sort_by_key(|m| <&'static str>::from(*m));
        all
    }

    /// Materials that can form block stacks, sorted by canonical name.
    #[must_use]
    pub fn stackable_blocks() -> Vec<Self> {
        Self::alphabetical().into_iter().filter(|m| m.is_stackable_block()).collect()
    }
}

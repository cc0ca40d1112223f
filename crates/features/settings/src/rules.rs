//! Per-species rules of the entity category.
//!
//! Every stackable species has exactly one row in [`RULES`]: the shape of its extra settings
//! and the spawn requirements its spawner starts with. A [`RuleShape`] only knows which keys
//! exist; loading it against a file section produces a [`SpeciesRule`] holding the configured
//! values, which then answers the species predicate.

use stk_domain::{EntityData, EntityKind, SpeciesState, StackComparison};
use stk_persist::ConfigSection;

/// A row of the species rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesRow {
    pub kind: EntityKind,
    pub shape: RuleShape,
    /// Spawner requirement tags written as the species' default.
    pub spawn_requirements: &'static [&'static str],
}

const fn row(
    kind: EntityKind,
    shape: RuleShape,
    spawn_requirements: &'static [&'static str],
) -> SpeciesRow {
    SpeciesRow { kind, shape, spawn_requirements }
}

const HOSTILE: &[&str] = &["darkness"];
const PASSIVE: &[&str] = &["block:grass_block", "lightness"];
const AQUATIC: &[&str] = &["fluid:water"];
const NETHER: &[&str] = &["block:netherrack,soul_sand,soul_soil,basalt"];
const GROUNDED: &[&str] = &["on-ground"];

/// Every stackable species, in canonical-name order.
pub static RULES: &[SpeciesRow] = &[
    row(EntityKind::Axolotl, RuleShape::Colored, &["fluid:water", "below-sea-level"]),
    row(EntityKind::Bat, RuleShape::Bat, &["below-sea-level", "darkness"]),
    row(EntityKind::Bee, RuleShape::Bee, &["air", "lightness"]),
    row(EntityKind::Blaze, RuleShape::Plain, NETHER),
    row(EntityKind::Cat, RuleShape::Variant, PASSIVE),
    row(EntityKind::CaveSpider, RuleShape::Plain, HOSTILE),
    row(EntityKind::Chicken, RuleShape::Chicken, PASSIVE),
    row(EntityKind::Cow, RuleShape::Plain, PASSIVE),
    row(EntityKind::Creeper, RuleShape::Creeper, HOSTILE),
    row(EntityKind::Donkey, RuleShape::Horse, PASSIVE),
    row(EntityKind::Drowned, RuleShape::Zombie, &["fluid:water", "darkness"]),
    row(EntityKind::Enderman, RuleShape::Plain, HOSTILE),
    row(EntityKind::Fox, RuleShape::Variant, &["block:grass_block,snow,snow_block,podzol"]),
    row(EntityKind::Frog, RuleShape::Variant, &["block:grass_block,mud,mangrove_roots"]),
    row(EntityKind::Ghast, RuleShape::Plain, &["air"]),
    row(EntityKind::Goat, RuleShape::Goat, &["block:stone,snow,snow_block,packed_ice"]),
    row(EntityKind::Horse, RuleShape::Horse, PASSIVE),
    row(EntityKind::IronGolem, RuleShape::Plain, GROUNDED),
    row(EntityKind::Llama, RuleShape::Colored, PASSIVE),
    row(EntityKind::MagmaCube, RuleShape::Slime, NETHER),
    row(EntityKind::Mooshroom, RuleShape::Plain, &["block:mycelium", "lightness"]),
    row(EntityKind::Panda, RuleShape::Plain, PASSIVE),
    row(
        EntityKind::Parrot,
        RuleShape::Variant,
        &["block:grass_block,oak_log,jungle_log", "lightness"],
    ),
    row(EntityKind::Pig, RuleShape::Saddleable, PASSIVE),
    row(EntityKind::Rabbit, RuleShape::Variant, &["block:grass_block,sand,snow", "lightness"]),
    row(EntityKind::Sheep, RuleShape::Sheep, PASSIVE),
    row(EntityKind::Skeleton, RuleShape::Plain, HOSTILE),
    row(EntityKind::Slime, RuleShape::Slime, &["below-y-axis:40", "darkness"]),
    row(EntityKind::Snowman, RuleShape::Snowman, GROUNDED),
    row(EntityKind::Spider, RuleShape::Plain, HOSTILE),
    row(EntityKind::Squid, RuleShape::Plain, AQUATIC),
    row(EntityKind::Strider, RuleShape::Saddleable, &["fluid:lava"]),
    row(EntityKind::Turtle, RuleShape::Turtle, &["block:sand", "above-sea-level"]),
    row(EntityKind::Villager, RuleShape::Villager, GROUNDED),
    row(EntityKind::Witch, RuleShape::Plain, HOSTILE),
    row(EntityKind::Wolf, RuleShape::Wolf, PASSIVE),
    row(EntityKind::Zombie, RuleShape::Zombie, HOSTILE),
    row(EntityKind::ZombifiedPiglin, RuleShape::Plain, NETHER),
];

/// The rule row of `kind`, if the species is stackable.
#[must_use]
pub fn rule_for(kind: EntityKind) -> Option<&'static SpeciesRow> {
    RULES.iter().find(|row| row.kind == kind)
}

const DIFFERENT_TYPE: &str = "dont-stack-if-different-type";
const DIFFERENT_COLOR: &str = "dont-stack-if-different-color";
const SADDLED: &str = "dont-stack-if-saddled";
const TAMED: &str = "dont-stack-if-tamed";
const ANGRY: &str = "dont-stack-if-angry";

/// Which species settings a rule has, without their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleShape {
    Plain,
    Bat,
    Bee,
    /// Cat, fox, parrot, rabbit, frog.
    Variant,
    /// Axolotl, llama.
    Colored,
    Chicken,
    Creeper,
    Goat,
    /// Horse, donkey.
    Horse,
    /// Pig, strider.
    Saddleable,
    Sheep,
    /// Slime, magma cube.
    Slime,
    Snowman,
    Turtle,
    Villager,
    Wolf,
    /// Zombie, drowned.
    Zombie,
}

impl RuleShape {
    /// Species keys and their defaults, in the order they are written.
    #[must_use]
    pub const fn defaults(self) -> &'static [(&'static str, bool)] {
        match self {
            Self::Plain => &[],
            Self::Bat => &[("dont-stack-if-sleeping", false)],
            Self::Bee => &[
                (ANGRY, false),
                ("dont-stack-if-has-nectar", false),
                ("dont-stack-if-has-stung", false),
            ],
            Self::Variant => &[(DIFFERENT_TYPE, false)],
            Self::Colored => &[(DIFFERENT_COLOR, false)],
            Self::Chicken => &[("multiply-egg-drops-by-stack-size", true)],
            Self::Creeper => &[("dont-stack-if-charged", false)],
            Self::Goat => &[("dont-stack-if-screaming", false)],
            Self::Horse => &[(TAMED, true), (SADDLED, true)],
            Self::Saddleable => &[(SADDLED, false)],
            Self::Sheep => &[
                ("dont-stack-if-sheared", false),
                (DIFFERENT_COLOR, false),
                ("shear-all-sheep-in-stack", true),
            ],
            Self::Slime => &[("dont-stack-if-different-size", true)],
            Self::Snowman => &[("dont-stack-if-no-pumpkin", false)],
            Self::Turtle => &[("dont-stack-if-has-egg", false)],
            Self::Villager => &[
                ("dont-stack-if-different-profession", false),
                ("dont-stack-if-different-level", false),
            ],
            Self::Wolf => &[(ANGRY, false), (TAMED, true)],
            Self::Zombie => &[("dont-stack-if-converting", false)],
        }
    }

    /// Backfills the species keys into `section` and reads their configured values.
    pub fn load(self, section: &mut ConfigSection<'_>) -> SpeciesRule {
        let mut values =
            self.defaults().iter().map(|&(key, default)| section.ensure_bool(key, default));
        let mut next = || values.next().unwrap_or_default();

        match self {
            Self::Plain => SpeciesRule::Plain,
            Self::Bat => SpeciesRule::Bat { dont_stack_if_sleeping: next() },
            Self::Bee => SpeciesRule::Bee {
                dont_stack_if_angry: next(),
                dont_stack_if_has_nectar: next(),
                dont_stack_if_has_stung: next(),
            },
            Self::Variant => SpeciesRule::Variant { dont_stack_if_different_type: next() },
            Self::Colored => SpeciesRule::Colored { dont_stack_if_different_color: next() },
            Self::Chicken => SpeciesRule::Chicken { multiply_egg_drops_by_stack_size: next() },
            Self::Creeper => SpeciesRule::Creeper { dont_stack_if_charged: next() },
            Self::Goat => SpeciesRule::Goat { dont_stack_if_screaming: next() },
            Self::Horse => {
                SpeciesRule::Horse { dont_stack_if_tamed: next(), dont_stack_if_saddled: next() }
            },
            Self::Saddleable => SpeciesRule::Saddleable { dont_stack_if_saddled: next() },
            Self::Sheep => SpeciesRule::Sheep {
                dont_stack_if_sheared: next(),
                dont_stack_if_different_color: next(),
                shear_all_sheep_in_stack: next(),
            },
            Self::Slime => SpeciesRule::Slime { dont_stack_if_different_size: next() },
            Self::Snowman => SpeciesRule::Snowman { dont_stack_if_no_pumpkin: next() },
            Self::Turtle => SpeciesRule::Turtle { dont_stack_if_has_egg: next() },
            Self::Villager => SpeciesRule::Villager {
                dont_stack_if_different_profession: next(),
                dont_stack_if_different_level: next(),
            },
            Self::Wolf => {
                SpeciesRule::Wolf { dont_stack_if_angry: next(), dont_stack_if_tamed: next() }
            },
            Self::Zombie => SpeciesRule::Zombie { dont_stack_if_converting: next() },
        }
    }
}

/// A species rule with its configured values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesRule {
    Plain,
    Bat { dont_stack_if_sleeping: bool },
    Bee {
        dont_stack_if_angry: bool,
        dont_stack_if_has_nectar: bool,
        dont_stack_if_has_stung: bool,
    },
    Variant { dont_stack_if_different_type: bool },
    Colored { dont_stack_if_different_color: bool },
    Chicken { multiply_egg_drops_by_stack_size: bool },
    Creeper { dont_stack_if_charged: bool },
    Goat { dont_stack_if_screaming: bool },
    Horse { dont_stack_if_tamed: bool, dont_stack_if_saddled: bool },
    Saddleable { dont_stack_if_saddled: bool },
    Sheep {
        dont_stack_if_sheared: bool,
        dont_stack_if_different_color: bool,
        shear_all_sheep_in_stack: bool,
    },
    Slime { dont_stack_if_different_size: bool },
    Snowman { dont_stack_if_no_pumpkin: bool },
    Turtle { dont_stack_if_has_egg: bool },
    Villager { dont_stack_if_different_profession: bool, dont_stack_if_different_level: bool },
    Wolf { dont_stack_if_angry: bool, dont_stack_if_tamed: bool },
    Zombie { dont_stack_if_converting: bool },
}

impl SpeciesRule {
    /// Configured species keys and values, in the order they are written.
    #[must_use]
    pub fn flags(&self) -> Vec<(&'static str, bool)> {
        self.entries().collect()
    }

    /// The configured value of the species key `key`.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.entries().find(|&(name, _)| name == key).map(|(_, value)| value)
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, bool)> {
        // Unused trailing slots are cut off by the shape's key list.
        let values: [bool; 3] = match *self {
            Self::Plain => [false; 3],
            Self::Bat { dont_stack_if_sleeping } => [dont_stack_if_sleeping, false, false],
            Self::Bee {
                dont_stack_if_angry,
                dont_stack_if_has_nectar,
                dont_stack_if_has_stung,
            } => [dont_stack_if_angry, dont_stack_if_has_nectar, dont_stack_if_has_stung],
            Self::Variant { dont_stack_if_different_type } => {
                [dont_stack_if_different_type, false, false]
            },
            Self::Colored { dont_stack_if_different_color } => {
                [dont_stack_if_different_color, false, false]
            },
            Self::Chicken { multiply_egg_drops_by_stack_size } => {
                [multiply_egg_drops_by_stack_size, false, false]
            },
            Self::Creeper { dont_stack_if_charged } => [dont_stack_if_charged, false, false],
            Self::Goat { dont_stack_if_screaming } => [dont_stack_if_screaming, false, false],
            Self::Horse { dont_stack_if_tamed, dont_stack_if_saddled } => {
                [dont_stack_if_tamed, dont_stack_if_saddled, false]
            },
            Self::Saddleable { dont_stack_if_saddled } => [dont_stack_if_saddled, false, false],
            Self::Sheep {
                dont_stack_if_sheared,
                dont_stack_if_different_color,
                shear_all_sheep_in_stack,
            } => {
                [dont_stack_if_sheared, dont_stack_if_different_color, shear_all_sheep_in_stack]
            },
            Self::Slime { dont_stack_if_different_size } => {
                [dont_stack_if_different_size, false, false]
            },
            Self::Snowman { dont_stack_if_no_pumpkin } => [dont_stack_if_no_pumpkin, false, false],
            Self::Turtle { dont_stack_if_has_egg } => [dont_stack_if_has_egg, false, false],
            Self::Villager {
                dont_stack_if_different_profession,
                dont_stack_if_different_level,
            } => [dont_stack_if_different_profession, dont_stack_if_different_level, false],
            Self::Wolf { dont_stack_if_angry, dont_stack_if_tamed } => {
                [dont_stack_if_angry, dont_stack_if_tamed, false]
            },
            Self::Zombie { dont_stack_if_converting } => [dont_stack_if_converting, false, false],
        };

        self.shape().defaults().iter().map(|&(key, _)| key).zip(values)
    }

    #[must_use]
    pub const fn shape(&self) -> RuleShape {
        match self {
            Self::Plain => RuleShape::Plain,
            Self::Bat { .. } => RuleShape::Bat,
            Self::Bee { .. } => RuleShape::Bee,
            Self::Variant { .. } => RuleShape::Variant,
            Self::Colored { .. } => RuleShape::Colored,
            Self::Chicken { .. } => RuleShape::Chicken,
            Self::Creeper { .. } => RuleShape::Creeper,
            Self::Goat { .. } => RuleShape::Goat,
            Self::Horse { .. } => RuleShape::Horse,
            Self::Saddleable { .. } => RuleShape::Saddleable,
            Self::Sheep { .. } => RuleShape::Sheep,
            Self::Slime { .. } => RuleShape::Slime,
            Self::Snowman { .. } => RuleShape::Snowman,
            Self::Turtle { .. } => RuleShape::Turtle,
            Self::Villager { .. } => RuleShape::Villager,
            Self::Wolf { .. } => RuleShape::Wolf,
            Self::Zombie { .. } => RuleShape::Zombie,
        }
    }

    /// The species predicate. `SpeciesState::Unspecified` never causes a rejection.
    #[must_use]
    pub fn compare(&self, a: &EntityData, b: &EntityData) -> StackComparison {
        let (a, b) = (&a.species, &b.species);

        match *self {
            Self::Plain | Self::Chicken { .. } => StackComparison::CanStack,
            Self::Bat { dont_stack_if_sleeping } => first_violation(&[(
                dont_stack_if_sleeping,
                either(a, b, |s| matches!(s, SpeciesState::Bat { awake: false })),
                StackComparison::Sleeping,
            )]),
            Self::Bee {
                dont_stack_if_angry,
                dont_stack_if_has_nectar,
                dont_stack_if_has_stung,
            } => first_violation(&[
                (
                    dont_stack_if_angry,
                    either(a, b, |s| matches!(s, SpeciesState::Bee { angry: true, .. })),
                    StackComparison::Angry,
                ),
                (
                    dont_stack_if_has_nectar,
                    either(a, b, |s| matches!(s, SpeciesState::Bee { has_nectar: true, .. })),
                    StackComparison::HasNectar,
                ),
                (
                    dont_stack_if_has_stung,
                    either(a, b, |s| matches!(s, SpeciesState::Bee { has_stung: true, .. })),
                    StackComparison::HasStung,
                ),
            ]),
            Self::Variant { dont_stack_if_different_type } => first_violation(&[(
                dont_stack_if_different_type,
                differ(a, b, |s| match s {
                    SpeciesState::Variant { variant } => Some(variant),
                    _ => None,
                }),
                StackComparison::DifferentTypes,
            )]),
            Self::Colored { dont_stack_if_different_color } => first_violation(&[(
                dont_stack_if_different_color,
                differ(a, b, |s| match s {
                    SpeciesState::Colored { color } => Some(color),
                    _ => None,
                }),
                StackComparison::DifferentColors,
            )]),
            Self::Creeper { dont_stack_if_charged } => first_violation(&[(
                dont_stack_if_charged,
                either(a, b, |s| matches!(s, SpeciesState::Creeper { charged: true })),
                StackComparison::Charged,
            )]),
            Self::Goat { dont_stack_if_screaming } => first_violation(&[(
                dont_stack_if_screaming,
                either(a, b, |s| matches!(s, SpeciesState::Goat { screaming: true })),
                StackComparison::Screaming,
            )]),
            Self::Horse { dont_stack_if_tamed, dont_stack_if_saddled } => first_violation(&[
                (
                    dont_stack_if_tamed,
                    either(a, b, |s| matches!(s, SpeciesState::Horse { tamed: true, .. })),
                    StackComparison::Tamed,
                ),
                (
                    dont_stack_if_saddled,
                    either(a, b, |s| matches!(s, SpeciesState::Horse { saddled: true, .. })),
                    StackComparison::Saddled,
                ),
            ]),
            Self::Saddleable { dont_stack_if_saddled } => first_violation(&[(
                dont_stack_if_saddled,
                either(a, b, |s| matches!(s, SpeciesState::Saddleable { saddled: true })),
                StackComparison::Saddled,
            )]),
            Self::Sheep { dont_stack_if_sheared, dont_stack_if_different_color, .. } => {
                first_violation(&[
                    (
                        dont_stack_if_sheared,
                        either(a, b, |s| matches!(s, SpeciesState::Sheep { sheared: true, .. })),
                        StackComparison::Sheared,
                    ),
                    (
                        dont_stack_if_different_color,
                        differ(a, b, |s| match s {
                            SpeciesState::Sheep { color, .. } => Some(color),
                            _ => None,
                        }),
                        StackComparison::DifferentColors,
                    ),
                ])
            },
            Self::Slime { dont_stack_if_different_size } => first_violation(&[(
                dont_stack_if_different_size,
                differ(a, b, |s| match s {
                    SpeciesState::Slime { size } => Some(size),
                    _ => None,
                }),
                StackComparison::DifferentSizes,
            )]),
            Self::Snowman { dont_stack_if_no_pumpkin } => first_violation(&[(
                dont_stack_if_no_pumpkin,
                either(a, b, |s| matches!(s, SpeciesState::Snowman { has_pumpkin: false })),
                StackComparison::NoPumpkin,
            )]),
            Self::Turtle { dont_stack_if_has_egg } => first_violation(&[(
                dont_stack_if_has_egg,
                either(a, b, |s| matches!(s, SpeciesState::Turtle { has_egg: true })),
                StackComparison::HasEgg,
            )]),
            Self::Villager {
                dont_stack_if_different_profession,
                dont_stack_if_different_level,
            } => first_violation(&[
                (
                    dont_stack_if_different_profession,
                    differ(a, b, |s| match s {
                        SpeciesState::Villager { profession, .. } => Some(profession),
                        _ => None,
                    }),
                    StackComparison::DifferentProfessions,
                ),
                (
                    dont_stack_if_different_level,
                    differ(a, b, |s| match s {
                        SpeciesState::Villager { level, .. } => Some(level),
                        _ => None,
                    }),
                    StackComparison::DifferentLevels,
                ),
            ]),
            Self::Wolf { dont_stack_if_angry, dont_stack_if_tamed } => first_violation(&[
                (
                    dont_stack_if_angry,
                    either(a, b, |s| matches!(s, SpeciesState::Wolf { angry: true, .. })),
                    StackComparison::Angry,
                ),
                (
                    dont_stack_if_tamed,
                    either(a, b, |s| matches!(s, SpeciesState::Wolf { tamed: true, .. })),
                    StackComparison::Tamed,
                ),
            ]),
            Self::Zombie { dont_stack_if_converting } => first_violation(&[(
                dont_stack_if_converting,
                either(a, b, |s| matches!(s, SpeciesState::Zombie { converting: true })),
                StackComparison::Converting,
            )]),
        }
    }
}

/// The reason of the first enabled check that is violated.
fn first_violation(checks: &[(bool, bool, StackComparison)]) -> StackComparison {
    checks
        .iter()
        .find(|&&(enabled, violated, _)| enabled && violated)
        .map_or(StackComparison::CanStack, |&(_, _, reason)| reason)
}

/// Whether either side is in the state `test` looks for.
fn either(a: &SpeciesState, b: &SpeciesState, test: impl Fn(&SpeciesState) -> bool) -> bool {
    test(a) || test(b)
}

/// Whether both sides carry the property and it differs.
fn differ<'s, T: PartialEq + ?Sized + 's>(
    a: &'s SpeciesState,
    b: &'s SpeciesState,
    property: impl Fn(&'s SpeciesState) -> Option<&'s T>,
) -> bool {
    matches!((property(a), property(b)), (Some(x), Some(y)) if x != y)
}

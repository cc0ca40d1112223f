use strum_macros::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Outcome of asking whether two candidates of the same type may merge.
///
/// The snake_case name doubles as the feedback key shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StackComparison {
    CanStack,

    // Policy shared by every type of the category.
    UnsupportedType,
    StackingDisabled,
    StackSizeTooLarge,
    NotSpawnedFromSpawner,
    CustomNamed,
    NotOnGround,
    InWater,
    Leashed,
    Invulnerable,
    HasEquipment,
    DifferentAges,

    // Species predicates.
    Sleeping,
    NoPumpkin,
    Sheared,
    Saddled,
    Charged,
    Tamed,
    Angry,
    HasNectar,
    HasStung,
    HasEgg,
    DifferentColors,
    DifferentSizes,
    DifferentProfessions,
    DifferentLevels,
    DifferentTypes,
    Converting,
    Screaming,
}

impl StackComparison {
    #[must_use]
    pub const fn is_stackable(self) -> bool {
        matches!(self, Self::CanStack)
    }

    /// Whether the rejection comes from category-wide policy rather than a species predicate.
    #[must_use]
    pub const fn is_generic(self) -> bool {
        matches!(
            self,
            Self::UnsupportedType
                | Self::StackingDisabled
                | Self::StackSizeTooLarge
                | Self::NotSpawnedFromSpawner
                | Self::CustomNamed
                | Self::NotOnGround
                | Self::InWater
                | Self::Leashed
                | Self::Invulnerable
                | Self::HasEquipment
                | Self::DifferentAges
        )
    }
}

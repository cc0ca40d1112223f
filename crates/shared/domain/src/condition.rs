use std::fmt;
use std::str::FromStr;
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{
    AsRefStr, Display, EnumIter, EnumMessage as DeriveEnumMessage, EnumString, IntoStaticStr,
};

/// Spawn-requirement tags a spawner section may list under `spawn-requirements`.
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
    DeriveEnumMessage,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ConditionTag {
    #[strum(message = "Spawn area must be above sea level")]
    AboveSeaLevel,
    #[strum(message = "Spawn area must be above the given y-axis")]
    AboveYAxis,
    #[strum(message = "Spawn area must be air or non-solid blocks")]
    Air,
    #[strum(message = "Spawn area must be below sea level")]
    BelowSeaLevel,
    #[strum(message = "Spawn area must be below the given y-axis")]
    BelowYAxis,
    #[strum(message = "Spawn area must be in one of the given biomes")]
    Biome,
    #[strum(message = "Spawn area must be on top of one of the given blocks")]
    Block,
    #[strum(message = "Spawn area must not be on top of any of the given blocks")]
    BlockException,
    #[strum(message = "Spawn area must have a light level of 7 or less")]
    Darkness,
    #[strum(message = "Spawn area must be inside the given fluid")]
    Fluid,
    #[strum(message = "Spawn area must have a light level above 7")]
    Lightness,
    #[strum(message = "Spawner must have fewer than the given number of entities nearby")]
    MaxNearbyEntities,
    #[strum(message = "Spawn area must not be exposed to the sky")]
    NoSkylightAccess,
    #[strum(message = "Spawn area must be on solid ground")]
    OnGround,
    #[strum(message = "Spawn area must be exposed to the sky")]
    SkylightAccess,
    #[strum(message = "Spawn area must have a light level of 0")]
    TotalDarkness,
    #[strum(message = "No requirements, entities spawn anywhere")]
    None,
}

impl ConditionTag {
    #[must_use]
    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    /// `(tag, description)` pairs in declaration order.
    pub fn descriptions() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::iter().map(|tag| (tag.into(), tag.description()))
    }
}

/// A parsed `spawn-requirements` entry, e.g. `biome:plains,desert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequirement {
    pub tag: ConditionTag,
    pub values: Vec<String>,
}

/// Rejected `spawn-requirements` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConditionTag(pub String);

impl fmt::Display for UnknownConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown spawn requirement tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownConditionTag {}

impl SpawnRequirement {
    /// Parses `tag` or `tag:value[,value...]`. Tag names are matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`UnknownConditionTag`] when the tag is not recognized.
    pub fn parse(raw: &str) -> Result<Self, UnknownConditionTag> {
        let (name, values) = match raw.split_once(':') {
            Some((name, values)) => (name, Some(values)),
            None => (raw, None),
        };

        let name = name.trim().to_ascii_lowercase();
        let tag = ConditionTag::from_str(&name).map_err(|_| UnknownConditionTag(raw.to_owned()))?;
        let values = values
            .map(|values| {
                values
                    .split(',')
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { tag, values })
    }
}

impl FromStr for SpawnRequirement {
    type Err = UnknownConditionTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SpawnRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{}:{}", self.tag, self.values.join(","))
        }
    }
}

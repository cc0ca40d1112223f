//! # Domain Models
//!
//! This crate contains the pure data of the stacking engine: the type keys of every category
//! ([`Material`], [`EntityKind`]), the candidates handed to the compatibility evaluator, the
//! closed [`StackComparison`] outcome and the shape of the global configuration.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod candidate;
pub mod category;
pub mod comparison;
pub mod condition;
pub mod config;
pub mod entity;
pub mod material;
pub mod version;

pub use candidate::{StackCandidate, StackedBlock, StackedEntity, StackedItem, StackedSpawner};
pub use category::StackCategory;
pub use comparison::StackComparison;
pub use condition::{ConditionTag, SpawnRequirement};
pub use entity::{DyeColor, EntityData, EntityKind, SpeciesState};
pub use material::{Material, MaterialFlags};
pub use version::GameVersion;

/// Turns a canonical `snake_case` name into a human readable title (`magma_cube` -> `Magma Cube`).
#[must_use]
pub fn display_name(canonical: &str) -> String {
    canonical
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::display_name;

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("magma_cube"), "Magma Cube");
        assert_eq!(display_name("bat"), "Bat");
        assert_eq!(display_name("diamond__block"), "Diamond Block");
        assert_eq!(display_name(""), "");
    }
}

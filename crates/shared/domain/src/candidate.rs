use crate::entity::{EntityData, EntityKind};
use crate::material::Material;
use std::fmt::Debug;
use std::hash::Hash;

/// Something that may be merged with another object of the same category.
pub trait StackCandidate {
    /// Discriminator the category's settings are keyed by.
    type Key: Copy + Eq + Hash + Ord + Debug;

    fn type_key(&self) -> Self::Key;

    /// Number of objects the candidate already represents.
    fn stack_size(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedBlock {
    pub material: Material,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedItem {
    pub material: Material,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedSpawner {
    pub kind: EntityKind,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedEntity {
    pub kind: EntityKind,
    pub size: u32,
    pub data: EntityData,
}

impl StackedBlock {
    #[must_use]
    pub const fn new(material: Material, size: u32) -> Self {
        Self { material, size }
    }
}

impl StackedItem {
    #[must_use]
    pub const fn new(material: Material, size: u32) -> Self {
        Self { material, size }
    }
}

impl StackedSpawner {
    #[must_use]
    pub const fn new(kind: EntityKind, size: u32) -> Self {
        Self { kind, size }
    }
}

impl StackedEntity {
    /// A single entity with default observed state.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self { kind, size: 1, data: EntityData::default() }
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: EntityData) -> Self {
        self.data = data;
        self
    }
}

impl StackCandidate for StackedBlock {
    type Key = Material;

    fn type_key(&self) -> Material {
        self.material
    }

    fn stack_size(&self) -> u32 {
        self.size
    }
}

impl StackCandidate for StackedItem {
    type Key = Material;

    fn type_key(&self) -> Material {
        self.material
    }

    fn stack_size(&self) -> u32 {
        self.size
    }
}

impl StackCandidate for StackedSpawner {
    type Key = EntityKind;

    fn type_key(&self) -> EntityKind {
        self.kind
    }

    fn stack_size(&self) -> u32 {
        self.size
    }
}

impl StackCandidate for StackedEntity {
    type Key = EntityKind;

    fn type_key(&self) -> EntityKind {
        self.kind
    }

    fn stack_size(&self) -> u32 {
        self.size
    }
}

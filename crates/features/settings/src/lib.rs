//! # Stack settings
//!
//! Per-type stacking policy for the four stackable categories and the evaluator that decides
//! whether two candidates may merge.
//!
//! Each category keeps one settings file with one section per type. A
//! [`SettingsRegistry`] loads that file, backfills every missing key with its default, writes
//! the file back at most once, and publishes immutable [`TypeSettings`] snapshots. Readers
//! query them without ever touching the file.
//!
//! ```no_run
//! use stk_domain::config::StackerConfig;
//! use stk_domain::{Material, StackComparison, StackedBlock};
//! use stk_settings::StackSettingManager;
//!
//! # fn main() -> Result<(), stk_settings::SettingsError> {
//! let manager = StackSettingManager::new(StackerConfig::default());
//! manager.reload_all();
//!
//! let a = StackedBlock::new(Material::DiamondBlock, 10);
//! let b = StackedBlock::new(Material::DiamondBlock, 5);
//! assert_eq!(manager.blocks().can_stack_with(&a, &b)?, StackComparison::CanStack);
//! # Ok(())
//! # }
//! ```

mod block;
mod compare;
mod entity;
mod error;
mod item;
mod manager;
mod registry;
pub mod rules;
mod spawner;
mod types;

pub use block::BlockSettings;
pub use compare::can_stack_with;
pub use entity::EntitySettings;
pub use error::{SettingsError, SettingsErrorExt};
pub use item::ItemSettings;
pub use manager::StackSettingManager;
pub use registry::{ReloadReport, SettingsRegistry};
pub use rules::{RuleShape, SpeciesRule, SpeciesRow};
pub use spawner::{SpawnerSettings, header_lines};
pub use types::{CommonSettings, TypeSettings};

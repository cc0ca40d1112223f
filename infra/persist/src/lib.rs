//! Persistence of the per-category stack settings files.
//!
//! Each category keeps its settings in one TOML file with a `[section]` per type. Files are
//! edited in place through [`toml_edit`], so whatever the user wrote (comments, key order,
//! formatting, keys the engine does not know) survives a rewrite.
//!
//! # Core Features
//!
//! - **Default backfilling**: [`ConfigSection::set_if_absent`] and the `ensure_*` helpers add
//!   missing keys without touching existing values.
//! - **Self-repair**: a value of the wrong type is replaced by its default and the section is
//!   marked changed.
//! - **Atomic Writes**: unique temp write + `fsync` + `rename`, so a crash never leaves a
//!   half-written file.
//! - **Self-Healing**: [`purge_stale_temp_files`] removes temp files orphaned by interrupted
//!   saves.
//!
//! # Examples
//!
//! ```rust
//! use stk_persist::{ConfigFile, PersistError};
//!
//! # fn main() -> Result<(), PersistError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let mut file = ConfigFile::load(tmp.path().join("block_settings.toml"))?;
//!
//! let mut section = file.section("diamond_block");
//! let enabled = section.ensure_bool("stacking-enabled", true);
//! let changed = section.has_changes();
//!
//! assert!(enabled);
//! if changed {
//!     file.save()?;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod maintenance;
mod section;
mod value;

pub use error::{PersistError, PersistErrorExt};
pub use file::ConfigFile;
pub use maintenance::{PurgeSummary, purge_stale_temp_files};
pub use section::ConfigSection;
pub use value::ConfigValue;

//! The capability set every category's settings share.

use crate::error::SettingsError;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use stk_domain::config::StackerConfig;
use stk_domain::{StackCandidate, StackCategory, StackComparison};
use stk_persist::{ConfigFile, ConfigSection};

pub(crate) const KEY_STACKING_ENABLED: &str = "stacking-enabled";
pub(crate) const KEY_DISPLAY_NAME: &str = "display-name";
pub(crate) const KEY_MAX_STACK_SIZE: &str = "max-stack-size";

pub(crate) const INHERIT_COMMENT: &str = "Set to -1 to use the global value";

/// Immutable snapshot of the configured stacking policy for one type of a category.
///
/// Implementations are built once per reload from their file section and never change
/// afterwards, so they can be shared freely between threads.
pub trait TypeSettings: Debug + Send + Sync + Sized + 'static {
    type Key: Copy + Eq + Hash + Ord + Debug + Display + AsRef<str> + Send + Sync + 'static;
    type Candidate: StackCandidate<Key = Self::Key>;

    const CATEGORY: StackCategory;

    /// Type keys settings are built for on reload, in build order.
    fn domain(config: &StackerConfig) -> Vec<Self::Key>;

    /// Runs before any section is built when the file did not exist yet.
    ///
    /// Returns whether it added anything that needs to be saved.
    fn prepare(_file: &mut ConfigFile) -> bool {
        false
    }

    /// Builds the settings of `key`, backfilling missing defaults into its section.
    ///
    /// # Errors
    /// Returns [`SettingsError::Unsupported`] when the type cannot be supported; its section
    /// is left untouched in that case.
    fn build(
        key: Self::Key,
        file: &mut ConfigFile,
        config: &StackerConfig,
    ) -> Result<Self, SettingsError>;

    fn key(&self) -> Self::Key;

    fn stacking_enabled(&self) -> bool;

    /// Largest stack a merge may produce, already resolved against the global value.
    fn max_stack_size(&self) -> u32;

    /// Whether building these settings wrote anything into the section.
    fn has_changes(&self) -> bool;

    fn display_name(&self) -> &str;

    /// Category-wide checks that run after the size check.
    fn compare_generic(&self, _a: &Self::Candidate, _b: &Self::Candidate) -> StackComparison {
        StackComparison::CanStack
    }

    /// Type-specific predicate; only reached when every generic check passed.
    fn compare_specific(&self, _a: &Self::Candidate, _b: &Self::Candidate) -> StackComparison {
        StackComparison::CanStack
    }
}

/// Keys shared by the block, item and spawner categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonSettings {
    pub stacking_enabled: bool,
    pub display_name: String,
    pub max_stack_size: u32,
}

impl CommonSettings {
    pub(crate) fn load(
        section: &mut ConfigSection<'_>,
        default_display_name: &str,
        global_max_stack_size: u32,
    ) -> Self {
        let stacking_enabled = section.ensure_bool(KEY_STACKING_ENABLED, true);
        let display_name = section.ensure_string(KEY_DISPLAY_NAME, default_display_name);
        let max_stack_size =
            inherit(ensure_inherited(section, KEY_MAX_STACK_SIZE), global_max_stack_size);

        Self { stacking_enabled, display_name, max_stack_size }
    }
}

/// Backfills `-1` (with its explanatory comment) and reads the configured integer.
pub(crate) fn ensure_inherited(section: &mut ConfigSection<'_>, key: &str) -> i64 {
    section.set_if_absent_with_comment(key, -1, INHERIT_COMMENT);
    section.get_int(key, -1)
}

/// Resolves a configured integer where any negative value means "use `global`".
pub(crate) fn inherit(configured: i64, global: u32) -> u32 {
    override_of(configured).unwrap_or(global)
}

/// A configured integer, or `None` when it is negative (inherit).
pub(crate) fn override_of(configured: i64) -> Option<u32> {
    if configured < 0 { None } else { Some(u32::try_from(configured).unwrap_or(u32::MAX)) }
}

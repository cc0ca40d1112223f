//! Facade crate for the stack settings engine.
//! Re-exports domain/kernel primitives and wires the settings registries together.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load a [`domain::config::StackerConfig`] (see [`kernel::config`]).
//! - Call [`init`] once at startup and keep the returned manager for the process lifetime.

pub use stk_domain as domain;
pub use stk_kernel as kernel;
pub use stk_settings as settings;

use stk_domain::config::StackerConfig;
use stk_settings::StackSettingManager;
use tracing::info;

/// Prepares the data directory and loads the settings of every category.
///
/// Temp files orphaned by interrupted saves are removed first. Loading never fails: problems
/// with individual files are logged and the affected category falls back to its defaults.
#[must_use]
pub fn init(config: StackerConfig) -> StackSettingManager {
    let data_dir = config.server.data_dir.clone();
    stk_persist::purge_stale_temp_files(&data_dir);

    let manager = StackSettingManager::new(config);
    let reports = manager.reload_all();

    info!(
        data_dir = %data_dir.display(),
        categories = reports.len(),
        game_version = %manager.config().server.game_version,
        "Stack settings initialized"
    );
    manager
}

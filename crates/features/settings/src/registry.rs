use crate::compare;
use crate::error::SettingsError;
use crate::types::TypeSettings;
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stk_domain::config::StackerConfig;
use stk_domain::{StackCandidate, StackCategory, StackComparison};
use stk_persist::ConfigFile;
use tracing::{debug, error, info, warn};

type Entries<S> = FxHashMap<<S as TypeSettings>::Key, Arc<S>>;

/// Outcome of one [`SettingsRegistry::reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    pub category: StackCategory,
    /// Number of types the registry now holds settings for.
    pub entries: usize,
    /// Number of those with stacking enabled.
    pub stackable: usize,
    /// Whether the settings file was rewritten.
    pub file_written: bool,
    /// Canonical names of types that could not be supported, in build order.
    pub omitted: Vec<String>,
}

/// The live settings of one category, keyed by type.
///
/// Readers take a cheap snapshot of the current map; [`SettingsRegistry::reload`] builds a
/// complete replacement and swaps it in at the end, so a reader never observes a partially
/// rebuilt registry.
#[derive(Debug)]
pub struct SettingsRegistry<S: TypeSettings> {
    path: PathBuf,
    config: StackerConfig,
    entries: RwLock<Arc<Entries<S>>>,
    reload_lock: Mutex<()>,
}

impl<S: TypeSettings> SettingsRegistry<S> {
    /// Creates an empty registry backed by the category file inside `config.server.data_dir`.
    #[must_use]
    pub fn new(config: StackerConfig) -> Self {
        let path = config.server.data_dir.join(S::CATEGORY.file_name());
        Self::with_path(path, config)
    }

    /// Creates an empty registry backed by `path`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>, config: StackerConfig) -> Self {
        Self {
            path: path.into(),
            config,
            entries: RwLock::new(Arc::new(FxHashMap::default())),
            reload_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuilds every entry from the settings file, backfilling missing keys.
    ///
    /// The file is written at most once, and only when something was added or repaired.
    /// Neither an unreadable file nor a failed save aborts the reload: the registry is then
    /// built from defaults and the problem is logged.
    pub fn reload(&self) -> ReloadReport {
        let _serialized = self.reload_lock.lock();
        let category = S::CATEGORY;

        let mut file = ConfigFile::load_or_empty(&self.path);
        let prepared = !file.existed() && S::prepare(&mut file);

        let mut entries: Entries<S> = FxHashMap::default();
        let mut omitted = Vec::new();
        let changed = S::domain(&self.config).into_iter().fold(prepared, |changed, key| {
            match S::build(key, &mut file, &self.config) {
                Ok(settings) => {
                    let changed = changed | settings.has_changes();
                    entries.insert(key, Arc::new(settings));
                    changed
                },
                Err(err) => {
                    debug!(%category, %key, error = %err, "Type omitted from settings");
                    omitted.push(key.to_string());
                    changed
                },
            }
        });

        let file_written = changed && self.save(&file);

        let stackable = entries.values().filter(|settings| settings.stacking_enabled()).count();
        let report = ReloadReport {
            category,
            entries: entries.len(),
            stackable,
            file_written,
            omitted,
        };
        *self.entries.write() = Arc::new(entries);

        if !report.omitted.is_empty() {
            warn!(
                %category,
                count = report.omitted.len(),
                omitted = %report.omitted.join(", "),
                "Some types are not supported by this game version and were skipped"
            );
        }
        info!(
            %category,
            entries = report.entries,
            stackable = report.stackable,
            file_written = report.file_written,
            "Reloaded stack settings"
        );
        report
    }

    fn save(&self, file: &ConfigFile) -> bool {
        if file.is_read_only() {
            warn!(
                path = %self.path.display(),
                "Settings file failed to load, leaving it untouched"
            );
            return false;
        }

        match file.save() {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "Failed to save settings file");
                false
            },
        }
    }

    /// Settings of `key`, or `None` when the type is not supported.
    #[must_use]
    pub fn get(&self, key: S::Key) -> Option<Arc<S>> {
        self.entries.read().get(&key).cloned()
    }

    /// The current map of entries. Later reloads do not affect the returned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Entries<S>> {
        self.entries.read().clone()
    }

    /// Every type whose stacking is enabled, in key order.
    #[must_use]
    pub fn stackable_types(&self) -> BTreeSet<S::Key> {
        self.entries
            .read()
            .values()
            .filter(|settings| settings.stacking_enabled())
            .map(|settings| settings.key())
            .collect()
    }

    /// First entry matching `predicate`, in key order.
    pub fn find(&self, mut predicate: impl FnMut(&S) -> bool) -> Option<Arc<S>> {
        let snapshot = self.snapshot();
        let mut keys: Vec<_> = snapshot.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter().filter_map(|key| snapshot.get(&key)).find(|s| predicate(s)).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry. Until the next reload, every type is unsupported.
    pub fn clear(&self) {
        *self.entries.write() = Arc::new(FxHashMap::default());
    }

    /// Decides whether `a` and `b` may merge under the current settings of their type.
    ///
    /// A type without settings yields [`StackComparison::UnsupportedType`].
    ///
    /// # Errors
    /// Returns [`SettingsError::TypeMismatch`] when `a` and `b` are of different types.
    pub fn can_stack_with(
        &self,
        a: &S::Candidate,
        b: &S::Candidate,
    ) -> Result<StackComparison, SettingsError> {
        let (key_a, key_b) = (a.type_key(), b.type_key());
        if key_a != key_b {
            return Err(SettingsError::TypeMismatch {
                message: format!("{key_a} cannot be compared with {key_b}").into(),
                context: Some(S::CATEGORY.as_ref().to_owned().into()),
            });
        }

        match self.get(key_a) {
            Some(settings) => compare::can_stack_with(settings.as_ref(), a, b),
            None => Ok(StackComparison::UnsupportedType),
        }
    }
}

use crate::value::ConfigValue;
use toml_edit::{Item, Table};
use tracing::warn;

/// A mutable view of one `[section]` of a [`ConfigFile`](crate::ConfigFile).
///
/// Reads fall back to the supplied default. Writes only ever add keys or repair mistyped
/// ones; a correctly typed user value is never touched. Every write is recorded and reported
/// by [`ConfigSection::has_changes`].
#[derive(Debug)]
pub struct ConfigSection<'a> {
    name: String,
    table: &'a mut Table,
    changed: bool,
}

impl<'a> ConfigSection<'a> {
    pub(crate) fn new(name: impl Into<String>, table: &'a mut Table, created: bool) -> Self {
        Self { name: name.into(), table, changed: created }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this view created the section or wrote any key.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.changed
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Keys present in the section, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(key, _)| key)
    }

    /// Writes `value` under `key` unless the key already exists. Returns whether it was written.
    pub fn set_if_absent(&mut self, key: &str, value: impl Into<ConfigValue>) -> bool {
        if self.table.contains_key(key) {
            return false;
        }

        self.table.insert(key, value.into().into_item());
        self.changed = true;
        true
    }

    /// Like [`ConfigSection::set_if_absent`], with `comment` written on the line above the key.
    pub fn set_if_absent_with_comment(
        &mut self,
        key: &str,
        value: impl Into<ConfigValue>,
        comment: &str,
    ) -> bool {
        if !self.set_if_absent(key, value) {
            return false;
        }

        if let Some(mut written) = self.table.key_mut(key) {
            let prefix: String = comment.lines().map(|line| format!("# {line}\n")).collect();
            written.leaf_decor_mut().set_prefix(prefix);
        }
        true
    }

    pub fn get_bool(&mut self, key: &str, default: bool) -> bool {
        match self.read(key, ConfigValue::Bool(default)) {
            ConfigValue::Bool(value) => value,
            _ => default,
        }
    }

    pub fn get_int(&mut self, key: &str, default: i64) -> i64 {
        match self.read(key, ConfigValue::Int(default)) {
            ConfigValue::Int(value) => value,
            _ => default,
        }
    }

    pub fn get_string(&mut self, key: &str, default: &str) -> String {
        match self.read(key, ConfigValue::from(default)) {
            ConfigValue::Str(value) => value,
            _ => default.to_owned(),
        }
    }

    pub fn get_string_list(&mut self, key: &str, default: &[&str]) -> Vec<String> {
        match self.read(key, ConfigValue::from(default)) {
            ConfigValue::List(values) => values,
            _ => default.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Backfills `default` when `key` is absent, then reads the effective value.
    pub fn ensure_bool(&mut self, key: &str, default: bool) -> bool {
        self.set_if_absent(key, default);
        self.get_bool(key, default)
    }

    pub fn ensure_int(&mut self, key: &str, default: i64) -> i64 {
        self.set_if_absent(key, default);
        self.get_int(key, default)
    }

    pub fn ensure_string(&mut self, key: &str, default: &str) -> String {
        self.set_if_absent(key, default);
        self.get_string(key, default)
    }

    pub fn ensure_string_list(&mut self, key: &str, default: &[&str]) -> Vec<String> {
        self.set_if_absent(key, default);
        self.get_string_list(key, default)
    }

    /// Returns the stored value when it has the type of `default`.
    ///
    /// A value of another type is replaced by `default` in place, keeping the key's position
    /// and comment.
    fn read(&mut self, key: &str, default: ConfigValue) -> ConfigValue {
        let Some(item) = self.table.get_mut(key) else {
            return default;
        };

        if let Some(stored) = default.read_same_kind(item) {
            return stored;
        }

        warn!(
            section = %self.name,
            key,
            expected = default.kind(),
            "Replacing mistyped setting with its default"
        );
        *item = default.clone().into_item();
        self.changed = true;
        default
    }
}

/// Makes sure `item` holds a standard table, converting inline tables.
///
/// Returns whether the item had to be replaced.
pub(crate) fn coerce_table(name: &str, item: &mut Item) -> bool {
    if item.is_table() {
        return false;
    }

    match std::mem::take(item).into_table() {
        Ok(table) => {
            *item = Item::Table(table);
            true
        },
        Err(Item::None) => {
            *item = Item::Table(Table::new());
            true
        },
        Err(_) => {
            warn!(section = name, "Settings section is not a table, replacing it");
            *item = Item::Table(Table::new());
            true
        },
    }
}

use toml_edit::{Array, Item, Value, value};

/// A typed setting value as it is written into a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl ConfigValue {
    /// Name of the value's type, as used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::List(_) => "string list",
        }
    }

    pub(crate) fn into_item(self) -> Item {
        match self {
            Self::Bool(v) => value(v),
            Self::Int(v) => value(v),
            Self::Str(v) => value(v),
            Self::List(v) => value(v.into_iter().collect::<Array>()),
        }
    }

    /// Reads `item` back as a value of the same type as `self`, if it has that type.
    pub(crate) fn read_same_kind(&self, item: &Item) -> Option<Self> {
        match self {
            Self::Bool(_) => item.as_bool().map(Self::Bool),
            Self::Int(_) => item.as_integer().map(Self::Int),
            Self::Str(_) => item.as_str().map(|s| Self::Str(s.to_owned())),
            Self::List(_) => item.as_array().and_then(|array| {
                array
                    .iter()
                    .map(|entry| Value::as_str(entry).map(str::to_owned))
                    .collect::<Option<Vec<_>>>()
                    .map(Self::List)
            }),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[&str]> for ConfigValue {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

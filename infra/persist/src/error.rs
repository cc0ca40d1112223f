use std::borrow::Cow;

/// A specialized [`PersistError`] enum of this crate.
#[stk_derive::stk_error]
pub enum PersistError {
    #[error("Settings file I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed settings file{}: {source}", format_context(.context))]
    Parse { source: toml_edit::TomlError, context: Option<Cow<'static, str>> },

    #[error("Internal persistence error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

use std::borrow::Cow;

/// Error types specific to the stack settings feature.
#[stk_derive::stk_error]
pub enum SettingsError {
    /// Candidates handed to the evaluator do not share the settings' type key.
    #[error("Candidate type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The type cannot be supported by the running game version.
    #[error("Unsupported type{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Settings persistence error{}: {source}", format_context(.context))]
    Persist { source: stk_persist::PersistError, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the infrastructure crates.
//! Every crate in the workspace declares its error enum through [`macro@stk_error`], so the
//! error surface (context, conversions) looks the same everywhere.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! stk-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a workspace error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]`, unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a source.
/// * `From<SourceError>` for every source-carrying variant.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 4. A variant with a source (`source` field, `#[source]` or `#[from]`) must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[stk_derive::stk_error]
/// pub enum PersistError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal persistence error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, PersistError> {
///     std::fs::read_to_string(path).context("Reading settings file")
/// }
/// ```
#[proc_macro_attribute]
pub fn stk_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

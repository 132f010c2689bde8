#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Lyceum crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! lyceum-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Consumers must also depend on `thiserror`, the generated code derives
//! `::thiserror::Error`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a crate error type wired for the rest of the workspace.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>`
///   and for `Result<T, Source>` of every variant carrying a source.
/// * `From<Source>` for every variant carrying a source.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A `context` field must be `Option<Cow<'static, str>>`.
/// 4. A variant with a source (`source` name, `#[source]` or `#[from]`) must
///    also carry a `context` field and nothing else.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[lyceum_derive::lyceum_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<String, StoreError> {
///     std::fs::read_to_string("roster.toml").context("Reading roster")
/// }
/// ```
#[proc_macro_attribute]
pub fn lyceum_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).unwrap_or_else(syn::Error::into_compile_error).into()
}

use thiserror::Error;

/// Errors raised by the type model.
///
/// The distilled spec does not call out validation for `Class::build`,
/// but a production interner never silently accepts a degenerate symbol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("class fully-qualified name must not be empty")]
    EmptyClassName,
    #[error("class fully-qualified name `{0}` has an empty segment")]
    EmptySegment(String),
}

//! Java refactor pipeline built over `lj-tree`'s source-preserving
//! syntax tree: a visitor framework with explicit ancestor tracking, an
//! AspectJ-flavored method-signature matcher, and a set of built-in
//! refactors composed into transactions that emit a rewritten source
//! and a unified diff.

pub mod builtins;
mod cursor;
mod error;
mod fix;
mod matcher;
mod patch;
mod pipeline;
mod scoped;
mod visitor;
mod warning;

pub use cursor::Cursor;
pub use error::RefactorError;
pub use fix::{apply_fixes, normalize_fixes, Fix};
pub use matcher::MethodPattern;
pub use patch::unified_diff;
pub use pipeline::{RefactorResult, RefactorTransaction};
pub use scoped::ScopedVisitor;
pub use visitor::{walk, Visitor};
pub use warning::RefactorWarning;

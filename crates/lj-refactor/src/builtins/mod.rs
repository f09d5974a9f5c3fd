//! Concrete refactors built on top of the visitor/matcher framework
//! (§4.F). Each one is grounded directly on its contract entry: the
//! mutating refactors (`ChangeType`, `ChangeMethodName`, `ChangeLiteral`,
//! `RemoveImport`, `AddImport`) are [`crate::visitor::Visitor`] impls
//! meant to be run through [`crate::pipeline::RefactorTransaction`];
//! the queries (`FindMethods`, `FindFields`, `HasType`, `HasImport`)
//! are plain functions since they never touch the tree.

mod add_import;
mod change_literal;
mod change_method_name;
mod change_type;
mod find_fields;
mod find_methods;
mod has_import;
mod has_type;
mod remove_import;

pub use add_import::AddImport;
pub use change_literal::ChangeLiteral;
pub use change_method_name::ChangeMethodName;
pub use change_type::ChangeType;
pub use find_fields::find_fields;
pub use find_methods::find_methods;
pub use has_import::has_import;
pub use has_type::has_type;
pub use remove_import::RemoveImport;

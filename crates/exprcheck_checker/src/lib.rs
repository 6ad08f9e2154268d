//! exprcheck_checker: The expression checker.
//!
//! Walks a parsed expression against a [`SymbolTable`] of bindings and a
//! [`TypeRepository`] of canonical types, and reports operator misuse as
//! diagnostics. Checking never fails: unresolved names become `any` so one
//! missing binding produces one diagnostic.
//!
//! [`SymbolTable`]: exprcheck_types::SymbolTable
//! [`TypeRepository`]: exprcheck_types::TypeRepository

mod checker;

pub use checker::check;

//! exprcheck_host: The host type checker.
//!
//! Compiles declaration sources (variables, function overloads, interfaces
//! and type aliases) into a program of scopes, symbols and types, and
//! answers the location-sensitive queries the type adapter asks: which
//! symbols are visible at a position, and what type a symbol has there.

mod binder;
mod checker;
mod program;
mod symbol;
mod types;

pub use checker::HostChecker;
pub use program::{FileId, Location};
pub use types::{Signature, SignatureParameter};

pub use exprcheck_ast::types::{SymbolFlags, SymbolId, TypeFlags, TypeId};

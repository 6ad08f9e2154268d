//! exprcheck_types: The abstract type model the expression checker runs on.
//!
//! The checker never sees a host type system directly. It works against:
//! - [`Type`]: a display name, a coarse [`TypeKind`], members and call signatures
//! - [`Symbol`] / [`SymbolTable`]: named, typed bindings
//! - [`TypeRepository`]: canonical types looked up by kind
//!
//! [`StaticTypeRepository`] is the in-memory realization used without a host.

pub mod kind;
pub mod repository;
pub mod symbol;
pub mod ty;

pub use kind::TypeKind;
pub use repository::{BuiltInCache, StaticTypeRepository, TypeRepository};
pub use symbol::{StaticSymbol, Symbol, SymbolRef, SymbolTable};
pub use ty::{ArgTypes, CallSignature, StaticType, Type, TypeRef};

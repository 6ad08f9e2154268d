//! exprcheck_adapter: The type model realized on top of the host checker.
//!
//! Every [`HostType`] and [`HostSymbol`] pairs a host id with the location it
//! was obtained at, so location-sensitive answers (block scoping, assignment
//! narrowing) stay consistent when members and signatures are expanded later.
//! Canonical scalar types come from a small built-ins fixture compiled into
//! the same host on first use.

mod repository;
mod ty;

pub use repository::{HostTypeRepository, BUILTINS_FILE_NAME, DEFAULT_BUILTINS_SOURCE};
pub use ty::{classify_type_flags, HostSymbol, HostType};

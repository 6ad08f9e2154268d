//! exprcheck_ast: Abstract Syntax Tree definitions.
//!
//! Defines the expression nodes the checker walks, the declaration nodes the
//! host compiles, the SyntaxKind enum and the flag types shared with the
//! host's type table.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;

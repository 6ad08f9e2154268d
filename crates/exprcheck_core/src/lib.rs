//! exprcheck_core: Core utilities shared by every exprcheck crate.
//!
//! Provides source positions and spans plus the string interner used by the
//! host binder.

pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use text::{char_to_byte_offset, LineMap, TextPos, TextRange, TextSpan};

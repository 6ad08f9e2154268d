//! exprcheck_scanner: Tokenizer for expressions and declaration sources.
//!
//! Produces the token stream consumed by `exprcheck_parser`:
//! - Punctuation and operators of the expression grammar
//! - String, numeric and substitution-free template literals
//! - Reserved and contextual keywords
//! - Unicode identifiers

mod char_codes;
mod scanner;

pub use char_codes::{is_identifier_part, is_identifier_start};
pub use scanner::{Scanner, ScannerState};

//! exprcheck_parser: Recursive descent parser for expressions and
//! declaration sources.
//!
//! Parses token streams from the scanner into an arena-allocated AST.
//! Binary operators are parsed by precedence climbing over TypeScript's
//! operator precedence table.

mod parser;
mod precedence;

pub use parser::Parser;
pub use precedence::BinaryPrecedence;

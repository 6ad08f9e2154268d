//! The coarse classification of types used by the operator rules.

use std::fmt;

/// What an operator rule needs to know about a type.
///
/// `Other` is the catch-all for non-primitive types that are neither plain
/// objects nor functions. It is never a repository key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Any,
    Boolean,
    String,
    Number,
    Symbol,
    Undefined,
    Null,
    Object,
    Function,
    Other,
}

impl TypeKind {
    /// Every kind a repository can be asked for.
    pub const REPOSITORY_KINDS: [TypeKind; 9] = [
        TypeKind::Any,
        TypeKind::Boolean,
        TypeKind::String,
        TypeKind::Number,
        TypeKind::Symbol,
        TypeKind::Undefined,
        TypeKind::Null,
        TypeKind::Object,
        TypeKind::Function,
    ];

    /// Kinds whose canonical type comes from the built-in declarations.
    pub fn is_scalar_built_in(self) -> bool {
        matches!(
            self,
            TypeKind::String | TypeKind::Number | TypeKind::Boolean | TypeKind::Symbol
        )
    }

    /// The keyword naming the canonical type of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Any => "any",
            TypeKind::Boolean => "boolean",
            TypeKind::String => "string",
            TypeKind::Number => "number",
            TypeKind::Symbol => "symbol",
            TypeKind::Undefined => "undefined",
            TypeKind::Null => "null",
            TypeKind::Object => "object",
            TypeKind::Function => "Function",
            TypeKind::Other => "other",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

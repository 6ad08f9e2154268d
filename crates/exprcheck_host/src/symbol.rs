//! Symbols and scopes.

use crate::program::Location;
use exprcheck_ast::types::{SymbolFlags, SymbolId, TypeId};
use exprcheck_core::intern::InternedString;
use exprcheck_core::text::TextRange;
use indexmap::IndexMap;

/// A named entity: variable, function, property, interface or type alias.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: InternedString,
    pub flags: SymbolFlags,
    /// Where the symbol is declared. Merged functions and interfaces have
    /// several declarations.
    pub declarations: Vec<Location>,
    /// The type the declarations give the symbol, before any narrowing.
    pub declared_type: TypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An assignment `name = value;` recorded in the scope it appears in.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub symbol: SymbolId,
    /// End of the assignment statement; reads at or after it see the
    /// narrowed type.
    pub pos: u32,
    pub narrowed_type: TypeId,
}

/// A file or block scope. Scopes form a chain from inner to outer.
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub range: TextRange,
    /// Value meanings: variables and functions.
    pub values: IndexMap<InternedString, SymbolId>,
    /// Type meanings: interfaces and type aliases.
    pub types: IndexMap<InternedString, SymbolId>,
    pub assignments: Vec<Assignment>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>, range: TextRange) -> Self {
        Self {
            parent,
            range,
            values: IndexMap::new(),
            types: IndexMap::new(),
            assignments: Vec::new(),
        }
    }

    /// Whether `pos` is inside this scope. A file scope covers its whole
    /// text including the end position.
    pub fn contains(&self, pos: u32) -> bool {
        if self.parent.is_none() {
            self.range.contains_inclusive(pos)
        } else {
            self.range.to_span().contains(pos)
        }
    }
}

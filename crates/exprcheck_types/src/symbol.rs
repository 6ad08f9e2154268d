//! Symbols and symbol tables.

use crate::ty::TypeRef;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A named binding with a type.
pub trait Symbol {
    fn name(&self) -> &str;
    fn ty(&self) -> TypeRef;
}

pub type SymbolRef = Rc<dyn Symbol>;

impl fmt::Debug for dyn Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("name", &self.name()).finish()
    }
}

/// A symbol with a fixed type.
pub struct StaticSymbol {
    name: String,
    ty: TypeRef,
}

impl StaticSymbol {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }

    pub fn into_ref(self) -> SymbolRef {
        Rc::new(self)
    }
}

impl Symbol for StaticSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn ty(&self) -> TypeRef {
        self.ty.clone()
    }
}

/// Ordered name to symbol map.
///
/// Inserting a name that is already present replaces the symbol but keeps
/// the position of the first insertion.
#[derive(Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolRef>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: IndexMap::new() }
    }

    pub fn insert(&mut self, symbol: SymbolRef) {
        self.symbols.insert(symbol.name().to_string(), symbol);
    }

    pub fn get(&self, name: &str) -> Option<&SymbolRef> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolRef> {
        self.symbols.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }
}

impl FromIterator<SymbolRef> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = SymbolRef>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for symbol in iter {
            table.insert(symbol);
        }
        table
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.symbols.keys()).finish()
    }
}

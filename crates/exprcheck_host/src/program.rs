//! The compiled program: every file, scope, symbol and type the host knows.

use crate::symbol::{Scope, ScopeId, Symbol};
use crate::types::TypeTable;
use exprcheck_ast::types::{NodeId, SymbolFlags, SymbolId, TypeFlags, TypeId};
use exprcheck_core::intern::{InternedString, StringInterner};
use exprcheck_core::text::{TextRange, TextSpan};
use exprcheck_diagnostics::{Diagnostic, DiagnosticCollection, DiagnosticMessage};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Index of a source file added to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A position in a compiled file. Location-sensitive queries (scoping and
/// narrowing) are answered relative to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    /// Character offset into the file's text.
    pub pos: u32,
}

impl Location {
    pub fn new(file: FileId, pos: u32) -> Self {
        Self { file, pos }
    }
}

/// Per-file bookkeeping.
#[derive(Debug)]
pub(crate) struct SourceInfo {
    pub name: String,
    pub text_len: u32,
    /// File scope first, then block scopes in pre-order.
    pub scopes: Vec<ScopeId>,
    /// Declaration node to the symbol it declares.
    pub declarations: FxHashMap<NodeId, SymbolId>,
}

pub(crate) struct Program {
    pub types: TypeTable,
    pub symbols: Vec<Symbol>,
    pub scopes: Vec<Scope>,
    pub files: Vec<SourceInfo>,
    pub interner: StringInterner,
    pub diagnostics: DiagnosticCollection,
    /// The `length` property shared by every array type.
    pub length_symbol: SymbolId,
}

impl Program {
    pub fn new() -> Self {
        let mut program = Self {
            types: TypeTable::new(),
            symbols: Vec::new(),
            scopes: Vec::new(),
            files: Vec::new(),
            interner: StringInterner::new(),
            diagnostics: DiagnosticCollection::new(),
            length_symbol: SymbolId(0),
        };
        let number = program.types.number_type;
        program.length_symbol = program.create_symbol("length", SymbolFlags::PROPERTY, number);
        program
    }

    pub fn create_symbol(&mut self, name: &str, flags: SymbolFlags, declared_type: TypeId) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: self.interner.intern(name),
            flags,
            declarations: Vec::new(),
            declared_type,
        });
        id
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub fn create_scope(&mut self, parent: Option<ScopeId>, file: FileId, range: TextRange) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(parent, range));
        if let Some(info) = self.files.get_mut(file.index()) {
            info.scopes.push(id);
        }
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub fn file(&self, id: FileId) -> &SourceInfo {
        &self.files[id.index()]
    }

    pub fn error(&mut self, file: FileId, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        let name = self.file(file).name.clone();
        self.diagnostics.add(Diagnostic::new(span, message, args).with_file(name));
    }

    // ========================================================================
    // Name resolution
    // ========================================================================

    /// Scopes enclosing a location, outermost first.
    pub fn scope_chain(&self, location: Location) -> Vec<ScopeId> {
        let Some(info) = self.files.get(location.file.index()) else {
            return Vec::new();
        };
        info.scopes
            .iter()
            .copied()
            .filter(|&id| self.scope(id).contains(location.pos))
            .collect()
    }

    /// Find the value symbol `name` refers to from `scope`. A name that was
    /// never interned cannot have been declared anywhere.
    pub fn resolve_value(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let name = self.interner.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.values.get(&name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    pub fn resolve_type_name(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let name = self.interner.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.types.get(&name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Value symbols visible at a location, outer scopes first. A name
    /// shadowed by an inner scope keeps its outer position.
    pub fn symbols_at_location(&self, location: Location) -> Vec<SymbolId> {
        let mut visible: IndexMap<InternedString, SymbolId> = IndexMap::new();
        for id in self.scope_chain(location) {
            for (&name, &symbol) in &self.scope(id).values {
                visible.insert(name, symbol);
            }
        }
        visible.into_values().collect()
    }

    /// The symbol's type as seen at `location`: the declared type, narrowed
    /// by the latest preceding assignment in the same or an enclosing scope.
    pub fn type_of_symbol_at_location(&self, symbol: SymbolId, location: Location) -> TypeId {
        let declared = self.symbol(symbol).declared_type;
        if !self.types.get(declared).flags.contains(TypeFlags::UNION) {
            return declared;
        }
        self.scope_chain(location)
            .into_iter()
            .flat_map(|id| self.scope(id).assignments.iter())
            .filter(|a| a.symbol == symbol && a.pos <= location.pos)
            .max_by_key(|a| a.pos)
            .map_or(declared, |a| a.narrowed_type)
    }
}

//! The host-backed type repository.

use crate::ty::{HostSymbol, HostType};
use bumpalo::Bump;
use exprcheck_ast::node::{SourceFile, VariableDeclaration, VariableStatement};
use exprcheck_ast::types::NodeId;
use exprcheck_ast::visitor::{walk_source_file, AstVisitor};
use exprcheck_host::{HostChecker, Location};
use exprcheck_parser::Parser;
use exprcheck_types::{BuiltInCache, SymbolTable, TypeKind, TypeRef, TypeRepository};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// File name the built-ins fixture is compiled under.
pub const BUILTINS_FILE_NAME: &str = "builtins.d.ts";

/// The default built-ins fixture.
pub const DEFAULT_BUILTINS_SOURCE: &str = include_str!("../fixtures/builtins.d.ts");

/// A [`TypeRepository`] over a shared [`HostChecker`].
///
/// `Any`, `Null` and `Undefined` are fixed at construction. The scalar
/// built-ins are loaded the first time one is requested by compiling the
/// fixture into the host this repository wraps.
pub struct HostTypeRepository {
    host: Rc<HostChecker>,
    builtins_source: String,
    cache: BuiltInCache,
}

impl HostTypeRepository {
    pub fn new(host: Rc<HostChecker>) -> Self {
        Self::with_builtins_source(host, DEFAULT_BUILTINS_SOURCE)
    }

    /// Use a different built-ins fixture. It must declare one variable per
    /// scalar kind with the kind's keyword as its type annotation.
    pub fn with_builtins_source(host: Rc<HostChecker>, source: impl Into<String>) -> Self {
        Self {
            host,
            builtins_source: source.into(),
            cache: BuiltInCache::new(),
        }
    }

    pub fn host(&self) -> &Rc<HostChecker> {
        &self.host
    }

    /// Whether the built-ins fixture has been compiled.
    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    /// Compile the built-ins fixture into the host if that has not happened
    /// yet. Later calls do nothing.
    pub fn ensure_built_in_types_loaded(&self) {
        self.cache.ensure_loaded(|| self.load_built_in_types());
    }

    /// Host symbols visible at `location`, each anchored there.
    pub fn scope_at(&self, location: Location) -> SymbolTable {
        self.host
            .symbols_at_location(location)
            .into_iter()
            .map(|symbol| HostSymbol::new(self.host.clone(), symbol, location).into_ref())
            .collect()
    }

    fn load_built_in_types(&self) -> FxHashMap<TypeKind, TypeRef> {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, BUILTINS_FILE_NAME, &self.builtins_source);
        let source_file = parser.parse_source_file();
        for diagnostic in parser.take_diagnostics().diagnostics() {
            warn!(%diagnostic, "built-ins fixture parse error");
        }

        let reported = self.host.diagnostics().len();
        let file = self.host.add_source_file(&source_file);
        for diagnostic in self.host.diagnostics().iter().skip(reported) {
            warn!(%diagnostic, "built-ins fixture error");
        }

        let mut collector = BuiltInCollector {
            source_file: &source_file,
            found: Vec::new(),
        };
        walk_source_file(&mut collector, &source_file);

        let mut types = FxHashMap::default();
        for (kind, declaration, pos) in collector.found {
            if let Some(id) = self.host.type_of_declaration(file, declaration) {
                types.insert(kind, HostType::new(self.host.clone(), id, Location::new(file, pos)).into_ref());
            }
        }
        debug!(kinds = ?types.keys().collect::<Vec<_>>(), "loaded built-in types");
        types
    }
}

impl TypeRepository for HostTypeRepository {
    fn type_by_kind(&self, kind: TypeKind) -> TypeRef {
        self.cache.type_by_kind(kind, || self.load_built_in_types())
    }
}

/// Collects the fixture declarations whose annotation names a scalar kind.
struct BuiltInCollector<'s, 'a> {
    source_file: &'s SourceFile<'a>,
    found: Vec<(TypeKind, NodeId, u32)>,
}

impl<'s, 'a> AstVisitor<'a> for BuiltInCollector<'s, 'a> {
    fn visit_variable_declaration(&mut self, _statement: &VariableStatement<'a>, node: &VariableDeclaration<'a>) {
        let Some(annotation) = node.type_annotation else {
            return;
        };
        let kind = match self.source_file.text_of(annotation.data().range).as_str() {
            "string" => TypeKind::String,
            "number" => TypeKind::Number,
            "boolean" => TypeKind::Boolean,
            "symbol" => TypeKind::Symbol,
            _ => return,
        };
        self.found.push((kind, node.data.id, node.data.range.pos));
    }
}

//! The host checker.
//!
//! Compiles declaration sources into a [`Program`] and answers type queries
//! against it. Compilation runs the binder, then resolves every declaration
//! while the file's AST is still alive, so the program owns nothing that
//! borrows from a parse arena.

use crate::binder::{record_assignment, Binder, BoundFile, Declaration, PendingAssignment};
use crate::program::{FileId, Location, Program, SourceInfo};
use crate::symbol::{Assignment, ScopeId};
use crate::types::{Signature, SignatureParameter, TypeData};
use exprcheck_ast::node::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_ast::types::*;
use exprcheck_core::text::TextRange;
use exprcheck_diagnostics::{messages, Diagnostic};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use tracing::debug;

/// Maximum depth for type_to_string recursion.
const MAX_TYPE_TO_STRING_DEPTH: u32 = 8;

/// A host type-checking context: a growing program of compiled files plus
/// the queries the type adapter needs.
pub struct HostChecker {
    program: RefCell<Program>,
}

impl HostChecker {
    pub fn new() -> Self {
        Self {
            program: RefCell::new(Program::new()),
        }
    }

    /// Bind and resolve a parsed source file. Each file gets its own top
    /// level scope; declarations are not visible across files.
    pub fn add_source_file(&self, source_file: &SourceFile<'_>) -> FileId {
        let mut program = self.program.borrow_mut();
        let program = &mut *program;
        let file = FileId(program.files.len() as u32);
        let text_len = source_file.data.range.end;
        program.files.push(SourceInfo {
            name: source_file.file_name.clone(),
            text_len,
            scopes: Vec::new(),
            declarations: FxHashMap::default(),
        });
        let file_scope = program.create_scope(None, file, TextRange::new(0, text_len));

        let bound = Binder::new(program, file, file_scope).bind_source_file(source_file);
        Resolver::new(program, file).resolve(bound);

        debug!(
            file = %source_file.file_name,
            symbols = program.symbols.len(),
            types = program.types.len(),
            "compiled source file"
        );
        file
    }

    /// The position just past the last character of a file, where every
    /// top level declaration is in scope.
    pub fn end_of_file(&self, file: FileId) -> Location {
        Location::new(file, self.program.borrow().file(file).text_len)
    }

    pub fn type_flags(&self, ty: TypeId) -> TypeFlags {
        self.program.borrow().types.get(ty).flags
    }

    pub fn type_to_string(&self, ty: TypeId) -> String {
        type_to_string(&self.program.borrow(), ty, 0)
    }

    /// Properties of an object or array type, in declaration order.
    /// Primitives and unions report none.
    pub fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        let program = self.program.borrow();
        match &program.types.get(ty).data {
            TypeData::Object { members, .. } => members.values().copied().collect(),
            TypeData::Array { .. } => vec![program.length_symbol],
            _ => Vec::new(),
        }
    }

    pub fn signatures_of_type(&self, ty: TypeId) -> Vec<Signature> {
        match &self.program.borrow().types.get(ty).data {
            TypeData::Object { call_signatures, .. } => call_signatures.clone(),
            _ => Vec::new(),
        }
    }

    pub fn element_type_of_array(&self, ty: TypeId) -> Option<TypeId> {
        self.program.borrow().types.element_type_of(ty)
    }

    /// The type of `symbol` as seen at `location`, honoring assignment
    /// narrowing.
    pub fn type_of_symbol_at_location(&self, symbol: SymbolId, location: Location) -> TypeId {
        self.program.borrow().type_of_symbol_at_location(symbol, location)
    }

    /// Value symbols in scope at `location`, outer scopes first.
    pub fn symbols_at_location(&self, location: Location) -> Vec<SymbolId> {
        self.program.borrow().symbols_at_location(location)
    }

    /// The symbol declared by a declaration node of `file`.
    pub fn symbol_of_declaration(&self, file: FileId, declaration: NodeId) -> Option<SymbolId> {
        self.program.borrow().file(file).declarations.get(&declaration).copied()
    }

    /// The declared type of the symbol a declaration node introduces.
    pub fn type_of_declaration(&self, file: FileId, declaration: NodeId) -> Option<TypeId> {
        let symbol = self.symbol_of_declaration(file, declaration)?;
        Some(self.program.borrow().symbol(symbol).declared_type)
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> String {
        let program = self.program.borrow();
        program.interner.resolve(program.symbol(symbol).name).to_string()
    }

    /// Diagnostics from every compiled file, in the order they were found.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.program.borrow().diagnostics.diagnostics().to_vec()
    }
}

impl Default for HostChecker {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Declaration resolution
// ============================================================================

enum ResolveState {
    Resolving,
    Resolved(TypeId),
}

/// Resolves the types of one file's declarations. Symbols are resolved on
/// demand, so declarations may refer to each other in any order.
struct Resolver<'p, 'a> {
    program: &'p mut Program,
    file: FileId,
    pending: FxHashMap<SymbolId, Vec<Declaration<'a>>>,
    states: FxHashMap<SymbolId, ResolveState>,
}

impl<'p, 'a> Resolver<'p, 'a> {
    fn new(program: &'p mut Program, file: FileId) -> Self {
        Self {
            program,
            file,
            pending: FxHashMap::default(),
            states: FxHashMap::default(),
        }
    }

    fn resolve(mut self, bound: BoundFile<'a>) {
        let mut order = Vec::new();
        for (symbol, declaration) in bound.declarations {
            let declarations = self.pending.entry(symbol).or_default();
            if declarations.is_empty() {
                order.push(symbol);
            }
            declarations.push(declaration);
        }

        // Interface members first: their object types already exist, so
        // anything may reference them while members are filled in.
        for &symbol in &order {
            if self.program.symbol(symbol).flags.contains(SymbolFlags::INTERFACE) {
                self.resolve_interface_members(symbol);
            }
        }
        for &symbol in &order {
            self.resolve_symbol(symbol);
        }
        for assignment in bound.assignments {
            self.resolve_assignment(assignment);
        }
    }

    fn resolve_symbol(&mut self, symbol: SymbolId) -> TypeId {
        match self.states.get(&symbol) {
            Some(ResolveState::Resolved(ty)) => return *ty,
            Some(ResolveState::Resolving) => return self.report_circularity(symbol),
            None => {}
        }
        let Some(declarations) = self.pending.get(&symbol).cloned() else {
            return self.program.symbol(symbol).declared_type;
        };

        self.states.insert(symbol, ResolveState::Resolving);
        let ty = match declarations[0] {
            Declaration::Variable { scope, is_const, type_annotation, initializer } => {
                match (type_annotation, initializer) {
                    (Some(annotation), _) => self.resolve_type_node(scope, annotation),
                    (None, Some(initializer)) => {
                        let at = self.program.symbol(symbol).declarations[0].pos;
                        let ty = self.type_of_initializer(scope, initializer, at);
                        if is_const {
                            ty
                        } else {
                            self.program.types.widen_literal(ty)
                        }
                    }
                    (None, None) => self.program.types.any_type,
                }
            }
            Declaration::Function { .. } => {
                let mut signatures = Vec::with_capacity(declarations.len());
                for declaration in &declarations {
                    if let Declaration::Function { scope, parameters, return_type } = *declaration {
                        signatures.push(self.build_signature(scope, parameters, return_type));
                    }
                }
                self.program.types.create_anonymous_object(IndexMap::new(), signatures)
            }
            Declaration::Interface { .. } => self.program.symbol(symbol).declared_type,
            Declaration::TypeAlias { scope, type_node, .. } => self.resolve_type_node(scope, type_node),
        };

        self.states.insert(symbol, ResolveState::Resolved(ty));
        self.program.symbol_mut(symbol).declared_type = ty;
        ty
    }

    fn report_circularity(&mut self, symbol: SymbolId) -> TypeId {
        let alias = self.pending.get(&symbol).and_then(|declarations| {
            declarations.iter().find_map(|declaration| match *declaration {
                Declaration::TypeAlias { name_span, .. } => Some(name_span),
                _ => None,
            })
        });
        if let Some(span) = alias {
            let name = self.program.interner.resolve(self.program.symbol(symbol).name).to_string();
            self.program.error(
                self.file,
                span,
                &messages::TYPE_ALIAS_0_CIRCULARLY_REFERENCES_ITSELF,
                &[name.as_str()],
            );
        }
        self.program.types.any_type
    }

    fn resolve_interface_members(&mut self, symbol: SymbolId) {
        let ty = self.program.symbol(symbol).declared_type;
        let declarations = self.pending.get(&symbol).cloned().unwrap_or_default();
        let mut members = IndexMap::new();
        for declaration in declarations {
            if let Declaration::Interface { scope, members: elements } = declaration {
                for element in elements {
                    self.add_member(&mut members, scope, element);
                }
            }
        }
        if let TypeData::Object { members: slot, .. } = &mut self.program.types.get_mut(ty).data {
            *slot = members;
        }
        self.states.insert(symbol, ResolveState::Resolved(ty));
    }

    fn add_member(
        &mut self,
        members: &mut IndexMap<String, SymbolId>,
        scope: ScopeId,
        element: &'a TypeElement<'a>,
    ) {
        let name = element.name();
        if name.text.is_empty() {
            return;
        }
        match element {
            TypeElement::PropertySignature(property) => {
                let ty = match property.type_annotation {
                    Some(annotation) => self.resolve_type_node(scope, annotation),
                    None => self.program.types.any_type,
                };
                let symbol = self.program.create_symbol(name.text, SymbolFlags::PROPERTY, ty);
                self.program
                    .symbol_mut(symbol)
                    .declarations
                    .push(Location::new(self.file, name.data.range.pos));
                members.insert(name.text.to_string(), symbol);
            }
            TypeElement::MethodSignature(method) => {
                let signature = self.build_signature(scope, method.parameters, method.return_type);
                // Overloads of one method share a symbol
                if let Some(&existing) = members.get(name.text) {
                    if self.program.symbol(existing).flags.contains(SymbolFlags::METHOD) {
                        let method_type = self.program.symbol(existing).declared_type;
                        if let TypeData::Object { call_signatures, .. } =
                            &mut self.program.types.get_mut(method_type).data
                        {
                            call_signatures.push(signature);
                        }
                        return;
                    }
                }
                let ty = self.program.types.create_anonymous_object(IndexMap::new(), vec![signature]);
                let symbol = self.program.create_symbol(name.text, SymbolFlags::METHOD, ty);
                self.program
                    .symbol_mut(symbol)
                    .declarations
                    .push(Location::new(self.file, name.data.range.pos));
                members.insert(name.text.to_string(), symbol);
            }
        }
    }

    fn build_signature(
        &mut self,
        scope: ScopeId,
        parameters: &'a [ParameterDeclaration<'a>],
        return_type: Option<&'a TypeNode<'a>>,
    ) -> Signature {
        let mut params = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let is_rest = parameter.dot_dot_dot_token.is_some();
            let type_id = match parameter.type_annotation {
                Some(annotation) => self.resolve_type_node(scope, annotation),
                None if is_rest => {
                    let any = self.program.types.any_type;
                    self.program.types.array_of(any)
                }
                None => self.program.types.any_type,
            };
            params.push(SignatureParameter {
                name: parameter.name.text.to_string(),
                type_id,
            });
        }
        let has_rest_parameter = parameters
            .last()
            .is_some_and(|p| p.dot_dot_dot_token.is_some());
        let return_type = match return_type {
            Some(annotation) => self.resolve_type_node(scope, annotation),
            None => self.program.types.any_type,
        };
        Signature {
            parameters: params,
            return_type,
            has_rest_parameter,
        }
    }

    // ========================================================================
    // Type nodes
    // ========================================================================

    fn resolve_type_node(&mut self, scope: ScopeId, node: &'a TypeNode<'a>) -> TypeId {
        match node {
            TypeNode::Keyword(keyword) => self.type_from_keyword(keyword.data.kind),
            TypeNode::Literal(literal) => match literal.literal {
                Expression::StringLiteral(lit) | Expression::NoSubstitutionTemplateLiteral(lit) => {
                    self.program.types.string_literal(lit.text)
                }
                Expression::NumericLiteral(lit) => self.program.types.number_literal(lit.text),
                Expression::Keyword(kw) => {
                    self.program.types.boolean_literal(kw.data.kind == SyntaxKind::TrueKeyword)
                }
                _ => self.program.types.any_type,
            },
            TypeNode::TypeReference(reference) => self.resolve_type_reference(scope, &reference.type_name),
            TypeNode::Array(array) => {
                let element = self.resolve_type_node(scope, array.element_type);
                self.program.types.array_of(element)
            }
            TypeNode::Union(union) => {
                let types = union
                    .types
                    .iter()
                    .map(|member| self.resolve_type_node(scope, member))
                    .collect();
                self.program.types.union_of(types)
            }
            TypeNode::Function(function) => {
                let signature = self.build_signature(scope, function.parameters, Some(function.return_type));
                self.program.types.create_anonymous_object(IndexMap::new(), vec![signature])
            }
            TypeNode::TypeLiteral(literal) => {
                let mut members = IndexMap::new();
                for element in literal.members {
                    self.add_member(&mut members, scope, element);
                }
                self.program.types.create_anonymous_object(members, Vec::new())
            }
            TypeNode::Parenthesized(parenthesized) => self.resolve_type_node(scope, parenthesized.type_node),
        }
    }

    fn type_from_keyword(&self, kind: SyntaxKind) -> TypeId {
        let types = &self.program.types;
        match kind {
            SyntaxKind::StringKeyword => types.string_type,
            SyntaxKind::NumberKeyword => types.number_type,
            SyntaxKind::BooleanKeyword => types.boolean_type,
            SyntaxKind::SymbolKeyword => types.symbol_type,
            SyntaxKind::VoidKeyword => types.void_type,
            SyntaxKind::NeverKeyword => types.never_type,
            SyntaxKind::UndefinedKeyword => types.undefined_type,
            SyntaxKind::NullKeyword => types.null_type,
            SyntaxKind::UnknownKeyword => types.unknown_type,
            SyntaxKind::ObjectKeyword => types.object_type,
            _ => types.any_type,
        }
    }

    fn resolve_type_reference(&mut self, scope: ScopeId, name: &'a Identifier<'a>) -> TypeId {
        if name.text.is_empty() {
            return self.program.types.any_type;
        }
        if let Some(symbol) = self.program.resolve_type_name(scope, name.text) {
            return self.resolve_symbol(symbol);
        }
        match name.text {
            "Function" => self.program.types.global_function_type,
            "Object" => self.program.types.global_object_type,
            _ => {
                self.program.error(self.file, name.data.span(), &messages::CANNOT_FIND_NAME_0, &[name.text]);
                self.program.types.any_type
            }
        }
    }

    // ========================================================================
    // Initializers and assignments
    // ========================================================================

    /// The type of an initializer or assigned value, read at position `at`.
    /// Only literals, identifiers and simple unary forms are understood.
    fn type_of_initializer(&mut self, scope: ScopeId, expr: &'a Expression<'a>, at: u32) -> TypeId {
        match expr {
            Expression::StringLiteral(lit) | Expression::NoSubstitutionTemplateLiteral(lit) => {
                self.program.types.string_literal(lit.text)
            }
            Expression::NumericLiteral(lit) => self.program.types.number_literal(lit.text),
            Expression::Keyword(kw) => match kw.data.kind {
                SyntaxKind::TrueKeyword => self.program.types.true_type,
                SyntaxKind::FalseKeyword => self.program.types.false_type,
                _ => self.program.types.null_type,
            },
            Expression::Parenthesized(paren) => self.type_of_initializer(scope, paren.expression, at),
            Expression::PrefixUnary(unary) => match (unary.operator, unary.operand) {
                (SyntaxKind::MinusToken, Expression::NumericLiteral(lit)) => {
                    self.program.types.number_literal(&format!("-{}", lit.text))
                }
                (SyntaxKind::ExclamationToken, _) => self.program.types.boolean_type,
                _ => self.program.types.number_type,
            },
            Expression::TypeOf(_) => self.program.types.string_type,
            Expression::Void(_) => self.program.types.undefined_type,
            Expression::Identifier(id) => {
                match self.program.resolve_value(scope, id.text) {
                    Some(symbol) => {
                        self.resolve_symbol(symbol);
                        self.program
                            .type_of_symbol_at_location(symbol, Location::new(self.file, at))
                    }
                    None if id.text == "undefined" => self.program.types.undefined_type,
                    None => {
                        self.program.error(self.file, id.data.span(), &messages::CANNOT_FIND_NAME_0, &[id.text]);
                        self.program.types.any_type
                    }
                }
            }
            _ => self.program.types.any_type,
        }
    }

    fn resolve_assignment(&mut self, assignment: PendingAssignment<'a>) {
        let target = assignment.target;
        let Some(symbol) = self.program.resolve_value(assignment.scope, target.text) else {
            self.program.error(self.file, target.data.span(), &messages::CANNOT_FIND_NAME_0, &[target.text]);
            return;
        };
        let flags = self.program.symbol(symbol).flags;
        if flags.contains(SymbolFlags::CONST) {
            self.program.error(
                self.file,
                target.data.span(),
                &messages::CANNOT_ASSIGN_TO_0_BECAUSE_IT_IS_A_CONSTANT,
                &[target.text],
            );
            return;
        }
        if !flags.intersects(SymbolFlags::VARIABLE) {
            return;
        }

        let declared = self.program.symbol(symbol).declared_type;
        let assigned = self.type_of_initializer(assignment.scope, assignment.value, assignment.end);
        let narrowed_type = self.narrow_to_assigned(declared, assigned);
        record_assignment(
            self.program,
            assignment.scope,
            Assignment { symbol, pos: assignment.end, narrowed_type },
        );
    }

    /// Keep the constituents of a declared union that the assigned type can
    /// inhabit. Non-union declarations are never narrowed.
    fn narrow_to_assigned(&mut self, declared: TypeId, assigned: TypeId) -> TypeId {
        let types = &self.program.types;
        let TypeData::Union { types: constituents } = &types.get(declared).data else {
            return declared;
        };
        let assigned_parts = match &types.get(assigned).data {
            TypeData::Union { types } => types.clone(),
            _ => vec![assigned],
        };
        let kept: Vec<TypeId> = constituents
            .iter()
            .copied()
            .filter(|&constituent| {
                types.get(constituent).flags.contains(TypeFlags::UNKNOWN)
                    || assigned_parts
                        .iter()
                        .any(|&part| part == constituent || types.widen_literal(part) == constituent)
            })
            .collect();
        if kept.is_empty() {
            return declared;
        }
        self.program.types.union_of(kept)
    }
}

// ============================================================================
// Type display
// ============================================================================

fn type_to_string(program: &Program, ty: TypeId, depth: u32) -> String {
    if depth > MAX_TYPE_TO_STRING_DEPTH {
        return "...".to_string();
    }
    match &program.types.get(ty).data {
        TypeData::Intrinsic { name } => name.to_string(),
        TypeData::StringLiteral { value } => format!("\"{}\"", value),
        TypeData::NumberLiteral { text } => text.clone(),
        TypeData::BooleanLiteral { value } => value.to_string(),
        TypeData::Union { types } => types
            .iter()
            .map(|&t| type_to_string(program, t, depth + 1))
            .collect::<Vec<_>>()
            .join(" | "),
        TypeData::Array { element_type } => {
            let element = type_to_string(program, *element_type, depth + 1);
            if needs_parentheses_as_element(program, *element_type) {
                format!("({})[]", element)
            } else {
                format!("{}[]", element)
            }
        }
        TypeData::Object { name: Some(name), .. } => name.clone(),
        TypeData::Object { name: None, members, call_signatures } => {
            if members.is_empty() && call_signatures.len() == 1 {
                let signature = &call_signatures[0];
                return format!(
                    "({}) => {}",
                    parameters_to_string(program, signature, depth),
                    type_to_string(program, signature.return_type, depth + 1)
                );
            }
            let mut parts = Vec::new();
            for signature in call_signatures {
                parts.push(signature_to_string(program, "", signature, depth));
            }
            for (name, &symbol) in members {
                let member = program.symbol(symbol);
                match &program.types.get(member.declared_type).data {
                    TypeData::Object { name: None, members, call_signatures }
                        if member.flags.contains(SymbolFlags::METHOD) && members.is_empty() =>
                    {
                        for signature in call_signatures {
                            parts.push(signature_to_string(program, name, signature, depth));
                        }
                    }
                    _ => parts.push(format!(
                        "{}: {}",
                        name,
                        type_to_string(program, member.declared_type, depth + 1)
                    )),
                }
            }
            if parts.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", parts.join("; "))
            }
        }
    }
}

fn needs_parentheses_as_element(program: &Program, ty: TypeId) -> bool {
    match &program.types.get(ty).data {
        TypeData::Union { .. } => true,
        TypeData::Object { name: None, members, call_signatures } => {
            members.is_empty() && call_signatures.len() == 1
        }
        _ => false,
    }
}

fn parameters_to_string(program: &Program, signature: &Signature, depth: u32) -> String {
    let last = signature.parameters.len().saturating_sub(1);
    signature
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let prefix = if signature.has_rest_parameter && i == last { "..." } else { "" };
            format!("{}{}: {}", prefix, p.name, type_to_string(program, p.type_id, depth + 1))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn signature_to_string(program: &Program, name: &str, signature: &Signature, depth: u32) -> String {
    format!(
        "{}({}): {}",
        name,
        parameters_to_string(program, signature, depth),
        type_to_string(program, signature.return_type, depth + 1)
    )
}

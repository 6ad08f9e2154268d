//! The binder.
//!
//! Walks a source file and builds its scopes and symbols:
//! - File scope plus one scope per block
//! - `var` hoisting to the file scope
//! - Function overload and interface declaration merging
//! - Separate value and type meanings per scope
//!
//! Types are not resolved here. Every declaration is handed to the checker
//! as a [`Declaration`] that still borrows the file's AST.

use crate::program::{FileId, Location, Program};
use crate::symbol::{Assignment, ScopeId};
use exprcheck_ast::node::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_ast::types::*;
use exprcheck_ast::visitor::{walk_block, walk_source_file, AstVisitor};
use exprcheck_core::text::TextSpan;
use exprcheck_diagnostics::messages;

/// A declaration waiting for type resolution.
#[derive(Clone, Copy)]
pub(crate) enum Declaration<'a> {
    Variable {
        scope: ScopeId,
        is_const: bool,
        type_annotation: Option<&'a TypeNode<'a>>,
        initializer: Option<&'a Expression<'a>>,
    },
    Function {
        scope: ScopeId,
        parameters: &'a [ParameterDeclaration<'a>],
        return_type: Option<&'a TypeNode<'a>>,
    },
    Interface {
        scope: ScopeId,
        members: &'a [TypeElement<'a>],
    },
    TypeAlias {
        scope: ScopeId,
        name_span: TextSpan,
        type_node: &'a TypeNode<'a>,
    },
}

/// `target = value;` found in an expression statement.
#[derive(Clone, Copy)]
pub(crate) struct PendingAssignment<'a> {
    pub scope: ScopeId,
    pub target: &'a Identifier<'a>,
    pub value: &'a Expression<'a>,
    pub end: u32,
}

/// Everything the binder found in one file, in source order.
#[derive(Default)]
pub(crate) struct BoundFile<'a> {
    pub declarations: Vec<(SymbolId, Declaration<'a>)>,
    pub assignments: Vec<PendingAssignment<'a>>,
}

pub(crate) struct Binder<'p, 'a> {
    program: &'p mut Program,
    file: FileId,
    scope_stack: Vec<ScopeId>,
    bound: BoundFile<'a>,
}

impl<'p, 'a> Binder<'p, 'a> {
    pub fn new(program: &'p mut Program, file: FileId, file_scope: ScopeId) -> Self {
        Self {
            program,
            file,
            scope_stack: vec![file_scope],
            bound: BoundFile::default(),
        }
    }

    pub fn bind_source_file(mut self, source_file: &SourceFile<'a>) -> BoundFile<'a> {
        walk_source_file(&mut self, source_file);
        self.bound
    }

    fn current_scope(&self) -> ScopeId {
        self.scope_stack[self.scope_stack.len() - 1]
    }

    fn file_scope(&self) -> ScopeId {
        self.scope_stack[0]
    }

    /// Declare a value symbol, merging with a compatible existing one.
    fn declare_value(
        &mut self,
        scope: ScopeId,
        name: &Identifier<'a>,
        flags: SymbolFlags,
        declaration: NodeId,
    ) -> SymbolId {
        let key = self.program.interner.intern(name.text);
        let existing = self.program.scope(scope).values.get(&key).copied();
        let symbol = match existing {
            Some(existing) if Self::can_merge(self.program.symbol(existing).flags, flags) => existing,
            Some(_) => {
                self.program.error(
                    self.file,
                    name.data.span(),
                    &messages::DUPLICATE_IDENTIFIER_0,
                    &[name.text],
                );
                let any = self.program.types.any_type;
                self.program.create_symbol(name.text, flags, any)
            }
            None => {
                let any = self.program.types.any_type;
                let symbol = self.program.create_symbol(name.text, flags, any);
                self.program.scope_mut(scope).values.insert(key, symbol);
                symbol
            }
        };
        self.record_declaration(symbol, name, declaration);
        symbol
    }

    fn declare_type(&mut self, name: &Identifier<'a>, flags: SymbolFlags, declaration: NodeId) -> Option<SymbolId> {
        let scope = self.current_scope();
        let key = self.program.interner.intern(name.text);
        let existing = self.program.scope(scope).types.get(&key).copied();
        match existing {
            Some(existing) if Self::can_merge(self.program.symbol(existing).flags, flags) => {
                self.record_declaration(existing, name, declaration);
                Some(existing)
            }
            Some(_) => {
                self.program.error(
                    self.file,
                    name.data.span(),
                    &messages::DUPLICATE_IDENTIFIER_0,
                    &[name.text],
                );
                None
            }
            None => {
                let declared_type = if flags.contains(SymbolFlags::INTERFACE) {
                    self.program.types.create_named_object(name.text)
                } else {
                    self.program.types.any_type
                };
                let symbol = self.program.create_symbol(name.text, flags, declared_type);
                self.program.scope_mut(scope).types.insert(key, symbol);
                self.record_declaration(symbol, name, declaration);
                Some(symbol)
            }
        }
    }

    fn can_merge(existing: SymbolFlags, new: SymbolFlags) -> bool {
        (existing.contains(SymbolFlags::FUNCTION) && new.contains(SymbolFlags::FUNCTION))
            || (existing.contains(SymbolFlags::INTERFACE) && new.contains(SymbolFlags::INTERFACE))
            || (existing.contains(SymbolFlags::FUNCTION_SCOPED_VARIABLE)
                && new.contains(SymbolFlags::FUNCTION_SCOPED_VARIABLE))
    }

    fn record_declaration(&mut self, symbol: SymbolId, name: &Identifier<'a>, declaration: NodeId) {
        let location = Location::new(self.file, name.data.range.pos);
        self.program.symbol_mut(symbol).declarations.push(location);
        self.program.files[self.file.index()]
            .declarations
            .insert(declaration, symbol);
    }
}

impl<'p, 'a> AstVisitor<'a> for Binder<'p, 'a> {
    fn visit_variable_declaration(
        &mut self,
        statement: &VariableStatement<'a>,
        node: &VariableDeclaration<'a>,
    ) {
        if node.name.text.is_empty() {
            return;
        }
        let list_flags = statement.declaration_list.data.flags;
        let is_const = list_flags.contains(NodeFlags::CONST);
        let (scope, flags) = if list_flags.intersects(NodeFlags::BLOCK_SCOPED) {
            let flags = if is_const {
                SymbolFlags::BLOCK_SCOPED_VARIABLE | SymbolFlags::CONST
            } else {
                SymbolFlags::BLOCK_SCOPED_VARIABLE
            };
            (self.current_scope(), flags)
        } else {
            (self.file_scope(), SymbolFlags::FUNCTION_SCOPED_VARIABLE)
        };
        let symbol = self.declare_value(scope, &node.name, flags, node.data.id);
        self.bound.declarations.push((
            symbol,
            Declaration::Variable {
                scope: self.current_scope(),
                is_const,
                type_annotation: node.type_annotation,
                initializer: node.initializer,
            },
        ));
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration<'a>) {
        if node.name.text.is_empty() {
            return;
        }
        let scope = self.current_scope();
        let symbol = self.declare_value(scope, &node.name, SymbolFlags::FUNCTION, node.data.id);
        self.bound.declarations.push((
            symbol,
            Declaration::Function {
                scope,
                parameters: node.parameters,
                return_type: node.return_type,
            },
        ));
    }

    fn visit_interface_declaration(&mut self, node: &InterfaceDeclaration<'a>) {
        if let Some(symbol) = self.declare_type(&node.name, SymbolFlags::INTERFACE, node.data.id) {
            self.bound.declarations.push((
                symbol,
                Declaration::Interface {
                    scope: self.current_scope(),
                    members: node.members,
                },
            ));
        }
    }

    fn visit_type_alias_declaration(&mut self, node: &TypeAliasDeclaration<'a>) {
        if let Some(symbol) = self.declare_type(&node.name, SymbolFlags::TYPE_ALIAS, node.data.id) {
            self.bound.declarations.push((
                symbol,
                Declaration::TypeAlias {
                    scope: self.current_scope(),
                    name_span: node.name.data.span(),
                    type_node: node.type_node,
                },
            ));
        }
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        let parent = self.current_scope();
        let scope = self.program.create_scope(Some(parent), self.file, node.data.range);
        self.scope_stack.push(scope);
        walk_block(self, node);
        self.scope_stack.pop();
    }

    fn visit_expression_statement(&mut self, node: &ExpressionStatement<'a>) {
        if let Expression::Binary(binary) = node.expression {
            if binary.operator_token.kind() == SyntaxKind::EqualsToken {
                if let Expression::Identifier(target) = binary.left {
                    self.bound.assignments.push(PendingAssignment {
                        scope: self.current_scope(),
                        target,
                        value: binary.right,
                        end: node.data.range.end,
                    });
                }
            }
        }
    }
}

/// Record a resolved assignment in the scope it appears in.
pub(crate) fn record_assignment(program: &mut Program, scope: ScopeId, assignment: Assignment) {
    program.scope_mut(scope).assignments.push(assignment);
}

//! AST visitor trait for traversing declaration sources.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, so an
//! implementation overrides only the nodes it cares about and calls the walker
//! to keep descending.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        walk_source_file(self, node);
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_variable_statement(&mut self, node: &VariableStatement<'a>) {
        for decl in node.declaration_list.declarations.iter() {
            self.visit_variable_declaration(node, decl);
        }
    }

    /// Visit one declarator together with the statement owning it, which
    /// carries the `let`/`const` flags.
    fn visit_variable_declaration(
        &mut self,
        _statement: &VariableStatement<'a>,
        _node: &VariableDeclaration<'a>,
    ) {
    }

    fn visit_function_declaration(&mut self, _node: &FunctionDeclaration<'a>) {}

    fn visit_interface_declaration(&mut self, _node: &InterfaceDeclaration<'a>) {}

    fn visit_type_alias_declaration(&mut self, _node: &TypeAliasDeclaration<'a>) {}

    fn visit_block(&mut self, node: &Block<'a>) {
        walk_block(self, node);
    }

    fn visit_expression_statement(&mut self, _node: &ExpressionStatement<'a>) {}
}

pub fn walk_source_file<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, node: &SourceFile<'a>) {
    for stmt in node.statements.iter() {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => visitor.visit_variable_statement(n),
        Statement::FunctionDeclaration(n) => visitor.visit_function_declaration(n),
        Statement::InterfaceDeclaration(n) => visitor.visit_interface_declaration(n),
        Statement::TypeAliasDeclaration(n) => visitor.visit_type_alias_declaration(n),
        Statement::Block(n) => visitor.visit_block(n),
        Statement::ExpressionStatement(n) => visitor.visit_expression_statement(n),
        Statement::EmptyStatement(_) => {}
    }
}

pub fn walk_block<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, node: &Block<'a>) {
    for stmt in node.statements.iter() {
        visitor.visit_statement(stmt);
    }
}

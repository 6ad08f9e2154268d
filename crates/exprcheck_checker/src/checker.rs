//! Operator rules over [`TypeKind`].

use exprcheck_ast::node::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_core::text::TextSpan;
use exprcheck_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use exprcheck_types::{ArgTypes, SymbolTable, TypeKind, TypeRef, TypeRepository};
use tracing::{debug, trace};

/// Nesting depth past which operands are typed `any` instead of walked.
/// Left-associative chains and member/call chains are parsed by iteration,
/// so the parser's own depth limit does not bound the tree.
const MAX_CHECK_DEPTH: u32 = 500;

/// Check `expression` against `scope`, returning diagnostics in pre-order:
/// a node's own diagnostics come before those of its operands, and left
/// operands before right ones.
#[tracing::instrument(level = "debug", skip_all, fields(bindings = scope.len()))]
pub fn check(
    expression: &Expression<'_>,
    scope: &SymbolTable,
    repository: &dyn TypeRepository,
) -> Vec<Diagnostic> {
    let mut checker = Checker {
        scope,
        repository,
        diagnostics: Vec::new(),
        depth: 0,
        depth_exceeded: false,
    };
    checker.check_expression(expression);
    checker.diagnostics
}

struct Checker<'s> {
    scope: &'s SymbolTable,
    repository: &'s dyn TypeRepository,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
    /// The depth diagnostic is reported once per check.
    depth_exceeded: bool,
}

/// Diagnostics a node reports about itself, emitted ahead of its operands'.
#[derive(Default)]
struct Own(Vec<Diagnostic>);

impl Own {
    fn error(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.0.push(Diagnostic::new(span, message, args));
    }
}

impl<'s> Checker<'s> {
    fn ty(&self, kind: TypeKind) -> TypeRef {
        self.repository.type_by_kind(kind)
    }

    /// Insert a node's own diagnostics at `mark`, the position the
    /// diagnostics list had when the node was entered.
    fn emit(&mut self, mark: usize, own: Own) {
        for diagnostic in &own.0 {
            trace!(code = diagnostic.code, start = diagnostic.start(), end = diagnostic.end(), "{}", diagnostic.message_text);
        }
        self.diagnostics.splice(mark..mark, own.0);
    }

    fn check_expression(&mut self, expr: &Expression<'_>) -> TypeRef {
        if self.depth >= MAX_CHECK_DEPTH {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                debug!(start = expr.span().start, "expression exceeds the checking depth");
                let mark = self.diagnostics.len();
                let mut own = Own::default();
                own.error(expr.span(), &messages::EXPRESSION_IS_TOO_DEEPLY_NESTED_TO_CHECK, &[]);
                self.emit(mark, own);
            }
            return self.ty(TypeKind::Any);
        }
        self.depth += 1;
        let ty = self.check_node(expr);
        self.depth -= 1;
        ty
    }

    fn check_node(&mut self, expr: &Expression<'_>) -> TypeRef {
        match expr {
            Expression::Identifier(id) => self.check_identifier(id),
            Expression::NumericLiteral(_) => self.ty(TypeKind::Number),
            Expression::StringLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_) => {
                self.ty(TypeKind::String)
            }
            Expression::Keyword(kw) => match kw.data.kind {
                SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => self.ty(TypeKind::Boolean),
                _ => self.ty(TypeKind::Null),
            },
            Expression::Parenthesized(n) => self.check_expression(n.expression),
            Expression::PropertyAccess(n) => self.check_property_access(n),
            Expression::ElementAccess(n) => {
                self.check_expression(n.expression);
                self.check_expression(n.argument_expression);
                self.ty(TypeKind::Any)
            }
            Expression::Call(n) => self.check_call(n),
            Expression::PrefixUnary(n) => {
                self.check_expression(n.operand);
                match n.operator {
                    SyntaxKind::ExclamationToken => self.ty(TypeKind::Boolean),
                    _ => self.ty(TypeKind::Number),
                }
            }
            Expression::TypeOf(n) => {
                self.check_expression(n.expression);
                self.ty(TypeKind::String)
            }
            Expression::Void(n) => {
                self.check_expression(n.expression);
                self.ty(TypeKind::Undefined)
            }
            Expression::Binary(n) => self.check_binary(n),
            Expression::Conditional(n) => {
                self.check_expression(n.condition);
                let when_true = self.check_expression(n.when_true);
                let when_false = self.check_expression(n.when_false);
                self.agreeing(when_true, when_false)
            }
            // Already reported by the parser
            Expression::Missing(_) => self.ty(TypeKind::Any),
        }
    }

    fn check_identifier(&mut self, id: &Identifier<'_>) -> TypeRef {
        if let Some(symbol) = self.scope.get(id.text) {
            return symbol.ty();
        }
        if id.text == "undefined" {
            return self.ty(TypeKind::Undefined);
        }
        let mark = self.diagnostics.len();
        let mut own = Own::default();
        own.error(id.data.span(), &messages::_0_IS_NOT_DEFINED, &[id.text]);
        self.emit(mark, own);
        self.ty(TypeKind::Any)
    }

    fn check_property_access(&mut self, node: &PropertyAccessExpression<'_>) -> TypeRef {
        let mark = self.diagnostics.len();
        let object = self.check_expression(node.expression);
        match object.kind() {
            TypeKind::Object | TypeKind::Function | TypeKind::Other => {
                if let Some(member) = object.members().get(node.name.text) {
                    return member.ty();
                }
                let mut own = Own::default();
                own.error(
                    node.name.data.span(),
                    &messages::PROPERTY_0_DOES_NOT_EXIST_ON_TYPE_1,
                    &[node.name.text, object.name()],
                );
                self.emit(mark, own);
                self.ty(TypeKind::Any)
            }
            _ => self.ty(TypeKind::Any),
        }
    }

    fn check_call(&mut self, node: &CallExpression<'_>) -> TypeRef {
        let mark = self.diagnostics.len();
        let callee = self.check_expression(node.expression);
        for argument in node.arguments {
            self.check_expression(argument);
        }
        if callee.kind() == TypeKind::Any {
            return self.ty(TypeKind::Any);
        }

        let count = node.arguments.len();
        let signatures = callee.call_signatures();
        let mut own = Own::default();
        let result = if let Some(signature) = signatures.iter().find(|s| s.arg_types.accepts_count(count)) {
            signature.return_type.clone()
        } else if let Some(first) = signatures.first() {
            let expected = first.arg_types.min_count().to_string();
            let got = count.to_string();
            let message = match first.arg_types {
                ArgTypes::Fixed(_) => &messages::EXPECTED_0_ARGUMENTS_BUT_GOT_1,
                _ => &messages::EXPECTED_AT_LEAST_0_ARGUMENTS_BUT_GOT_1,
            };
            own.error(node.data.span(), message, &[expected.as_str(), got.as_str()]);
            self.ty(TypeKind::Any)
        } else if callee.kind() == TypeKind::Function {
            self.ty(TypeKind::Any)
        } else {
            own.error(
                node.expression.span(),
                &messages::THIS_EXPRESSION_IS_NOT_CALLABLE_TYPE_0_HAS_NO_CALL_SIGNATURES,
                &[callee.name()],
            );
            self.ty(TypeKind::Any)
        };
        self.emit(mark, own);
        result
    }

    fn check_binary(&mut self, node: &BinaryExpression<'_>) -> TypeRef {
        let mark = self.diagnostics.len();
        let left = self.check_expression(node.left);
        let right = self.check_expression(node.right);
        let (left_kind, right_kind) = (left.kind(), right.kind());
        let mut own = Own::default();

        let result = match node.operator_token.kind() {
            SyntaxKind::AsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PercentToken
            | SyntaxKind::AsteriskAsteriskToken => {
                if !is_number_or_any(left_kind) {
                    own.error(
                        node.left.span(),
                        &messages::THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_NUMBER_OR_ANY,
                        &[],
                    );
                }
                if !is_number_or_any(right_kind) {
                    own.error(
                        node.right.span(),
                        &messages::THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_NUMBER_OR_ANY,
                        &[],
                    );
                }
                self.ty(TypeKind::Number)
            }
            SyntaxKind::PlusToken => {
                if left_kind == TypeKind::String || right_kind == TypeKind::String {
                    self.ty(TypeKind::String)
                } else if left_kind == TypeKind::Any || right_kind == TypeKind::Any {
                    self.ty(TypeKind::Any)
                } else if left_kind == TypeKind::Number && right_kind == TypeKind::Number {
                    self.ty(TypeKind::Number)
                } else {
                    own.error(
                        node.data.span(),
                        &messages::THE_BINARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_TYPE_1_AND_2,
                        &["+", left.name(), right.name()],
                    );
                    self.ty(TypeKind::Any)
                }
            }
            SyntaxKind::InstanceOfKeyword => {
                if !matches!(left_kind, TypeKind::Object | TypeKind::Any) {
                    own.error(
                        node.left.span(),
                        &messages::THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_OBJECT_OR_ANY,
                        &[],
                    );
                }
                if !matches!(right_kind, TypeKind::Function | TypeKind::Any) {
                    own.error(
                        node.right.span(),
                        &messages::THE_RIGHT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_FUNCTION_OR_ANY,
                        &[],
                    );
                }
                self.ty(TypeKind::Boolean)
            }
            SyntaxKind::InKeyword => {
                if !matches!(
                    left_kind,
                    TypeKind::Number | TypeKind::String | TypeKind::Symbol | TypeKind::Any
                ) {
                    own.error(
                        node.left.span(),
                        &messages::THE_LEFT_HAND_SIDE_OF_AN_IN_EXPRESSION_MUST_BE_OF_TYPE_STRING_NUMBER_SYMBOL_OR_ANY,
                        &[],
                    );
                }
                if !matches!(right_kind, TypeKind::Object | TypeKind::Any) {
                    own.error(
                        node.right.span(),
                        &messages::THE_RIGHT_HAND_SIDE_OF_AN_IN_EXPRESSION_MUST_BE_OF_TYPE_OBJECT_OR_ANY,
                        &[],
                    );
                }
                self.ty(TypeKind::Boolean)
            }
            // Equality is deliberately unchecked
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken => self.ty(TypeKind::Boolean),
            SyntaxKind::AmpersandAmpersandToken | SyntaxKind::EqualsToken => right,
            SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken => self.agreeing(left, right),
            SyntaxKind::AmpersandToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => self.ty(TypeKind::Number),
            _ => self.ty(TypeKind::Any),
        };
        self.emit(mark, own);
        result
    }

    /// `left` when both sides have the same kind, `any` otherwise.
    fn agreeing(&self, left: TypeRef, right: TypeRef) -> TypeRef {
        if left.kind() == right.kind() {
            left
        } else {
            self.ty(TypeKind::Any)
        }
    }
}

fn is_number_or_any(kind: TypeKind) -> bool {
    matches!(kind, TypeKind::Number | TypeKind::Any)
}

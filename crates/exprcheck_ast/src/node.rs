//! AST node definitions.
//!
//! Expressions are what the checker consumes; statements, declarations and
//! type nodes are what the host compiles into bindings. Nodes reference their
//! children through arena-allocated references.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use exprcheck_core::text::{TextRange, TextSpan};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Source position range (character offsets).
    pub range: TextRange,
    pub flags: NodeFlags,
    /// Unique node ID, assigned by the parser.
    pub id: NodeId,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            id: NodeId::INVALID,
        }
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.range.to_span()
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: String,
    pub text: String,
}

impl SourceFile<'_> {
    /// The source text covered by a range.
    pub fn text_of(&self, range: TextRange) -> String {
        self.text
            .chars()
            .skip(range.pos as usize)
            .take(range.len() as usize)
            .collect()
    }
}

// ============================================================================
// Token
// ============================================================================

/// A simple token with kind and range.
#[derive(Debug, Clone)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            data: NodeData::new(kind, pos, end),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }
}

// ============================================================================
// Identifier
// ============================================================================

#[derive(Debug, Clone)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    /// `any`, `string`, `undefined`, ...; the keyword is `data.kind`.
    Keyword(KeywordTypeNode),
    Literal(LiteralTypeNode<'a>),
    TypeReference(TypeReferenceNode<'a>),
    Array(ArrayTypeNode<'a>),
    Union(UnionTypeNode<'a>),
    Function(FunctionTypeNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    Parenthesized(ParenthesizedTypeNode<'a>),
}

impl<'a> TypeNode<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeNode::Keyword(n) => &n.data,
            TypeNode::Literal(n) => &n.data,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::Array(n) => &n.data,
            TypeNode::Union(n) => &n.data,
            TypeNode::Function(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::Parenthesized(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct KeywordTypeNode {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    /// A string, numeric or boolean literal expression.
    pub literal: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: Identifier<'a>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct UnionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ParenthesizedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

/// A member of an interface or type literal.
#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignature<'a>),
    MethodSignature(MethodSignature<'a>),
}

impl<'a> TypeElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeElement::PropertySignature(n) => &n.data,
            TypeElement::MethodSignature(n) => &n.data,
        }
    }

    pub fn name(&self) -> &Identifier<'a> {
        match self {
            TypeElement::PropertySignature(n) => &n.name,
            TypeElement::MethodSignature(n) => &n.name,
        }
    }
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: Identifier<'a>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(LiteralExpression<'a>),
    NumericLiteral(LiteralExpression<'a>),
    NoSubstitutionTemplateLiteral(LiteralExpression<'a>),
    /// `true`, `false` or `null`; the keyword is `data.kind`.
    Keyword(KeywordExpression),
    Parenthesized(ParenthesizedExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    PrefixUnary(PrefixUnaryExpression<'a>),
    TypeOf(TypeOfExpression<'a>),
    Void(VoidExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    /// Placeholder produced by the parser after a syntax error.
    Missing(MissingExpression),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::NumericLiteral(n) => &n.data,
            Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::Keyword(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::TypeOf(n) => &n.data,
            Expression::Void(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Missing(n) => &n.data,
        }
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.data().span()
    }
}

#[derive(Debug)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    /// The literal's value (string contents without quotes, or number text).
    pub text: &'a str,
}

#[derive(Debug)]
pub struct KeywordExpression {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct MissingExpression {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TypeOfExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct VoidExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator_token: Token,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    VariableStatement(VariableStatement<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    InterfaceDeclaration(InterfaceDeclaration<'a>),
    TypeAliasDeclaration(TypeAliasDeclaration<'a>),
    Block(Block<'a>),
    ExpressionStatement(ExpressionStatement<'a>),
    EmptyStatement(EmptyStatement),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::VariableStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::InterfaceDeclaration(n) => &n.data,
            Statement::TypeAliasDeclaration(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::EmptyStatement(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

/// `let`/`const`/`var` declarators; the keyword is recorded in `data.flags`.
#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct EmptyStatement {
    pub data: NodeData,
}

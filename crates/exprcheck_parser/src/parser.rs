//! The parser implementation.
//!
//! A recursive descent parser that consumes tokens from the scanner and builds
//! an arena-allocated AST. Two entry points share the expression grammar:
//! [`Parser::parse_expression`] for a single checked expression and
//! [`Parser::parse_source_file`] for declaration sources compiled by the host.

use bumpalo::Bump;
use exprcheck_ast::node::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_ast::types::*;
use exprcheck_core::text::TextSpan;
use exprcheck_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use exprcheck_scanner::Scanner;

use crate::precedence::BinaryPrecedence;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Move a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// The parser produces expressions and source files from source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner,
    file_name: String,
    source_text: String,
    /// End of the most recently consumed token.
    prev_token_end: u32,
    next_node_id: u32,
    diagnostics: DiagnosticCollection,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        let mut parser = Self {
            arena,
            scanner: Scanner::new(source_text),
            file_name: file_name.to_string(),
            source_text: source_text.to_string(),
            prev_token_end: 0,
            next_node_id: 0,
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
        };
        parser.next_token();
        parser
    }

    /// Parse the whole text as one expression. Tokens left after the
    /// expression are reported and ignored.
    pub fn parse_expression(&mut self) -> &'a Expression<'a> {
        let expr = self.parse_assignment_expression();
        if self.current_token() != SyntaxKind::EndOfFileToken {
            let text = self.current_token_text();
            self.error(&messages::UNEXPECTED_TOKEN_AFTER_EXPRESSION, &[&text]);
        }
        self.arena.alloc(expr)
    }

    pub fn parse_source_file(&mut self) -> SourceFile<'a> {
        let statements = self.parse_statements();
        let end = self.scanner.text_len() as u32;
        let data = self.node_data(SyntaxKind::SourceFile, 0, end);
        SourceFile {
            data,
            statements,
            file_name: self.file_name.clone(),
            text: self.source_text.clone(),
        }
    }

    /// Scanner and parser diagnostics, in the order they were produced.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.extend(self.scanner.take_diagnostics());
        let mut sorted = diagnostics.into_diagnostics();
        sorted.sort_by_key(|d| d.start());
        let mut result = DiagnosticCollection::new();
        for diag in sorted {
            result.add(diag.with_file(self.file_name.clone()));
        }
        result
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as u32;
        self.scanner.scan()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    fn current_token_text(&self) -> String {
        match self.current_token().token_text() {
            Some(text) => text.to_string(),
            None => self.token_value().to_string(),
        }
    }

    fn node_data(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeData {
        let mut data = NodeData::new(kind, pos, end);
        data.id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        data
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            let text = kind.token_text().unwrap_or("token");
            self.error(&messages::_0_EXPECTED, &[text]);
            false
        }
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token() == kind {
            let pos = self.token_pos();
            let end = self.token_end();
            self.next_token();
            Some(Token::new(kind, pos, end))
        } else {
            None
        }
    }

    fn parse_expected_semicolon(&mut self) {
        if self.current_token() == SyntaxKind::SemicolonToken {
            self.next_token();
            return;
        }
        // ASI: don't error on a line break, close brace, or EOF
        if self.scanner.has_preceding_line_break()
            || matches!(
                self.current_token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            )
        {
            return;
        }
        self.error(&messages::_0_EXPECTED, &[";"]);
    }

    fn error(&mut self, msg: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(self.token_pos(), self.token_end());
        self.diagnostics.add(Diagnostic::new(span, msg, args));
    }

    fn next_token_is_identifier(&mut self) -> bool {
        self.scanner.look_ahead(|scanner| {
            scanner.scan();
            scanner.token().is_identifier_or_contextual_keyword()
        })
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statements(&mut self) -> &'a [Statement<'a>] {
        let mut statements = Vec::new();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && self.current_token() != SyntaxKind::CloseBraceToken
        {
            let saved_pos = self.scanner.token_start();
            statements.push(self.parse_statement());

            // Error recovery: never stall on the same token.
            if self.scanner.token_start() == saved_pos
                && self.current_token() != SyntaxKind::EndOfFileToken
            {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
            }
        }
        alloc_vec_in(self.arena, statements)
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        match self.current_token() {
            SyntaxKind::SemicolonToken => {
                let data = self.node_data(SyntaxKind::EmptyStatement, self.token_pos(), self.token_end());
                self.next_token();
                Statement::EmptyStatement(EmptyStatement { data })
            }
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::DeclareKeyword if self.next_token_starts_declaration() => {
                let pos = self.token_pos();
                self.next_token();
                self.parse_declaration(pos, NodeFlags::AMBIENT)
            }
            _ => {
                let pos = self.token_pos();
                self.parse_declaration(pos, NodeFlags::NONE)
            }
        }
    }

    fn next_token_starts_declaration(&mut self) -> bool {
        self.scanner.look_ahead(|scanner| {
            matches!(
                scanner.scan(),
                SyntaxKind::VarKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::ConstKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::TypeKeyword
            )
        })
    }

    fn parse_declaration(&mut self, pos: u32, modifier_flags: NodeFlags) -> Statement<'a> {
        match self.current_token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifier_flags)
            }
            SyntaxKind::LetKeyword if self.next_token_is_identifier() => {
                self.parse_variable_statement(pos, modifier_flags)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifier_flags),
            SyntaxKind::InterfaceKeyword if self.next_token_is_identifier() => {
                self.parse_interface_declaration(pos)
            }
            SyntaxKind::TypeKeyword if self.next_token_is_identifier() => {
                self.parse_type_alias_declaration(pos)
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> Block<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements();
        self.expect_token(SyntaxKind::CloseBraceToken);
        let data = self.node_data(SyntaxKind::Block, pos, self.prev_token_end);
        Block { data, statements }
    }

    fn parse_variable_statement(&mut self, pos: u32, modifier_flags: NodeFlags) -> Statement<'a> {
        let list_pos = self.token_pos();
        let keyword_flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }

        let mut list_data =
            self.node_data(SyntaxKind::VariableDeclarationList, list_pos, self.prev_token_end);
        list_data.flags = keyword_flags | modifier_flags;
        self.parse_expected_semicolon();

        let mut data = self.node_data(SyntaxKind::VariableStatement, pos, self.prev_token_end);
        data.flags = modifier_flags;
        Statement::VariableStatement(VariableStatement {
            data,
            declaration_list: VariableDeclarationList {
                data: list_data,
                declarations: alloc_vec_in(self.arena, declarations),
            },
        })
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let pos = self.token_pos();
        let name = self.parse_identifier();
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            let expr = self.parse_assignment_expression();
            Some(&*self.arena.alloc(expr))
        } else {
            None
        };
        let data = self.node_data(SyntaxKind::VariableDeclaration, pos, self.prev_token_end);
        VariableDeclaration { data, name, type_annotation, initializer }
    }

    fn parse_function_declaration(&mut self, pos: u32, modifier_flags: NodeFlags) -> Statement<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let name = self.parse_identifier();
        let parameters = self.parse_parameter_list();
        let return_type = self.parse_type_annotation();
        self.parse_expected_semicolon();
        let mut data = self.node_data(SyntaxKind::FunctionDeclaration, pos, self.prev_token_end);
        data.flags = modifier_flags;
        Statement::FunctionDeclaration(FunctionDeclaration { data, name, parameters, return_type })
    }

    fn parse_interface_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.expect_token(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let members = self.parse_type_members();
        let data = self.node_data(SyntaxKind::InterfaceDeclaration, pos, self.prev_token_end);
        Statement::InterfaceDeclaration(InterfaceDeclaration { data, name, members })
    }

    fn parse_type_alias_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.expect_token(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        self.expect_token(SyntaxKind::EqualsToken);
        let type_node = self.parse_type_and_alloc();
        self.parse_expected_semicolon();
        let data = self.node_data(SyntaxKind::TypeAliasDeclaration, pos, self.prev_token_end);
        Statement::TypeAliasDeclaration(TypeAliasDeclaration { data, name, type_node })
    }

    fn parse_expression_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let expr = self.parse_assignment_expression();
        let expression = self.arena.alloc(expr);
        self.parse_expected_semicolon();
        let data = self.node_data(SyntaxKind::ExpressionStatement, pos, self.prev_token_end);
        Statement::ExpressionStatement(ExpressionStatement { data, expression })
    }

    // ========================================================================
    // Parameters and type members
    // ========================================================================

    fn parse_parameter_list(&mut self) -> &'a [ParameterDeclaration<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut params: Vec<ParameterDeclaration<'a>> = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            if params.last().is_some_and(|p| p.dot_dot_dot_token.is_some()) {
                self.error(&messages::A_REST_PARAMETER_MUST_BE_LAST, &[]);
            }
            params.push(self.parse_parameter());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, params)
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier();
        // Optional marker; optionality does not change arity checks.
        self.optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let data = self.node_data(SyntaxKind::Parameter, pos, self.prev_token_end);
        ParameterDeclaration { data, dot_dot_dot_token, name, type_annotation }
    }

    fn parse_type_members(&mut self) -> &'a [TypeElement<'a>] {
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            let saved_pos = self.scanner.token_start();
            members.push(self.parse_type_member());
            if self.optional_token(SyntaxKind::SemicolonToken).is_none() {
                self.optional_token(SyntaxKind::CommaToken);
            }
            if self.scanner.token_start() == saved_pos {
                self.next_token();
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        alloc_vec_in(self.arena, members)
    }

    fn parse_type_member(&mut self) -> TypeElement<'a> {
        let pos = self.token_pos();
        let name = self.parse_property_name();
        self.optional_token(SyntaxKind::QuestionToken);
        if self.current_token() == SyntaxKind::OpenParenToken {
            let parameters = self.parse_parameter_list();
            let return_type = self.parse_type_annotation();
            let data = self.node_data(SyntaxKind::MethodSignature, pos, self.prev_token_end);
            return TypeElement::MethodSignature(MethodSignature { data, name, parameters, return_type });
        }
        let type_annotation = self.parse_type_annotation();
        let data = self.node_data(SyntaxKind::PropertySignature, pos, self.prev_token_end);
        TypeElement::PropertySignature(PropertySignature { data, name, type_annotation })
    }

    /// Member names may be any identifier or keyword.
    fn parse_property_name(&mut self) -> Identifier<'a> {
        if self.current_token().is_keyword() {
            let pos = self.token_pos();
            let end = self.token_end();
            let text = self.arena.alloc_str(self.scanner.token_value());
            self.next_token();
            let data = self.node_data(SyntaxKind::Identifier, pos, end);
            return Identifier { data, text };
        }
        self.parse_identifier()
    }

    // ========================================================================
    // Type parsing
    // ========================================================================

    fn parse_type_annotation(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.optional_token(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc())
        } else {
            None
        }
    }

    fn parse_type_and_alloc(&mut self) -> &'a TypeNode<'a> {
        let ty = self.parse_type();
        self.arena.alloc(ty)
    }

    fn parse_type(&mut self) -> TypeNode<'a> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.error(&messages::TYPE_EXPECTED, &[]);
            self.recursion_depth -= 1;
            let data = self.node_data(SyntaxKind::AnyKeyword, self.token_pos(), self.token_pos());
            return TypeNode::Keyword(KeywordTypeNode { data });
        }
        let result = self.parse_union_type();
        self.recursion_depth -= 1;
        result
    }

    fn parse_union_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        // Leading |
        let leading_bar = self.optional_token(SyntaxKind::BarToken).is_some();
        let first = self.parse_postfix_type();

        if self.current_token() == SyntaxKind::BarToken || leading_bar {
            let mut types = vec![first];
            while self.optional_token(SyntaxKind::BarToken).is_some() {
                types.push(self.parse_postfix_type());
            }
            if types.len() == 1 {
                return types.remove(0);
            }
            let data = self.node_data(SyntaxKind::UnionType, pos, self.prev_token_end);
            return TypeNode::Union(UnionTypeNode {
                data,
                types: alloc_vec_in(self.arena, types),
            });
        }

        first
    }

    fn parse_postfix_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let mut ty = self.parse_primary_type();
        while self.current_token() == SyntaxKind::OpenBracketToken
            && !self.scanner.has_preceding_line_break()
        {
            self.next_token();
            self.expect_token(SyntaxKind::CloseBracketToken);
            let element_type = self.arena.alloc(ty);
            let data = self.node_data(SyntaxKind::ArrayType, pos, self.prev_token_end);
            ty = TypeNode::Array(ArrayTypeNode { data, element_type });
        }
        ty
    }

    fn parse_primary_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let end = self.token_end();
        match self.current_token() {
            kind @ (SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword) => {
                self.next_token();
                let data = self.node_data(kind, pos, end);
                TypeNode::Keyword(KeywordTypeNode { data })
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let literal = self.parse_primary_expression();
                let literal = self.arena.alloc(literal);
                let data = self.node_data(SyntaxKind::LiteralType, pos, self.prev_token_end);
                TypeNode::Literal(LiteralTypeNode { data, literal })
            }
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_type_members();
                let data = self.node_data(SyntaxKind::TypeLiteral, pos, self.prev_token_end);
                TypeNode::TypeLiteral(TypeLiteralNode { data, members })
            }
            SyntaxKind::OpenParenToken if self.is_start_of_function_type() => {
                let parameters = self.parse_parameter_list();
                self.expect_token(SyntaxKind::EqualsGreaterThanToken);
                let return_type = self.parse_type_and_alloc();
                let data = self.node_data(SyntaxKind::FunctionType, pos, self.prev_token_end);
                TypeNode::Function(FunctionTypeNode { data, parameters, return_type })
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type_and_alloc();
                self.expect_token(SyntaxKind::CloseParenToken);
                let data = self.node_data(SyntaxKind::ParenthesizedType, pos, self.prev_token_end);
                TypeNode::Parenthesized(ParenthesizedTypeNode { data, type_node })
            }
            kind if kind.is_identifier_or_contextual_keyword() => {
                let type_name = self.parse_identifier();
                let data = self.node_data(SyntaxKind::TypeReference, pos, self.prev_token_end);
                TypeNode::TypeReference(TypeReferenceNode { data, type_name })
            }
            _ => {
                self.error(&messages::TYPE_EXPECTED, &[]);
                let data = self.node_data(SyntaxKind::AnyKeyword, pos, pos);
                TypeNode::Keyword(KeywordTypeNode { data })
            }
        }
    }

    /// `(` starts a function type when its matching `)` is followed by `=>`.
    fn is_start_of_function_type(&mut self) -> bool {
        self.scanner.look_ahead(|scanner| {
            let mut depth = 0u32;
            loop {
                match scanner.token() {
                    SyntaxKind::OpenParenToken => depth += 1,
                    SyntaxKind::CloseParenToken => {
                        depth -= 1;
                        if depth == 0 {
                            return scanner.scan() == SyntaxKind::EqualsGreaterThanToken;
                        }
                    }
                    SyntaxKind::EndOfFileToken => return false,
                    _ => {}
                }
                scanner.scan();
            }
        })
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.recursion_depth -= 1;
            return self.parse_missing_expression();
        }
        let expr = self.parse_conditional_expression();

        // Assignment is right-associative: a = b = c
        let result = if self.current_token() == SyntaxKind::EqualsToken {
            let pos = expr.data().range.pos;
            let op_token = Token::new(SyntaxKind::EqualsToken, self.token_pos(), self.token_end());
            self.next_token();
            let right = self.parse_assignment_expression();
            let right_ref = self.arena.alloc(right);
            let left_ref = self.arena.alloc(expr);
            let data = self.node_data(SyntaxKind::BinaryExpression, pos, self.prev_token_end);
            Expression::Binary(BinaryExpression {
                data,
                left: left_ref,
                operator_token: op_token,
                right: right_ref,
            })
        } else {
            expr
        };
        self.recursion_depth -= 1;
        result
    }

    fn parse_conditional_expression(&mut self) -> Expression<'a> {
        let expr = self.parse_binary_expression(BinaryPrecedence::Floor);

        // Ternary: cond ? true : false
        if self.current_token() == SyntaxKind::QuestionToken {
            let pos = expr.data().range.pos;
            self.next_token();
            let when_true = self.parse_assignment_expression();
            let when_true_ref = self.arena.alloc(when_true);
            self.expect_token(SyntaxKind::ColonToken);
            let when_false = self.parse_assignment_expression();
            let when_false_ref = self.arena.alloc(when_false);
            let condition = self.arena.alloc(expr);
            let data = self.node_data(SyntaxKind::ConditionalExpression, pos, self.prev_token_end);
            return Expression::Conditional(ConditionalExpression {
                data,
                condition,
                when_true: when_true_ref,
                when_false: when_false_ref,
            });
        }

        expr
    }

    fn parse_binary_expression(&mut self, floor: BinaryPrecedence) -> Expression<'a> {
        let mut left = self.parse_unary_expression();

        loop {
            let operator = self.current_token();
            let Some(precedence) = BinaryPrecedence::of(operator).filter(|&p| p > floor) else {
                break;
            };

            let pos = left.data().range.pos;
            let op_token = Token::new(operator, self.token_pos(), self.token_end());
            self.next_token();
            let right = self.parse_binary_expression(precedence.right_operand_floor());
            let left_ref = self.arena.alloc(left);
            let right_ref = self.arena.alloc(right);
            let data = self.node_data(SyntaxKind::BinaryExpression, pos, self.prev_token_end);
            left = Expression::Binary(BinaryExpression {
                data,
                left: left_ref,
                operator_token: op_token,
                right: right_ref,
            });
        }

        left
    }

    fn parse_unary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let operator = self.current_token();
        if !matches!(
            operator,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
        ) {
            return self.parse_left_hand_side_expression();
        }

        // Prefix operators nest by recursion, so they share the depth budget
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.recursion_depth -= 1;
            return self.parse_missing_expression();
        }
        self.next_token();
        let operand = self.parse_unary_expression();
        let operand = self.arena.alloc(operand);
        self.recursion_depth -= 1;

        match operator {
            SyntaxKind::TypeOfKeyword => {
                let data = self.node_data(SyntaxKind::TypeOfExpression, pos, self.prev_token_end);
                Expression::TypeOf(TypeOfExpression { data, expression: operand })
            }
            SyntaxKind::VoidKeyword => {
                let data = self.node_data(SyntaxKind::VoidExpression, pos, self.prev_token_end);
                Expression::Void(VoidExpression { data, expression: operand })
            }
            _ => {
                let data = self.node_data(SyntaxKind::PrefixUnaryExpression, pos, self.prev_token_end);
                Expression::PrefixUnary(PrefixUnaryExpression { data, operator, operand })
            }
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let mut expr = self.parse_primary_expression();

        loop {
            let pos = expr.data().range.pos;
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_property_name();
                    let expression = self.arena.alloc(expr);
                    let data =
                        self.node_data(SyntaxKind::PropertyAccessExpression, pos, self.prev_token_end);
                    expr = Expression::PropertyAccess(PropertyAccessExpression { data, expression, name });
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_assignment_expression();
                    let argument_expression = self.arena.alloc(argument);
                    self.expect_token(SyntaxKind::CloseBracketToken);
                    let expression = self.arena.alloc(expr);
                    let data =
                        self.node_data(SyntaxKind::ElementAccessExpression, pos, self.prev_token_end);
                    expr = Expression::ElementAccess(ElementAccessExpression {
                        data,
                        expression,
                        argument_expression,
                    });
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    let expression = self.arena.alloc(expr);
                    let data = self.node_data(SyntaxKind::CallExpression, pos, self.prev_token_end);
                    expr = Expression::Call(CallExpression { data, expression, arguments });
                }
                _ => break,
            }
        }

        expr
    }

    fn parse_argument_list(&mut self) -> &'a [Expression<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut args = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            args.push(self.parse_assignment_expression());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, args)
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let end = self.token_end();
        match self.current_token() {
            kind if kind.is_identifier_or_contextual_keyword() => {
                Expression::Identifier(self.parse_identifier())
            }
            kind @ (SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral) => {
                let text = self.arena.alloc_str(self.scanner.token_value());
                self.next_token();
                let data = self.node_data(kind, pos, end);
                let literal = LiteralExpression { data, text };
                match kind {
                    SyntaxKind::NumericLiteral => Expression::NumericLiteral(literal),
                    SyntaxKind::StringLiteral => Expression::StringLiteral(literal),
                    _ => Expression::NoSubstitutionTemplateLiteral(literal),
                }
            }
            kind @ (SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword) => {
                self.next_token();
                let data = self.node_data(kind, pos, end);
                Expression::Keyword(KeywordExpression { data })
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_assignment_expression();
                let expression = self.arena.alloc(inner);
                self.expect_token(SyntaxKind::CloseParenToken);
                let data = self.node_data(SyntaxKind::ParenthesizedExpression, pos, self.prev_token_end);
                Expression::Parenthesized(ParenthesizedExpression { data, expression })
            }
            _ => self.parse_missing_expression(),
        }
    }

    fn parse_missing_expression(&mut self) -> Expression<'a> {
        self.error(&messages::EXPRESSION_EXPECTED, &[]);
        let pos = self.token_pos();
        let mut data = self.node_data(SyntaxKind::MissingExpression, pos, pos);
        data.flags = NodeFlags::THIS_NODE_HAS_ERROR;
        Expression::Missing(MissingExpression { data })
    }

    fn parse_identifier(&mut self) -> Identifier<'a> {
        let pos = self.token_pos();
        let end = self.token_end();
        if self.current_token().is_identifier_or_contextual_keyword() {
            let text = self.arena.alloc_str(self.scanner.token_value());
            self.next_token();
            let data = self.node_data(SyntaxKind::Identifier, pos, end);
            Identifier { data, text }
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            let mut data = self.node_data(SyntaxKind::Identifier, pos, pos);
            data.flags = NodeFlags::THIS_NODE_HAS_ERROR;
            Identifier { data, text: "" }
        }
    }
}

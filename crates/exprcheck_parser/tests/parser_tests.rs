//! Parser integration tests.
//!
//! Verifies operator precedence, node spans and error recovery for both the
//! expression entry point and declaration sources.

use bumpalo::Bump;
use exprcheck_ast::node::*;
use exprcheck_ast::syntax_kind::SyntaxKind;
use exprcheck_parser::Parser;
use pretty_assertions::assert_eq;

/// Render an expression as a fully parenthesized string with its span.
fn render(expr: &Expression<'_>) -> String {
    match expr {
        Expression::Identifier(id) => id.text.to_string(),
        Expression::NumericLiteral(lit) => lit.text.to_string(),
        Expression::StringLiteral(lit) => format!("{:?}", lit.text),
        Expression::NoSubstitutionTemplateLiteral(lit) => format!("`{}`", lit.text),
        Expression::Keyword(kw) => kw.data.kind.keyword_text().unwrap_or("?").to_string(),
        Expression::Parenthesized(p) => render(p.expression),
        Expression::PropertyAccess(p) => format!("{}.{}", render(p.expression), p.name.text),
        Expression::ElementAccess(e) => {
            format!("{}[{}]", render(e.expression), render(e.argument_expression))
        }
        Expression::Call(c) => {
            let args: Vec<String> = c.arguments.iter().map(render).collect();
            format!("{}({})", render(c.expression), args.join(", "))
        }
        Expression::PrefixUnary(u) => {
            format!("({}{})", u.operator.token_text().unwrap_or("?"), render(u.operand))
        }
        Expression::TypeOf(t) => format!("(typeof {})", render(t.expression)),
        Expression::Void(v) => format!("(void {})", render(v.expression)),
        Expression::Binary(b) => format!(
            "({} {} {})",
            render(b.left),
            b.operator_token.kind().token_text().unwrap_or("?"),
            render(b.right)
        ),
        Expression::Conditional(c) => format!(
            "({} ? {} : {})",
            render(c.condition),
            render(c.when_true),
            render(c.when_false)
        ),
        Expression::Missing(_) => "<missing>".to_string(),
    }
}

/// Helper: parse an expression and return its rendering plus diagnostic count.
fn parse_expr(source: &str) -> (String, usize) {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", source);
    let expr = parser.parse_expression();
    let rendered = render(expr);
    (rendered, parser.take_diagnostics().len())
}

fn assert_parses_as(source: &str, expected: &str) {
    let (rendered, errors) = parse_expr(source);
    assert_eq!(rendered, expected, "source: {}", source);
    assert_eq!(errors, 0, "unexpected diagnostics for: {}", source);
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_additive_is_left_associative() {
    assert_parses_as("1 + 2 + 3", "((1 + 2) + 3)");
}

#[test]
fn test_multiplicative_binds_tighter() {
    assert_parses_as("1 + 2 * 3", "(1 + (2 * 3))");
}

#[test]
fn test_exponent_is_right_associative() {
    assert_parses_as("2 ** 3 ** 2", "(2 ** (3 ** 2))");
}

#[test]
fn test_relational_keywords() {
    assert_parses_as("a instanceof B && \"k\" in o", "((a instanceof B) && (\"k\" in o))");
}

#[test]
fn test_nullish_and_conditional() {
    assert_parses_as("a ?? b ? c : d", "((a ?? b) ? c : d)");
}

#[test]
fn test_unary_and_member_chains() {
    assert_parses_as("!a.b(1, 2)[0]", "(!a.b(1, 2)[0])");
    assert_parses_as("typeof -x", "(typeof (-x))");
    assert_parses_as("void 0", "(void 0)");
}

#[test]
fn test_contextual_keywords_are_identifiers() {
    assert_parses_as("undefined + type", "(undefined + type)");
}

#[test]
fn test_keyword_member_name() {
    assert_parses_as("a.in", "a.in");
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_binary_span_covers_both_operands() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", "1 + true");
    let expr = parser.parse_expression();
    assert_eq!((expr.span().start, expr.span().end()), (0, 8));
    let Expression::Binary(binary) = expr else {
        panic!("expected a binary expression");
    };
    assert_eq!((binary.right.span().start, binary.right.span().end()), (4, 8));
}

#[test]
fn test_spans_are_character_offsets() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", "\"héllo\" + bär");
    let expr = parser.parse_expression();
    let Expression::Binary(binary) = expr else {
        panic!("expected a binary expression");
    };
    assert_eq!((binary.right.span().start, binary.right.span().end()), (10, 13));
}

#[test]
fn test_node_ids_are_unique() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", "a + b");
    let expr = parser.parse_expression();
    let Expression::Binary(binary) = expr else {
        panic!("expected a binary expression");
    };
    assert_ne!(binary.left.data().id, binary.right.data().id);
    assert_ne!(binary.data.id, binary.left.data().id);
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_missing_operand() {
    let (rendered, errors) = parse_expr("1 +");
    assert_eq!(rendered, "(1 + <missing>)");
    assert_eq!(errors, 1);
}

#[test]
fn test_trailing_tokens_reported() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", "a b");
    parser.parse_expression();
    let diagnostics = parser.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.diagnostics()[0].message_text,
        "Unexpected token 'b' after expression."
    );
}

#[test]
fn test_nested_prefix_operators_within_depth() {
    let source = format!("{}x", "!".repeat(50));
    let (_, errors) = parse_expr(&source);
    assert_eq!(errors, 0);
    let (rendered, errors) = parse_expr("typeof void -x");
    assert_eq!(rendered, "(typeof (void (-x)))");
    assert_eq!(errors, 0);
}

#[test]
fn test_deep_prefix_chain_stops_at_depth_limit() {
    let source = format!("{}x", "!".repeat(100_000));
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", &source);
    parser.parse_expression();
    let diagnostics = parser.take_diagnostics();
    let messages: Vec<&str> = diagnostics.diagnostics().iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Expression expected.", "Unexpected token '!' after expression."]
    );
}

#[test]
fn test_unterminated_string() {
    let (_, errors) = parse_expr("\"abc");
    assert_eq!(errors, 1);
}

// ============================================================================
// Declaration sources
// ============================================================================

fn parse_statements(source: &str) -> (Vec<SyntaxKind>, usize) {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "decls.d.ts", source);
    let sf = parser.parse_source_file();
    let kinds = sf.statements.iter().map(|s| s.data().kind).collect();
    (kinds, parser.take_diagnostics().len())
}

#[test]
fn test_parse_declarations() {
    let (kinds, errors) = parse_statements(
        r#"
declare let s: string;
const c = "lit";
declare function f(a: number, ...rest: string[]): boolean;
interface Point { x: number; y: number; dist(other: Point): number }
type Id = string | number;
{ let inner: boolean; }
s = "x";
"#,
    );
    assert_eq!(errors, 0);
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::VariableStatement,
            SyntaxKind::VariableStatement,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::InterfaceDeclaration,
            SyntaxKind::TypeAliasDeclaration,
            SyntaxKind::Block,
            SyntaxKind::ExpressionStatement,
        ]
    );
}

#[test]
fn test_parse_function_type_and_type_literal() {
    let (kinds, errors) =
        parse_statements("declare let cb: (x: number) => string; declare let o: { a: (string)[] };");
    assert_eq!(errors, 0);
    assert_eq!(kinds.len(), 2);
}

#[test]
fn test_rest_parameter_must_be_last() {
    let (_, errors) = parse_statements("declare function f(...a: any[], b: number): void;");
    assert_eq!(errors, 1);
}

#[test]
fn test_statement_recovery() {
    let (kinds, errors) = parse_statements(") declare let a: number;");
    assert!(errors >= 1);
    assert_eq!(kinds.last(), Some(&SyntaxKind::VariableStatement));
}

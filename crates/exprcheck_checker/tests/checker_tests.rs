//! Checker integration tests.
//!
//! Parses an expression and checks it against a static repository, then
//! compares the diagnostic sequence (message, start, end).

use bumpalo::Bump;
use exprcheck_checker::check;
use exprcheck_parser::Parser;
use exprcheck_types::*;
use pretty_assertions::assert_eq;

/// Helper: parse and check `source`, returning (message, start, end) triples.
fn check_source(source: &str, scope: &SymbolTable) -> Vec<(String, u32, u32)> {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", source);
    let expression = parser.parse_expression();
    assert!(parser.take_diagnostics().is_empty(), "unexpected parse errors in {source:?}");
    let repository = StaticTypeRepository::new();
    check(expression, scope, &repository)
        .into_iter()
        .map(|d| (d.message_text.clone(), d.start(), d.end()))
        .collect()
}

fn messages(source: &str, scope: &SymbolTable) -> Vec<String> {
    check_source(source, scope).into_iter().map(|(m, _, _)| m).collect()
}

fn scope_of(bindings: &[(&str, TypeRef)]) -> SymbolTable {
    bindings
        .iter()
        .map(|(name, ty)| StaticSymbol::new(*name, ty.clone()).into_ref())
        .collect()
}

fn diag(message: &str, start: u32, end: u32) -> (String, u32, u32) {
    (message.to_string(), start, end)
}

const ARITHMETIC_LEFT: &str = "The left-hand side of an arithmetic operation must be of type 'number' or 'any'";
const ARITHMETIC_RIGHT: &str = "The right-hand side of an arithmetic operation must be of type 'number' or 'any'";
const INSTANCEOF_LEFT: &str = "The left-hand side of an 'instanceof' expression must be of type 'object' or 'any'";
const INSTANCEOF_RIGHT: &str = "The right-hand side of an 'instanceof' expression must be of type 'Function' or 'any'";
const IN_LEFT: &str = "The left-hand side of an 'in' expression must be of type 'string', 'number', 'symbol' or 'any'";
const IN_RIGHT: &str = "The right-hand side of an 'in' expression must be of type 'object' or 'any'";

// ============================================================================
// Addition
// ============================================================================

#[test]
fn test_numeric_addition_is_valid() {
    assert_eq!(check_source("1 + 2 + 3", &SymbolTable::new()), vec![]);
}

#[test]
fn test_string_concatenation_is_universal() {
    assert_eq!(check_source("\"1\" + 2 + null", &SymbolTable::new()), vec![]);
    assert_eq!(check_source("true + `x`", &SymbolTable::new()), vec![]);
}

#[test]
fn test_plus_mismatch_spans_whole_expression() {
    assert_eq!(
        check_source("1 + true", &SymbolTable::new()),
        vec![diag("The binary operator '+' cannot be applied to type 'number' and 'boolean'", 0, 8)]
    );
}

#[test]
fn test_plus_mismatch_uses_type_names() {
    assert_eq!(
        messages("null + undefined", &SymbolTable::new()),
        vec!["The binary operator '+' cannot be applied to type 'null' and 'undefined'"]
    );
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_arithmetic_left_operand_span() {
    assert_eq!(check_source("true - 42", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 4)]);
}

#[test]
fn test_arithmetic_both_operands() {
    assert_eq!(
        check_source("\"a\" * null", &SymbolTable::new()),
        vec![diag(ARITHMETIC_LEFT, 0, 3), diag(ARITHMETIC_RIGHT, 6, 10)]
    );
}

#[test]
fn test_modulo_and_exponent_are_arithmetic() {
    assert_eq!(check_source("2 % \"x\"", &SymbolTable::new()), vec![diag(ARITHMETIC_RIGHT, 4, 7)]);
    assert_eq!(check_source("true ** 2", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 4)]);
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_unresolved_identifier_does_not_cascade() {
    let scope = scope_of(&[("foo", StaticType::of_kind(TypeKind::Number))]);
    assert_eq!(
        check_source("foo + bar + 123", &scope),
        vec![diag("'bar' is not defined", 6, 9)]
    );
}

#[test]
fn test_unresolved_identifier_in_arithmetic() {
    assert_eq!(
        check_source("x * 2", &SymbolTable::new()),
        vec![diag("'x' is not defined", 0, 1)]
    );
}

#[test]
fn test_unbound_undefined_is_undefined_type() {
    assert_eq!(check_source("undefined - 1", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 9)]);
}

#[test]
fn test_bound_undefined_shadows() {
    let scope = scope_of(&[("undefined", StaticType::of_kind(TypeKind::Number))]);
    assert_eq!(check_source("undefined - 1", &scope), vec![]);
}

// ============================================================================
// instanceof / in
// ============================================================================

#[test]
fn test_instanceof_valid() {
    let scope = scope_of(&[
        ("foo", StaticType::of_kind(TypeKind::Object)),
        ("Bar", StaticType::of_kind(TypeKind::Function)),
    ]);
    assert_eq!(check_source("foo instanceof Bar", &scope), vec![]);
}

#[test]
fn test_instanceof_each_side_independent() {
    let left_wrong = scope_of(&[
        ("foo", StaticType::of_kind(TypeKind::Function)),
        ("Bar", StaticType::of_kind(TypeKind::Function)),
    ]);
    assert_eq!(check_source("foo instanceof Bar", &left_wrong), vec![diag(INSTANCEOF_LEFT, 0, 3)]);

    let right_wrong = scope_of(&[
        ("foo", StaticType::of_kind(TypeKind::Object)),
        ("Bar", StaticType::of_kind(TypeKind::Object)),
    ]);
    assert_eq!(check_source("foo instanceof Bar", &right_wrong), vec![diag(INSTANCEOF_RIGHT, 15, 18)]);

    let both_wrong = scope_of(&[
        ("foo", StaticType::of_kind(TypeKind::Function)),
        ("Bar", StaticType::of_kind(TypeKind::Object)),
    ]);
    assert_eq!(
        check_source("foo instanceof Bar", &both_wrong),
        vec![diag(INSTANCEOF_LEFT, 0, 3), diag(INSTANCEOF_RIGHT, 15, 18)]
    );
}

#[test]
fn test_in_right_operand_null() {
    assert_eq!(check_source("\"key\" in null", &SymbolTable::new()), vec![diag(IN_RIGHT, 9, 13)]);
}

#[test]
fn test_in_left_operand() {
    let scope = scope_of(&[("o", StaticType::of_kind(TypeKind::Object))]);
    assert_eq!(check_source("true in o", &scope), vec![diag(IN_LEFT, 0, 4)]);
    assert_eq!(check_source("1 in o", &scope), vec![]);
}

// ============================================================================
// Any and equality
// ============================================================================

#[test]
fn test_any_operands_never_mismatch() {
    let scope = scope_of(&[
        ("a", StaticType::of_kind(TypeKind::Any)),
        ("b", StaticType::of_kind(TypeKind::Any)),
    ]);
    for source in [
        "a + b", "a - b", "a * b", "a / b", "a % b", "a ** b", "a === b", "a !== b", "a == b",
        "a instanceof b", "a in b", "a.x", "a()", "(a + b) * (a - b)",
    ] {
        assert_eq!(check_source(source, &scope), vec![], "{source}");
    }
}

#[test]
fn test_equality_is_permissive() {
    assert_eq!(check_source("1 === \"a\"", &SymbolTable::new()), vec![]);
    assert_eq!(check_source("null != true", &SymbolTable::new()), vec![]);
}

#[test]
fn test_equality_result_is_boolean() {
    assert_eq!(
        messages("(1 === 2) - 1", &SymbolTable::new()),
        vec![ARITHMETIC_LEFT.to_string()]
    );
}

// ============================================================================
// Ordering and idempotence
// ============================================================================

#[test]
fn test_outer_diagnostics_precede_inner() {
    assert_eq!(
        check_source("(x - 1) + true", &SymbolTable::new()),
        vec![
            diag("The binary operator '+' cannot be applied to type 'number' and 'boolean'", 0, 14),
            diag("'x' is not defined", 1, 2),
        ]
    );
}

#[test]
fn test_left_operand_diagnostics_precede_right() {
    assert_eq!(
        check_source("(true - 1) * (1 - null)", &SymbolTable::new()),
        vec![diag(ARITHMETIC_LEFT, 1, 5), diag(ARITHMETIC_RIGHT, 18, 22)]
    );
}

#[test]
fn test_check_is_idempotent() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", "a + true - \"s\" * b");
    let expression = parser.parse_expression();
    let scope = scope_of(&[("a", StaticType::of_kind(TypeKind::Boolean))]);
    let repository = StaticTypeRepository::new();
    let first = check(expression, &scope, &repository);
    let second = check(expression, &scope, &repository);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "TypeKind::Other")]
fn test_repository_rejects_other() {
    StaticTypeRepository::new().type_by_kind(TypeKind::Other);
}

// ============================================================================
// Members and calls
// ============================================================================

fn point_scope() -> SymbolTable {
    let number = StaticType::of_kind(TypeKind::Number);
    let members = scope_of(&[("x", number.clone()), ("label", StaticType::of_kind(TypeKind::String))]);
    let point = StaticType::new("Point", TypeKind::Other).with_members(members).into_ref();
    scope_of(&[("p", point), ("n", number)])
}

#[test]
fn test_property_access_uses_member_type() {
    assert_eq!(check_source("p.x * 2", &point_scope()), vec![]);
    assert_eq!(check_source("p.label * 2", &point_scope()), vec![diag(ARITHMETIC_LEFT, 0, 7)]);
}

#[test]
fn test_missing_property_is_reported_on_name() {
    assert_eq!(
        check_source("p.y", &point_scope()),
        vec![diag("Property 'y' does not exist on type 'Point'", 2, 3)]
    );
}

#[test]
fn test_property_of_primitive_is_any() {
    assert_eq!(check_source("n.whatever - 1", &point_scope()), vec![]);
}

fn callable_scope() -> SymbolTable {
    let number = StaticType::of_kind(TypeKind::Number);
    let string = StaticType::of_kind(TypeKind::String);
    let f = StaticType::new("(a: number) => string", TypeKind::Other)
        .with_call_signature(CallSignature::new(ArgTypes::Fixed(vec![number.clone()]), string.clone()))
        .into_ref();
    let g = StaticType::new("(a: number, ...rest: number[]) => number", TypeKind::Other)
        .with_call_signature(CallSignature::new(
            ArgTypes::Variadic { leading: vec![number.clone()], rest: number.clone() },
            number.clone(),
        ))
        .into_ref();
    let h = StaticType::new("(...args: any[]) => number", TypeKind::Other)
        .with_call_signature(CallSignature::new(ArgTypes::Any, number.clone()))
        .into_ref();
    scope_of(&[
        ("f", f),
        ("g", g),
        ("h", h),
        ("F", StaticType::of_kind(TypeKind::Function)),
        ("n", number),
    ])
}

#[test]
fn test_call_returns_signature_type() {
    assert_eq!(
        check_source("f(1) - 1", &callable_scope()),
        vec![diag(ARITHMETIC_LEFT, 0, 4)]
    );
    assert_eq!(check_source("g(1, 2, 3) - 1", &callable_scope()), vec![]);
    assert_eq!(check_source("h() - h(1, 2)", &callable_scope()), vec![]);
}

#[test]
fn test_call_arity_mismatch() {
    assert_eq!(
        check_source("f()", &callable_scope()),
        vec![diag("Expected 1 arguments, but got 0", 0, 3)]
    );
    assert_eq!(
        check_source("g()", &callable_scope()),
        vec![diag("Expected at least 1 arguments, but got 0", 0, 3)]
    );
}

#[test]
fn test_call_without_signatures() {
    assert_eq!(check_source("F(1, 2)", &callable_scope()), vec![]);
    assert_eq!(
        check_source("n()", &callable_scope()),
        vec![diag("This expression is not callable. Type 'number' has no call signatures", 0, 1)]
    );
}

#[test]
fn test_call_arguments_are_checked() {
    assert_eq!(
        check_source("f(missing)", &callable_scope()),
        vec![diag("'missing' is not defined", 2, 9)]
    );
}

// ============================================================================
// Other expression forms
// ============================================================================

#[test]
fn test_unary_and_typeof_results() {
    assert_eq!(check_source("-true * 2", &SymbolTable::new()), vec![]);
    assert_eq!(check_source("!1 - 2", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 2)]);
    assert_eq!(check_source("typeof 1 - 2", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 8)]);
    assert_eq!(check_source("void 0 - 2", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 6)]);
}

#[test]
fn test_conditional_result() {
    assert_eq!(check_source("(true ? 1 : 2) - 1", &SymbolTable::new()), vec![]);
    assert_eq!(check_source("(true ? 1 : \"a\") - 1", &SymbolTable::new()), vec![]);
    assert_eq!(
        check_source("(true ? \"a\" : \"b\") - 1", &SymbolTable::new()),
        vec![diag(ARITHMETIC_LEFT, 0, 18)]
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(check_source("(1 && \"a\") - 1", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 10)]);
    assert_eq!(check_source("(1 || \"a\") - 1", &SymbolTable::new()), vec![]);
    assert_eq!(check_source("(\"a\" ?? \"b\") - 1", &SymbolTable::new()), vec![diag(ARITHMETIC_LEFT, 0, 12)]);
}

// ============================================================================
// Depth limit
// ============================================================================

const TOO_DEEP: &str = "Expression is too deeply nested to check.";

/// `1 + 1 + ... + 1` with `terms` operands; parsed by iteration, so the tree
/// is as deep as the chain is long.
fn addition_chain(terms: usize) -> String {
    let mut source = "1 + ".repeat(terms - 1);
    source.push('1');
    source
}

#[test]
fn test_long_chain_within_depth_is_checked() {
    assert_eq!(check_source(&addition_chain(300), &SymbolTable::new()), vec![]);
}

#[test]
fn test_very_long_chain_reports_once_instead_of_overflowing() {
    assert_eq!(messages(&addition_chain(100_000), &SymbolTable::new()), vec![TOO_DEEP.to_string()]);
}

#[test]
fn test_operators_above_the_depth_limit_are_still_checked() {
    let source = format!("{} - true", addition_chain(10_000));
    let end = source.chars().count() as u32;
    let diagnostics = check_source(&source, &SymbolTable::new());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0], diag(ARITHMETIC_RIGHT, end - 4, end));
    assert_eq!(diagnostics[1].0, TOO_DEEP);
}

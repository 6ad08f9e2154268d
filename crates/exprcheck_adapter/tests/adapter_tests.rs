//! Adapter integration tests.
//!
//! Compiles a declaration context into a host, builds the checker scope from
//! it and checks expressions against the host-backed repository.

use bumpalo::Bump;
use exprcheck_adapter::{HostTypeRepository, BUILTINS_FILE_NAME};
use exprcheck_checker::check;
use exprcheck_host::{HostChecker, Location};
use exprcheck_parser::Parser;
use exprcheck_types::{ArgTypes, SymbolTable, TypeKind, TypeRepository};
use pretty_assertions::assert_eq;
use std::rc::Rc;

const CONTEXT: &str = include_str!("fixtures/context.d.ts");

struct Fixture {
    repository: HostTypeRepository,
    end: Location,
}

/// Helper: compile `context` into a fresh host anchored at its end.
fn compile(context: &str) -> Fixture {
    let host = Rc::new(HostChecker::new());
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "context.d.ts", context);
    let source_file = parser.parse_source_file();
    assert!(parser.take_diagnostics().is_empty(), "unexpected parse errors");
    let file = host.add_source_file(&source_file);
    let end = host.end_of_file(file);
    Fixture {
        repository: HostTypeRepository::new(host),
        end,
    }
}

fn check_with(repository: &HostTypeRepository, scope: &SymbolTable, source: &str) -> Vec<(String, u32, u32)> {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "expr", source);
    let expression = parser.parse_expression();
    check(expression, scope, repository)
        .into_iter()
        .map(|d| (d.message_text.clone(), d.start(), d.end()))
        .collect()
}

fn check_at_end(fixture: &Fixture, source: &str) -> Vec<String> {
    let scope = fixture.repository.scope_at(fixture.end);
    check_with(&fixture.repository, &scope, source)
        .into_iter()
        .map(|(m, _, _)| m)
        .collect()
}

const ARITHMETIC_LEFT: &str = "The left-hand side of an arithmetic operation must be of type 'number' or 'any'";

// ============================================================================
// Repository contract
// ============================================================================

#[test]
fn test_fixed_kinds_do_not_load_builtins() {
    let fixture = compile("");
    let repository = &fixture.repository;
    assert_eq!(repository.type_by_kind(TypeKind::Any).kind(), TypeKind::Any);
    assert_eq!(repository.type_by_kind(TypeKind::Null).kind(), TypeKind::Null);
    assert_eq!(repository.type_by_kind(TypeKind::Undefined).kind(), TypeKind::Undefined);
    assert!(!repository.is_loaded());

    let number = repository.type_by_kind(TypeKind::Number);
    assert!(repository.is_loaded());
    assert_eq!(number.kind(), TypeKind::Number);
    assert_eq!(number.name(), "number");
}

#[test]
fn test_ensure_loaded_compiles_fixture_once() {
    let fixture = compile("declare let n: number;");
    let repository = &fixture.repository;
    repository.ensure_built_in_types_loaded();
    assert!(repository.is_loaded());
    let string = repository.type_by_kind(TypeKind::String);
    repository.ensure_built_in_types_loaded();
    assert!(Rc::ptr_eq(&string, &repository.type_by_kind(TypeKind::String)));
}

#[test]
fn test_builtins_are_loaded_once_per_repository() {
    let fixture = compile("");
    let repository = &fixture.repository;
    let first = repository.type_by_kind(TypeKind::String);
    let second = repository.type_by_kind(TypeKind::String);
    assert!(Rc::ptr_eq(&first, &second));
    for kind in [TypeKind::Boolean, TypeKind::Symbol] {
        assert_eq!(repository.type_by_kind(kind).kind(), kind);
    }
    let fixture_errors = repository
        .host()
        .diagnostics()
        .into_iter()
        .filter(|d| d.file.as_deref() == Some(BUILTINS_FILE_NAME))
        .count();
    assert_eq!(fixture_errors, 0);
}

#[test]
#[should_panic(expected = "TypeKind::Other")]
fn test_other_is_rejected() {
    compile("").repository.type_by_kind(TypeKind::Other);
}

#[test]
#[should_panic(expected = "missing after loading")]
fn test_incomplete_fixture_panics() {
    let host = Rc::new(HostChecker::new());
    let repository = HostTypeRepository::with_builtins_source(host, "declare var s: string;");
    repository.type_by_kind(TypeKind::Symbol);
}

#[test]
fn test_fixture_dispatch_matches_exact_type_text() {
    let host = Rc::new(HostChecker::new());
    let repository = HostTypeRepository::with_builtins_source(
        host,
        "declare var u: string | number;\ndeclare var s: string;\ndeclare var n: number;\n\
         declare var b: boolean;\ndeclare var y: symbol;",
    );
    assert_eq!(repository.type_by_kind(TypeKind::String).name(), "string");
    assert_eq!(repository.type_by_kind(TypeKind::Number).name(), "number");
}

// ============================================================================
// Checking against host bindings
// ============================================================================

#[test]
fn test_literal_mismatch_through_host_builtins() {
    let fixture = compile("");
    let scope = fixture.repository.scope_at(fixture.end);
    assert_eq!(
        check_with(&fixture.repository, &scope, "1 + true"),
        vec![(
            "The binary operator '+' cannot be applied to type 'number' and 'boolean'".to_string(),
            0,
            8
        )]
    );
}

#[test]
fn test_declared_variables() {
    let fixture = compile(CONTEXT);
    assert_eq!(check_at_end(&fixture, "n * 2 + s"), Vec::<String>::new());
    assert_eq!(check_at_end(&fixture, "s - 1"), vec![ARITHMETIC_LEFT]);
    assert_eq!(check_at_end(&fixture, "anything + true + flag"), Vec::<String>::new());
    assert_eq!(check_at_end(&fixture, "nothing + 1"), vec!["'nothing' is not defined"]);
}

#[test]
fn test_literal_types_classify_as_their_primitive() {
    let fixture = compile(CONTEXT);
    let scope = fixture.repository.scope_at(fixture.end);
    let greeting = scope.get("greeting").unwrap().ty();
    assert_eq!(greeting.name(), "\"hello\"");
    assert_eq!(greeting.kind(), TypeKind::String);
    assert_eq!(check_at_end(&fixture, "greeting - 1"), vec![ARITHMETIC_LEFT]);
}

#[test]
fn test_assignment_narrowing_at_anchor() {
    let context = "declare let u: string | number;\nu = 1;\n";
    let fixture = compile(context);
    let before = Location::new(fixture.end.file, context.find("u = 1").unwrap() as u32);

    let scope = fixture.repository.scope_at(before);
    assert_eq!(scope.get("u").unwrap().ty().kind(), TypeKind::Other);
    assert_eq!(
        check_with(&fixture.repository, &scope, "u - 1"),
        vec![(ARITHMETIC_LEFT.to_string(), 0, 1)]
    );

    let scope = fixture.repository.scope_at(fixture.end);
    assert_eq!(scope.get("u").unwrap().ty().kind(), TypeKind::Number);
    assert_eq!(check_with(&fixture.repository, &scope, "u - 1"), vec![]);
}

#[test]
fn test_block_scoped_binding_at_anchor() {
    let context = "let a: number;\n{ let a: string; ; }\n";
    let fixture = compile(context);
    let inside = Location::new(fixture.end.file, context.rfind(';').unwrap() as u32 - 1);
    let scope = fixture.repository.scope_at(inside);
    assert_eq!(scope.len(), 1);
    assert_eq!(scope.get("a").unwrap().ty().kind(), TypeKind::String);
    assert_eq!(check_at_end(&fixture, "a - 1"), Vec::<String>::new());
}

// ============================================================================
// Members and signatures
// ============================================================================

#[test]
fn test_interface_members() {
    let fixture = compile(CONTEXT);
    assert_eq!(check_at_end(&fixture, "point.x - 1"), Vec::<String>::new());
    assert_eq!(check_at_end(&fixture, "point.label - 1"), vec![ARITHMETIC_LEFT]);
    assert_eq!(
        check_at_end(&fixture, "point.z"),
        vec!["Property 'z' does not exist on type 'Point'"]
    );
}

#[test]
fn test_members_are_memoized() {
    let fixture = compile(CONTEXT);
    let scope = fixture.repository.scope_at(fixture.end);
    let point = scope.get("point").unwrap().ty();
    assert_eq!(point.kind(), TypeKind::Other);
    let first = point.members().get("x").unwrap().clone();
    let second = point.members().get("x").unwrap().clone();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(point.members().names().collect::<Vec<_>>(), vec!["x", "label", "move"]);
}

#[test]
fn test_method_calls() {
    let fixture = compile(CONTEXT);
    assert_eq!(check_at_end(&fixture, "point.move(1, 2) - 1"), vec![ARITHMETIC_LEFT]);
    assert_eq!(
        check_at_end(&fixture, "point.move(1)"),
        vec!["Expected 2 arguments, but got 1"]
    );
}

#[test]
fn test_function_overloads() {
    let fixture = compile(CONTEXT);
    assert_eq!(check_at_end(&fixture, "format(1, 2) - 1"), Vec::<String>::new());
    assert_eq!(check_at_end(&fixture, "format(1) - 1"), vec![ARITHMETIC_LEFT]);
    assert_eq!(check_at_end(&fixture, "format()"), vec!["Expected 1 arguments, but got 0"]);
}

#[test]
fn test_rest_parameters() {
    let fixture = compile(CONTEXT);
    let scope = fixture.repository.scope_at(fixture.end);

    let log = scope.get("log").unwrap().ty();
    assert!(matches!(log.call_signatures()[0].arg_types, ArgTypes::Any));

    let join = scope.get("join").unwrap().ty();
    match &join.call_signatures()[0].arg_types {
        ArgTypes::Variadic { leading, rest } => {
            assert_eq!(leading.len(), 1);
            assert_eq!(rest.kind(), TypeKind::String);
        }
        other => panic!("expected a variadic signature, got {other:?}"),
    }
    assert_eq!(check_at_end(&fixture, "log() + log(1, 2, 3)"), Vec::<String>::new());
    assert_eq!(
        check_at_end(&fixture, "join()"),
        vec!["Expected at least 1 arguments, but got 0"]
    );
}

#[test]
fn test_array_length() {
    let fixture = compile(CONTEXT);
    assert_eq!(check_at_end(&fixture, "values.length * 2"), Vec::<String>::new());
    assert_eq!(
        check_at_end(&fixture, "values.size"),
        vec!["Property 'size' does not exist on type 'number[]'"]
    );
}

#[test]
fn test_host_objects_are_not_callable_without_signatures() {
    let fixture = compile(CONTEXT);
    assert_eq!(
        check_at_end(&fixture, "point()"),
        vec!["This expression is not callable. Type 'Point' has no call signatures"]
    );
}

#[test]
fn test_host_objects_fail_in_and_instanceof() {
    let fixture = compile(CONTEXT);
    let scope = fixture.repository.scope_at(fixture.end);
    assert_eq!(
        check_with(&fixture.repository, &scope, "\"x\" in point"),
        vec![(
            "The right-hand side of an 'in' expression must be of type 'object' or 'any'".to_string(),
            7,
            12
        )]
    );
    assert_eq!(
        check_at_end(&fixture, "point instanceof format"),
        vec![
            "The left-hand side of an 'instanceof' expression must be of type 'object' or 'any'",
            "The right-hand side of an 'instanceof' expression must be of type 'Function' or 'any'",
        ]
    );
    assert_eq!(check_at_end(&fixture, "\"x\" in anything"), Vec::<String>::new());
    let object = fixture.repository.type_by_kind(TypeKind::Object);
    assert_eq!(object.kind(), TypeKind::Object);
}

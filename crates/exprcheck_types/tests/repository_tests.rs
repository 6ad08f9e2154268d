//! Repository contract and symbol table behavior.

use exprcheck_types::*;
use pretty_assertions::assert_eq;
use std::rc::Rc;

// ============================================================================
// TypeRepository contract
// ============================================================================

#[test]
fn test_every_kind_but_other_resolves_to_its_kind() {
    let repo = StaticTypeRepository::new();
    for kind in TypeKind::REPOSITORY_KINDS {
        assert_eq!(repo.type_by_kind(kind).kind(), kind);
    }
}

#[test]
fn test_lookups_return_the_same_instance() {
    let repo = StaticTypeRepository::new();
    for kind in TypeKind::REPOSITORY_KINDS {
        let first = repo.type_by_kind(kind);
        let second = repo.type_by_kind(kind);
        assert!(Rc::ptr_eq(&first, &second), "kind {kind} is not stable");
    }
}

#[test]
fn test_repositories_do_not_share_singletons() {
    let a = StaticTypeRepository::new();
    let b = StaticTypeRepository::new();
    assert!(!Rc::ptr_eq(
        &a.type_by_kind(TypeKind::Any),
        &b.type_by_kind(TypeKind::Any)
    ));
}

#[test]
#[should_panic(expected = "TypeKind::Other")]
fn test_other_is_not_a_repository_key() {
    StaticTypeRepository::new().type_by_kind(TypeKind::Other);
}

#[test]
fn test_built_in_names() {
    let repo = StaticTypeRepository::new();
    let names: Vec<&str> = TypeKind::REPOSITORY_KINDS
        .iter()
        .map(|&kind| kind.keyword())
        .collect();
    let resolved: Vec<String> = TypeKind::REPOSITORY_KINDS
        .iter()
        .map(|&kind| repo.type_by_kind(kind).name().to_string())
        .collect();
    assert_eq!(resolved, names);
}

// ============================================================================
// SymbolTable
// ============================================================================

fn symbol(name: &str, kind: TypeKind) -> SymbolRef {
    StaticSymbol::new(name, StaticType::of_kind(kind)).into_ref()
}

#[test]
fn test_lookup_absent_name() {
    let table: SymbolTable = [symbol("a", TypeKind::Number)].into_iter().collect();
    assert!(table.get("b").is_none());
    assert_eq!(table.get("a").map(|s| s.ty().kind()), Some(TypeKind::Number));
}

#[test]
fn test_duplicate_name_last_write_wins_first_position_kept() {
    let table: SymbolTable = [
        symbol("a", TypeKind::Number),
        symbol("b", TypeKind::String),
        symbol("a", TypeKind::Boolean),
    ]
    .into_iter()
    .collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(table.get("a").map(|s| s.ty().kind()), Some(TypeKind::Boolean));
}

#[test]
fn test_static_type_members_and_signatures() {
    let number = StaticType::of_kind(TypeKind::Number);
    let ty = StaticType::new("Point", TypeKind::Other)
        .with_members([symbol("x", TypeKind::Number)].into_iter().collect())
        .with_call_signature(CallSignature::new(ArgTypes::Any, number))
        .into_ref();
    assert!(ty.members().contains("x"));
    assert_eq!(ty.call_signatures().len(), 1);
    assert_eq!(ty.call_signatures()[0].return_type.kind(), TypeKind::Number);
}

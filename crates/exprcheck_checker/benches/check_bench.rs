use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exprcheck_checker::check;
use exprcheck_parser::Parser;
use exprcheck_types::{StaticSymbol, StaticType, StaticTypeRepository, SymbolTable, TypeKind};

fn bench_check(c: &mut Criterion) {
    let source = "a * (b + 1) - c / 2 + \"s\" + (d instanceof e) + (\"k\" in f) + missing - true";
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "bench", source);
    let expression = parser.parse_expression();

    let scope: SymbolTable = [
        ("a", TypeKind::Number),
        ("b", TypeKind::Number),
        ("c", TypeKind::Any),
        ("d", TypeKind::Object),
        ("e", TypeKind::Function),
        ("f", TypeKind::Object),
    ]
    .into_iter()
    .map(|(name, kind)| StaticSymbol::new(name, StaticType::of_kind(kind)).into_ref())
    .collect();
    let repository = StaticTypeRepository::new();

    c.bench_function("check_mixed_expression", |b| {
        b.iter(|| check(black_box(expression), black_box(&scope), &repository))
    });
}

criterion_group!(benches, bench_check);
criterion_main!(benches);

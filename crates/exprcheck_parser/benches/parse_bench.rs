use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exprcheck_parser::Parser;

const EXPRESSION: &str = r#"(a + b * c - d / e) % 7 === total && name in record || value instanceof Ctor ? f(1, "two", `three`) : obj.items[0].length ** 2"#;

const DECLARATIONS: &str = r#"
declare let a: number;
declare let b: number;
declare let name: string;
declare let record: { total: number; name: string };
declare function f(a: number, b: string, ...rest: string[]): boolean;
interface Item { length: number; label: string }
type Items = Item[];
declare let obj: { items: Items };
"#;

fn bench_parse_expression(c: &mut Criterion) {
    c.bench_function("parse_expression", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut parser = Parser::new(&arena, "bench", black_box(EXPRESSION));
            black_box(parser.parse_expression());
        });
    });
}

fn bench_parse_declarations(c: &mut Criterion) {
    c.bench_function("parse_declarations", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut parser = Parser::new(&arena, "bench.d.ts", black_box(DECLARATIONS));
            black_box(parser.parse_source_file());
        });
    });
}

criterion_group!(benches, bench_parse_expression, bench_parse_declarations);
criterion_main!(benches);

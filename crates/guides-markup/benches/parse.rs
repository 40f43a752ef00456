//! Benchmarks for document parsing.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use guides_markup::Parser;
use guides_markup::directive::{
    CodeBlockDirective, DirectiveRegistry, ReplaceDirective, WrapDirective,
};

/// Generate markup with the given number of sections.
fn generate_markup(sections: usize) -> String {
    let mut rst = String::with_capacity(sections * 300);
    rst.push_str("Document Title\n==============\n\n.. |tool| replace:: **guides**\n\n");

    for i in 0..sections {
        rst.push_str(&format!("Section {i}\n----------\n\n"));
        rst.push_str("This paragraph mentions |tool| with *emphasis* and ``literal`` text.\n\n");
        rst.push_str(".. note::\n\n   .. code-block:: php\n\n      echo 'hello';\n\n");
    }
    rst
}

fn registry() -> DirectiveRegistry {
    DirectiveRegistry::new()
        .with_directive(CodeBlockDirective::new())
        .with_directive(ReplaceDirective)
        .with_sub_directive(WrapDirective::new("note"))
}

fn bench_parse_varying_sizes(c: &mut Criterion) {
    let registry = registry();
    let mut group = c.benchmark_group("parse_sections");

    for sections in [10, 100, 1000] {
        let source = generate_markup(sections);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &source, |b, source| {
            let mut parser = Parser::new(&registry);
            b.iter(|| parser.parse(source));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_varying_sizes);
criterion_main!(benches);

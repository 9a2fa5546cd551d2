use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morpho::{parse, Polarity, Rule, RuleBuilder};

/// A rule text of `n` ordered stages, alternating insertions and removals.
fn rule_text(n: usize) -> String {
    let stages: Vec<&str> = (0..n)
        .map(|i| match i % 4 {
            0 => "ge+t",
            1 => "-a|-o?-:+u",
            2 => "i(ch)^+,.en",
            _ => "ge--t",
        })
        .collect();
    stages.join(";")
}

/// The same rule built through [`RuleBuilder`].
fn build_rule(n: usize) -> Rule {
    let mut builder = RuleBuilder::new();
    for i in 0..n {
        builder = builder.stage(|s| match i % 2 {
            0 => s.circumfix("ge", "t", Polarity::Insert),
            _ => s.postfix("t", Polarity::Remove).postfix("en", Polarity::Toggle),
        });
    }
    builder.build().unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for &n in &[1, 5, 20] {
        let text = rule_text(n);
        group.bench_function(&format!("{n}_stages"), |b| {
            b.iter(|| parse(black_box(&text)));
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[1, 5, 20] {
        let text = rule_text(n);
        group.bench_function(&format!("{n}_stages_dsl"), |b| {
            b.iter(|| black_box(Rule::from_dsl(black_box(&text)).unwrap()));
        });

        group.bench_function(&format!("{n}_stages_builder"), |b| {
            b.iter(|| black_box(build_rule(n)));
        });
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for &n in &[1, 5, 20] {
        let rule = Rule::from_dsl(&rule_text(n)).unwrap();
        group.bench_function(&format!("{n}_stages_word"), |b| {
            b.iter(|| rule.apply(black_box("mach")));
        });

        group.bench_function(&format!("{n}_stages_compound"), |b| {
            b.iter(|| rule.apply_compound(black_box(&["kot", "pies", "lupu"])));
        });

        group.bench_function(&format!("{n}_stages_detailed"), |b| {
            b.iter(|| rule.apply_detailed(black_box("mach")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_compilation, bench_apply);
criterion_main!(benches);

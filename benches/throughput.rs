use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use morpho::Rule;

const WORDS: [&str; 6] = ["mach", "lupu", "kot", "kino", "lata", "gemacht"];

fn build_shared_rule() -> Arc<Rule> {
    Arc::new(Rule::from_dsl("-a|-o?-:+u;ge+t;i(ch)^+,.en").unwrap())
}

fn bench_throughput(c: &mut Criterion) {
    let thread_counts = [1, 2, 4, 8];

    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(5));

    for &threads in &thread_counts {
        let rule = build_shared_rule();

        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter_custom(|iters| {
                let per_thread = iters / threads as u64;
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let r = Arc::clone(&rule);
                        thread::spawn(move || {
                            let start = Instant::now();
                            for i in 0..per_thread {
                                let _ = r.apply(WORDS[i as usize % WORDS.len()]);
                            }
                            start.elapsed()
                        })
                    })
                    .collect();

                let mut max_elapsed = Duration::ZERO;
                for h in handles {
                    let elapsed = h.join().unwrap();
                    if elapsed > max_elapsed {
                        max_elapsed = elapsed;
                    }
                }
                max_elapsed
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);

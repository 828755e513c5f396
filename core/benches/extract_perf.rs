//! Extraction throughput over synthetic correlator logs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use errscan_core::api::{ErrorBlockExtractor, ScanMode};

/// Mostly INFO noise with an assertion failure every `error_every` lines.
fn generate_log(lines: usize, error_every: usize) -> String {
    let mut input = String::with_capacity(lines * 80);

    for i in 0..lines {
        if i % error_every == 0 {
            input.push_str(&format!(
                "2024-01-01 10:00:{:02}.000 ERROR [1] - Asserts - assertEquals failed in case_{i}\n",
                i % 60
            ));
            input.push_str(&format!("actual: value-{i}-A\n"));
            input.push_str(&format!("expected: value-{i}-B\n"));
        } else {
            input.push_str(&format!(
                "2024-01-01 10:00:{:02}.000 INFO  [1] - Injected MonitorScript case_{i}.mon\n",
                i % 60
            ));
        }
    }

    input
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [1_000, 10_000, 100_000].iter() {
        let input = generate_log(*size, 50);
        for mode in [ScanMode::Block, ScanMode::Line] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), size),
                &input,
                |b, input| {
                    b.iter(|| {
                        let out = ErrorBlockExtractor::new(mode)
                            .extract_all(black_box(input.as_str()).split_inclusive('\n'));
                        black_box(out)
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use usertagging_engine::{replace_all_with_placeholder, scan_all};

fn generate_comment(mentions: usize) -> String {
    (0..mentions)
        .map(|i| format!("reply {i} for <<Member {i}|route://user/{i}>> <<not a token>> ok."))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(10);

    for size in [10, 1000] {
        let content = generate_comment(size);
        group.bench_function(format!("scan_all_{size}"), |b| {
            b.iter(|| black_box(scan_all(Some(black_box(&content)))));
        });
        group.bench_function(format!("decode_collapse_{size}"), |b| {
            b.iter(|| {
                let buf = replace_all_with_placeholder(Some(black_box(&content)), |_| ());
                black_box(buf.collapse())
            });
        });
    }

    // unclosed openers should not make the scan quadratic
    let pathological = "<<".repeat(5000) + &"x".repeat(5000);
    group.bench_function("scan_unclosed_openers", |b| {
        b.iter(|| black_box(scan_all(Some(black_box(&pathological)))));
    });

    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);

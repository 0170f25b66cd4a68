use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dr_dedup::{deduplicate, stabilize, TagRule};
use rand::Rng;

fn generate_name(words: usize) -> String {
    let stems = ["야외", "고양이", "집", "캠핑", "방수", "매트", "대형", "접이식"];
    let mut rng = rand::thread_rng();
    (0..words)
        .map(|_| {
            let parts = rng.gen_range(1..4);
            (0..parts).map(|_| stems[rng.gen_range(0..stems.len())]).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_deduplicate(c: &mut Criterion) {
    for &n in &[5usize, 20, 100] {
        let text = generate_name(n);
        c.bench_function(&format!("deduplicate_{n}_words"), |b| {
            b.iter(|| black_box(deduplicate(black_box(&text))))
        });
        c.bench_function(&format!("stabilize_{n}_words"), |b| {
            b.iter(|| black_box(stabilize(black_box(&text), 10)))
        });
    }
}

fn bench_tag(c: &mut Criterion) {
    let rule = TagRule::default();
    c.bench_function("apply_tag", |b| {
        b.iter(|| black_box(rule.apply(black_box("생활용품 > 욕실용품 > 수건"), black_box("호텔 수건"))))
    });
}

criterion_group!(benches, bench_deduplicate, bench_tag);
criterion_main!(benches);

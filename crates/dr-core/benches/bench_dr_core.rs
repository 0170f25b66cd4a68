use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dr_core::{Preferences, UrlPatternSet};
use rand::Rng;

fn random_urls(n: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let id: u32 = rng.gen_range(1..1_000_000);
            if rng.gen_bool(0.5) {
                format!("https://www.pick2sell.kr/product/{id}?tab=basicInfo")
            } else {
                format!("https://www.pick2sell.kr/order/{id}")
            }
        })
        .collect()
}

fn bench_url_patterns(c: &mut Criterion) {
    let prefs = Preferences::default();
    c.bench_function("url_pattern_compile", |b| {
        b.iter(|| black_box(UrlPatternSet::new(black_box(&prefs.url_patterns)).unwrap()))
    });

    let set = UrlPatternSet::new(&[
        "https://www.pick2sell.kr/product/*",
        "https://www.pick2sell.kr/product/*?tab=basicInfo",
    ])
    .unwrap();
    let urls = random_urls(1000);
    c.bench_function("url_pattern_match_1000", |b| {
        b.iter(|| urls.iter().filter(|u| set.matches(black_box(u))).count())
    });
}

criterion_group!(benches, bench_url_patterns);
criterion_main!(benches);

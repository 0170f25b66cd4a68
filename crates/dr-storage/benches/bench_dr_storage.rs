use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dr_core::{FloatPosition, Preferences};
use dr_storage::{MemoryStorage, OptionsForm, PreferencesStore};

fn bench_preferences(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = PreferencesStore::new(MemoryStorage::new());
    rt.block_on(store.install_defaults()).unwrap();

    c.bench_function("preferences_load", |b| {
        b.iter(|| black_box(rt.block_on(store.load()).unwrap()))
    });
    c.bench_function("preferences_save_position", |b| {
        let pos = FloatPosition::from_pixels(100, 200);
        b.iter(|| rt.block_on(store.save_position(black_box(&pos))).unwrap())
    });
}

fn bench_options_form(c: &mut Criterion) {
    let form = OptionsForm {
        url_patterns: (0..50).map(|i| format!("https://site{i}.com/*")).collect::<Vec<_>>().join("\n"),
        dictionary: "고양이\n야외\n캠핑".into(),
        tag_target_selector: "input.sc-iafpwu.UboKk".into(),
        complete_delay_ms: "400".into(),
    };
    let base = Preferences::default();
    c.bench_function("options_form_apply", |b| b.iter(|| black_box(form.apply(black_box(&base)))));
}

criterion_group!(benches, bench_preferences, bench_options_form);
criterion_main!(benches);

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sports_widgets::attributes::AttributeSet;
use sports_widgets::widget::dispatch::dispatch;
use sports_widgets::widget::normalize::{normalize, SharedConfig};
use sports_widgets::widget::state::DateState;
use sports_widgets::widget::validate::validate;
use sports_widgets::widget::WidgetConfig;

/// Shared configuration typical of a page hosting several widgets
fn create_shared_config() -> SharedConfig {
    SharedConfig::new(AttributeSet::from_pairs([
        ("sport", "football"),
        ("lang", "pt"),
        ("timezone", "Europe/Lisbon"),
        ("show-logos", "true"),
        ("refresh", "30"),
        ("logo-url", "https://media.test"),
        ("url-football", "https://football.test/"),
        ("target-game", "#game-detail"),
    ]))
}

fn create_local_attributes() -> Vec<AttributeSet> {
    vec![
        AttributeSet::from_pairs([("type", "games"), ("show-filters", "true")]),
        AttributeSet::from_pairs([("type", "standings"), ("league", "39"), ("season", "2024")]),
        AttributeSet::from_pairs([("type", "team"), ("teamId", "33"), ("team-squad", "true")]),
        AttributeSet::from_pairs([("sport", "f1"), ("type", "driver"), ("driver-id", "25")]),
        AttributeSet::from_pairs([("sport", "cricket"), ("type", "chart")]),
    ]
}

fn benchmark_normalize(c: &mut Criterion) {
    let shared = create_shared_config();
    let locals = create_local_attributes();

    c.bench_function("normalize_5_widgets", |b| {
        b.iter(|| {
            for local in &locals {
                black_box(normalize(Some(black_box(&shared)), black_box(local)));
            }
        })
    });
}

fn benchmark_normalize_and_dispatch(c: &mut Criterion) {
    let shared = create_shared_config();
    let locals = create_local_attributes();
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();

    c.bench_function("normalize_validate_dispatch", |b| {
        b.iter(|| {
            for local in &locals {
                let normalized = normalize(Some(&shared), local);
                let validated = validate(&normalized.sport, &normalized.widget_type);
                let dates = DateState::initialize(
                    normalized.options.date.as_deref(),
                    normalized.options.time_zone,
                    now,
                );
                let config = WidgetConfig {
                    sport: validated.sport,
                    widget_type: validated.widget_type,
                    options: normalized.options,
                };
                let _ = black_box(dispatch(&config, &dates));
            }
        })
    });
}

fn benchmark_write_back(c: &mut Criterion) {
    let shared = create_shared_config();
    let local = AttributeSet::from_pairs([("type", "team"), ("team-id", "33")]);
    let normalized = normalize(Some(&shared), &local);

    c.bench_function("write_back", |b| {
        b.iter(|| black_box(normalized.write_back().to_data_attributes()))
    });
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_normalize_and_dispatch,
    benchmark_write_back
);
criterion_main!(benches);

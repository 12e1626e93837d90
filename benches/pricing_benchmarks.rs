//! Performance benchmarks for the lounge pricing engine.
//!
//! Covers the pure pricing core (single quotes, batches across the day,
//! extension quotes) and the `/quote` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use lounge_engine::api::{AppState, create_router};
use lounge_engine::calculation::{
    SessionChange, calculate_session_price, quote_extension, quote_session,
};
use lounge_engine::config::ConfigLoader;
use lounge_engine::lounge::{InMemoryStore, NullPublisher};
use lounge_engine::models::{DeviceSelection, DeviceType};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// A full-floor group: every device type, several consoles.
fn busy_selection() -> DeviceSelection {
    DeviceSelection::new()
        .with(DeviceType::Ps, vec![1, 2, 3])
        .with(DeviceType::Pc, vec![1, 2, 3, 4])
        .with(DeviceType::Vr, vec![1])
        .with(DeviceType::Wheel, vec![1, 2])
        .with(DeviceType::Metabat, vec![1])
}

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/lounge").expect("Failed to load config");
    AppState::new(config, Arc::new(InMemoryStore::new()), Arc::new(NullPublisher))
}

fn bench_single_quote(c: &mut Criterion) {
    let devices = busy_selection();
    let at = make_datetime("2026-01-17 19:00:00");

    c.bench_function("calculate_session_price", |b| {
        b.iter(|| calculate_session_price(black_box(2.5), black_box(14), &devices, at))
    });

    c.bench_function("quote_session_with_audit", |b| {
        b.iter(|| quote_session(black_box(2.5), black_box(14), &devices, at))
    });
}

fn bench_day_sweep(c: &mut Criterion) {
    let devices = busy_selection();
    let mut group = c.benchmark_group("day_sweep");

    for step_minutes in [60i64, 15, 1].iter() {
        let start = make_datetime("2026-01-13 00:00:00");
        let instants: Vec<NaiveDateTime> = (0..(24 * 60 / step_minutes))
            .map(|i| start + Duration::minutes(i * step_minutes))
            .collect();

        group.throughput(Throughput::Elements(instants.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("step_minutes", step_minutes),
            &instants,
            |b, instants| {
                b.iter(|| {
                    instants
                        .iter()
                        .map(|at| calculate_session_price(1.5, 10, &devices, *at))
                        .sum::<f64>()
                })
            },
        );
    }

    group.finish();
}

fn bench_extension(c: &mut Criterion) {
    let devices = DeviceSelection::new().with(DeviceType::Ps, vec![1, 2]);
    let change = SessionChange {
        extra_hours: 1.0,
        added_people: 2,
        added_devices: DeviceSelection::new().with(DeviceType::Pc, vec![5, 6]),
    };
    let at = make_datetime("2026-01-13 22:00:00");

    c.bench_function("quote_extension", |b| {
        b.iter(|| quote_extension(black_box(400.0), 1.0, 4, &devices, &change, at))
    });
}

fn bench_quote_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "duration_hours": 2.0,
        "people_count": 6,
        "devices": {"ps": [1, 2], "pc": [1], "vr": [1]},
        "at": "2026-01-13T16:30:00"
    })
    .to_string();

    c.bench_function("post_quote", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/quote")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_quote,
    bench_day_sweep,
    bench_extension,
    bench_quote_endpoint,
);
criterion_main!(benches);

//! Benchmarks for the per-frame path: decode, store replacement, view derivation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use odyssey::store::TelemetryStore;
use odyssey::view::DashboardView;
use odyssey::wire::{self, TelemetrySnapshot};

const FRAME: &str = r#"{
  "timestamp": "2025-06-01T12:00:00.000Z",
  "rov_state": {
    "power": {"charge_percent": 87.25, "status": "fault"},
    "propulsion": {"power_level_percent": 42.5, "status": "active"},
    "hull_integrity": {"hull_pressure_kpa": 250, "status": "warning"},
    "manipulator_arm": {"status": "deployed", "sample_collected": false},
    "science_package": {"status": "attached"},
    "environment": {"depth_meters": 1200.5, "water_temp_celsius": 4.2}
  },
  "mission_state": {"status": "searching", "operator_override": false},
  "alert": {"active": true, "severity": "CRITICAL", "message": "Bus fault"}
}"#;

fn bench_decode_snapshot(c: &mut Criterion) {
    c.bench_function("decode_snapshot", |b| {
        b.iter(|| black_box(wire::decode_snapshot(black_box(FRAME))))
    });
}

fn bench_derive_view(c: &mut Criterion) {
    let snapshot = wire::decode_snapshot(FRAME).unwrap();

    c.bench_function("dashboard_view_derive", |b| {
        b.iter(|| black_box(DashboardView::derive(black_box(&snapshot))))
    });
}

fn bench_update_with_subscribers(c: &mut Criterion) {
    let store = TelemetryStore::new();
    // One subscriber per rendered panel
    let _subscriptions: Vec<_> = (0..8)
        .map(|_| store.subscribe(DashboardView::derive, |view: &DashboardView| {
            black_box(view);
        }))
        .collect();
    let frames = [
        wire::decode_snapshot(FRAME).unwrap(),
        TelemetrySnapshot::standby(),
    ];

    let mut i = 0;
    c.bench_function("update_telemetry_8_subscribers", |b| {
        b.iter(|| {
            i += 1;
            store.update_telemetry(frames[i % 2].clone());
        })
    });
}

criterion_group!(
    benches,
    bench_decode_snapshot,
    bench_derive_view,
    bench_update_with_subscribers
);
criterion_main!(benches);

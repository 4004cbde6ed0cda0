use minichart_rs::api::{ChartOptionsPatch, MinichartOverlay};
use minichart_rs::core::{ChartType, GeoPoint, MaxValues, PixelPoint, RawSeries, normalize};
use minichart_rs::map::{MapSurface, ViewportSubscription};
use minichart_rs::render::{NullContainer, NullRendererFactory};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct StaticMap;

impl MapSurface for StaticMap {
    fn project_to_screen(&self, point: GeoPoint) -> PixelPoint {
        PixelPoint::new(point.lng, point.lat)
    }

    fn on_viewport_change(&mut self) -> ViewportSubscription {
        ViewportSubscription(0)
    }

    fn off_viewport_change(&mut self, _subscription: ViewportSubscription) {}
}

fn bench_normalize_auto_10k(c: &mut Criterion) {
    let raw = RawSeries::from_values((0..10_000).map(|i| {
        let t = f64::from(i);
        if i % 97 == 0 { f64::NAN } else { (t * 0.37).sin() * 1_000.0 }
    }));

    c.bench_function("normalize_auto_10k", |b| {
        b.iter(|| {
            black_box(
                normalize(black_box(&raw), black_box(&MaxValues::Auto), ChartType::Bar)
                    .expect("normalize should succeed"),
            );
        })
    });
}

fn bench_incremental_update(c: &mut Criterion) {
    let mut overlay = MinichartOverlay::create(
        GeoPoint::new(48.85, 2.35),
        &ChartOptionsPatch::new().with_type(ChartType::PolarArea),
        NullRendererFactory::new(),
    )
    .expect("create");
    overlay
        .attach(&mut StaticMap, NullContainer::default())
        .expect("attach");
    let patch = ChartOptionsPatch::new().with_data(vec![12.0, 7.5, 3.0, 22.0, 9.0]);

    c.bench_function("overlay_incremental_update", |b| {
        b.iter(|| {
            black_box(
                overlay
                    .set_options(black_box(&patch))
                    .expect("update should succeed"),
            );
        })
    });
}

criterion_group!(benches, bench_normalize_auto_10k, bench_incremental_update);
criterion_main!(benches);

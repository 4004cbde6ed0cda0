use minichart_rs::api::{ChartOptionsPatch, MinichartOverlay, OVERLAY_SNAPSHOT_JSON_SCHEMA_V1};
use minichart_rs::core::{ChartType, GeoPoint, PixelPoint};
use minichart_rs::map::{MapSurface, ViewportSubscription};
use minichart_rs::render::{NullContainer, NullRendererFactory};

struct OffsetMap;

impl MapSurface for OffsetMap {
    fn project_to_screen(&self, point: GeoPoint) -> PixelPoint {
        PixelPoint::new(point.lng + 100.0, point.lat + 100.0)
    }

    fn on_viewport_change(&mut self) -> ViewportSubscription {
        ViewportSubscription(7)
    }

    fn off_viewport_change(&mut self, _subscription: ViewportSubscription) {}
}

#[test]
fn detached_snapshot_has_no_placement() {
    let overlay = MinichartOverlay::create(
        GeoPoint::new(1.0, 2.0),
        &ChartOptionsPatch::new().with_type(ChartType::Pie),
        NullRendererFactory::new(),
    )
    .expect("create");

    let snapshot = overlay.snapshot();
    assert!(!snapshot.attached);
    assert_eq!(snapshot.chart_type, ChartType::Pie);
    assert_eq!(snapshot.active_type, None);
    assert_eq!(snapshot.placement, None);
    assert_eq!(snapshot.build_count, 0);
    assert!(snapshot.values.is_empty());
}

#[test]
fn snapshot_tracks_builds_and_updates() {
    let mut overlay = MinichartOverlay::create(
        GeoPoint::new(0.0, 0.0),
        &ChartOptionsPatch::new().with_data(vec![1.0, 4.0]),
        NullRendererFactory::new(),
    )
    .expect("create");
    overlay
        .attach(&mut OffsetMap, NullContainer::default())
        .expect("attach");
    overlay
        .set_options(&ChartOptionsPatch::new().with_data(vec![2.0, 4.0]))
        .expect("update");

    let snapshot = overlay.snapshot();
    assert!(snapshot.attached);
    assert_eq!(snapshot.active_type, Some(ChartType::Bar));
    assert_eq!(snapshot.build_count, 1);
    assert_eq!(snapshot.update_count, 1);
    assert_eq!(snapshot.values, vec![0.5, 1.0]);
    assert_eq!(
        snapshot.placement.map(|p| p.top_left),
        Some(PixelPoint::new(70.0, 70.0))
    );
}

#[test]
fn snapshot_json_carries_schema_version() {
    let overlay = MinichartOverlay::create(
        GeoPoint::new(0.0, 0.0),
        &ChartOptionsPatch::new(),
        NullRendererFactory::new(),
    )
    .expect("create");

    let json = overlay.snapshot().to_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["schema_version"], OVERLAY_SNAPSHOT_JSON_SCHEMA_V1);
    assert_eq!(value["snapshot"]["chart_type"], "bar");
}

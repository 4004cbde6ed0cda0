use minichart_rs::api::{ChartOptionsPatch, DrawOutcome, MinichartOverlay};
use minichart_rs::core::{ChartType, GeoPoint, PixelPoint};
use minichart_rs::map::{MapSurface, ViewportSubscription};
use minichart_rs::render::{NullContainer, NullRendererFactory};
use proptest::prelude::*;

struct FixedMap;

impl MapSurface for FixedMap {
    fn project_to_screen(&self, point: GeoPoint) -> PixelPoint {
        PixelPoint::new(point.lng, point.lat)
    }

    fn on_viewport_change(&mut self) -> ViewportSubscription {
        ViewportSubscription(1)
    }

    fn off_viewport_change(&mut self, _subscription: ViewportSubscription) {}
}

fn chart_type() -> impl Strategy<Value = ChartType> {
    prop::sample::select(ChartType::ALL.to_vec())
}

proptest! {
    #[test]
    fn repeating_identical_options_never_rebuilds(
        chart_type in chart_type(),
        data in prop::collection::vec(-1_000.0f64..1_000.0, 1..16),
        repeats in 1usize..6
    ) {
        let factory = NullRendererFactory::new();
        let patch = ChartOptionsPatch::new().with_type(chart_type).with_data(data);
        let mut overlay = MinichartOverlay::create(GeoPoint::new(0.0, 0.0), &patch, factory.clone())
            .expect("create");
        overlay.attach(&mut FixedMap, NullContainer::default()).expect("attach");

        for _ in 0..repeats {
            let outcome = overlay.set_options(&patch).expect("set options");
            prop_assert_eq!(outcome, DrawOutcome::IncrementalUpdate);
        }

        let stats = factory.stats();
        prop_assert_eq!(stats.constructed, 1);
        prop_assert_eq!(stats.updates, repeats);
        prop_assert_eq!(stats.last_instance, Some(1));
    }

    #[test]
    fn one_rebuild_per_type_change(types in prop::collection::vec(chart_type(), 1..12)) {
        let factory = NullRendererFactory::new();
        let mut overlay = MinichartOverlay::create(
            GeoPoint::new(10.0, 20.0),
            &ChartOptionsPatch::new().with_data(vec![3.0, 1.0, 2.0]),
            factory.clone(),
        )
        .expect("create");
        overlay.attach(&mut FixedMap, NullContainer::default()).expect("attach");

        let mut previous = ChartType::Bar;
        let mut expected_builds = 1;
        for chart_type in types {
            let outcome = overlay
                .set_options(&ChartOptionsPatch::new().with_type(chart_type))
                .expect("set options");
            if chart_type == previous {
                prop_assert_eq!(outcome, DrawOutcome::IncrementalUpdate);
            } else {
                prop_assert_eq!(outcome, DrawOutcome::FullBuild);
                expected_builds += 1;
            }
            previous = chart_type;
        }

        prop_assert_eq!(factory.stats().constructed, expected_builds);
        prop_assert_eq!(overlay.build_count(), expected_builds as u64);
    }
}

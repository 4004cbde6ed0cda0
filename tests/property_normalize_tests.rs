use minichart_rs::MinichartError;
use minichart_rs::core::{ChartType, MaxValues, RawSeries, normalize};
use proptest::prelude::*;

fn chart_type() -> impl Strategy<Value = ChartType> {
    prop::sample::select(ChartType::ALL.to_vec())
}

fn sparse_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1.0e9f64..1.0e9,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn auto_scaled_values_stay_in_unit_range(
        values in prop::collection::vec(-1.0e9f64..1.0e9, 1..64),
        chart_type in chart_type()
    ) {
        prop_assume!(!chart_type.is_whole_to_parts());
        let raw = RawSeries::from(values);
        let normalized = normalize(&raw, &MaxValues::Auto, chart_type).expect("normalize");

        prop_assert_eq!(normalized.values.len(), raw.len());
        for value in normalized.values {
            prop_assert!((-1.0..=1.0).contains(&value), "{} outside [-1, 1]", value);
        }
    }

    #[test]
    fn pie_values_are_never_scaled(values in prop::collection::vec(-1.0e6f64..1.0e6, 0..32)) {
        let raw = RawSeries::from(values);
        let normalized = normalize(&raw, &MaxValues::Auto, ChartType::Pie).expect("normalize");
        prop_assert_eq!(normalized.values.as_slice(), raw.values());
    }

    #[test]
    fn sparse_input_is_deterministic_and_finite(
        values in prop::collection::vec(sparse_value(), 0..48),
        chart_type in chart_type()
    ) {
        let first = normalize(&RawSeries::from(values.clone()), &MaxValues::Auto, chart_type)
            .expect("non-finite input never errors");
        let second = normalize(&RawSeries::from(values.clone()), &MaxValues::Auto, chart_type)
            .expect("non-finite input never errors");

        prop_assert_eq!(&first, &second);
        for (scaled, original) in first.values.iter().zip(&values) {
            prop_assert!(scaled.is_finite());
            if !original.is_finite() {
                prop_assert_eq!(*scaled, 0.0);
            }
        }
    }

    #[test]
    fn mismatched_bound_count_always_fails(
        data_len in 0usize..16,
        bounds_len in 0usize..16,
        chart_type in chart_type()
    ) {
        prop_assume!(bounds_len != 1 && bounds_len != data_len);
        let raw = RawSeries::from(vec![1.0; data_len]);
        let bounds = MaxValues::fixed(vec![2.0; bounds_len]);

        let err = normalize(&raw, &bounds, chart_type).expect_err("length mismatch");
        prop_assert_eq!(
            err,
            MinichartError::BoundsLengthMismatch { bounds: bounds_len, data: data_len }
        );
    }
}

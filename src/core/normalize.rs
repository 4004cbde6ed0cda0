use ordered_float::OrderedFloat;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

use crate::core::ChartType;
use crate::error::{MinichartError, MinichartResult};

/// Ordered chart input; every stored value is finite.
///
/// Construction never fails: entries that are not numbers or not finite are
/// replaced with `0.0`, so sparse host data still renders.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    values: Vec<f64>,
}

impl RawSeries {
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(finite_or_zero).collect(),
        }
    }

    #[must_use]
    pub fn single(value: f64) -> Self {
        Self::from_values([value])
    }

    /// Coerces a JSON number or array into a series.
    ///
    /// Numbers and numeric strings are kept, everything else becomes `0.0`.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        Self {
            values: coerce_json_sequence(value),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for RawSeries {
    fn default() -> Self {
        Self::single(1.0)
    }
}

impl From<Vec<f64>> for RawSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl From<&[f64]> for RawSeries {
    fn from(values: &[f64]) -> Self {
        Self::from_values(values.iter().copied())
    }
}

impl From<f64> for RawSeries {
    fn from(value: f64) -> Self {
        Self::single(value)
    }
}

impl Serialize for RawSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Per-series divisors: one shared bound or one bound per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds(SmallVec<[f64; 4]>);

impl ScaleBounds {
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().map(finite_or_zero).collect())
    }

    #[must_use]
    pub fn single(bound: f64) -> Self {
        Self::from_values([bound])
    }

    /// Single symmetric bound covering both the largest value and the
    /// magnitude of the smallest one.
    #[must_use]
    pub fn auto_for(values: &[f64]) -> Self {
        let max = values.iter().copied().map(OrderedFloat).max();
        let min = values.iter().copied().map(OrderedFloat).min();
        let bound = match (max, min) {
            (Some(max), Some(min)) => max.0.max(min.0.abs()),
            _ => 0.0,
        };
        Self::single(bound)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bound applied to element `index`; bounds repeat when shorter than the data.
    ///
    /// Callers must not use an empty bound set.
    fn for_index(&self, index: usize) -> f64 {
        self.0[index % self.0.len()]
    }
}

/// The `maxValues` option.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MaxValues {
    #[default]
    Auto,
    Fixed(ScaleBounds),
}

impl MaxValues {
    #[must_use]
    pub fn fixed(bounds: impl IntoIterator<Item = f64>) -> Self {
        Self::Fixed(ScaleBounds::from_values(bounds))
    }

    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(tag) if tag == "auto" => Self::Auto,
            other => Self::Fixed(ScaleBounds(coerce_json_sequence(other).into())),
        }
    }
}

impl Serialize for MaxValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(bounds) => bounds.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MaxValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Value::String(tag) = &value {
            if tag != "auto" && tag.trim().parse::<f64>().is_err() {
                return Err(D::Error::custom(format!(
                    "maxValues must be \"auto\", a number or an array, got \"{tag}\""
                )));
            }
        }
        Ok(Self::from_json(&value))
    }
}

/// Data ready for a renderer, with the bounds used to scale it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub values: Vec<f64>,
    pub bounds: ScaleBounds,
}

/// Scales `raw` by its bounds.
///
/// Whole-to-parts chart types receive the data unscaled. Fails when an
/// explicit bound set has neither one element nor one per data value.
pub fn normalize(
    raw: &RawSeries,
    max_values: &MaxValues,
    chart_type: ChartType,
) -> MinichartResult<NormalizedSeries> {
    let data = raw.values();
    let bounds = match max_values {
        MaxValues::Auto => ScaleBounds::auto_for(data),
        MaxValues::Fixed(bounds) => bounds.clone(),
    };

    if bounds.len() != 1 && bounds.len() != data.len() {
        return Err(MinichartError::BoundsLengthMismatch {
            bounds: bounds.len(),
            data: data.len(),
        });
    }

    let values = if chart_type.is_whole_to_parts() {
        data.to_vec()
    } else {
        data.iter()
            .enumerate()
            .map(|(index, &value)| scale_value(value, bounds.for_index(index)))
            .collect()
    };

    Ok(NormalizedSeries { values, bounds })
}

fn scale_value(value: f64, bound: f64) -> f64 {
    // A zero bound only happens for all-zero data or an explicit 0.
    if bound == 0.0 { 0.0 } else { value / bound }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn coerce_json_value(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map_or(0.0, finite_or_zero)
}

fn coerce_json_sequence(value: &Value) -> Vec<f64> {
    match value {
        Value::Array(items) => items.iter().map(coerce_json_value).collect(),
        other => vec![coerce_json_value(other)],
    }
}

use std::fmt;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::RawSeries;

/// Custom label callback receiving the raw value and its index.
pub type LabelFormatterFn = Arc<dyn Fn(f64, usize) -> String + Send + Sync + 'static>;

/// Source of the text drawn on each chart element.
#[derive(Clone, Default)]
pub enum LabelProvider {
    #[default]
    None,
    /// Compact formatting of the raw values.
    Auto,
    /// Fixed text per element.
    Fixed(Vec<String>),
    Computed(LabelFormatterFn),
}

impl LabelProvider {
    #[must_use]
    pub fn computed(formatter: impl Fn(f64, usize) -> String + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(formatter))
    }

    /// Builds one label per raw value, or `None` when labels are disabled.
    ///
    /// Fixed lists are aligned to the series: missing entries are empty and
    /// extra entries are dropped.
    #[must_use]
    pub fn resolve(&self, raw: &RawSeries) -> Option<Vec<String>> {
        let values = raw.values();
        match self {
            Self::None => None,
            Self::Auto => Some(values.iter().map(|&value| format_compact(value)).collect()),
            Self::Fixed(labels) => Some(
                (0..values.len())
                    .map(|index| labels.get(index).cloned().unwrap_or_default())
                    .collect(),
            ),
            Self::Computed(formatter) => Some(
                values
                    .iter()
                    .enumerate()
                    .map(|(index, &value)| formatter(value, index))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for LabelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Auto => f.write_str("Auto"),
            Self::Fixed(labels) => f.debug_tuple("Fixed").field(labels).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl PartialEq for LabelProvider {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::Auto, Self::Auto) => true,
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for LabelProvider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_str("none"),
            Self::Auto => serializer.serialize_str("auto"),
            Self::Fixed(labels) => labels.serialize(serializer),
            Self::Computed(_) => serializer.serialize_str("computed"),
        }
    }
}

impl<'de> Deserialize<'de> for LabelProvider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(tag) if tag == "none" => Ok(Self::None),
            Value::String(tag) if tag == "auto" => Ok(Self::Auto),
            Value::Array(items) => Ok(Self::Fixed(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(text) => text,
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            other => Err(D::Error::custom(format!(
                "labels must be \"none\", \"auto\" or an array, got {other}"
            ))),
        }
    }
}

const SI_SUFFIXES: [&str; 4] = ["k", "M", "G", "T"];

/// Formats a value for a small chart label.
///
/// Values below 1000 in magnitude keep at most two decimals. Larger values
/// keep three significant digits with an SI suffix (`1234` -> `1.23k`).
#[must_use]
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }

    // Branch on the rounded text so 999.996 becomes `1k`, not `1000`.
    let small = format!("{value:.2}");
    if small.parse::<f64>().is_ok_and(|rounded| rounded.abs() < 1_000.0) {
        return trim_decimals(small);
    }

    let mut scaled = value;
    let mut suffix = SI_SUFFIXES[0];
    for candidate in SI_SUFFIXES {
        scaled /= 1_000.0;
        suffix = candidate;
        if scaled.abs() < 999.5 || candidate == SI_SUFFIXES[SI_SUFFIXES.len() - 1] {
            break;
        }
    }

    let decimals = if scaled.abs() >= 99.95 {
        0
    } else if scaled.abs() >= 9.995 {
        1
    } else {
        2
    };
    let body = trim_decimals(format!("{scaled:.decimals$}"));
    format!("{body}{suffix}")
}

fn trim_decimals(text: String) -> String {
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_formatting_of_small_values() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(1.0 / 3.0), "0.33");
        assert_eq!(format_compact(12.5), "12.5");
        assert_eq!(format_compact(-0.001), "0");
        assert_eq!(format_compact(999.0), "999");
    }

    #[test]
    fn compact_formatting_uses_si_suffixes() {
        assert_eq!(format_compact(1_234.0), "1.23k");
        assert_eq!(format_compact(12_345.0), "12.3k");
        assert_eq!(format_compact(123_456.0), "123k");
        assert_eq!(format_compact(-2_500_000.0), "-2.5M");
        assert_eq!(format_compact(999_999.0), "1M");
        assert_eq!(format_compact(4.2e12), "4.2T");
        assert_eq!(format_compact(999.996), "1k");
        assert_eq!(format_compact(-999.999), "-1k");
        assert_eq!(format_compact(999.99), "999.99");
    }
}

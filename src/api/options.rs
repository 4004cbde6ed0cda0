use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::{ChartType, LabelProvider, MaxValues, RawSeries};
use crate::error::{MinichartError, MinichartResult};
use crate::render::Color;

/// d3 "category10" palette used when no colors are configured.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

pub const DEFAULT_WIDTH: f64 = 60.0;
pub const DEFAULT_HEIGHT: f64 = 60.0;
pub const DEFAULT_LABEL_MIN_SIZE: f64 = 8.0;
pub const DEFAULT_LABEL_MAX_SIZE: f64 = 24.0;
pub const DEFAULT_LABEL_PADDING: f64 = 2.0;
pub const DEFAULT_LABEL_STYLE: &str = "font-family:sans-serif";
pub const DEFAULT_TRANSITION_TIME: Duration = Duration::from_millis(750);

/// Text color of chart labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LabelColor {
    /// Black or white, whichever contrasts with the element's fill.
    #[default]
    Auto,
    Fixed(Color),
}

impl TryFrom<String> for LabelColor {
    type Error = MinichartError;

    fn try_from(text: String) -> MinichartResult<Self> {
        if text == "auto" {
            Ok(Self::Auto)
        } else {
            Color::from_hex(&text).map(Self::Fixed)
        }
    }
}

impl From<LabelColor> for String {
    fn from(color: LabelColor) -> Self {
        match color {
            LabelColor::Auto => "auto".to_owned(),
            LabelColor::Fixed(color) => color.to_hex(),
        }
    }
}

/// Effective overlay configuration.
///
/// Each merge produces a fresh value; an overlay never mutates the options
/// it was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: RawSeries,
    pub max_values: MaxValues,
    pub colors: Vec<Color>,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub labels: LabelProvider,
    pub label_min_size: f64,
    pub label_max_size: f64,
    pub label_padding: f64,
    pub label_color: LabelColor,
    pub label_style: String,
    #[serde(serialize_with = "serialize_millis")]
    pub transition_time: Duration,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            data: RawSeries::default(),
            max_values: MaxValues::Auto,
            colors: DEFAULT_PALETTE.to_vec(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            opacity: 1.0,
            labels: LabelProvider::None,
            label_min_size: DEFAULT_LABEL_MIN_SIZE,
            label_max_size: DEFAULT_LABEL_MAX_SIZE,
            label_padding: DEFAULT_LABEL_PADDING,
            label_color: LabelColor::Auto,
            label_style: DEFAULT_LABEL_STYLE.to_owned(),
            transition_time: DEFAULT_TRANSITION_TIME,
        }
    }
}

impl ChartOptions {
    /// Checks numeric domains and the palette.
    pub fn validate(&self) -> MinichartResult<()> {
        for (option, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MinichartError::invalid_option(
                    option,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(MinichartError::invalid_option(
                "opacity",
                format!("must be in [0, 1], got {}", self.opacity),
            ));
        }
        for (option, value) in [
            ("labelMinSize", self.label_min_size),
            ("labelMaxSize", self.label_max_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MinichartError::invalid_option(
                    option,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        if self.label_min_size > self.label_max_size {
            return Err(MinichartError::invalid_option(
                "labelMinSize",
                format!(
                    "{} exceeds labelMaxSize {}",
                    self.label_min_size, self.label_max_size
                ),
            ));
        }
        if !self.label_padding.is_finite() || self.label_padding < 0.0 {
            return Err(MinichartError::invalid_option(
                "labelPadding",
                format!("must be finite and >= 0, got {}", self.label_padding),
            ));
        }
        if self.colors.is_empty() {
            return Err(MinichartError::invalid_option(
                "colors",
                "palette must not be empty",
            ));
        }
        for color in &self.colors {
            color.validate()?;
        }
        if let LabelColor::Fixed(color) = self.label_color {
            color.validate()?;
        }
        Ok(())
    }
}

/// Partial options supplied by a caller; absent fields keep their
/// previous value on merge.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptionsPatch {
    #[serde(rename = "type")]
    pub chart_type: Option<ChartType>,
    pub data: Option<RawSeries>,
    pub max_values: Option<MaxValues>,
    pub colors: Option<Vec<Color>>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub labels: Option<LabelProvider>,
    pub label_min_size: Option<f64>,
    pub label_max_size: Option<f64>,
    pub label_padding: Option<f64>,
    pub label_color: Option<LabelColor>,
    pub label_style: Option<String>,
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub transition_time: Option<Duration>,
}

impl ChartOptionsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object using the camelCase option keys.
    pub fn from_json_str(input: &str) -> MinichartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| MinichartError::InvalidOptionsJson(e.to_string()))?;
        // Checked first so an unknown tag surfaces as a chart type error.
        if let Some(Value::String(tag)) = value.get("type") {
            tag.parse::<ChartType>()?;
        }
        serde_json::from_value(value)
            .map_err(|e| MinichartError::InvalidOptionsJson(e.to_string()))
    }

    #[must_use]
    pub fn with_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    /// Sets the chart type from its textual tag.
    pub fn with_type_tag(self, tag: &str) -> MinichartResult<Self> {
        Ok(self.with_type(tag.parse()?))
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<RawSeries>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_max_values(mut self, max_values: MaxValues) -> Self {
        self.max_values = Some(max_values);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelProvider) -> Self {
        self.labels = Some(labels);
        self
    }

    #[must_use]
    pub fn with_label_sizes(mut self, min_size: f64, max_size: f64) -> Self {
        self.label_min_size = Some(min_size);
        self.label_max_size = Some(max_size);
        self
    }

    #[must_use]
    pub fn with_label_padding(mut self, padding: f64) -> Self {
        self.label_padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_label_color(mut self, color: LabelColor) -> Self {
        self.label_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_label_style(mut self, style: impl Into<String>) -> Self {
        self.label_style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_transition_time(mut self, transition_time: Duration) -> Self {
        self.transition_time = Some(transition_time);
        self
    }

    /// Overlays this patch on `previous`.
    #[must_use]
    pub fn merge(&self, previous: &ChartOptions) -> ChartOptions {
        ChartOptions {
            chart_type: self.chart_type.unwrap_or(previous.chart_type),
            data: pick(&self.data, &previous.data),
            max_values: pick(&self.max_values, &previous.max_values),
            colors: pick(&self.colors, &previous.colors),
            width: self.width.unwrap_or(previous.width),
            height: self.height.unwrap_or(previous.height),
            opacity: self.opacity.unwrap_or(previous.opacity),
            labels: pick(&self.labels, &previous.labels),
            label_min_size: self.label_min_size.unwrap_or(previous.label_min_size),
            label_max_size: self.label_max_size.unwrap_or(previous.label_max_size),
            label_padding: self.label_padding.unwrap_or(previous.label_padding),
            label_color: self.label_color.unwrap_or(previous.label_color),
            label_style: pick(&self.label_style, &previous.label_style),
            transition_time: self.transition_time.unwrap_or(previous.transition_time),
        }
    }
}

/// Combines caller options with the previous effective options.
#[must_use]
pub fn merge(new_options: &ChartOptionsPatch, previous: &ChartOptions) -> ChartOptions {
    new_options.merge(previous)
}

fn pick<T: Clone>(new: &Option<T>, previous: &T) -> T {
    new.as_ref().unwrap_or(previous).clone()
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

fn deserialize_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    let Some(millis) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Duration::try_from_secs_f64(millis / 1_000.0)
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid transitionTime {millis}: {e}")))
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MinichartError, MinichartResult};

/// Chart family tag accepted by the `type` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
    PolarRadius,
    PolarArea,
}

impl ChartType {
    pub const ALL: [Self; 4] = [Self::Bar, Self::Pie, Self::PolarRadius, Self::PolarArea];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::PolarRadius => "polar-radius",
            Self::PolarArea => "polar-area",
        }
    }

    /// Whole-to-parts charts compute proportions themselves and receive
    /// unscaled data.
    #[must_use]
    pub const fn is_whole_to_parts(self) -> bool {
        matches!(self, Self::Pie)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChartType {
    type Err = MinichartError;

    fn from_str(tag: &str) -> MinichartResult<Self> {
        match tag {
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            "polar-radius" => Ok(Self::PolarRadius),
            "polar-area" => Ok(Self::PolarArea),
            other => Err(MinichartError::UnsupportedChartType(other.to_owned())),
        }
    }
}

impl TryFrom<String> for ChartType {
    type Error = MinichartError;

    fn try_from(tag: String) -> MinichartResult<Self> {
        tag.parse()
    }
}

impl From<ChartType> for String {
    fn from(chart_type: ChartType) -> Self {
        chart_type.tag().to_owned()
    }
}

/// Renderer implementation a chart type is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererFamily {
    Bar,
    Pie,
    Polar,
}

/// How a polar chart maps a value to its slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarMode {
    /// Slice radius is proportional to the value.
    Radius,
    /// Slice area is proportional to the value.
    Area,
}

/// Renderer family plus the optional rendering sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererSpec {
    pub family: RendererFamily,
    pub polar_mode: Option<PolarMode>,
}

#[must_use]
pub const fn resolve(chart_type: ChartType) -> RendererSpec {
    let (family, polar_mode) = match chart_type {
        ChartType::Bar => (RendererFamily::Bar, None),
        ChartType::Pie => (RendererFamily::Pie, None),
        ChartType::PolarRadius => (RendererFamily::Polar, Some(PolarMode::Radius)),
        ChartType::PolarArea => (RendererFamily::Polar, Some(PolarMode::Area)),
    };
    RendererSpec { family, polar_mode }
}

/// Resolves a raw type tag, rejecting tags outside the supported families.
pub fn resolve_tag(tag: &str) -> MinichartResult<RendererSpec> {
    tag.parse().map(resolve)
}

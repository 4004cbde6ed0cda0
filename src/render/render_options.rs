use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{NormalizedSeries, PixelPoint, PolarMode};
use crate::error::{MinichartError, MinichartResult};
use crate::render::Color;

/// Label sizing and styling handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub min_size: f64,
    pub max_size: f64,
    pub padding: f64,
    /// Free-form style declaration, e.g. `font-family:sans-serif`.
    pub style: String,
}

/// Flattened configuration for one draw call.
///
/// Rebuilt on every redraw; renderers must not keep references into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    /// One fill color per data element.
    pub colors: Vec<Color>,
    /// One label per data element, `None` when labels are disabled.
    pub labels: Option<Vec<String>>,
    /// One label text color per data element.
    pub label_colors: Vec<Color>,
    pub label_style: LabelStyle,
    pub transition: Duration,
    pub polar_mode: Option<PolarMode>,
}

impl RenderOptions {
    /// Checks that per-element vectors line up with `data`.
    pub fn validate(&self, data: &NormalizedSeries) -> MinichartResult<()> {
        let len = data.values.len();
        if self.colors.len() != len || self.label_colors.len() != len {
            return Err(MinichartError::Render(format!(
                "expected {len} colors, got {} fills and {} label colors",
                self.colors.len(),
                self.label_colors.len()
            )));
        }
        if let Some(labels) = &self.labels {
            if labels.len() != len {
                return Err(MinichartError::Render(format!(
                    "expected {len} labels, got {}",
                    labels.len()
                )));
            }
        }
        for color in self.colors.iter().chain(&self.label_colors) {
            color.validate()?;
        }
        Ok(())
    }
}

/// Screen footprint of an overlay container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub top_left: PixelPoint,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
}

impl Placement {
    /// Footprint of `width` x `height` centered on `anchor`.
    #[must_use]
    pub fn centered_on(anchor: PixelPoint, width: f64, height: f64, opacity: f64) -> Self {
        Self {
            top_left: anchor.offset(-width / 2.0, -height / 2.0),
            width,
            height,
            opacity,
        }
    }
}

use crate::core::RendererSpec;
use crate::render::{Color, LabelStyle, RenderOptions};

use super::{ChartOptions, LabelColor};

impl ChartOptions {
    /// Assembles the renderer bundle for a series of `len` elements.
    ///
    /// Labels are computed from the raw data, never from scaled values.
    #[must_use]
    pub fn render_options(&self, spec: RendererSpec, len: usize) -> RenderOptions {
        let colors = cycle_palette(&self.colors, len);
        let label_colors = match self.label_color {
            LabelColor::Auto => colors.iter().map(|fill| fill.contrast_text()).collect(),
            LabelColor::Fixed(color) => vec![color; len],
        };

        RenderOptions {
            width: self.width,
            height: self.height,
            colors,
            labels: self.labels.resolve(&self.data),
            label_colors,
            label_style: LabelStyle {
                min_size: self.label_min_size,
                max_size: self.label_max_size,
                padding: self.label_padding,
                style: self.label_style.clone(),
            },
            transition: self.transition_time,
            polar_mode: spec.polar_mode,
        }
    }
}

fn cycle_palette(palette: &[Color], len: usize) -> Vec<Color> {
    palette.iter().copied().cycle().take(len).collect()
}

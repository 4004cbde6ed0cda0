pub mod chart_type;
pub mod labels;
pub mod normalize;
pub mod types;

pub use chart_type::{ChartType, PolarMode, RendererFamily, RendererSpec, resolve, resolve_tag};
pub use labels::{LabelFormatterFn, LabelProvider, format_compact};
pub use normalize::{MaxValues, NormalizedSeries, RawSeries, ScaleBounds, normalize};
pub use types::{GeoPoint, PixelPoint};

mod null_renderer;
mod primitives;
mod render_options;

pub use null_renderer::{NullContainer, NullRenderStats, NullRenderer, NullRendererFactory};
pub use primitives::Color;
pub use render_options::{LabelStyle, Placement, RenderOptions};

use std::time::Duration;

use crate::core::{NormalizedSeries, RendererFamily};
use crate::error::MinichartResult;

/// Live chart drawing owned by one overlay.
///
/// Implementations animate their own transition on `update`; the caller
/// never waits for it to finish.
pub trait ChartRenderer {
    fn family(&self) -> RendererFamily;
    fn update(&mut self, data: &NormalizedSeries, options: &RenderOptions) -> MinichartResult<()>;
}

/// Host element an overlay draws into.
pub trait OverlayContainer {
    /// Removes every graphical child of the container.
    fn clear(&mut self);

    /// Moves the container to `placement`, animating over `duration`.
    ///
    /// A new call supersedes any transition still in flight.
    fn transition_to(&mut self, placement: Placement, duration: Duration);
}

/// Contract implemented by any rendering backend.
///
/// Backends build one renderer per chart family inside an already cleared
/// container.
pub trait RendererFactory {
    type Container: OverlayContainer;

    fn construct(
        &mut self,
        family: RendererFamily,
        container: &mut Self::Container,
        data: &NormalizedSeries,
        options: &RenderOptions,
    ) -> MinichartResult<Box<dyn ChartRenderer>>;
}

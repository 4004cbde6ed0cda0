use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    ChartType, GeoPoint, NormalizedSeries, PixelPoint, RendererSpec, normalize, resolve,
};
use crate::error::{AttachError, MinichartError, MinichartResult};
use crate::map::{MapSurface, ViewportSubscription};
use crate::render::{
    ChartRenderer, OverlayContainer, Placement, RenderOptions, RendererFactory,
};

use super::{ChartOptions, ChartOptionsPatch};

/// What a draw request did to the overlay's renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// Container cleared and a new renderer constructed.
    FullBuild,
    /// Existing renderer updated in place.
    IncrementalUpdate,
    /// Options stored; nothing drawn because the overlay is detached.
    Deferred,
}

/// Everything a redraw needs, computed before any state is touched.
struct PreparedDraw {
    options: ChartOptions,
    spec: RendererSpec,
    data: NormalizedSeries,
    render_options: RenderOptions,
}

impl PreparedDraw {
    fn new(options: ChartOptions) -> MinichartResult<Self> {
        options.validate()?;
        let spec = resolve(options.chart_type);
        let data = normalize(&options.data, &options.max_values, options.chart_type)?;
        let render_options = options.render_options(spec, data.values.len());
        Ok(Self {
            options,
            spec,
            data,
            render_options,
        })
    }
}

struct Attachment<C> {
    container: C,
    subscription: ViewportSubscription,
    renderer: Box<dyn ChartRenderer>,
    active_type: ChartType,
    /// Set when a rebuild failed after the container was cleared.
    needs_full_build: bool,
    anchor_px: PixelPoint,
    placement: Placement,
}

/// One chart pinned to a geographic anchor.
///
/// The overlay owns its renderer exclusively. Configuration errors are
/// detected before the renderer or the stored options change, so a failed
/// `set_options` leaves the chart as it was.
pub struct MinichartOverlay<F: RendererFactory> {
    anchor: GeoPoint,
    options: ChartOptions,
    factory: F,
    attachment: Option<Attachment<F::Container>>,
    build_count: u64,
    update_count: u64,
    last_values: Vec<f64>,
}

impl<F: RendererFactory> MinichartOverlay<F> {
    /// Creates a detached overlay with `options` merged over the defaults.
    pub fn create(
        anchor: GeoPoint,
        options: &ChartOptionsPatch,
        factory: F,
    ) -> MinichartResult<Self> {
        let prepared = PreparedDraw::new(options.merge(&ChartOptions::default()))?;
        Ok(Self {
            anchor,
            options: prepared.options,
            factory,
            attachment: None,
            build_count: 0,
            update_count: 0,
            last_values: Vec::new(),
        })
    }

    #[must_use]
    pub fn anchor(&self) -> GeoPoint {
        self.anchor
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Chart type the live renderer was built for.
    #[must_use]
    pub fn active_type(&self) -> Option<ChartType> {
        self.attachment.as_ref().map(|a| a.active_type)
    }

    #[must_use]
    pub fn container(&self) -> Option<&F::Container> {
        self.attachment.as_ref().map(|a| &a.container)
    }

    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.attachment.as_ref().map(|a| a.placement)
    }

    #[must_use]
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Scaled values sent to the renderer by the latest draw.
    #[must_use]
    pub fn last_values(&self) -> &[f64] {
        &self.last_values
    }

    /// Mounts the overlay into `container` and performs a full build.
    ///
    /// The viewport subscription is registered only once the build succeeded.
    /// On failure the container is handed back inside the error.
    pub fn attach<M: MapSurface>(
        &mut self,
        map: &mut M,
        mut container: F::Container,
    ) -> Result<DrawOutcome, AttachError<F::Container>> {
        if self.attachment.is_some() {
            return Err(AttachError::new(MinichartError::AlreadyAttached, container));
        }

        let prepared = match PreparedDraw::new(self.options.clone()) {
            Ok(prepared) => prepared,
            Err(error) => return Err(AttachError::new(error, container)),
        };
        let renderer = match full_build(&mut self.factory, &mut container, &prepared) {
            Ok(renderer) => renderer,
            Err(error) => {
                warn!(chart_type = %prepared.options.chart_type, %error, "attach build failed");
                return Err(AttachError::new(error, container));
            }
        };
        let anchor_px = map.project_to_screen(self.anchor);
        let placement = placement_for(&prepared.options, anchor_px);
        container.transition_to(placement, Duration::ZERO);
        let subscription = map.on_viewport_change();

        debug!(
            chart_type = %prepared.options.chart_type,
            values = prepared.data.values.len(),
            x = anchor_px.x,
            y = anchor_px.y,
            "attach overlay"
        );
        self.attachment = Some(Attachment {
            container,
            subscription,
            renderer,
            active_type: prepared.options.chart_type,
            needs_full_build: false,
            anchor_px,
            placement,
        });
        self.commit(prepared, DrawOutcome::FullBuild);
        Ok(DrawOutcome::FullBuild)
    }

    /// Merges `patch` into the effective options and redraws.
    ///
    /// A changed chart type rebuilds the renderer; otherwise the existing
    /// renderer is updated. A rebuild that failed earlier is retried on the
    /// next call. Detached overlays only store the options.
    pub fn set_options(&mut self, patch: &ChartOptionsPatch) -> MinichartResult<DrawOutcome> {
        let prepared = PreparedDraw::new(patch.merge(&self.options))?;

        let Some(attachment) = self.attachment.as_mut() else {
            trace!(chart_type = %prepared.options.chart_type, "store options on detached overlay");
            self.options = prepared.options;
            return Ok(DrawOutcome::Deferred);
        };

        let reusable = !attachment.needs_full_build
            && attachment.active_type == prepared.options.chart_type;
        let outcome = if reusable {
            attachment
                .renderer
                .update(&prepared.data, &prepared.render_options)?;
            trace!(
                chart_type = %prepared.options.chart_type,
                values = prepared.data.values.len(),
                "incremental update"
            );
            DrawOutcome::IncrementalUpdate
        } else {
            let renderer =
                match full_build(&mut self.factory, &mut attachment.container, &prepared) {
                    Ok(renderer) => renderer,
                    Err(error) => {
                        attachment.needs_full_build = true;
                        warn!(
                            to = %prepared.options.chart_type,
                            %error,
                            "full build failed, container left empty"
                        );
                        return Err(error);
                    }
                };
            debug!(
                from = %attachment.active_type,
                to = %prepared.options.chart_type,
                family = ?prepared.spec.family,
                "full build"
            );
            attachment.renderer = renderer;
            attachment.active_type = prepared.options.chart_type;
            attachment.needs_full_build = false;
            DrawOutcome::FullBuild
        };

        let placement = placement_for(&prepared.options, attachment.anchor_px);
        if placement != attachment.placement {
            attachment
                .container
                .transition_to(placement, prepared.options.transition_time);
            attachment.placement = placement;
        }

        self.commit(prepared, outcome);
        Ok(outcome)
    }

    /// Re-projects the anchor after the host map moved or zoomed.
    ///
    /// Returns `false` when the overlay is detached. Never rebuilds the chart.
    pub fn on_viewport_change<M: MapSurface>(&mut self, map: &M) -> bool {
        let Some(attachment) = self.attachment.as_mut() else {
            return false;
        };

        let anchor_px = map.project_to_screen(self.anchor);
        let placement = placement_for(&self.options, anchor_px);
        attachment
            .container
            .transition_to(placement, self.options.transition_time);
        attachment.anchor_px = anchor_px;
        attachment.placement = placement;
        trace!(x = anchor_px.x, y = anchor_px.y, "viewport transition");
        true
    }

    /// Unregisters from viewport changes, drops the renderer and hands the
    /// container back to the host.
    pub fn detach<M: MapSurface>(&mut self, map: &mut M) -> Option<F::Container> {
        let Some(attachment) = self.attachment.take() else {
            warn!("detach called on an overlay that is not attached");
            return None;
        };

        map.off_viewport_change(attachment.subscription);
        debug!(chart_type = %attachment.active_type, "detach overlay");
        Some(attachment.container)
    }

    fn commit(&mut self, prepared: PreparedDraw, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::FullBuild => self.build_count += 1,
            DrawOutcome::IncrementalUpdate => self.update_count += 1,
            DrawOutcome::Deferred => {}
        }
        self.last_values = prepared.data.values;
        self.options = prepared.options;
    }
}

fn full_build<F: RendererFactory>(
    factory: &mut F,
    container: &mut F::Container,
    prepared: &PreparedDraw,
) -> MinichartResult<Box<dyn ChartRenderer>> {
    container.clear();
    factory.construct(
        prepared.spec.family,
        container,
        &prepared.data,
        &prepared.render_options,
    )
}

fn placement_for(options: &ChartOptions, anchor_px: PixelPoint) -> Placement {
    Placement::centered_on(anchor_px, options.width, options.height, options.opacity)
}

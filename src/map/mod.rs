//! Host map surface consumed by overlays.

use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, PixelPoint};

/// Registration handle returned by `MapSurface::on_viewport_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSubscription(pub u64);

/// Projection and viewport notifications provided by the host map.
///
/// The host delivers a viewport change by calling
/// `MinichartOverlay::on_viewport_change` for every live subscription.
pub trait MapSurface {
    fn project_to_screen(&self, point: GeoPoint) -> PixelPoint;
    fn on_viewport_change(&mut self) -> ViewportSubscription;
    fn off_viewport_change(&mut self, subscription: ViewportSubscription);
}

use serde::{Deserialize, Serialize};

use crate::core::{ChartType, GeoPoint};
use crate::error::{MinichartError, MinichartResult};
use crate::render::{Placement, RendererFactory};

use super::MinichartOverlay;

pub const OVERLAY_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable overlay state used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub anchor: GeoPoint,
    pub chart_type: ChartType,
    pub active_type: Option<ChartType>,
    pub attached: bool,
    pub build_count: u64,
    pub update_count: u64,
    pub placement: Option<Placement>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: OverlaySnapshot,
}

impl OverlaySnapshot {
    pub fn to_json_pretty(&self) -> MinichartResult<String> {
        let payload = OverlaySnapshotJsonContractV1 {
            schema_version: OVERLAY_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| MinichartError::Render(format!("failed to serialize snapshot: {e}")))
    }
}

impl<F: RendererFactory> MinichartOverlay<F> {
    #[must_use]
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            anchor: self.anchor(),
            chart_type: self.options().chart_type,
            active_type: self.active_type(),
            attached: self.is_attached(),
            build_count: self.build_count(),
            update_count: self.update_count(),
            placement: self.placement(),
            values: self.last_values().to_vec(),
        }
    }
}

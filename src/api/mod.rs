mod options;
mod overlay;
mod render_options;
mod snapshot;

pub use options::{
    ChartOptions, ChartOptionsPatch, DEFAULT_HEIGHT, DEFAULT_LABEL_MAX_SIZE,
    DEFAULT_LABEL_MIN_SIZE, DEFAULT_LABEL_PADDING, DEFAULT_LABEL_STYLE, DEFAULT_PALETTE,
    DEFAULT_TRANSITION_TIME, DEFAULT_WIDTH, LabelColor, merge,
};
pub use overlay::{DrawOutcome, MinichartOverlay};
pub use snapshot::{
    OVERLAY_SNAPSHOT_JSON_SCHEMA_V1, OverlaySnapshot, OverlaySnapshotJsonContractV1,
};

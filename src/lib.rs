//! minichart-rs: small statistical charts pinned to map coordinates.
//!
//! The crate owns data normalization and the chart lifecycle. Drawing and
//! map projection are delegated to host implementations of the `render`
//! and `map` traits.

pub mod api;
pub mod core;
pub mod error;
pub mod map;
pub mod render;
pub mod telemetry;

pub use api::{ChartOptions, ChartOptionsPatch, DrawOutcome, MinichartOverlay};
pub use error::{AttachError, MinichartError, MinichartResult};

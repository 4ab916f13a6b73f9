//! Reactive recomputation pipeline for the precipitation viewer.
//!
//! Three input event kinds (time selection, viewport change, point click)
//! drive four pieces of derived state: the loaded raster, the windowed
//! histogram, the map overlay image, and the click-point readout. Input
//! events are debounced per channel; all recomputation runs on a single
//! coordinator task so view-state writes are serialized without locks.
//!
//! ## Data flow
//!
//! - DataSelect → load → [`RasterStore`] replace → overlay + histogram +
//!   marker recompute, in that order, against one snapshot
//! - ViewportChange → histogram recompute only
//! - Click → marker recompute only, against the raster active when the
//!   debounce fires

pub mod coordinator;
pub mod dispatch;
pub mod loader;
pub mod presenter;
pub mod store;

pub use coordinator::{spawn_viewer, ViewEvent, ViewerConfig, ViewerHandle};
pub use dispatch::{Channel, DebouncedDispatcher};
pub use loader::{hour_label, RasterLoader, RawField, TimeEntry, TimeSelection};
pub use presenter::{HistogramView, MarkerView, Presenter, Readout};
pub use store::RasterStore;

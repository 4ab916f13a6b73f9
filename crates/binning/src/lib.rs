//! Value-to-bin and value-to-color mapping for precipitation rasters.
//!
//! Bin edges and the color ramp are built once at startup and shared by
//! the histogram and overlay paths so both views agree on thresholds.

pub mod edges;
pub mod histogram;
pub mod overlay;
pub mod ramp;

pub use edges::{BinEdges, MAX_DISPLAY_INCHES, NEAR_ZERO_INCHES};
pub use histogram::{windowed_histogram, RegionHistogram};
pub use overlay::{colorize, OverlayImage};
pub use ramp::{ColorRamp, Rgba, OVERLAY_ALPHA};

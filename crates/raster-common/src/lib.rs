//! Common types shared across the precip-view crates.

pub mod axis;
pub mod error;
pub mod extent;
pub mod grid_index;
pub mod raster;

pub use axis::Axis;
pub use error::{ViewError, ViewResult};
pub use extent::Extent;
pub use grid_index::{GridIndex, GridWindow};
pub use raster::{Raster, RasterField};

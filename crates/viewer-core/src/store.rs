//! Atomic storage for the currently loaded raster.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use raster_common::{Axis, Raster, RasterField, ViewResult};

/// Holds the currently loaded raster with its coordinate axes and valid
/// timestamp.
///
/// [`replace`](RasterStore::replace) swaps the whole snapshot behind a
/// single lock write, so readers observe either the old or the new field
/// in full, never a raster paired with the wrong axes.
pub struct RasterStore {
    current: RwLock<Option<Arc<RasterField>>>,
}

impl RasterStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Validate shape agreement and atomically swap the active snapshot.
    ///
    /// Fails with `ShapeMismatch` (leaving the previous snapshot active)
    /// when the axis lengths disagree with the raster dimensions.
    pub fn replace(
        &self,
        raster: Raster,
        x_axis: Axis,
        y_axis: Axis,
        valid_time: DateTime<Utc>,
    ) -> ViewResult<Arc<RasterField>> {
        let field = Arc::new(RasterField::new(raster, x_axis, y_axis, valid_time)?);
        *self.current.write().unwrap() = Some(field.clone());
        Ok(field)
    }

    /// The latest snapshot, `None` until the first successful load.
    pub fn current(&self) -> Option<Arc<RasterField>> {
        self.current.read().unwrap().clone()
    }
}

impl Default for RasterStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Data-loading collaborator interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use raster_common::{Axis, Raster, ViewResult};

/// Which snapshot of the time series to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSelection {
    /// The most recent available snapshot.
    Latest,
    /// The snapshot valid at a specific hour.
    At(DateTime<Utc>),
}

impl std::fmt::Display for TimeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeSelection::Latest => write!(f, "latest"),
            TimeSelection::At(time) => write!(f, "{}", hour_label(time)),
        }
    }
}

/// Display label for an hourly snapshot, e.g. "2024-01-15 12Z".
pub fn hour_label(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %HZ").to_string()
}

/// An available snapshot in the loader's catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// Display label for selection widgets.
    pub label: String,
    /// Valid timestamp.
    pub time: DateTime<Utc>,
}

/// A raw load result: raster and axes prior to shape validation.
///
/// Values are in physical units (inches); masked cells are NaN.
#[derive(Debug, Clone)]
pub struct RawField {
    pub raster: Raster,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub valid_time: DateTime<Utc>,
}

/// Loads rasters for the viewer.
///
/// Implementations fail with `NotFound` when no snapshot matches the
/// selection and `FormatError` when one exists but cannot be parsed.
#[async_trait]
pub trait RasterLoader: Send + Sync {
    /// Load the raster for a time selection.
    async fn load(&self, selection: TimeSelection) -> ViewResult<RawField>;

    /// Enumerate available snapshots in ascending time order.
    ///
    /// Entries that cannot be parsed are skipped, not fatal.
    async fn available_times(&self) -> ViewResult<Vec<TimeEntry>>;
}

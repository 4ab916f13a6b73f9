//! Presentation collaborator interface and the published view values.

use binning::{OverlayImage, RegionHistogram};
use raster_common::ViewError;

/// Histogram view published to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    /// Per-bin counts aligned with the configured bin edges.
    pub counts: Vec<u64>,
    /// Largest bin count, for scaling the value indicator line.
    pub max_count: u64,
    /// Mean over the histogram window.
    pub mean: f64,
    /// Selected value's position on the histogram axis, clamped into the
    /// displayable range; `None` before the first selection.
    pub indicator: Option<f64>,
}

impl HistogramView {
    /// Build the published view from a computed histogram.
    pub fn from_histogram(histogram: &RegionHistogram, indicator: Option<f64>) -> Self {
        Self {
            counts: histogram.counts.clone(),
            max_count: histogram.max_count(),
            mean: histogram.mean,
            indicator,
        }
    }
}

/// Selection marker published to the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerView {
    /// Marker coordinates, snapped to the selected grid cell.
    pub x: f64,
    pub y: f64,
    /// Grid indices of the selected cell.
    pub x_index: usize,
    pub y_index: usize,
    /// Raster value at the cell (NaN when masked).
    pub value: f32,
}

/// Textual readout of the current selection and window mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Value at the selected cell; 0.0 before the first selection.
    pub selected: f64,
    /// Mean over the current histogram window.
    pub mean: f64,
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selected Value: {:.3} Mean: {:.3}",
            self.selected, self.mean
        )
    }
}

/// Receives view updates from the coordinator.
///
/// Pure one-way data push: the coordinator never reads presentation
/// state back through this interface.
pub trait Presenter: Send {
    /// A new overlay image for the map.
    fn show_overlay(&mut self, overlay: &OverlayImage);
    /// New histogram counts and indicator.
    fn show_histogram(&mut self, histogram: &HistogramView);
    /// The selection marker moved.
    fn show_marker(&mut self, marker: &MarkerView);
    /// The textual readout changed.
    fn show_readout(&mut self, readout: &Readout);
    /// A load failed; previously published views remain valid.
    fn show_error(&mut self, error: &ViewError);
}

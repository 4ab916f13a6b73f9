//! Console presenter: logs published views in place of the map and
//! histogram widgets.

use tracing::{error, info};

use binning::OverlayImage;
use raster_common::ViewError;
use viewer_core::{HistogramView, MarkerView, Presenter, Readout};

pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_overlay(&mut self, overlay: &OverlayImage) {
        info!(
            width = overlay.width,
            height = overlay.height,
            left = overlay.bounds.left,
            right = overlay.bounds.right,
            bottom = overlay.bounds.bottom,
            top = overlay.bounds.top,
            "overlay updated"
        );
    }

    fn show_histogram(&mut self, histogram: &HistogramView) {
        info!(
            bins = histogram.counts.len(),
            max_count = histogram.max_count,
            mean = format!("{:.3}", histogram.mean),
            "histogram updated"
        );
    }

    fn show_marker(&mut self, marker: &MarkerView) {
        info!(
            x = marker.x,
            y = marker.y,
            value = marker.value as f64,
            "marker moved"
        );
    }

    fn show_readout(&mut self, readout: &Readout) {
        println!("{}", readout);
    }

    fn show_error(&mut self, error: &ViewError) {
        error!(%error, "load failed; previous view retained");
    }
}

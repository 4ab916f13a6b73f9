//! Overlay colorization: raster values to an RGBA image with physical
//! bounds.

use raster_common::{Extent, Raster, RasterField};

use crate::edges::BinEdges;
use crate::ramp::ColorRamp;

/// A full-resolution RGBA rendering of a raster.
///
/// Pixels follow the raster's row order (row 0 at `y_axis[0]`, the bottom
/// edge of the bounding box). `bounds` is half-cell padded so pixel
/// centers align with the coordinate samples.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayImage {
    /// RGBA bytes, 4 per pixel, row-major.
    pub pixels: Vec<u8>,
    /// Pixel columns.
    pub width: usize,
    /// Pixel rows.
    pub height: usize,
    /// Physical bounding box of the image.
    pub bounds: Extent,
}

/// Map each raster cell to a color through the shared thresholds.
///
/// Masked cells and totals below the near-zero threshold use the masked
/// color so negligible precipitation is not plotted; values past the top
/// edge use the over color.
pub fn colorize(field: &RasterField, edges: &BinEdges, ramp: &ColorRamp) -> OverlayImage {
    let raster = &field.raster;
    let mut pixels = Vec::with_capacity(raster.values().len() * 4);

    for &value in raster.values() {
        let value_f64 = value as f64;
        let color = if !Raster::is_valid(value) || value_f64 < edges.near_zero() {
            ramp.masked()
        } else if value_f64 > edges.max() {
            ramp.above()
        } else {
            ramp.bin_color(edges.bin_for(value_f64))
        };
        pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    let bounds = Extent::spanning(&field.x_axis, &field.y_axis).padded(
        field.x_axis.spacing() / 2.0,
        field.y_axis.spacing() / 2.0,
    );

    OverlayImage {
        pixels,
        width: raster.width(),
        height: raster.height(),
        bounds,
    }
}

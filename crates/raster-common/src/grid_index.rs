//! Extent-to-index-window resolution over an axis pair.

use crate::axis::Axis;
use crate::extent::Extent;
use crate::raster::RasterField;

/// Nearest-index lookup over a raster's two coordinate axes.
pub struct GridIndex<'a> {
    x_axis: &'a Axis,
    y_axis: &'a Axis,
}

/// Half-open index ranges covering an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl GridWindow {
    /// Total number of grid cells covered.
    pub fn cell_count(&self) -> usize {
        (self.x_end - self.x_start) * (self.y_end - self.y_start)
    }
}

impl<'a> GridIndex<'a> {
    pub fn new(x_axis: &'a Axis, y_axis: &'a Axis) -> Self {
        Self { x_axis, y_axis }
    }

    /// Index over a field's axes.
    pub fn for_field(field: &'a RasterField) -> Self {
        Self::new(&field.x_axis, &field.y_axis)
    }

    /// Grid indices of the cell nearest to a coordinate pair.
    ///
    /// Out-of-range coordinates clamp to the nearest edge cell.
    pub fn nearest_cell(&self, x: f64, y: f64) -> (usize, usize) {
        (self.x_axis.nearest(x), self.y_axis.nearest(y))
    }

    /// Half-open index window covering an extent, clamped in bounds.
    pub fn window(&self, extent: &Extent) -> GridWindow {
        let (x_start, x_end) = self.x_axis.index_range(extent.left, extent.right);
        let (y_start, y_end) = self.y_axis.index_range(extent.bottom, extent.top);
        GridWindow {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_axes() -> (Axis, Axis) {
        (
            Axis::new(vec![0.0, 1.0, 2.0, 3.0]).unwrap(),
            Axis::new(vec![10.0, 20.0, 30.0]).unwrap(),
        )
    }

    #[test]
    fn test_nearest_cell() {
        let (x, y) = index_axes();
        let index = GridIndex::new(&x, &y);
        assert_eq!(index.nearest_cell(2.4, 19.0), (2, 1));
        assert_eq!(index.nearest_cell(-5.0, 100.0), (0, 2));
    }

    #[test]
    fn test_window_covers_extent() {
        let (x, y) = index_axes();
        let index = GridIndex::new(&x, &y);
        let window = index.window(&Extent::new(0.9, 2.1, 10.0, 30.0));
        assert_eq!(window.x_start, 1);
        assert_eq!(window.x_end, 3);
        assert_eq!(window.y_start, 0);
        assert_eq!(window.y_end, 3);
        assert_eq!(window.cell_count(), 6);
    }

    #[test]
    fn test_window_outside_degenerates() {
        let (x, y) = index_axes();
        let index = GridIndex::new(&x, &y);
        let window = index.window(&Extent::new(50.0, 60.0, -5.0, -1.0));
        assert_eq!((window.x_start, window.x_end), (3, 4));
        assert_eq!((window.y_start, window.y_end), (0, 1));
        assert_eq!(window.cell_count(), 1);
    }
}

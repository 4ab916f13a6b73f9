//! Raster grids and the validated raster+axes bundle.

use chrono::{DateTime, Utc};

use crate::axis::Axis;
use crate::error::{ViewError, ViewResult};

/// A 2D grid of physical-quantity samples in row-major order, where row
/// `j` corresponds to `y_axis[j]` and column `i` to `x_axis[i]`.
///
/// Masked/invalid cells are `f32::NAN`, distinct from a valid zero.
/// Rasters are immutable once built and replaced wholesale, never mutated
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl Raster {
    /// Create a raster, validating that the buffer fills the grid.
    pub fn new(values: Vec<f32>, width: usize, height: usize) -> ViewResult<Self> {
        if values.len() != width * height {
            return Err(ViewError::FormatError(format!(
                "raster data length {} does not fill a {}x{} grid",
                values.len(),
                width,
                height
            )));
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at a grid position, `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// The raw sample buffer (row-major).
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Whether a sample is a valid measurement rather than a masked cell.
    pub fn is_valid(value: f32) -> bool {
        !value.is_nan()
    }
}

/// A raster paired with its coordinate axes and valid timestamp.
///
/// Construction validates axis-length/raster-shape agreement. The field
/// is the unit of atomic replacement: consumers hold an
/// `Arc<RasterField>` and can never observe a raster paired with the
/// wrong axes.
#[derive(Debug, Clone)]
pub struct RasterField {
    pub raster: Raster,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub valid_time: DateTime<Utc>,
}

impl RasterField {
    /// Bundle a raster with its axes, checking shape agreement.
    pub fn new(
        raster: Raster,
        x_axis: Axis,
        y_axis: Axis,
        valid_time: DateTime<Utc>,
    ) -> ViewResult<Self> {
        if x_axis.len() != raster.width() || y_axis.len() != raster.height() {
            return Err(ViewError::ShapeMismatch {
                width: raster.width(),
                height: raster.height(),
                x_len: x_axis.len(),
                y_len: y_axis.len(),
            });
        }
        Ok(Self {
            raster,
            x_axis,
            y_axis,
            valid_time,
        })
    }

    /// Value at the grid cell nearest to a coordinate pair.
    pub fn value_near(&self, x: f64, y: f64) -> f32 {
        let col = self.x_axis.nearest(x);
        let row = self.y_axis.nearest(y);
        self.raster.get(col, row).unwrap_or(f32::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(values: &[f64]) -> Axis {
        Axis::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_raster_rejects_wrong_length() {
        let result = Raster::new(vec![0.0; 5], 2, 3);
        assert!(matches!(result, Err(ViewError::FormatError(_))));
    }

    #[test]
    fn test_raster_get() {
        let raster = Raster::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 3, 2).unwrap();
        assert_eq!(raster.get(0, 0), Some(0.0));
        assert_eq!(raster.get(2, 1), Some(5.0));
        assert_eq!(raster.get(3, 0), None);
        assert_eq!(raster.get(0, 2), None);
    }

    #[test]
    fn test_masked_cells_are_not_valid() {
        assert!(Raster::is_valid(0.0));
        assert!(!Raster::is_valid(f32::NAN));
    }

    #[test]
    fn test_field_shape_mismatch() {
        let raster = Raster::new(vec![0.0; 6], 3, 2).unwrap();
        let result = RasterField::new(
            raster,
            axis(&[0.0, 1.0]),
            axis(&[0.0, 1.0]),
            Utc::now(),
        );
        assert!(matches!(result, Err(ViewError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_field_value_near_clamps() {
        let raster = Raster::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let field = RasterField::new(
            raster,
            axis(&[0.0, 1.0]),
            axis(&[0.0, 1.0]),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(field.value_near(0.1, 0.1), 1.0);
        assert_eq!(field.value_near(100.0, 100.0), 4.0);
    }
}

//! Windowed histogram computation over a raster extent.

use raster_common::{Extent, GridIndex, Raster, RasterField};

use crate::edges::BinEdges;

/// Histogram of raster values inside an extent window.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHistogram {
    /// Per-bin counts aligned with the configured [`BinEdges`].
    pub counts: Vec<u64>,
    /// Mean of the included (unmasked, unclipped) values; 0.0 when the
    /// selection holds no valid cells.
    pub mean: f64,
    /// Number of valid cells included in the counts.
    pub valid_cells: u64,
    /// Masked cells inside the window, excluded from the counts.
    pub masked_cells: u64,
}

impl RegionHistogram {
    /// All-zero histogram for the given scale.
    pub fn empty(edges: &BinEdges) -> Self {
        Self {
            counts: vec![0; edges.bin_count()],
            mean: 0.0,
            valid_cells: 0,
            masked_cells: 0,
        }
    }

    /// Largest single bin count (0 for an empty histogram).
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Count raster values inside `extent` into the configured bins.
///
/// The index window is resolved through [`GridIndex`]; values are clipped
/// to the top edge (above-range totals land in the last bin) and
/// sub-minimum values land in the near-zero bin. Masked cells are
/// excluded from the counts and the mean but tallied for diagnostics.
pub fn windowed_histogram(
    field: &RasterField,
    extent: &Extent,
    edges: &BinEdges,
) -> RegionHistogram {
    let window = GridIndex::for_field(field).window(extent);

    let mut counts = vec![0u64; edges.bin_count()];
    let mut sum = 0.0f64;
    let mut valid_cells = 0u64;
    let mut masked_cells = 0u64;

    for row in window.y_start..window.y_end {
        for col in window.x_start..window.x_end {
            let value = field.raster.get(col, row).unwrap_or(f32::NAN);
            if !Raster::is_valid(value) {
                masked_cells += 1;
                continue;
            }
            counts[edges.bin_for(value as f64)] += 1;
            sum += value as f64;
            valid_cells += 1;
        }
    }

    let mean = if valid_cells == 0 {
        0.0
    } else {
        sum / valid_cells as f64
    };

    RegionHistogram {
        counts,
        mean,
        valid_cells,
        masked_cells,
    }
}

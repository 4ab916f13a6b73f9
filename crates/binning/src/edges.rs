//! Histogram bin thresholds for precipitation totals.

use raster_common::{ViewError, ViewResult};

/// Threshold below which a total is indistinguishable from zero.
pub const NEAR_ZERO_INCHES: f64 = 0.01;

/// Top of the displayable precipitation scale, in inches.
pub const MAX_DISPLAY_INCHES: f64 = 3.0;

/// Fixed ordered sequence of histogram bin thresholds.
///
/// The first bin is a narrow near-zero bin separating negligible totals
/// from the first real bin; the remaining bins follow the configured
/// display levels. Constructed once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Build edges from display levels plus the near-zero threshold.
    ///
    /// `levels` must be strictly increasing; the threshold must fall
    /// strictly between the first two levels.
    pub fn new(levels: &[f64], near_zero: f64) -> ViewResult<Self> {
        if levels.len() < 2 {
            return Err(ViewError::InvalidBinEdges(
                "need at least two display levels".to_string(),
            ));
        }
        if levels.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ViewError::InvalidBinEdges(
                "display levels must be strictly increasing".to_string(),
            ));
        }
        if near_zero <= levels[0] || near_zero >= levels[1] {
            return Err(ViewError::InvalidBinEdges(format!(
                "near-zero threshold {} must fall between the first two levels",
                near_zero
            )));
        }

        let mut edges = Vec::with_capacity(levels.len() + 1);
        edges.push(levels[0]);
        edges.push(near_zero);
        edges.extend_from_slice(&levels[1..]);
        Ok(Self { edges })
    }

    /// Default precipitation scale: 0 to 3 inches in 0.1-inch steps with
    /// the near-zero bin at 0.01 inches.
    pub fn precip_inches() -> Self {
        let levels: Vec<f64> = (0..=30).map(|i| i as f64 / 10.0).collect();
        Self::new(&levels, NEAR_ZERO_INCHES).expect("default scale is valid")
    }

    /// All edge values, including the near-zero threshold.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (one fewer than the number of edges).
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lowest edge of the scale.
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Highest edge of the scale.
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// The near-zero threshold (second edge).
    pub fn near_zero(&self) -> f64 {
        self.edges[1]
    }

    /// Bin index for a value.
    ///
    /// Values at or below the minimum fall into the near-zero bin;
    /// values at or above the top edge land in the last bin (the
    /// histogram clips to the maximum displayable level).
    pub fn bin_for(&self, value: f64) -> usize {
        if value >= self.max() {
            return self.bin_count() - 1;
        }
        if value <= self.min() {
            return 0;
        }
        self.edges.partition_point(|edge| *edge <= value) - 1
    }
}

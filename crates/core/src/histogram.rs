//! Weighted hue histogram over [0, 360).

use crate::error::SortError;

/// Equal-width hue buckets spanning [0, 360), accumulating sample weights.
#[derive(Debug, Clone, PartialEq)]
pub struct HueHistogram {
    weights: Vec<f64>,
}

impl HueHistogram {
    /// Creates an empty histogram with `bins` buckets.
    ///
    /// Returns `SortError::InvalidParameter` if `bins` is zero.
    pub fn new(bins: usize) -> Result<Self, SortError> {
        if bins == 0 {
            return Err(SortError::invalid_parameter("bins", "must be at least 1"));
        }
        Ok(Self {
            weights: vec![0.0; bins],
        })
    }

    /// Number of buckets.
    pub fn bins(&self) -> usize {
        self.weights.len()
    }

    /// Angular width of one bucket in degrees.
    pub fn bin_width(&self) -> f64 {
        360.0 / self.bins() as f64
    }

    /// Index of the bucket containing `hue`.
    ///
    /// The last bucket is closed on the right, so a hue of exactly 360 lands
    /// there. Hues outside [0, 360] are clamped to the nearest end.
    pub fn bin_index(&self, hue: f64) -> usize {
        let last = self.bins() - 1;
        if hue.is_nan() || hue <= 0.0 {
            return 0;
        }
        let idx = (hue * self.bins() as f64 / 360.0).floor() as usize;
        idx.min(last)
    }

    /// Adds `weight` to the bucket containing `hue`.
    pub fn add(&mut self, hue: f64, weight: f64) {
        let idx = self.bin_index(hue);
        self.weights[idx] += weight;
    }

    /// Per-bucket totals in ascending hue order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all bucket weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Index of the heaviest bucket; ties go to the lowest index.
    pub fn peak(&self) -> usize {
        self.weights
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, best_w), (i, &w)| {
                if w > best_w {
                    (i, w)
                } else {
                    (best, best_w)
                }
            })
            .0
    }

    /// Midpoint angle of bucket `index`, folded into [0, 360).
    pub fn midpoint(&self, index: usize) -> f64 {
        let start = index as f64 * self.bin_width();
        let end = (index + 1) as f64 * self.bin_width();
        ((start + end) / 2.0).rem_euclid(360.0)
    }
}

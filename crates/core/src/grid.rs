//! Fixed-size grid of RGB samples taken from a downscaled image.
//!
//! A `PixelGrid` stores `width * height` [`Rgb`] values in row-major layout.
//! Channels are clamped to [0, 1] on construction so the classifier can rely
//! on that range.

use crate::color::Rgb;
use crate::error::SortError;

/// A non-empty 2D grid of RGB samples with channels in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

fn clamp_rgb(c: Rgb) -> Rgb {
    let clamp = |x: f64| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    Rgb::new(clamp(c.r), clamp(c.g), clamp(c.b))
}

fn checked_len(width: usize, height: usize) -> Result<usize, SortError> {
    if width == 0 || height == 0 {
        return Err(SortError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(SortError::InvalidDimensions)
}

impl PixelGrid {
    /// Creates a grid where every sample is `color`.
    ///
    /// Returns `SortError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, SortError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![clamp_rgb(color); len],
        })
    }

    /// Creates a grid from a row-major sample vector.
    ///
    /// Returns `SortError::DimensionMismatch` if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<Rgb>) -> Result<Self, SortError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(SortError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: data.into_iter().map(clamp_rgb).collect(),
        })
    }

    /// Creates a grid from packed 8-bit RGB bytes (three per sample).
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, SortError> {
        let expected = checked_len(width, height)?;
        if bytes.len() != expected * 3 {
            return Err(SortError::DimensionMismatch {
                expected,
                got: bytes.len() / 3,
            });
        }
        let data = bytes
            .chunks_exact(3)
            .map(|px| Rgb::from_u8(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples. Always non-zero.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; grids cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the row-major samples.
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// Sample at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}

//! Dominant-hue classification of a pixel grid.
//!
//! Pixels are converted to HSV and gated on saturation and value. Surviving
//! pixels vote into a weighted [`HueHistogram`]; the heaviest bucket's
//! midpoint is the dominant hue. When nothing survives the gate, an ordered
//! fallback cascade over the whole grid explains why.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::color::{rgb_to_hsv, Hsv};
use crate::config::ClassifierConfig;
use crate::grid::PixelGrid;
use crate::histogram::HueHistogram;

/// Mean value below which an image with no gated pixels is "too dark".
pub const DARK_MEAN_VALUE: f64 = 0.12;

/// Mean saturation below which an image with no gated pixels is "low saturation".
pub const GRAY_MEAN_SATURATION: f64 = 0.08;

/// Added to every vote so zero-weight samples still register.
pub const WEIGHT_EPSILON: f64 = 1e-6;

const ERROR_OPENING_PREFIX: &str = "error_opening:";
const PEAK_PREFIX: &str = "hist_peak_bin_";

/// Diagnostic outcome of a classification.
///
/// Displays and serializes as the short tags `too_dark`, `low_saturation`,
/// `no_pixels_after_filter`, `empty_histogram`, `hist_peak_bin_<index>` and
/// `error_opening:<details>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reason {
    /// No pixel passed the gate and the image is dark overall.
    TooDark,
    /// No pixel passed the gate and the image is near-gray overall.
    LowSaturation,
    /// No pixel passed the gate although the image is neither dark nor gray.
    NoPixelsAfterFilter,
    /// Gated pixels existed but the histogram carried no weight.
    EmptyHistogram,
    /// The dominant hue came from this histogram bucket.
    HistPeakBin(usize),
    /// The image could not be decoded.
    ErrorOpening(String),
}

impl Reason {
    /// True for decode failures, which are not a color judgment.
    pub fn is_error(&self) -> bool {
        matches!(self, Reason::ErrorOpening(_))
    }

    /// Parses a tag produced by `Display`.
    pub fn parse(tag: &str) -> Option<Reason> {
        match tag {
            "too_dark" => Some(Reason::TooDark),
            "low_saturation" => Some(Reason::LowSaturation),
            "no_pixels_after_filter" => Some(Reason::NoPixelsAfterFilter),
            "empty_histogram" => Some(Reason::EmptyHistogram),
            _ => {
                if let Some(details) = tag.strip_prefix(ERROR_OPENING_PREFIX) {
                    Some(Reason::ErrorOpening(details.to_string()))
                } else {
                    tag.strip_prefix(PEAK_PREFIX)?
                        .parse()
                        .ok()
                        .map(Reason::HistPeakBin)
                }
            }
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::TooDark => f.write_str("too_dark"),
            Reason::LowSaturation => f.write_str("low_saturation"),
            Reason::NoPixelsAfterFilter => f.write_str("no_pixels_after_filter"),
            Reason::EmptyHistogram => f.write_str("empty_histogram"),
            Reason::HistPeakBin(idx) => write!(f, "{PEAK_PREFIX}{idx}"),
            Reason::ErrorOpening(details) => write!(f, "{ERROR_OPENING_PREFIX}{details}"),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Dominant hue (if any) plus the reason it was or was not found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub hue: Option<f64>,
    pub reason: Reason,
}

impl Classification {
    /// A result carrying no hue.
    pub fn without_hue(reason: Reason) -> Self {
        Self { hue: None, reason }
    }

    /// The result reported for an image that failed to decode.
    pub fn decode_failure(details: impl fmt::Display) -> Self {
        Self::without_hue(Reason::ErrorOpening(details.to_string()))
    }
}

fn passes_gate(hsv: &Hsv, config: &ClassifierConfig) -> bool {
    hsv.s >= config.min_sat && hsv.v >= config.min_val
}

/// Explains an empty gate using grid-wide means. Order matters: an image can
/// be both dark and gray, and dark wins.
fn fallback_reason(samples: &[Hsv]) -> Reason {
    let n = samples.len() as f64;
    let mean_v = samples.iter().map(|p| p.v).sum::<f64>() / n;
    let mean_s = samples.iter().map(|p| p.s).sum::<f64>() / n;

    let cascade: [(bool, Reason); 2] = [
        (mean_v < DARK_MEAN_VALUE, Reason::TooDark),
        (mean_s < GRAY_MEAN_SATURATION, Reason::LowSaturation),
    ];
    cascade
        .into_iter()
        .find_map(|(hit, reason)| hit.then_some(reason))
        .unwrap_or(Reason::NoPixelsAfterFilter)
}

/// Finds the dominant hue of `grid`.
///
/// Never fails: degenerate inputs (all black, all gray, nothing above the
/// thresholds) are reported through [`Reason`]. A zero bin count leaves no
/// histogram to vote into and yields `empty_histogram`.
pub fn classify(grid: &PixelGrid, config: &ClassifierConfig) -> Classification {
    let samples: Vec<Hsv> = grid.pixels().iter().copied().map(rgb_to_hsv).collect();

    let mut gated = samples.iter().filter(|p| passes_gate(p, config)).peekable();
    if gated.peek().is_none() {
        return Classification::without_hue(fallback_reason(&samples));
    }

    let Ok(mut hist) = HueHistogram::new(config.bins) else {
        return Classification::without_hue(Reason::EmptyHistogram);
    };
    for p in gated {
        hist.add(p.h, p.s * p.v + WEIGHT_EPSILON);
    }

    if hist.total() <= 0.0 {
        return Classification::without_hue(Reason::EmptyHistogram);
    }

    let peak = hist.peak();
    Classification {
        hue: Some(hist.midpoint(peak)),
        reason: Reason::HistPeakBin(peak),
    }
}

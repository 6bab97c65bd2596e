//! Mapping from a dominant hue to a color-name label.
//!
//! Hue ranges are half-open `[start, end)` in degrees. A range whose start is
//! greater than its end wraps through 0, which is how red covers both ends of
//! the wheel.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::classifier::Reason;
use crate::error::SortError;

/// Fixed set of color folders an image can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Neutral,
    Dark,
    Other,
}

/// A half-open hue interval in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    pub start: f64,
    pub end: f64,
}

impl HueRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True if this range wraps past 360.
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Tests `hue` against the range, honoring wraparound.
    pub fn contains(&self, hue: f64) -> bool {
        if self.wraps() {
            hue >= self.start || hue < self.end
        } else {
            self.start <= hue && hue < self.end
        }
    }
}

/// Named hue ranges, matched first to last.
pub const HUE_RANGES: &[(ColorLabel, &[HueRange])] = &[
    (
        ColorLabel::Red,
        &[HueRange::new(345.0, 360.0), HueRange::new(0.0, 15.0)],
    ),
    (ColorLabel::Orange, &[HueRange::new(15.0, 30.0)]),
    (ColorLabel::Yellow, &[HueRange::new(30.0, 60.0)]),
    (ColorLabel::Green, &[HueRange::new(60.0, 170.0)]),
    (ColorLabel::Cyan, &[HueRange::new(170.0, 200.0)]),
    (ColorLabel::Blue, &[HueRange::new(200.0, 260.0)]),
    (ColorLabel::Purple, &[HueRange::new(260.0, 300.0)]),
    (ColorLabel::Pink, &[HueRange::new(300.0, 345.0)]),
];

const ALL_LABELS: [ColorLabel; 11] = [
    ColorLabel::Red,
    ColorLabel::Orange,
    ColorLabel::Yellow,
    ColorLabel::Green,
    ColorLabel::Cyan,
    ColorLabel::Blue,
    ColorLabel::Purple,
    ColorLabel::Pink,
    ColorLabel::Neutral,
    ColorLabel::Dark,
    ColorLabel::Other,
];

impl ColorLabel {
    /// Every label, hue labels first in wheel order.
    pub fn all() -> &'static [ColorLabel] {
        &ALL_LABELS
    }

    /// Lowercase folder name.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorLabel::Red => "red",
            ColorLabel::Orange => "orange",
            ColorLabel::Yellow => "yellow",
            ColorLabel::Green => "green",
            ColorLabel::Cyan => "cyan",
            ColorLabel::Blue => "blue",
            ColorLabel::Purple => "purple",
            ColorLabel::Pink => "pink",
            ColorLabel::Neutral => "neutral",
            ColorLabel::Dark => "dark",
            ColorLabel::Other => "other",
        }
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorLabel {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_LABELS
            .iter()
            .copied()
            .find(|label| label.as_str() == lower)
            .ok_or_else(|| SortError::invalid_parameter("label", s))
    }
}

/// Looks `hue` up in [`HUE_RANGES`]; `Other` if nothing matches.
pub fn hue_to_label(hue: f64) -> ColorLabel {
    HUE_RANGES
        .iter()
        .find(|(_, ranges)| ranges.iter().any(|r| r.contains(hue)))
        .map(|(label, _)| *label)
        .unwrap_or(ColorLabel::Other)
}

/// Chooses the label for a classification result.
///
/// `too_dark` is `Dark`, `low_saturation` and any other missing hue are
/// `Neutral`, everything else goes through [`hue_to_label`].
pub fn label(hue: Option<f64>, reason: &Reason) -> ColorLabel {
    match (reason, hue) {
        (Reason::TooDark, _) => ColorLabel::Dark,
        (Reason::LowSaturation, _) => ColorLabel::Neutral,
        (_, None) => ColorLabel::Neutral,
        (_, Some(h)) => hue_to_label(h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_is_inclusive() {
        assert_eq!(hue_to_label(15.0), ColorLabel::Orange);
        assert_eq!(hue_to_label(30.0), ColorLabel::Yellow);
        assert_eq!(hue_to_label(60.0), ColorLabel::Green);
        assert_eq!(hue_to_label(170.0), ColorLabel::Cyan);
        assert_eq!(hue_to_label(200.0), ColorLabel::Blue);
        assert_eq!(hue_to_label(260.0), ColorLabel::Purple);
        assert_eq!(hue_to_label(300.0), ColorLabel::Pink);
        assert_eq!(hue_to_label(345.0), ColorLabel::Red);
    }

    #[test]
    fn red_wraps_around_zero() {
        assert_eq!(hue_to_label(350.0), ColorLabel::Red);
        assert_eq!(hue_to_label(5.0), ColorLabel::Red);
        assert_eq!(hue_to_label(0.0), ColorLabel::Red);
        assert_eq!(hue_to_label(14.999), ColorLabel::Red);
    }

    #[test]
    fn hue_outside_wheel_is_other() {
        assert_eq!(hue_to_label(360.0), ColorLabel::Other);
        assert_eq!(hue_to_label(-1.0), ColorLabel::Other);
        assert_eq!(hue_to_label(f64::NAN), ColorLabel::Other);
    }

    #[test]
    fn bin_midpoints_map_to_expected_labels() {
        assert_eq!(hue_to_label(5.0), ColorLabel::Red);
        assert_eq!(hue_to_label(125.0), ColorLabel::Green);
        assert_eq!(hue_to_label(245.0), ColorLabel::Blue);
        assert_eq!(hue_to_label(355.0), ColorLabel::Red);
    }

    #[test]
    fn wrapping_range_matches_either_side() {
        let r = HueRange::new(345.0, 15.0);
        assert!(r.wraps());
        assert!(r.contains(350.0));
        assert!(r.contains(10.0));
        assert!(!r.contains(15.0));
        assert!(!r.contains(180.0));
    }

    #[test]
    fn too_dark_is_dark_regardless_of_hue() {
        assert_eq!(label(None, &Reason::TooDark), ColorLabel::Dark);
        assert_eq!(label(Some(120.0), &Reason::TooDark), ColorLabel::Dark);
    }

    #[test]
    fn low_saturation_is_neutral() {
        assert_eq!(label(None, &Reason::LowSaturation), ColorLabel::Neutral);
    }

    #[test]
    fn missing_hue_is_neutral() {
        for reason in [
            Reason::NoPixelsAfterFilter,
            Reason::EmptyHistogram,
            Reason::ErrorOpening("bad header".into()),
        ] {
            assert_eq!(label(None, &reason), ColorLabel::Neutral, "{reason}");
        }
    }

    #[test]
    fn peak_hue_goes_through_range_table() {
        assert_eq!(
            label(Some(245.0), &Reason::HistPeakBin(24)),
            ColorLabel::Blue
        );
    }

    #[test]
    fn label_names_round_trip_through_from_str() {
        for &l in ColorLabel::all() {
            assert_eq!(l.as_str().parse::<ColorLabel>().unwrap(), l);
        }
        assert_eq!("RED".parse::<ColorLabel>().unwrap(), ColorLabel::Red);
        assert!("magenta".parse::<ColorLabel>().is_err());
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&ColorLabel::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_hue_on_the_wheel_has_a_color(hue in 0.0..360.0_f64) {
                let l = hue_to_label(hue);
                prop_assert!(
                    !matches!(l, ColorLabel::Other | ColorLabel::Neutral | ColorLabel::Dark),
                    "hue {} mapped to {}", hue, l
                );
            }

            #[test]
            fn at_most_one_range_matches(hue in 0.0..360.0_f64) {
                let matches = HUE_RANGES
                    .iter()
                    .filter(|(_, ranges)| ranges.iter().any(|r| r.contains(hue)))
                    .count();
                prop_assert_eq!(matches, 1);
            }
        }
    }
}

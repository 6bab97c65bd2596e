//! Color types and the RGB to HSV conversion used by the classifier.
//!
//! All components are `f64`. RGB channels are in [0, 1]; hue is expressed in
//! degrees in [0, 360), saturation and value in [0, 1].

/// RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSV color with hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channels, scaling each by 1/255.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// Converts RGB to HSV.
///
/// `v = max(r, g, b)`. Saturation is zero for black and for any achromatic
/// color, otherwise `(max - min) / max`. The hue sector is chosen by the
/// maximal channel, red first, then green, then blue, so ties resolve in that
/// order. Hue is folded into [0, 360).
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let v = max;
    if max == min {
        return Hsv { h: 0.0, s: 0.0, v };
    }
    let delta = max - min;
    let s = delta / max;

    let rc = (max - c.r) / delta;
    let gc = (max - c.g) / delta;
    let bc = (max - c.b) / delta;
    let sector = if c.r == max {
        bc - gc
    } else if c.g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    let h = ((sector / 6.0).rem_euclid(1.0) * 360.0).rem_euclid(360.0);
    Hsv { h, s, v }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn black_has_zero_saturation_and_value() {
        let hsv = rgb_to_hsv(Rgb::BLACK);
        assert_eq!(hsv, Hsv { h: 0.0, s: 0.0, v: 0.0 });
    }

    #[test]
    fn mid_gray_has_zero_saturation() {
        let hsv = rgb_to_hsv(Rgb::new(0.5, 0.5, 0.5));
        assert!(approx_eq(hsv.s, 0.0));
        assert!(approx_eq(hsv.v, 0.5));
        assert!(approx_eq(hsv.h, 0.0));
    }

    #[test]
    fn primaries_land_on_expected_hues() {
        let cases = [
            (Rgb::new(1.0, 0.0, 0.0), 0.0),
            (Rgb::new(1.0, 1.0, 0.0), 60.0),
            (Rgb::new(0.0, 1.0, 0.0), 120.0),
            (Rgb::new(0.0, 1.0, 1.0), 180.0),
            (Rgb::new(0.0, 0.0, 1.0), 240.0),
            (Rgb::new(1.0, 0.0, 1.0), 300.0),
        ];
        for (rgb, expected) in cases {
            let hsv = rgb_to_hsv(rgb);
            assert!(
                approx_eq(hsv.h, expected),
                "{rgb:?}: expected hue {expected}, got {}",
                hsv.h
            );
            assert!(approx_eq(hsv.s, 1.0));
            assert!(approx_eq(hsv.v, 1.0));
        }
    }

    #[test]
    fn red_with_blue_tint_wraps_below_360() {
        // r max, b > g gives a negative sector that must fold into [0, 360).
        let hsv = rgb_to_hsv(Rgb::new(1.0, 0.0, 0.2));
        assert!(hsv.h > 340.0 && hsv.h < 360.0, "hue = {}", hsv.h);
    }

    #[test]
    fn saturation_is_relative_to_value() {
        let hsv = rgb_to_hsv(Rgb::new(0.5, 0.25, 0.25));
        assert!(approx_eq(hsv.v, 0.5));
        assert!(approx_eq(hsv.s, 0.5));
        assert!(approx_eq(hsv.h, 0.0));
    }

    #[test]
    fn from_u8_scales_to_unit_range() {
        let c = Rgb::from_u8(255, 0, 51);
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 0.0));
        assert!(approx_eq(c.b, 0.2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn channel() -> impl Strategy<Value = f64> {
            0.0..=1.0_f64
        }

        proptest! {
            #[test]
            fn hsv_components_stay_in_range(r in channel(), g in channel(), b in channel()) {
                let hsv = rgb_to_hsv(Rgb::new(r, g, b));
                prop_assert!(hsv.h >= 0.0 && hsv.h < 360.0, "h = {}", hsv.h);
                prop_assert!((0.0..=1.0).contains(&hsv.s), "s = {}", hsv.s);
                prop_assert!((0.0..=1.0).contains(&hsv.v), "v = {}", hsv.v);
            }

            #[test]
            fn value_is_max_channel(r in channel(), g in channel(), b in channel()) {
                let hsv = rgb_to_hsv(Rgb::new(r, g, b));
                prop_assert_eq!(hsv.v, r.max(g).max(b));
            }
        }
    }
}

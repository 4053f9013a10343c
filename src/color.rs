//! Color conversions for pixel inspection

use serde::Serialize;

use crate::pcx::Rgb;

/// A color in the notations shown by the eyedropper readout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    pub rgb: Rgb,
    /// `#rrggbb`
    pub hex: String,
    /// Cyan, magenta, yellow, black in percent
    pub cmyk: [u8; 4],
    /// Hue in degrees, saturation and value in percent
    pub hsv: (u16, u8, u8),
    /// Hue in degrees, saturation and lightness in percent
    pub hsl: (u16, u8, u8),
}

impl ColorInfo {
    pub fn new(rgb: Rgb) -> Self {
        let (hsv, hsl) = rgb_to_hsv_hsl(rgb);
        Self {
            rgb,
            hex: rgb_to_hex(rgb),
            cmyk: rgb_to_cmyk(rgb),
            hsv,
            hsl,
        }
    }
}

pub fn rgb_to_hex([r, g, b]: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// CMYK percentages, truncated toward zero. Pure black is `[0, 0, 0, 100]`.
pub fn rgb_to_cmyk(rgb: Rgb) -> [u8; 4] {
    if rgb == [0, 0, 0] {
        return [0, 0, 0, 100];
    }

    let [c, m, y] = rgb.map(|v| 1.0 - f64::from(v) / 255.0);
    let k = c.min(m).min(y);
    let denom = 1.0 - k;

    let percent = |v: f64| (v * 100.0) as u8;
    [
        percent((c - k) / denom),
        percent((m - k) / denom),
        percent((y - k) / denom),
        percent(k),
    ]
}

/// Hue in `[0, 1)` for normalized channels, given their max and min
fn hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let span = max - min;
    let rc = (max - r) / span;
    let gc = (max - g) / span;
    let bc = (max - b) / span;

    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

/// HSV and HSL, with hue in degrees and the other components in percent.
pub fn rgb_to_hsv_hsl(rgb: Rgb) -> ((u16, u8, u8), (u16, u8, u8)) {
    let [r, g, b] = rgb.map(|v| f64::from(v) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    let degrees = |h: f64| (h * 360.0).round() as u16;
    let percent = |v: f64| (v * 100.0).round() as u8;

    if max == min {
        return ((0, 0, percent(max)), (0, 0, percent(lightness)));
    }

    let h = hue(r, g, b, max, min);
    let s_hsv = (max - min) / max;
    let s_hsl = if lightness <= 0.5 {
        (max - min) / (max + min)
    } else {
        (max - min) / (2.0 - max - min)
    };

    (
        (degrees(h), percent(s_hsv), percent(max)),
        (degrees(h), percent(s_hsl), percent(lightness)),
    )
}

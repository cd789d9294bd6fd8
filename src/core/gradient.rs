//! Linear color interpolation between two endpoint colors.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An 8-bit RGB color. Serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorStop {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorStop {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for ColorStop {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::Color(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::Color(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for ColorStop {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorStop> for String {
    fn from(color: ColorStop) -> Self {
        color.to_string()
    }
}

impl From<RGBColor> for ColorStop {
    fn from(RGBColor(r, g, b): RGBColor) -> Self {
        Self::new(r, g, b)
    }
}

impl From<ColorStop> for RGBColor {
    fn from(color: ColorStop) -> Self {
        RGBColor(color.r, color.g, color.b)
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Color at position `t` between `start` (t = 0) and `end` (t = 1).
///
/// `t` is not clamped: values outside [0, 1] extrapolate along the same line,
/// and each channel then saturates at 0 or 255.
pub fn gradient_color(start: ColorStop, end: ColorStop, t: f64) -> ColorStop {
    let s = start.channels();
    let e = end.channels();
    ColorStop::from_channels(std::array::from_fn(|i| {
        lerp(f64::from(s[i]), f64::from(e[i]), t).round() as u8
    }))
}

/// `n` evenly spaced colors from `start` to `end`, both ends included.
/// A single-element `[start]` when `n <= 1`.
pub fn gradient_sequence(start: ColorStop, end: ColorStop, n: usize) -> Vec<ColorStop> {
    if n <= 1 {
        return vec![start];
    }
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| gradient_color(start, end, i as f64 / last))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIGHT: ColorStop = ColorStop::new(0xf7, 0xc9, 0xc2);
    const DARK: ColorStop = ColorStop::new(0xe1, 0x60, 0x44);

    #[test]
    fn parses_and_formats_hex() {
        let color: ColorStop = "#f7c9c2".parse().expect("valid hex");
        assert_eq!(color, LIGHT);
        assert_eq!(color.to_string(), "#f7c9c2");
        assert_eq!("E16044".parse::<ColorStop>().expect("valid hex"), DARK);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#gg0000", "#12345678", "#ééé"] {
            assert!(bad.parse::<ColorStop>().is_err(), "{bad}");
        }
    }

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(gradient_color(LIGHT, DARK, 0.0), LIGHT);
        assert_eq!(gradient_color(LIGHT, DARK, 1.0), DARK);
    }

    #[test]
    fn rounds_each_channel() {
        let mid = gradient_color(ColorStop::new(0, 0, 0), ColorStop::new(255, 10, 3), 0.5);
        assert_eq!(mid, ColorStop::new(128, 5, 2));
    }

    #[test]
    fn out_of_range_positions_extrapolate_and_saturate() {
        let start = ColorStop::new(100, 100, 100);
        let end = ColorStop::new(200, 50, 100);
        assert_eq!(gradient_color(start, end, 1.5), ColorStop::new(250, 25, 100));
        assert_eq!(gradient_color(start, end, 3.0), ColorStop::new(255, 0, 100));
        assert_eq!(gradient_color(start, end, -0.5), ColorStop::new(50, 125, 100));
    }

    #[test]
    fn sequence_spans_both_ends() {
        let colors = gradient_sequence(LIGHT, DARK, 6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], LIGHT);
        assert_eq!(colors[5], DARK);
        for pair in colors.windows(2) {
            assert!(pair[1].g <= pair[0].g, "green should fall monotonically");
        }
    }

    #[test]
    fn degenerate_sequences_return_start() {
        assert_eq!(gradient_sequence(LIGHT, DARK, 1), vec![LIGHT]);
        assert_eq!(gradient_sequence(LIGHT, DARK, 0), vec![LIGHT]);
    }

    #[test]
    fn constant_gradient_repeats_the_color() {
        for n in 1..8 {
            assert_eq!(gradient_sequence(DARK, DARK, n), vec![DARK; n]);
        }
    }

    #[test]
    fn serializes_as_hex_string() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            color: ColorStop,
        }

        let wrapper: Wrapper = toml::from_str("color = \"#e16044\"").expect("valid toml");
        assert_eq!(wrapper.color, DARK);
        let text = toml::to_string(&wrapper).expect("serializable");
        assert_eq!(text.trim(), "color = \"#e16044\"");
        assert!(toml::from_str::<Wrapper>("color = \"red\"").is_err());
    }
}

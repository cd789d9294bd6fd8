//! Speed ranking and the perceptual color scale used for trajectory lines.

use plotters::prelude::{ColorMap, RGBColor, ViridisRGB};
use serde::{Deserialize, Serialize};

use super::ballistics::Throw;
use super::gradient::ColorStop;

/// Perceptually ordered color scales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScale {
    #[default]
    Viridis,
}

impl ColorScale {
    pub const fn viridis() -> Self {
        ColorScale::Viridis
    }

    /// Color at `t`, clamped to [0, 1]. NaN maps to the bottom of the scale.
    pub fn at(&self, t: f64) -> ColorStop {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let color: RGBColor = match self {
            ColorScale::Viridis => ViridisRGB.get_color(t as f32),
        };
        color.into()
    }
}

/// Maps a rank in [0, 1] onto the part of the scale actually used,
/// leaving out its least distinguishable ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankRemap {
    pub offset: f64,
    pub span: f64,
}

impl Default for RankRemap {
    fn default() -> Self {
        Self {
            offset: 0.15,
            span: 0.75,
        }
    }
}

impl RankRemap {
    pub fn apply(&self, t: f64) -> f64 {
        self.offset + self.span * t
    }
}

/// Speed range of a batch of throws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedRanking {
    min_kmh: f64,
    max_kmh: f64,
}

impl SpeedRanking {
    /// `None` for an empty batch.
    pub fn from_throws(throws: &[Throw]) -> Option<Self> {
        let mut speeds = throws.iter().map(|throw| throw.speed_kmh);
        let first = speeds.next()?;
        let (min_kmh, max_kmh) = speeds.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
        Some(Self { min_kmh, max_kmh })
    }

    /// `(speed - min) / (max - min)`, or 0 when every speed is the same.
    pub fn normalized(&self, speed_kmh: f64) -> f64 {
        let range = self.max_kmh - self.min_kmh;
        if range <= 0.0 {
            return 0.0;
        }
        (speed_kmh - self.min_kmh) / range
    }
}

/// One color per throw, in input order, keyed by each throw's speed rank.
pub fn assign_colors(throws: &[Throw], remap: RankRemap, scale: ColorScale) -> Vec<ColorStop> {
    let Some(ranking) = SpeedRanking::from_throws(throws) else {
        return Vec::new();
    };
    throws
        .iter()
        .map(|throw| scale.at(remap.apply(ranking.normalized(throw.speed_kmh))))
        .collect()
}

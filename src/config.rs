use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ballistics::{SimulationBounds, Throw};
use crate::core::gradient::ColorStop;
use crate::core::palette::RankRemap;
use crate::error::ConfigError;
use crate::render::{MAX_CANVAS_PX, grid, shapes};

/// Everything the three figures need. Every section falls back to its
/// defaults when missing from the file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub simulation: SimulationBounds,
    pub colors: RankRemap,
    pub plot: PlotStyle,
    pub grid: GridStyle,
    pub shapes: ShapesStyle,
    pub throws: Vec<Throw>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationBounds::default(),
            colors: RankRemap::default(),
            plot: PlotStyle::default(),
            grid: GridStyle::default(),
            shapes: ShapesStyle::default(),
            throws: default_throws(),
        }
    }
}

fn default_throws() -> Vec<Throw> {
    [
        (20.0, 45.0),
        (25.0, 55.0),
        (30.0, 62.0),
        (35.0, 70.0),
        (40.0, 78.0),
        (45.0, 85.0),
        (50.0, 92.0),
        (55.0, 98.0),
        (60.0, 105.0),
        (65.0, 112.0),
    ]
    .into_iter()
    .map(|(angle_deg, speed_kmh)| Throw::new(angle_deg, speed_kmh))
    .collect()
}

/// Trajectory figure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlotStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub background: ColorStop,
    pub plot_background: ColorStop,
    pub mesh: ColorStop,
    pub line_width: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_px: 1440,
            height_px: 832,
            background: ColorStop::new(0xf7, 0xf4, 0xee),
            plot_background: ColorStop::new(0xff, 0xfa, 0xf0),
            mesh: ColorStop::new(0xe3, 0xdd, 0xcf),
            line_width: 3,
        }
    }
}

/// Gradated grid lines.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GridStyle {
    pub cols: u32,
    pub rows: u32,
    pub cell_px: u32,
    pub margin_px: u32,
    pub background: ColorStop,
    pub light: ColorStop,
    pub dark: ColorStop,
    pub thin_px: u32,
    pub thick_px: u32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 6,
            cell_px: 80,
            margin_px: 40,
            background: ColorStop::new(0xf9, 0xf6, 0xf0),
            light: ColorStop::new(210, 210, 210),
            dark: ColorStop::new(60, 60, 60),
            thin_px: 1,
            thick_px: 5,
        }
    }
}

/// Rows of regular polygons.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ShapesStyle {
    pub min_sides: u32,
    pub max_sides: u32,
    pub per_row: u32,
    pub cell_width_px: u32,
    pub cell_height_px: u32,
    pub margin_x_px: u32,
    pub margin_y_px: u32,
    pub radius_px: f64,
    pub rotation_deg: f64,
    pub outline_width: u32,
    pub background: ColorStop,
    pub fill_light: ColorStop,
    pub fill_dark: ColorStop,
    pub outline_dark: ColorStop,
    pub outline_light: ColorStop,
}

impl Default for ShapesStyle {
    fn default() -> Self {
        Self {
            min_sides: 3,
            max_sides: 24,
            per_row: 6,
            cell_width_px: 130,
            cell_height_px: 180,
            margin_x_px: 40,
            margin_y_px: 30,
            radius_px: 48.0,
            rotation_deg: -90.0,
            outline_width: 4,
            background: ColorStop::new(0xff, 0xf7, 0xea),
            fill_light: ColorStop::new(0xf7, 0xc9, 0xc2),
            fill_dark: ColorStop::new(0xe1, 0x60, 0x44),
            outline_dark: ColorStop::new(0x2f, 0x2a, 0x2a),
            outline_light: ColorStop::new(0x66, 0x5c, 0x5c),
        }
    }
}

impl SceneConfig {
    /// Defaults when `path` is `None`, otherwise the parsed file. A named
    /// file that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;

        let plot_sizes = [self.plot.width_px, self.plot.height_px];
        if plot_sizes.iter().any(|&px| px == 0 || px > MAX_CANVAS_PX) {
            return Err(ConfigError::Invalid(format!(
                "plot size must be between 1 and {MAX_CANVAS_PX} px"
            )));
        }
        if self.grid.cell_px == 0 {
            return Err(ConfigError::Invalid(
                "grid.cell_px must be non-zero".to_string(),
            ));
        }
        if self.shapes.per_row == 0 {
            return Err(ConfigError::Invalid(
                "shapes.per_row must be at least 1".to_string(),
            ));
        }
        if self.shapes.min_sides < 3 {
            return Err(ConfigError::Invalid(format!(
                "shapes.min_sides must be at least 3 (got {})",
                self.shapes.min_sides
            )));
        }
        if self.shapes.max_sides < self.shapes.min_sides {
            return Err(ConfigError::Invalid(format!(
                "shapes.max_sides ({}) is below shapes.min_sides ({})",
                self.shapes.max_sides, self.shapes.min_sides
            )));
        }
        if self.shapes.cell_width_px == 0 || self.shapes.cell_height_px == 0 {
            return Err(ConfigError::Invalid(
                "shapes cell size must be non-zero".to_string(),
            ));
        }
        grid::canvas_size(&self.grid)?;
        shapes::canvas_size(&self.shapes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::EndpointMode;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.throws.len(), 10);
        assert_eq!(config.throws[0], Throw::new(20.0, 45.0));
        assert_eq!(config.throws[9], Throw::new(65.0, 112.0));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SceneConfig::from_toml(
            r##"
            [simulation]
            max_time_s = 4.0
            endpoint = "analytic_landing"

            [colors]
            offset = 0.0

            [[throws]]
            angle_deg = 45.0
            speed_kmh = 20.0
            "##,
        )
        .expect("valid toml");

        assert_eq!(config.simulation.max_time_s, 4.0);
        assert_eq!(config.simulation.sample_count, 200);
        assert_eq!(config.simulation.endpoint, EndpointMode::AnalyticLanding);
        assert_eq!(config.colors.offset, 0.0);
        assert_eq!(config.colors.span, 0.75);
        assert_eq!(config.throws, vec![Throw::new(45.0, 20.0)]);
        assert_eq!(config.grid, GridStyle::default());
    }

    #[test]
    fn dump_reloads_to_the_same_config() {
        let config = SceneConfig::default();
        let text = config.to_toml().expect("serializable");
        assert!(text.contains("fill_dark = \"#e16044\""));
        assert_eq!(SceneConfig::from_toml(&text).expect("valid toml"), config);
    }

    #[test]
    fn rejects_bad_colors_and_bounds() {
        assert!(matches!(
            SceneConfig::from_toml("[grid]\nlight = \"#zzzzzz\""),
            Err(ConfigError::Parse(_))
        ));

        let config = SceneConfig::from_toml("[simulation]\nsample_count = 1").expect("parses");
        assert!(matches!(config.validate(), Err(ConfigError::SampleCount(1))));

        let config = SceneConfig::from_toml("[simulation]\nmax_time_s = 0.0").expect("parses");
        assert!(matches!(config.validate(), Err(ConfigError::MaxTime(_))));
    }

    #[test]
    fn rejects_impossible_shape_rows() {
        let mut config = SceneConfig::default();
        config.shapes.min_sides = 2;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.shapes.max_sides = 2;
        config.shapes.min_sides = 3;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.shapes.per_row = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_canvases_too_large_to_allocate() {
        let config = SceneConfig::from_toml("[grid]\ncols = 4000000000\ncell_px = 80")
            .expect("parses");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.shapes.max_sides = u32::MAX;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.plot.width_px = MAX_CANVAS_PX + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = SceneConfig::load(Some(Path::new("/nonexistent/scene.toml")))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(SceneConfig::load(None).expect("defaults"), SceneConfig::default());
    }
}

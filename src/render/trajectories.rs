use std::path::Path;

use plotters::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{PlotStyle, SceneConfig};
use crate::core::ballistics::{SimulationBounds, Trajectory, compute_all};
use crate::core::gradient::ColorStop;
use crate::core::palette::{ColorScale, assign_colors};
use crate::error::{ConfigError, RenderError};

const FONT: &str = "sans-serif";
const LEGEND_SWATCH_PX: i32 = 20;
/// The legend is set at 8 pt on a 160 dpi figure.
const LEGEND_FONT_PT: f64 = 8.0;
const FIGURE_DPI: f64 = 160.0;

fn legend_font_px() -> u32 {
    (LEGEND_FONT_PT * FIGURE_DPI / 72.0).round() as u32
}

/// One line of the trajectory chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub color: ColorStop,
    pub trajectory: Trajectory,
}

/// Computes every throw and pairs it with its color and legend label.
/// Throws with nothing visible inside the window are left out.
pub fn plan_series(config: &SceneConfig) -> Result<Vec<PlotSeries>, ConfigError> {
    let trajectories = compute_all(&config.throws, &config.simulation)?;
    let colors = assign_colors(&config.throws, config.colors, ColorScale::viridis());

    let mut series = Vec::with_capacity(trajectories.len());
    for ((throw, trajectory), color) in config.throws.iter().zip(trajectories).zip(colors) {
        let label = throw.label();
        if trajectory.is_empty() {
            warn!(%label, "nothing visible inside the plot window, skipping");
            continue;
        }
        if let Some((x, y)) = trajectory.apex() {
            debug!(%label, %color, samples = trajectory.len(), apex_x = x, apex_y = y, "trajectory");
        }
        series.push(PlotSeries {
            label,
            color,
            trajectory,
        });
    }
    Ok(series)
}

pub fn title(throw_count: usize) -> String {
    format!("{throw_count} Trajectories for Ball Throws")
}

/// Draws `series` as polylines over a `[0, max_distance] x [0, max_height]`
/// window and writes the image to `path`.
pub fn draw(
    path: &Path,
    title: &str,
    series: &[PlotSeries],
    bounds: &SimulationBounds,
    style: &PlotStyle,
) -> Result<(), RenderError> {
    super::prepare_output(path)?;

    let root = BitMapBackend::new(path, (style.width_px, style.height_px)).into_drawing_area();
    root.fill(&RGBColor::from(style.background))
        .map_err(|e| RenderError::drawing("fill", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..bounds.max_distance_m, 0.0..bounds.max_height_m)
        .map_err(|e| RenderError::drawing("chart build", e))?;

    chart
        .plotting_area()
        .fill(&RGBColor::from(style.plot_background))
        .map_err(|e| RenderError::drawing("plot area", e))?;

    let mesh = RGBColor::from(style.mesh);
    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .bold_line_style(mesh)
        .light_line_style(mesh.mix(0.4))
        .draw()
        .map_err(|e| RenderError::drawing("mesh", e))?;

    let width = style.line_width;
    for s in series {
        let color = RGBColor::from(s.color);
        chart
            .draw_series(LineSeries::new(
                s.trajectory.points().iter().copied(),
                color.stroke_width(width),
            ))
            .map_err(|e| RenderError::drawing("draw series", e))?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SWATCH_PX, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, legend_font_px()))
        .draw()
        .map_err(|e| RenderError::drawing("legend", e))?;

    root.present()
        .map_err(|e| RenderError::drawing("present", e))?;
    info!(path = %path.display(), lines = series.len(), "saved trajectory plot");
    Ok(())
}

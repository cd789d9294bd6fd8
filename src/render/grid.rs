use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::config::GridStyle;
use crate::core::gradient::{ColorStop, lerp};
use crate::error::{ConfigError, RenderError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub color: ColorStop,
    pub width: u32,
}

pub fn canvas_size(style: &GridStyle) -> Result<(u32, u32), ConfigError> {
    Ok((
        super::canvas_extent("grid width", style.margin_px, style.cols, style.cell_px)?,
        super::canvas_extent("grid height", style.margin_px, style.rows, style.cell_px)?,
    ))
}

/// Color and stroke width for the line at position `t` in [0, 1].
/// Channels are truncated, not rounded.
pub fn line_style(style: &GridStyle, t: f64) -> (ColorStop, u32) {
    let channel = |a: u8, b: u8| lerp(f64::from(a), f64::from(b), t) as u8;
    let color = ColorStop::new(
        channel(style.light.r, style.dark.r),
        channel(style.light.g, style.dark.g),
        channel(style.light.b, style.dark.b),
    );
    let width = lerp(f64::from(style.thin_px), f64::from(style.thick_px), t).round() as u32;
    (color, width)
}

/// Vertical lines left to right, then horizontal lines top to bottom.
/// Weight and darkness grow along each direction.
pub fn plan_lines(style: &GridStyle) -> Result<Vec<GridLine>, ConfigError> {
    let (width, height) = canvas_size(style)?;
    let margin = style.margin_px as i32;
    let cell = style.cell_px as i32;
    let right = width as i32 - margin;
    let bottom = height as i32 - margin;

    let vertical = (0..=style.cols).map(|i| {
        let (color, width) = line_style(style, f64::from(i) / f64::from(style.cols.max(1)));
        let x = margin + i as i32 * cell;
        GridLine {
            from: (x, margin),
            to: (x, bottom),
            color,
            width,
        }
    });
    let horizontal = (0..=style.rows).map(|j| {
        let (color, width) = line_style(style, f64::from(j) / f64::from(style.rows.max(1)));
        let y = margin + j as i32 * cell;
        GridLine {
            from: (margin, y),
            to: (right, y),
            color,
            width,
        }
    });
    Ok(vertical.chain(horizontal).collect())
}

pub fn draw(path: &Path, style: &GridStyle) -> Result<(), RenderError> {
    let lines = plan_lines(style)?;
    super::prepare_output(path)?;

    let root = BitMapBackend::new(path, canvas_size(style)?).into_drawing_area();
    root.fill(&RGBColor::from(style.background))
        .map_err(|e| RenderError::drawing("fill", e))?;

    for line in &lines {
        let stroke = RGBColor::from(line.color).stroke_width(line.width);
        root.draw(&PathElement::new(vec![line.from, line.to], stroke))
            .map_err(|e| RenderError::drawing("line", e))?;
    }

    root.present()
        .map_err(|e| RenderError::drawing("present", e))?;
    info!(path = %path.display(), lines = lines.len(), "saved grid");
    Ok(())
}

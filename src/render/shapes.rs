use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::config::ShapesStyle;
use crate::core::gradient::{ColorStop, gradient_sequence};
use crate::error::{ConfigError, RenderError};

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCell {
    pub sides: u32,
    pub center: (f64, f64),
    pub fill: ColorStop,
    pub outline: ColorStop,
}

/// Vertices of a regular polygon, starting at `rotation_deg` and turning
/// clockwise on screen (y grows downward).
pub fn regular_polygon(
    center: (f64, f64),
    radius: f64,
    sides: u32,
    rotation_deg: f64,
) -> Vec<(f64, f64)> {
    let (cx, cy) = center;
    let step = 360.0 / f64::from(sides.max(1));
    (0..sides)
        .map(|i| {
            let angle = (rotation_deg + step * f64::from(i)).to_radians();
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

pub fn row_count(style: &ShapesStyle) -> u32 {
    let total = style.max_sides.saturating_add(1).saturating_sub(style.min_sides);
    total.div_ceil(style.per_row.max(1))
}

pub fn canvas_size(style: &ShapesStyle) -> Result<(u32, u32), ConfigError> {
    Ok((
        super::canvas_extent("shapes width", style.margin_x_px, style.per_row, style.cell_width_px)?,
        super::canvas_extent(
            "shapes height",
            style.margin_y_px,
            row_count(style),
            style.cell_height_px,
        )?,
    ))
}

/// Fill and outline colors for a row of `n` shapes. Even rows fade the fill
/// from light to dark and the outline from dark to light; odd rows reverse both.
pub fn row_palettes(style: &ShapesStyle, row: u32, n: usize) -> (Vec<ColorStop>, Vec<ColorStop>) {
    if row % 2 == 0 {
        (
            gradient_sequence(style.fill_light, style.fill_dark, n),
            gradient_sequence(style.outline_dark, style.outline_light, n),
        )
    } else {
        (
            gradient_sequence(style.fill_dark, style.fill_light, n),
            gradient_sequence(style.outline_light, style.outline_dark, n),
        )
    }
}

fn hex_list(colors: &[ColorStop]) -> String {
    colors
        .iter()
        .map(ColorStop::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn plan_cells(style: &ShapesStyle) -> Vec<ShapeCell> {
    let sides: Vec<u32> = (style.min_sides..=style.max_sides).collect();
    let per_row = style.per_row.max(1) as usize;
    let mut cells = Vec::with_capacity(sides.len());

    for (row, row_sides) in (0u32..).zip(sides.chunks(per_row)) {
        let (fills, outlines) = row_palettes(style, row, row_sides.len());
        info!(row = row + 1, fills = %hex_list(&fills), outlines = %hex_list(&outlines), "row colors");

        let cy = f64::from(style.margin_y_px)
            + f64::from(style.cell_height_px) / 2.0
            + f64::from(row) * f64::from(style.cell_height_px);
        for (idx, &side_count) in row_sides.iter().enumerate() {
            let cx = f64::from(style.margin_x_px)
                + idx as f64 * f64::from(style.cell_width_px)
                + f64::from(style.cell_width_px) / 2.0;
            cells.push(ShapeCell {
                sides: side_count,
                center: (cx, cy),
                fill: fills[idx],
                outline: outlines[idx],
            });
        }
    }
    cells
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

pub fn draw(path: &Path, style: &ShapesStyle) -> Result<(), RenderError> {
    let size = canvas_size(style)?;
    super::prepare_output(path)?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&RGBColor::from(style.background))
        .map_err(|e| RenderError::drawing("fill", e))?;

    let cells = plan_cells(style);
    for cell in &cells {
        let vertices: Vec<(i32, i32)> =
            regular_polygon(cell.center, style.radius_px, cell.sides, style.rotation_deg)
                .into_iter()
                .map(to_pixel)
                .collect();

        root.draw(&Polygon::new(vertices.clone(), RGBColor::from(cell.fill).filled()))
            .map_err(|e| RenderError::drawing("polygon", e))?;

        let mut outline = vertices;
        if let Some(&first) = outline.first() {
            outline.push(first);
        }
        let stroke = RGBColor::from(cell.outline).stroke_width(style.outline_width);
        root.draw(&PathElement::new(outline, stroke))
            .map_err(|e| RenderError::drawing("outline", e))?;
    }

    root.present()
        .map_err(|e| RenderError::drawing("present", e))?;
    info!(path = %path.display(), shapes = cells.len(), "saved shapes");
    Ok(())
}

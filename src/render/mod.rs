//! Bitmap renderers for the three figures.

pub mod grid;
pub mod shapes;
pub mod trajectories;

use std::path::Path;

use crate::error::{ConfigError, RenderError};

/// Largest width or height, in pixels, of any figure.
pub const MAX_CANVAS_PX: u32 = 16_384;

/// `2 * margin + count * cell`, or an error naming `what` when it does not
/// fit in `MAX_CANVAS_PX`.
fn canvas_extent(what: &str, margin: u32, count: u32, cell: u32) -> Result<u32, ConfigError> {
    margin
        .checked_mul(2)
        .and_then(|m| count.checked_mul(cell).and_then(|c| m.checked_add(c)))
        .filter(|&extent| extent <= MAX_CANVAS_PX)
        .ok_or_else(|| {
            ConfigError::Invalid(format!("{what} exceeds {MAX_CANVAS_PX} px"))
        })
}

/// Creates the parent directory of `path` if it does not exist yet.
fn prepare_output(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| RenderError::OutputDir {
                path: dir.display().to_string(),
                source,
            })
        }
        _ => Ok(()),
    }
}

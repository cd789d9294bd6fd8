//! Error types shared by the simulation core and the renderers.

use thiserror::Error;

/// Problems with the scene configuration. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: sample_count must be at least 2 (got {0})")]
    SampleCount(usize),

    #[error("invalid configuration: max_time_s must be positive (got {0})")]
    MaxTime(f64),

    #[error("invalid configuration: max_distance_m must be positive (got {0})")]
    MaxDistance(f64),

    #[error("invalid configuration: max_height_m must be positive (got {0})")]
    MaxHeight(f64),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid color '{0}': expected #rrggbb")]
    Color(String),

    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failures raised while drawing or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub(crate) fn drawing(stage: &str, err: impl std::fmt::Display) -> Self {
        RenderError::Drawing(format!("{stage}: {err}"))
    }
}

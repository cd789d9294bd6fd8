use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};

use parabolic_plots::config::SceneConfig;
use parabolic_plots::core::ballistics::EndpointMode;
use parabolic_plots::render::{grid, shapes, trajectories};

#[derive(Parser)]
#[command(name = "parabolic_plots")]
#[command(about = "Renders ball-throw trajectories, gradated grids and polygon rows")]
struct Cli {
    /// Scene configuration (TOML). Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot the configured throws
    Trajectories {
        #[arg(short, long, default_value = "trajectory_plot.png")]
        output: PathBuf,

        /// Override how each path ends at the ground
        #[arg(long)]
        endpoint: Option<Endpoint>,
    },

    /// Draw grid lines whose weight and shade grow across the canvas
    Grid {
        #[arg(short, long, default_value = "grid_lines.png")]
        output: PathBuf,
    },

    /// Draw rows of regular polygons with alternating color gradients
    Shapes {
        #[arg(short, long, default_value = "shapes_first_program.png")]
        output: PathBuf,
    },

    /// Render all three figures into one directory
    All {
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Append a local timestamp to every file name
        #[arg(long)]
        stamp: bool,
    },

    /// Print the effective configuration as TOML
    PrintConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Endpoint {
    Sampled,
    Analytic,
}

impl From<Endpoint> for EndpointMode {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Sampled => EndpointMode::Sampled,
            Endpoint::Analytic => EndpointMode::AnalyticLanding,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let config = SceneConfig::load(path).context("failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

fn render_trajectories(config: &SceneConfig, output: &Path) -> Result<()> {
    let series = trajectories::plan_series(config)?;
    let title = trajectories::title(config.throws.len());
    trajectories::draw(output, &title, &series, &config.simulation, &config.plot)
        .with_context(|| format!("failed to render {}", output.display()))
}

fn output_name(dir: &Path, stem: &str, stamp: Option<&str>) -> PathBuf {
    match stamp {
        Some(stamp) => dir.join(format!("{stem}_{stamp}.png")),
        None => dir.join(format!("{stem}.png")),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Trajectories { output, endpoint } => {
            if let Some(endpoint) = endpoint {
                config.simulation.endpoint = endpoint.into();
            }
            render_trajectories(&config, &output)?;
        }
        Commands::Grid { output } => {
            grid::draw(&output, &config.grid)
                .with_context(|| format!("failed to render {}", output.display()))?;
        }
        Commands::Shapes { output } => {
            shapes::draw(&output, &config.shapes)
                .with_context(|| format!("failed to render {}", output.display()))?;
        }
        Commands::All { out_dir, stamp } => {
            let stamp = stamp.then(|| Local::now().format("%Y%m%d-%H%M%S").to_string());
            let stamp = stamp.as_deref();

            render_trajectories(&config, &output_name(&out_dir, "trajectory_plot", stamp))?;
            let path = output_name(&out_dir, "grid_lines", stamp);
            grid::draw(&path, &config.grid)
                .with_context(|| format!("failed to render {}", path.display()))?;
            let path = output_name(&out_dir, "shapes_first_program", stamp);
            shapes::draw(&path, &config.shapes)
                .with_context(|| format!("failed to render {}", path.display()))?;
            info!(dir = %out_dir.display(), "rendered all figures");
        }
        Commands::PrintConfig => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_endpoint_override() {
        let cli = Cli::try_parse_from(["parabolic_plots", "trajectories", "--endpoint", "analytic"])
            .expect("valid arguments");
        match cli.command {
            Commands::Trajectories { output, endpoint } => {
                assert_eq!(output, PathBuf::from("trajectory_plot.png"));
                assert!(matches!(
                    endpoint.map(EndpointMode::from),
                    Some(EndpointMode::AnalyticLanding)
                ));
            }
            _ => panic!("expected trajectories subcommand"),
        }
    }

    #[test]
    fn stamped_names_keep_the_stem() {
        let dir = Path::new("out");
        assert_eq!(output_name(dir, "grid_lines", None), dir.join("grid_lines.png"));
        assert_eq!(
            output_name(dir, "grid_lines", Some("20260101-120000")),
            dir.join("grid_lines_20260101-120000.png")
        );
    }

    #[test]
    fn invalid_config_stops_before_rendering() {
        let dir = std::env::temp_dir().join("parabolic_plots_bad_config");
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("scene.toml");
        std::fs::write(&path, "[simulation]\nsample_count = 1\n").expect("write config");

        let err = load_config(Some(&path)).expect_err("should fail");
        assert!(err.to_string().contains("sample_count"));
    }
}

//! Climate render CLI.
//!
//! Produces grids, heatmaps, wind fields and hourly series from the
//! synthetic climate field and writes them as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use climate_engine::{
    ClimateEngine, DailySeriesRequest, EngineConfig, GridRequest, GridResponse, HeatmapRequest,
    InterpolationRequest, WindFieldRequest,
};
use climate_model::{EntropyNoise, LegacySampleSource, ObservationSource, SeededNoise};
use grid_processor::InterpolationMethod;

/// Climate field renderer
#[derive(Parser, Debug)]
#[command(name = "climate-render")]
#[command(about = "Synthesize and render a global climate field")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Write output here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Observation source
    #[arg(long, value_enum, default_value = "synthetic", global = true)]
    source: SourceKind,

    /// Noise seed for reproducible output
    #[arg(long, env = "CLIMATE_SEED", global = true)]
    seed: Option<u64>,

    /// Number of rayon worker threads
    #[arg(long, env = "CLIMATE_WORKER_THREADS", global = true)]
    worker_threads: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snapshot grid of observations
    Grid {
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Resample onto this lattice step
        #[arg(long)]
        interpolate_to: Option<u32>,

        /// Resampling method
        #[arg(long, default_value = "cubic")]
        method: String,
    },

    /// False-color snapshot image of one variable
    Heatmap {
        variable: String,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        #[arg(short, long)]
        resolution: Option<u32>,

        /// Also write the raw PNG here
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Wind vectors for particle animation
    Wind {
        #[arg(short, long)]
        resolution: Option<u32>,

        #[arg(long)]
        particles: Option<u32>,
    },

    /// Hourly images for one day
    Series {
        variable: String,

        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        #[arg(short, long)]
        resolution: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SourceKind {
    /// Parametric model with seasonal and diurnal terms
    Synthetic,
    /// Coarse latitude-only sample data
    Legacy,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays clean JSON
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    if let Some(threads) = args.worker_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let mut config = EngineConfig::from_env();
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let engine = match args.source {
        SourceKind::Synthetic => ClimateEngine::synthetic(config)?,
        SourceKind::Legacy => {
            let source: Arc<dyn ObservationSource> = match config.seed {
                Some(seed) => Arc::new(LegacySampleSource::new(SeededNoise::new(seed))),
                None => Arc::new(LegacySampleSource::new(EntropyNoise)),
            };
            ClimateEngine::new(source, config)?
        }
    };

    info!(source = engine.source_name(), command = ?args.command, "Starting climate render");

    match &args.command {
        Command::Grid {
            resolution,
            interpolate_to,
            method,
        } => match interpolate_to {
            Some(target) => {
                let request = InterpolationRequest {
                    resolution: *resolution,
                    target_resolution: *target,
                    method: InterpolationMethod::from_str(method),
                };
                write_json(&args, &engine.interpolated_grid(&request)?)
            }
            None => {
                let grid = engine.grid(&GridRequest {
                    resolution: *resolution,
                })?;
                write_json(&args, &GridResponse::new(grid))
            }
        },
        Command::Heatmap {
            variable,
            width,
            height,
            resolution,
            png,
        } => {
            let request = HeatmapRequest {
                variable: variable.clone(),
                width: *width,
                height: *height,
                resolution: *resolution,
            };
            if let Some(path) = png {
                let bytes = engine.heatmap_png(&request)?;
                write_bytes(path, &bytes)?;
                info!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
            }
            write_json(&args, &engine.heatmap(&request)?)
        }
        Command::Wind {
            resolution,
            particles,
        } => {
            let request = WindFieldRequest {
                resolution: *resolution,
                particles: *particles,
            };
            write_json(&args, &engine.wind_field(&request)?)
        }
        Command::Series {
            variable,
            date,
            width,
            height,
            resolution,
        } => {
            let request = DailySeriesRequest {
                variable: variable.clone(),
                date: date.clone(),
                width: *width,
                height: *height,
                resolution: *resolution,
            };
            write_json(&args, &engine.daily_series(&request)?)
        }
    }
}

fn write_json<T: Serialize>(args: &Args, value: &T) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match &args.output {
        Some(path) => write_bytes(path, json.as_bytes()),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

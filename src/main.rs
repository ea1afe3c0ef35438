#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level as TraceLevel, error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt, reload};

use cursor_avoid::constants::env as vars;
use cursor_avoid::{AppConfig, AvoidanceDecision, AvoidanceEngine, DpiInfo, Monitor, Point, Rect};

#[derive(Debug, Parser)]
#[command(name = "cursor-avoid", version, about = "Keep windows out of the cursor's way")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the config file and print every problem
    Validate,

    /// Evaluate one cursor/window pair (physical pixels)
    Check {
        /// Cursor position as X,Y
        #[arg(long, value_parser = parse_point)]
        cursor: Point,

        /// Window bounds as X,Y,W,H
        #[arg(long, value_parser = parse_rect)]
        window: Rect,

        /// Monitor DPI as DX,DY
        #[arg(long, value_parser = parse_dpi, default_value = "96,96")]
        dpi: DpiInfo,

        /// Monitor identifier used for per-monitor overrides
        #[arg(long, default_value = "primary")]
        monitor: String,

        /// Monitor bounds as X,Y,W,H
        #[arg(long, value_parser = parse_rect, default_value = "0,0,1920,1080")]
        bounds: Rect,

        /// Usable area as X,Y,W,H (defaults to the bounds)
        #[arg(long, value_parser = parse_rect)]
        work_area: Option<Rect>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_ints<const N: usize>(value: &str) -> Result<[i32; N], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated integers, got '{value}'"));
    }
    let mut out = [0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().map_err(|e| format!("invalid integer '{part}': {e}"))?;
    }
    Ok(out)
}

fn parse_point(value: &str) -> Result<Point, String> {
    let [x, y] = parse_ints::<2>(value)?;
    Ok(Point::new(x, y))
}

fn parse_rect(value: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_ints::<4>(value)?;
    Ok(Rect::new(x, y, width, height))
}

fn parse_dpi(value: &str) -> Result<DpiInfo, String> {
    let [dx, dy] = parse_ints::<2>(value)?;
    let dx = u32::try_from(dx).map_err(|_| format!("DPI must be positive, got {dx}"))?;
    let dy = u32::try_from(dy).map_err(|_| format!("DPI must be positive, got {dy}"))?;
    Ok(DpiInfo::new(dx, dy))
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

/// Level used before the config file is read
fn startup_level(env_level: Option<&str>) -> TraceLevel {
    env_level.map_or(TraceLevel::INFO, parse_level)
}

type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// Install the subscriber with a reloadable level so config loading is logged
fn init_tracing(level: TraceLevel) -> Result<LevelHandle> {
    let (filter, handle) = reload::Layer::new(LevelFilter::from_level(level));
    let subscriber = tracing_subscriber::registry().with(filter).with(fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(handle)
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();
    Ok(config)
}

fn run(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    match cli.command {
        Command::Validate => {
            let errors = config.validate();
            if errors.is_empty() {
                println!("config is valid");
                return Ok(ExitCode::SUCCESS);
            }
            for e in &errors {
                println!("{e}");
            }
            error!(count = errors.len(), "config has validation errors");
            Ok(ExitCode::FAILURE)
        }
        Command::Check { cursor, window, dpi, monitor, bounds, work_area, json } => {
            let engine = AvoidanceEngine::new(config).context("Failed to build avoidance engine")?;
            let monitor = Monitor {
                id: monitor,
                dpi,
                bounds,
                work_area: work_area.unwrap_or(bounds),
            };
            let decision = engine.evaluate(cursor, window, &monitor);

            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
                return Ok(ExitCode::SUCCESS);
            }

            match decision {
                AvoidanceDecision::Disabled => println!("avoidance disabled on monitor '{}'", monitor.id),
                AvoidanceDecision::Clear { distance } => println!("clear (distance {distance:.2})"),
                AvoidanceDecision::Push { distance, vector, target } => {
                    println!("push by {vector} to {target} (distance {distance:.2})");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let env_level = std::env::var(vars::LOG_LEVEL).ok();
    let level_handle = init_tracing(startup_level(env_level.as_deref()))?;

    let config = load_config(cli.config.as_ref())?;
    level_handle
        .modify(|filter| *filter = LevelFilter::from_level(parse_level(&config.log_level)))
        .context("Failed to apply configured log level")?;

    info!(
        threshold = config.proximity_threshold,
        push_distance = config.push_distance,
        algorithm = ?config.proximity.algorithm,
        "config ready"
    );

    run(cli, config)
}

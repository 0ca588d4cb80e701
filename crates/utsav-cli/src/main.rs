//! Utsav CLI - headless driver for the festival scene

mod commands;
mod config;
mod scene;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{config as config_cmd, fireworks, garden, rangoli};
use config::FestivalConfig;
use std::path::PathBuf;
use utsav_particles::entropy_seed;

#[derive(Parser)]
#[command(name = "utsav")]
#[command(about = "Fireworks, rangoli and diyas for a festival night", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a utsav.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch rockets and run a headless fireworks session
    Fireworks {
        /// Launch pads to fire at t = 0 (0 = left, 1 = center, 2 = right)
        #[arg(long, value_delimiter = ',', default_value = "1")]
        launches: Vec<usize>,

        /// Simulated seconds
        #[arg(long, default_value = "6")]
        seconds: f64,

        /// Fixed tick rate
        #[arg(long, default_value = "60")]
        fps: u32,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Paint rangoli strokes on the canvas
    Rangoli {
        /// Canvas point as x,z (repeatable)
        #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true)]
        points: Vec<[f32; 2]>,

        /// Petals per click (overrides the config)
        #[arg(long)]
        symmetry: Option<u32>,

        /// Strokes to undo after painting
        #[arg(long, default_value = "0")]
        undo: usize,

        /// Wipe the canvas at the end
        #[arg(long)]
        clear: bool,

        /// RNG seed for stroke colors (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Toggle diyas in the lamp ring
    Garden {
        /// Lamp index to toggle (repeatable)
        #[arg(long = "toggle")]
        toggles: Vec<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_point(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected x,z, got {} value(s)", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let z: f32 = parts[1].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, z])
}

fn load_config(path: Option<&PathBuf>) -> Result<FestivalConfig> {
    match path {
        Some(path) => FestivalConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(FestivalConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Fireworks {
            launches,
            seconds,
            fps,
            seed,
            format,
        } => fireworks::run(
            fireworks::FireworksArgs {
                launches,
                seconds,
                fps,
                seed: seed.unwrap_or_else(entropy_seed),
                format,
            },
            &config,
        ),
        Commands::Rangoli {
            points,
            symmetry,
            undo,
            clear,
            seed,
            format,
        } => rangoli::run(
            rangoli::RangoliArgs {
                points,
                symmetry,
                undo,
                clear,
                seed: seed.unwrap_or_else(entropy_seed),
                format,
            },
            &config,
        ),
        Commands::Garden { toggles, format } => garden::run(&toggles, &format, &config),
        Commands::Config => config_cmd::run(&config),
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spline_engine::{
    io::{self, simple::StoredProfiles},
    EngineConfig, HermiteSpline, ProfileBatch, ReconstructionEngine, SplineConfig, SplineEngine,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Adaptive Hermite spline reconstruction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconstruct every profile of a JSON batch
    Reconstruct {
        #[arg(long)]
        input: Option<PathBuf>,
        /// TOML or YAML engine configuration
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the adaptive knot set and quadrature gap of each profile
    Knots {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = spline_engine::DEFAULT_ATOL)]
        atol: f64,
    },

    /// Display engine banner
    Banner,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Reconstruct {
            input,
            config,
            output,
        } => {
            let cfg = match config {
                Some(path) => EngineConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => EngineConfig::default(),
            };
            let input = input
                .or_else(|| cfg.io.input.clone().map(PathBuf::from))
                .context("no input given (use --input or io.input)")?;
            let output = output.or_else(|| cfg.io.output.clone().map(PathBuf::from));

            let stored: StoredProfiles = io::load_json(&input)
                .with_context(|| format!("reading profiles {}", input.display()))?;
            let mut engine = SplineEngine::new();
            engine.prepare(cfg)?;
            let report = engine.reconstruct(ProfileBatch::from(stored))?;
            tracing::info!("{}", report.summary());

            match output {
                Some(path) => io::write_json(&path, &report)?,
                None => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            engine.shutdown()?;
        }
        Command::Knots { input, atol } => {
            let stored: StoredProfiles = io::load_json(&input)
                .with_context(|| format!("reading profiles {}", input.display()))?;
            let cfg = SplineConfig::default().with_atol(atol);
            for profile in &stored.profiles {
                let spline = HermiteSpline::fit(&profile.x, &profile.y, &cfg)
                    .with_context(|| format!("profile {}", profile.id))?;
                let gap = spline.quadrature_gap(&profile.x, &profile.y)?;
                println!("{}: knots={:?} quadrature_gap={gap:.3e}", profile.id, spline.knots());
            }
        }
        Command::Banner => {
            println!("{}", spline_engine::banner());
        }
    }
    Ok(())
}

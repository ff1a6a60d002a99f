//! Benchmark Plotter - grouped bar charts for search-algorithm results.
//!
//! Reads a problem -> algorithm -> metric table and writes one chart per
//! problem comparing nodes expanded, goal depth, cost and actions.

mod config;
mod error;
mod generator;
mod layout;
mod plot;
mod results;

use anyhow::{anyhow, Result};
use clap::Parser;
use config::{ChartConfig, ImageFormat};
use generator::ChartGenerator;
use plot::PlottersRenderer;
use results::ResultsTable;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grouped bar charts comparing algorithm metrics per problem
#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON results table (problem -> algorithm -> metrics); uses the built-in sample when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the charts are written to
    #[arg(short, long, default_value = "charts")]
    output_dir: PathBuf,

    /// Image format of the charts
    #[arg(short, long, value_enum, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Chart title template ({problem} is replaced with the problem name)
    #[arg(long)]
    title: Option<String>,

    /// Verbose diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn chart_config(&self) -> ChartConfig {
        let defaults = ChartConfig::default();
        ChartConfig {
            output_dir: self.output_dir.clone(),
            format: self.format,
            title_template: self.title.clone().unwrap_or(defaults.title_template),
            ..defaults
        }
    }
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let table = match args.input {
        Some(ref path) => {
            info!(path = %path.display(), "loading results");
            ResultsTable::load(path)?
        }
        None => ResultsTable::sample()?,
    };

    let config = args.chart_config();
    let mut generator = ChartGenerator::new(config.clone(), PlottersRenderer::new(config.format));
    let summary = generator.generate(&table)?;

    println!("Created {} charts.", summary.chart_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chart_config() {
        let args = Args::parse_from(["benchplot"]);
        assert_eq!(args.chart_config(), ChartConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "benchplot",
            "--output-dir",
            "out",
            "--format",
            "svg",
            "--title",
            "{problem} results",
        ]);
        let config = args.chart_config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.format, ImageFormat::Svg);
        assert_eq!(config.title_for("P1"), "P1 results");
    }

    #[test]
    fn second_logging_init_is_reported() {
        let _ = init_logging(false);
        let err = init_logging(true).unwrap_err();
        assert!(err.to_string().contains("Failed to initialise logging"));
    }
}

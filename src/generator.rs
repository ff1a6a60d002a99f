//! Per-problem chart generation.

use crate::config::ChartConfig;
use crate::plot::{ChartRenderer, ChartSpec};
use crate::results::{ProblemResults, ResultsTable};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Characters dropped from problem names to form file names
const STRIPPED_CHARS: [char; 4] = ['(', ')', ',', ' '];

/// File stem for a problem name
pub fn sanitize_file_stem(problem: &str) -> String {
    problem.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Written files, in problem order
    pub written: Vec<PathBuf>,
    /// Problems whose file name matched an earlier problem's and replaced its chart
    pub overwritten: Vec<String>,
}

impl RunSummary {
    pub fn chart_count(&self) -> usize {
        self.written.len()
    }
}

/// Writes one chart per problem into the configured output directory
pub struct ChartGenerator<R> {
    config: ChartConfig,
    renderer: R,
}

impl<R: ChartRenderer> ChartGenerator<R> {
    pub fn new(config: ChartConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Output path of the chart for `problem`
    pub fn chart_path(&self, problem: &str) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}.{}",
            sanitize_file_stem(problem),
            self.config.format.extension()
        ))
    }

    /// Render every problem of `table`, in order. The first failure aborts the run.
    pub fn generate(&mut self, table: &ResultsTable) -> Result<RunSummary> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
        debug!(dir = %output_dir.display(), problems = table.len(), "generating charts");

        let mut summary = RunSummary::default();
        let mut owners: HashMap<PathBuf, &str> = HashMap::new();
        for (problem, results) in table.iter() {
            let path = self.render(problem, results)?;
            if let Some(earlier) = owners.insert(path.clone(), problem) {
                warn!(problem, earlier, path = %path.display(), "file name already used, earlier chart overwritten");
                summary.overwritten.push(problem.to_string());
            }
            println!("Chart saved to: {}", path.display());
            summary.written.push(path);
        }

        info!(charts = summary.chart_count(), overwritten = summary.overwritten.len(), "done");
        Ok(summary)
    }

    /// Lay out and write the chart of one problem, returning its path
    pub fn render(&mut self, problem: &str, results: &ProblemResults) -> Result<PathBuf> {
        let spec = ChartSpec::build(problem, results, &self.config)?;
        let path = self.chart_path(problem);
        debug!(problem, algorithms = results.len(), path = %path.display(), "rendering");
        self.renderer.render(&spec, &path)?;
        Ok(path)
    }
}

//! Results tables: problem -> algorithm -> metric values.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Sample table shipped with the binary, used when no input file is given
const SAMPLE_RESULTS: &str = include_str!("../data/sample_results.json");

/// A compared metric. Declaration order is the x-axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Nodes expanded
    Nodes,
    /// Depth of the goal found
    Goal,
    /// Plan cost
    Cost,
    /// Plan length in actions
    Actions,
}

impl Metric {
    /// All metrics in axis order
    pub const ALL: [Metric; 4] = [Metric::Nodes, Metric::Goal, Metric::Cost, Metric::Actions];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Nodes => "nodes",
            Metric::Goal => "goal",
            Metric::Cost => "cost",
            Metric::Actions => "actions",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric values reported by one algorithm on one problem.
///
/// Keys are kept as raw strings so that unknown keys are tolerated and a
/// missing metric is reported by name when the chart is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValues(IndexMap<String, f64>);

impl MetricValues {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(metric.name()).copied()
    }

    pub fn insert(&mut self, metric: Metric, value: f64) {
        self.0.insert(metric.name().to_string(), value);
    }
}

impl FromIterator<(Metric, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut values = Self::default();
        for (metric, value) in iter {
            values.insert(metric, value);
        }
        values
    }
}

/// Algorithm name -> metric values, in insertion order
pub type ProblemResults = IndexMap<String, MetricValues>;

/// Problem name -> per-algorithm results, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable {
    problems: IndexMap<String, ProblemResults>,
}

impl ResultsTable {
    /// Parse a table from a JSON object
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Results table is not a valid problem/algorithm/metric JSON object")
    }

    /// Load a table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse results file: {}", path.display()))
    }

    /// The built-in sample table
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_RESULTS)
    }

    /// Add (or replace) one algorithm's values for a problem
    pub fn insert(&mut self, problem: &str, algorithm: &str, values: MetricValues) {
        self.problems
            .entry(problem.to_string())
            .or_default()
            .insert(algorithm.to_string(), values);
    }

    /// Problems in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProblemResults)> {
        self.problems.iter().map(|(name, results)| (name.as_str(), results))
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_preserves_problem_and_algorithm_order() {
        let table = ResultsTable::from_json_str(
            r#"{
                "Zeta": {"B": {"nodes": 1, "goal": 2, "cost": 3, "actions": 4},
                         "A": {"nodes": 5, "goal": 6, "cost": 7, "actions": 8}},
                "Alpha": {}
            }"#,
        )
        .unwrap();

        let problems: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(problems, ["Zeta", "Alpha"]);

        let (_, zeta) = table.iter().next().unwrap();
        let algorithms: Vec<&str> = zeta.keys().map(String::as_str).collect();
        assert_eq!(algorithms, ["B", "A"]);
        assert_eq!(zeta["A"].get(Metric::Cost), Some(7.0));
    }

    #[test]
    fn missing_metric_reads_as_none() {
        let table = ResultsTable::from_json_str(r#"{"P": {"A": {"nodes": 1, "extra": 9}}}"#).unwrap();
        let (_, p) = table.iter().next().unwrap();
        assert_eq!(p["A"].get(Metric::Nodes), Some(1.0));
        assert_eq!(p["A"].get(Metric::Goal), None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(ResultsTable::from_json_str(r#"{"P": {"A": {"nodes": "many"}}}"#).is_err());
    }

    #[test]
    fn sample_table_is_complete() {
        let table = ResultsTable::sample().unwrap();
        assert!(!table.is_empty());
        for (_, results) in table.iter() {
            for values in results.values() {
                assert!(Metric::ALL.iter().all(|m| values.get(*m).is_some()));
            }
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ResultsTable::load("/nonexistent/results.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/results.json"));
    }

    #[test]
    fn metric_order_matches_axis() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["nodes", "goal", "cost", "actions"]);
    }
}

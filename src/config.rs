//! Chart output configuration.

use crate::layout::AnnotationOffset;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Encoded image type of the written charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Everything the generator needs besides the results themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Directory the charts are written to (created if missing)
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    /// Title template; `{problem}` is replaced with the problem name
    pub title_template: String,
    pub x_caption: String,
    pub y_caption: String,
    pub annotation: AnnotationOffset,
}

impl ChartConfig {
    pub const PROBLEM_PLACEHOLDER: &'static str = "{problem}";

    pub fn title_for(&self, problem: &str) -> String {
        self.title_template.replace(Self::PROBLEM_PLACEHOLDER, problem)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            format: ImageFormat::Png,
            title_template: "Performance for {problem}".to_string(),
            x_caption: "Metric".to_string(),
            y_caption: "Value".to_string(),
            annotation: AnnotationOffset::DEFAULT,
        }
    }
}

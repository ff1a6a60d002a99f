//! Grouped bar chart construction and rendering.

use crate::config::{ChartConfig, ImageFormat};
use crate::error::ChartError;
use crate::layout::{self, Bar, GroupLayout};
use crate::results::{Metric, ProblemResults};
use anyhow::{ensure, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use std::sync::OnceLock;

/// Font family every chart text is drawn with
const FONT_FAMILY: &str = "sans-serif";

/// DejaVu Sans, bundled so rendering never depends on system fonts
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Pixels per canvas unit
const PIXELS_PER_UNIT: f64 = 100.0;

/// Headroom above the tallest bar, leaving space for its label
const Y_HEADROOM: f64 = 1.1;

/// Series colors, one per algorithm (cycled)
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),   // Blue
    RGBColor(255, 127, 14),   // Orange
    RGBColor(44, 160, 44),    // Green
    RGBColor(214, 39, 40),    // Red
    RGBColor(148, 103, 189),  // Purple
    RGBColor(140, 86, 75),    // Brown
    RGBColor(227, 119, 194),  // Pink
    RGBColor(127, 127, 127),  // Gray
];

/// Bars of one algorithm, one per metric in axis order
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub algorithm: String,
    pub bars: Vec<Bar>,
}

/// A fully laid out chart for one problem
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_caption: String,
    pub y_caption: String,
    /// Tick labels, one per metric slot
    pub ticks: Vec<&'static str>,
    /// Legend order matches series order
    pub series: Vec<Series>,
    /// Canvas size in units
    pub canvas: (f64, f64),
}

impl ChartSpec {
    /// Lay out the chart of `problem`. Algorithms keep the order of `results`.
    ///
    /// A problem without results still gets a chart: axes, title and ticks,
    /// but no bars and no legend.
    pub fn build(problem: &str, results: &ProblemResults, config: &ChartConfig) -> Result<Self, ChartError> {
        let series = match GroupLayout::new(results.len()) {
            Some(group) => Self::layout_series(problem, results, config, &group)?,
            None => Vec::new(),
        };

        Ok(Self {
            title: config.title_for(problem),
            x_caption: config.x_caption.clone(),
            y_caption: config.y_caption.clone(),
            ticks: Metric::ALL.iter().map(|m| m.name()).collect(),
            series,
            canvas: layout::canvas_size(results.len()),
        })
    }

    fn layout_series(
        problem: &str,
        results: &ProblemResults,
        config: &ChartConfig,
        group: &GroupLayout,
    ) -> Result<Vec<Series>, ChartError> {
        results
            .iter()
            .enumerate()
            .map(|(alg_idx, (algorithm, values))| {
                let bars = Metric::ALL
                    .iter()
                    .enumerate()
                    .map(|(slot, &metric)| {
                        let height = values.get(metric).ok_or_else(|| ChartError::MissingMetric {
                            problem: problem.to_string(),
                            algorithm: algorithm.clone(),
                            metric,
                        })?;
                        Ok::<_, ChartError>(Bar {
                            center: group.bar_center(slot, alg_idx),
                            width: group.bar_width(),
                            height,
                            label_offset: config.annotation.for_height(height),
                        })
                    })
                    .collect::<Result<Vec<_>, ChartError>>()?;

                Ok::<_, ChartError>(Series {
                    algorithm: algorithm.clone(),
                    bars,
                })
            })
            .collect()
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.series.iter().flat_map(|s| s.bars.iter())
    }

    /// Upper bound of the value axis
    pub fn y_max(&self) -> f64 {
        let tallest = self.bars().map(|b| b.height).fold(0.0_f64, f64::max);
        (tallest * Y_HEADROOM).max(1.0)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.canvas.0 * PIXELS_PER_UNIT).round() as u32,
            (self.canvas.1 * PIXELS_PER_UNIT).round() as u32,
        )
    }
}

/// Something that can turn a laid out chart into an image file
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartSpec, path: &Path) -> Result<()>;
}

/// Renders charts with plotters
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRenderer {
    format: ImageFormat,
}

impl PlottersRenderer {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&mut self, chart: &ChartSpec, path: &Path) -> Result<()> {
        register_embedded_font()?;
        let size = chart.pixel_size();
        match self.format {
            ImageFormat::Png => draw_chart(BitMapBackend::new(path, size).into_drawing_area(), chart),
            ImageFormat::Svg => draw_chart(SVGBackend::new(path, size).into_drawing_area(), chart),
        }
        .with_context(|| format!("Failed to render chart: {}", path.display()))
    }
}

/// Make the bundled font available to plotters. Runs the registration once per process.
fn register_embedded_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered =
        *REGISTERED.get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, EMBEDDED_FONT).is_ok());
    ensure!(registered, "Bundled chart font is not a valid TrueType font");
    Ok(())
}

/// Convert a typographic point offset to pixels
fn points_to_pixels(points: f64) -> i32 {
    (points * PIXELS_PER_UNIT / 72.0).round() as i32
}

/// Tick text at axis position `x`: the metric name on integer slots, blank elsewhere
fn tick_label(ticks: &[&str], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    ticks.get(slot as usize).map(|t| t.to_string()).unwrap_or_default()
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let n_slots = spec.ticks.len();
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (FONT_FAMILY, 28))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n_slots as f64 - 0.5), 0f64..spec.y_max())?;

    let ticks = &spec.ticks;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_slots * 2 + 1)
        .x_label_formatter(&|x| tick_label(ticks, *x))
        .x_desc(spec.x_caption.as_str())
        .y_desc(spec.y_caption.as_str())
        .draw()?;

    let value_style = TextStyle::from((FONT_FAMILY, 11).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));

    for (idx, series) in spec.series.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];

        chart
            .draw_series(series.bars.iter().map(|bar| {
                Rectangle::new([(bar.left(), 0.0), (bar.right(), bar.height)], color.filled())
            }))?
            .label(series.algorithm.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));

        chart.draw_series(series.bars.iter().map(|bar| {
            EmptyElement::at((bar.center, bar.height))
                + Text::new(
                    bar.value_label(),
                    (0, -points_to_pixels(bar.label_offset)),
                    value_style.clone(),
                )
        }))?;
    }

    if !spec.series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, 12))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

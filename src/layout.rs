//! Grouped bar geometry.
//!
//! Metrics sit at integer slots `0..n_metrics`. Each slot holds one bar per
//! algorithm; the group is centered on the slot and never wider than
//! [`GROUP_WIDTH`].

use serde::{Deserialize, Serialize};

/// Share of a metric slot covered by one group of bars
pub const GROUP_WIDTH: f64 = 0.8;

/// Canvas width never drops below this many units
pub const MIN_CANVAS_WIDTH: f64 = 8.0;

/// Canvas width added per algorithm
pub const WIDTH_PER_ALGORITHM: f64 = 2.5;

pub const CANVAS_HEIGHT: f64 = 6.0;

/// Vertical gap between a bar top and its value label, in points.
///
/// Low bars get the smaller gap so their labels stay clear of the axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationOffset {
    pub threshold: f64,
    pub near_offset: f64,
    pub far_offset: f64,
}

impl AnnotationOffset {
    pub const DEFAULT: Self = Self {
        threshold: 100.0,
        near_offset: 3.0,
        far_offset: 5.0,
    };

    pub fn for_height(&self, height: f64) -> f64 {
        if height < self.threshold {
            self.near_offset
        } else {
            self.far_offset
        }
    }
}

impl Default for AnnotationOffset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Canvas size in units (width, height) for a chart with `n_alg` algorithms
pub fn canvas_size(n_alg: usize) -> (f64, f64) {
    let width = (n_alg as f64 * WIDTH_PER_ALGORITHM).max(MIN_CANVAS_WIDTH);
    (width, CANVAS_HEIGHT)
}

/// Horizontal placement of the bars inside one metric slot
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    bar_width: f64,
    offsets: Vec<f64>,
}

impl GroupLayout {
    /// Layout for `n_alg` algorithms. Returns `None` when there is nothing to place.
    pub fn new(n_alg: usize) -> Option<Self> {
        if n_alg == 0 {
            return None;
        }

        let bar_width = GROUP_WIDTH / n_alg as f64;
        let half_span = bar_width * (n_alg - 1) as f64 / 2.0;
        let offsets = if n_alg == 1 {
            vec![0.0]
        } else {
            let step = 2.0 * half_span / (n_alg - 1) as f64;
            let mut offsets: Vec<f64> = (0..n_alg).map(|i| -half_span + i as f64 * step).collect();
            // pin the end point so the group stays symmetric
            offsets[n_alg - 1] = half_span;
            offsets
        };

        Some(Self { bar_width, offsets })
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Offsets from the slot center, one per algorithm, ascending
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Center x of the bar for `algorithm` in metric `slot`
    pub fn bar_center(&self, slot: usize, algorithm: usize) -> f64 {
        slot as f64 + self.offsets[algorithm]
    }
}

/// One bar of a chart, positioned in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub center: f64,
    pub width: f64,
    pub height: f64,
    /// Offset of the value label above the bar top, in points
    pub label_offset: f64,
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.center - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + self.width / 2.0
    }

    /// Text drawn above the bar
    pub fn value_label(&self) -> String {
        format_value(self.height)
    }
}

/// Format a bar height the way it appears in the results table:
/// whole numbers without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

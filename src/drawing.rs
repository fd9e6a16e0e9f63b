//! Freehand line drawing: path capture on a bounded plot and accuracy scoring
//! against a reference series.
//!
//! Coordinates are surface-local pixels. The reference polyline maps index i
//! of N points to `i / (N - 1)` of the usable width and `value / max` of the
//! usable height (inverted: larger values sit higher, i.e. at smaller y).

use serde::{Deserialize, Serialize};

use crate::domain::{DataPoint, DrawTask};

/// Horizontal distance beyond which a reference point is not scored.
pub const X_TOLERANCE_PX: f64 = 20.0;

/// Upper bound on samples kept for one stroke. Real strokes on a 600px
/// surface stay in the hundreds.
pub const MAX_PATH_POINTS: usize = 2_000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawing surface size and the fixed margins around the plot area.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding_left: 80.0,
            padding_right: 40.0,
            padding_top: 40.0,
            padding_bottom: 80.0,
        }
    }
}

impl PlotGeometry {
    pub fn plot_width(&self) -> f64 {
        self.width - self.padding_left - self.padding_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding_top - self.padding_bottom
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.padding_bottom
    }

    /// Inclusive bounds of the plot area.
    pub fn contains(&self, p: PathPoint) -> bool {
        p.x >= self.padding_left
            && p.x <= self.width - self.padding_right
            && p.y >= self.padding_top
            && p.y <= self.baseline()
    }

    /// A usable geometry has a positive plot area.
    pub fn is_valid(&self) -> bool {
        self.plot_width() > 0.0 && self.plot_height() > 0.0
    }
}

/// Ground-truth series with its vertical scale.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReferenceSeries {
    pub points: Vec<DataPoint>,
    pub max_value: Option<f64>,
}

impl ReferenceSeries {
    pub fn new(points: Vec<DataPoint>, max_value: Option<f64>) -> Self {
        Self { points, max_value }
    }

    pub fn from_task(task: &DrawTask) -> Self {
        Self::new(task.series.clone(), task.max_value)
    }

    /// Explicit positive maximum, otherwise the series maximum; never zero.
    pub fn scale_max(&self) -> f64 {
        let max = match self.max_value {
            Some(m) if m > 0.0 => m,
            _ => self
                .points
                .iter()
                .map(|p| p.value)
                .fold(f64::NEG_INFINITY, f64::max),
        };
        if max.is_finite() && max > 0.0 {
            max
        } else {
            1.0
        }
    }

    pub fn x_at(&self, index: usize, geometry: &PlotGeometry) -> f64 {
        let n = self.points.len();
        let fraction = if n > 1 {
            index as f64 / (n - 1) as f64
        } else {
            0.0
        };
        fraction * geometry.plot_width() + geometry.padding_left
    }

    pub fn y_for(&self, value: f64, geometry: &PlotGeometry) -> f64 {
        geometry.baseline() - (value / self.scale_max()) * geometry.plot_height()
    }

    /// Reference polyline in pixel coordinates.
    pub fn pixels(&self, geometry: &PlotGeometry) -> Vec<PathPoint> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| PathPoint::new(self.x_at(i, geometry), self.y_for(p.value, geometry)))
            .collect()
    }

    /// Y-axis ticks at 0, 25, 50, 75 and 100 % of the scale.
    pub fn axis_ticks(&self, geometry: &PlotGeometry) -> Vec<AxisTick> {
        let max = self.scale_max();
        [0.0, 0.25, 0.5, 0.75, 1.0]
            .into_iter()
            .map(|ratio| AxisTick {
                value: (max * ratio).round(),
                y: geometry.padding_top + (1.0 - ratio) * geometry.plot_height(),
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
}

/// Score a path against the reference, 0..=100.
///
/// Each reference point is compared with the user point nearest to it
/// horizontally. Points with no user point within `X_TOLERANCE_PX` are left
/// out of the average rather than penalized.
pub fn compute_accuracy(path: &[PathPoint], series: &ReferenceSeries, geometry: &PlotGeometry) -> f64 {
    if path.is_empty() || !geometry.is_valid() {
        return 0.0;
    }

    let max_error = geometry.plot_height();
    let mut total_error = 0.0;
    let mut scored = 0usize;

    for target in series.pixels(geometry) {
        let Some(nearest) = nearest_by_x(path, target.x) else {
            continue;
        };
        if (nearest.x - target.x).abs() > X_TOLERANCE_PX {
            continue;
        }
        total_error += (nearest.y - target.y).abs() / max_error;
        scored += 1;
    }

    if scored == 0 {
        return 0.0;
    }
    let average = total_error / scored as f64;
    ((1.0 - average) * 100.0).clamp(0.0, 100.0)
}

/// Closest point by horizontal distance; the earliest wins on ties.
fn nearest_by_x(path: &[PathPoint], x: f64) -> Option<PathPoint> {
    path.iter().copied().reduce(|best, p| {
        if (p.x - x).abs() < (best.x - x).abs() {
            p
        } else {
            best
        }
    })
}

/// Feedback line for a drawing score.
pub fn feedback_message(accuracy: f64) -> &'static str {
    if accuracy >= 90.0 {
        "Excellent! Your line is very accurate."
    } else if accuracy >= 80.0 {
        "Great job! Your line closely matches the data."
    } else if accuracy >= 60.0 {
        "Good attempt! Try to follow the data points more closely."
    } else if accuracy >= 40.0 {
        "Keep practicing! Pay attention to the trend changes."
    } else {
        "Try again! Focus on the overall pattern of the data."
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    Empty,
    Drawing,
    Drawn,
    Submitted,
}

/// Interaction state of one drawing exercise.
#[derive(Clone, Debug)]
pub struct DrawingBoard {
    series: ReferenceSeries,
    geometry: PlotGeometry,
    path: Vec<PathPoint>,
    pen_down: bool,
    accuracy: Option<f64>,
    show_reference: bool,
}

impl DrawingBoard {
    pub fn new(series: ReferenceSeries, geometry: PlotGeometry) -> Self {
        Self {
            series,
            geometry,
            path: Vec::new(),
            pen_down: false,
            accuracy: None,
            show_reference: false,
        }
    }

    pub fn series(&self) -> &ReferenceSeries {
        &self.series
    }

    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    pub fn path(&self) -> &[PathPoint] {
        &self.path
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn reference_shown(&self) -> bool {
        self.show_reference
    }

    pub fn is_submitted(&self) -> bool {
        self.accuracy.is_some()
    }

    pub fn phase(&self) -> DrawPhase {
        if self.is_submitted() {
            DrawPhase::Submitted
        } else if self.pen_down {
            DrawPhase::Drawing
        } else if self.path.is_empty() {
            DrawPhase::Empty
        } else {
            DrawPhase::Drawn
        }
    }

    /// Start a new stroke. Only accepted inside the plot area; replaces any previous path.
    pub fn pointer_down(&mut self, p: PathPoint) -> bool {
        if self.is_submitted() || !self.geometry.contains(p) {
            return false;
        }
        self.path.clear();
        self.path.push(p);
        self.pen_down = true;
        true
    }

    /// Extend the stroke. Points outside the plot area are dropped, not clamped;
    /// so are repeats of the last sample and anything past `MAX_PATH_POINTS`.
    pub fn pointer_move(&mut self, p: PathPoint) -> bool {
        if !self.pen_down || self.is_submitted() || !self.geometry.contains(p) {
            return false;
        }
        if self.path.last() == Some(&p) || self.path.len() >= MAX_PATH_POINTS {
            return false;
        }
        self.path.push(p);
        true
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::replace(&mut self.pen_down, false)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && !self.path.is_empty()
    }

    pub fn submit(&mut self) -> Option<f64> {
        if !self.can_submit() {
            return None;
        }
        self.pen_down = false;
        let accuracy = compute_accuracy(&self.path, &self.series, &self.geometry);
        self.accuracy = Some(accuracy);
        Some(accuracy)
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.pen_down = false;
        self.accuracy = None;
        self.show_reference = false;
    }

    pub fn reveal_reference(&mut self) {
        self.show_reference = true;
    }

    pub fn hide_reference(&mut self) {
        self.show_reference = false;
    }
}

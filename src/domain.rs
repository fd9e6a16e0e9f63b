//! Domain models: activities, exercises, charts and drag-and-drop tables.
//!
//! Exercises are a proper sum type. The same schema is used for the JSON
//! served to clients and for the TOML content file.

use serde::{Deserialize, Serialize};

use crate::matcher::AnswerKey;

/// An addressable activity: an ordered list of exercises behind a URL slug.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Activity {
  pub slug: String,
  pub title: String,
  #[serde(default)] pub time_limit: String,
  #[serde(default)] pub description: String,
  #[serde(default)] pub difficulty: String,
  pub exercises: Vec<Exercise>,
}

/// One exercise record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exercise {
  /// Read-only panel, optionally illustrated by a chart.
  Explanation {
    title: String,
    #[serde(default)] body: String,
    #[serde(default)] image: Option<String>,
    #[serde(default)] audio: Option<String>,
    #[serde(default)] chart: Option<Chart>,
  },
  /// Typed answer; `answer` is a list for multi-blank gap fills.
  FreeText {
    question: String,
    answer: AnswerKey,
    #[serde(default)] placeholders: Vec<String>,
    #[serde(default)] image: Option<String>,
    #[serde(default)] chart: Option<Chart>,
  },
  /// Pick one of `choices`; `image_choices` means each choice is an image path.
  Choice {
    question: String,
    choices: Vec<String>,
    answer: String,
    #[serde(default)] image_choices: bool,
    #[serde(default)] image: Option<String>,
  },
  DragDropTable(DragDropTask),
  InteractiveDraw(DrawTask),
  /// Chart shown on its own.
  Chart(Chart),
}

impl Exercise {
  /// Explanations and chart-only records carry no interaction state.
  pub fn is_interactive(&self) -> bool {
    !matches!(self, Exercise::Explanation { .. } | Exercise::Chart(_))
  }

  pub fn kind_name(&self) -> &'static str {
    match self {
      Exercise::Explanation { .. } => "explanation",
      Exercise::FreeText { .. } => "free_text",
      Exercise::Choice { .. } => "choice",
      Exercise::DragDropTable(_) => "drag_drop_table",
      Exercise::InteractiveDraw(_) => "interactive_draw",
      Exercise::Chart(_) => "chart",
    }
  }
}

/// Matching table: rows of static or drop-zone cells plus a label pool.
/// Labels may outnumber zones; extra labels simply stay in the pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DragDropTask {
  pub title: String,
  #[serde(default)] pub instructions: String,
  pub rows: Vec<TableRow>,
  pub labels: Vec<LabelDef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableRow {
  #[serde(default)] pub header: bool,
  pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableCell {
  Static {
    value: String,
    #[serde(default)] image: bool,
  },
  /// An empty `expected` accepts drops but is not graded.
  DropZone {
    id: String,
    #[serde(default)] expected: String,
  },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelDef {
  pub id: String,
  pub text: String,
}

/// Freehand drawing against a reference series.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawTask {
  pub title: String,
  #[serde(default)] pub description: String,
  #[serde(default)] pub x_axis_label: String,
  #[serde(default)] pub y_axis_label: String,
  pub series: Vec<DataPoint>,
  /// Falls back to the series maximum when absent.
  #[serde(default)] pub max_value: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
  pub label: String,
  pub value: f64,
  #[serde(default)] pub bold: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
  Line {
    title: String,
    #[serde(default)] x_axis_label: String,
    #[serde(default)] y_axis_label: String,
    data: Vec<DataPoint>,
  },
  MultiBar {
    title: String,
    #[serde(default)] x_axis_label: String,
    #[serde(default)] y_axis_label: String,
    labels: Vec<String>,
    series: Vec<BarSeries>,
  },
  Pie {
    title: String,
    data: Vec<PieSlice>,
    #[serde(default = "default_true")] show_percentages: bool,
  },
  Table {
    title: String,
    #[serde(default)] headers: Vec<String>,
    rows: Vec<Vec<String>>,
  },
}

fn default_true() -> bool { true }

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarSeries {
  pub name: String,
  #[serde(default)] pub color: String,
  pub data: Vec<f64>,
  #[serde(default)] pub bold: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PieSlice {
  pub label: String,
  pub value: f64,
  #[serde(default)] pub color: String,
  #[serde(default)] pub bold: bool,
}

/// Catalog entry for the activity list.
#[derive(Clone, Debug, Serialize)]
pub struct ActivitySummary {
  pub slug: String,
  pub title: String,
  pub description: String,
  pub difficulty: String,
  pub time_limit: String,
  pub exercise_count: usize,
  pub interactive_count: usize,
}

impl From<&Activity> for ActivitySummary {
  fn from(a: &Activity) -> Self {
    Self {
      slug: a.slug.clone(),
      title: a.title.clone(),
      description: a.description.clone(),
      difficulty: a.difficulty.clone(),
      time_limit: a.time_limit.clone(),
      exercise_count: a.exercises.len(),
      interactive_count: a.exercises.iter().filter(|e| e.is_interactive()).count(),
    }
  }
}

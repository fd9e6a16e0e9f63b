//! Built-in activity content bundled with the service.
//!
//! Serves as the catalog when no content file is configured; a content file
//! can replace activities by slug.

use crate::domain::{
  Activity, Chart, DataPoint, DragDropTask, DrawTask, Exercise, LabelDef, PieSlice, TableCell, TableRow,
};
use crate::matcher::AnswerKey;

fn pt(label: &str, value: f64, bold: bool) -> DataPoint {
  DataPoint { label: label.into(), value, bold }
}

fn labels(items: &[&str]) -> Vec<LabelDef> {
  items
    .iter()
    .enumerate()
    .map(|(i, text)| LabelDef { id: format!("item-{}", i + 1), text: (*text).into() })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| (*s).to_string()).collect()
}

/// Explanation panel illustrated by a three-point line chart.
fn trend_explanation(term: &str, data: [(&str, f64, bool); 3]) -> Exercise {
  Exercise::Explanation {
    title: "Understanding Line Graph Vocabulary".into(),
    body: format!("Line graphs show changes over time. Here are key vocabulary terms you'll need to describe trends: {term}"),
    image: None,
    audio: None,
    chart: Some(Chart::Line {
      title: "Sample Line Graph".into(),
      x_axis_label: String::new(),
      y_axis_label: String::new(),
      data: data.iter().map(|(l, v, b)| pt(l, *v, *b)).collect(),
    }),
  }
}

/// Rows of image cells paired with graded drop zones.
fn trend_rows() -> Vec<TableRow> {
  let pairs = [
    ("images/48.png", "cell-1", "surge"),
    ("images/49.png", "cell-2", "plateau"),
    ("images/50.png", "cell-3", "plummet"),
    ("images/51.png", "cell-4", "rebound"),
    ("images/52.png", "cell-5", "fluctuate"),
  ];
  let mut rows = vec![TableRow {
    header: true,
    cells: vec![
      TableCell::Static { value: "Trend Description".into(), image: false },
      TableCell::Static { value: "Vocabulary Term".into(), image: false },
    ],
  }];
  rows.extend(pairs.iter().map(|(img, id, expected)| TableRow {
    header: false,
    cells: vec![
      TableCell::Static { value: (*img).into(), image: true },
      TableCell::DropZone { id: (*id).into(), expected: (*expected).into() },
    ],
  }));
  rows
}

fn free_text(question: &str, answer: AnswerKey, image: Option<&str>, placeholder: &str) -> Exercise {
  Exercise::FreeText {
    question: question.into(),
    placeholders: if placeholder.is_empty() { Vec::new() } else { vec![placeholder.into()] },
    answer,
    image: image.map(str::to_string),
    chart: None,
  }
}

fn choice(question: &str, choices: &[&str], answer: &str) -> Exercise {
  Exercise::Choice {
    question: question.into(),
    choices: strings(choices),
    answer: answer.into(),
    image_choices: false,
    image: None,
  }
}

const MATCH_INSTRUCTIONS: &str = "Drag and drop the verb and noun phrases from the table to the column that shows their meaning. More than one phrase can match to one column.";

const DRAW_INSTRUCTIONS: &str = "While listening to the audio, use your mouse to draw a graph that shows the increase and decrease of house sales. After completing your drawing, click the 'Submit' button to verify its accuracy.";

/// The line-graph vocabulary activity.
pub fn line_graph_activity() -> Activity {
  let exercises = vec![
    trend_explanation(
      "To increase sharply, to surge, to soar, to leap, to rocket.",
      [("2010", 100.0, true), ("", 300.0, false), ("2011", 250.0, false)],
    ),
    trend_explanation(
      "To remain stable/unchanged/constant.",
      [("2010", 150.0, true), ("2011", 150.0, false), ("2012", 300.0, false)],
    ),
    trend_explanation(
      "To level off/to stabilize.",
      [("2010", 100.0, false), ("2011", 250.0, false), ("2012", 250.0, true)],
    ),
    trend_explanation(
      "To go up considerably/significantly.",
      [("2010", 150.0, false), ("2011", 100.0, false), ("2012", 400.0, true)],
    ),
    Exercise::DragDropTable(DragDropTask {
      title: "Match Vocabulary Terms to Trend Descriptions".into(),
      instructions: MATCH_INSTRUCTIONS.into(),
      rows: trend_rows(),
      labels: labels(&[
        "a slight drop", "a significant increase", "to plunge", "a leap", "erratic",
        "a remarkable growth", "to hit a low", "static", "to jump", "fluctuation",
        "to decrease marginally", "to reach a trough", "a peak point", "to decrease drastically",
        "to dip", "to increase gradually", "to reach a high", "plateau", "to rise steadily",
      ]),
    }),
    Exercise::DragDropTable(DragDropTask {
      title: "Match Adverbs to Trend Descriptions".into(),
      instructions: MATCH_INSTRUCTIONS.into(),
      rows: trend_rows(),
      labels: labels(&[
        "slightly", "gradually", "drastically", "considerably", "dramatically",
        "negligibly", "sharply", "steadily", "noticeably", "steeply",
      ]),
    }),
    Exercise::Explanation {
      title: "Listening Exercise".into(),
      body: String::new(),
      image: None,
      audio: Some("audios/audio1.mp4".into()),
      chart: None,
    },
    Exercise::InteractiveDraw(DrawTask {
      title: "Monthly Sales Pattern - Draw Your Line".into(),
      description: DRAW_INSTRUCTIONS.into(),
      x_axis_label: "Months".into(),
      y_axis_label: "House sales".into(),
      series: vec![
        pt("Jan", 50.0, false),
        pt("Feb", 200.0, false),
        pt("Mar", 200.0, false),
        pt("Apr", 75.0, false),
        pt("May", 180.0, false),
      ],
      max_value: Some(250.0),
    }),
    free_text(
      "Define whether it is a downward or upward trend in the following graph.",
      AnswerKey::from("downward"),
      Some("images/1.png"),
      "e.g., downward, upward, stable...",
    ),
    free_text(
      "Define whether it is a downward or upward trend in the following graph.",
      AnswerKey::from("upward"),
      Some("images/2.png"),
      "e.g., downward, upward, stable...",
    ),
    free_text(
      "Look at the following chart and fill in the gaps with the correct vocabulary. You should use no more than two words for each gap.\n\nRegarding the number of zebras inhabiting in Africa in 1990, it ….. 2 million, followed by ….. of 3 million in 1995 prior to ….. to approximately 500000 at the end of the period. Likewise, roughly 4 million of giraffes lived in Africa at the beginning after which the figure ….. and ….. of 200000 in 2015.",
      AnswerKey::Multiple(strings(&["stood at", "a peak", "decreasing dramatically", "fluctuated slightly", "hit a trough"])),
      Some("images/66.png"),
      "Enter the verb...",
    ),
    free_text(
      "Look at the following line graph and fill in the gaps with the correct vocabulary. You should use no more than two words for each gap.\n\nAs the sales of detective books began ….., the percentage of sci-fi books started ….. in the first two years of the period, ….. the sales of detective books. At the same time, the figure for children's books ….. to 30% till the end of the period. The year of 2013 saw a ….. in the proportion of sci-fi books.",
      AnswerKey::Multiple(strings(&["decline", "to increase", "overtaking", "rose", "peak"])),
      Some("images/3.png"),
      "Enter the verb...",
    ),
    Exercise::Explanation {
      title: "Rewrite the sentences".into(),
      body: "Look at the highlighted words and rewrite the sentences based on the sample. Alternative answers that are equivalent in meaning may also be accepted upon submission.".into(),
      image: None,
      audio: None,
      chart: None,
    },
    free_text(
      "The figure for margarine <b>peaked</b> at 120 grams in 1986.",
      AnswerKey::from("There was a peak of 120 grams in the figure for margarine in 1986."),
      None,
      "Enter your answer here...",
    ),
    free_text(
      "The Dutch saw <b>a plateau</b> in book sales throughout 5 years.",
      AnswerKey::from("Book sales in the Netherlands plateaued for 5 years."),
      None,
      "Enter your answer here...",
    ),
    choice(
      "The line graph below shows car production in three countries from January to December in 1990.",
      &[
        "a)\tThe line graph shows data on the number of cars which were produced in three countries in 1990.",
        "b)\tThe line graph delineates monthly output of cars in three countries from January to December in 1990.",
      ],
      "b)\tThe line graph delineates monthly output of cars in three countries from January to December in 1990.",
    ),
    choice(
      "….. dry in the sun, the leather is hung over the rope.",
      &["in order to", "so as", "to"],
      "in order to",
    ),
    Exercise::Chart(Chart::Pie {
      title: "Beverage preferences in Japan, 2012".into(),
      data: vec![
        PieSlice { label: "Cold".into(), value: 19.0, color: "#3b82f6".into(), bold: false },
        PieSlice { label: "Hot".into(), value: 53.0, color: "#ef4444".into(), bold: true },
        PieSlice { label: "Alcoholic".into(), value: 28.0, color: "#10b981".into(), bold: false },
      ],
      show_percentages: true,
    }),
  ];

  Activity {
    slug: "activity-1".into(),
    title: "Line Graph Activity".into(),
    time_limit: "45 minutes".into(),
    description: "Chart analysis, data interpretation, interactive drawing & drag-drop exercises".into(),
    difficulty: "Advanced".into(),
    exercises,
  }
}

fn audio(path: &str) -> Exercise {
  Exercise::Explanation { title: "Audio".into(), body: String::new(), image: None, audio: Some(path.into()), chart: None }
}

fn feedback_range(image: &str, answer: &str) -> Exercise {
  Exercise::Choice {
    question: "Listen to an assessor giving a student feedback on a practice IELTS Task 1 piece of writing. Identify and select the range (High Range, Mid-Range, Low Range) the feedback is related to for each criterion.".into(),
    choices: strings(&["High Range", "Mid-Range", "Low Range"]),
    answer: answer.into(),
    image_choices: false,
    image: Some(image.into()),
  }
}

/// Image rows paired with fraction drop zones. `cell-4` has no expected
/// answer: it accepts a label but is not graded.
fn fraction_rows() -> Vec<TableRow> {
  let expected = [
    "Three-quarters", "a half", "almost a third", "", "four-fifths",
    "nearly a half", "1/12", "1/12", "1/12", "1/12",
  ];
  let mut rows = vec![TableRow {
    header: true,
    cells: vec![
      TableCell::Static { value: "Pie Chart Slice".into(), image: false },
      TableCell::Static { value: "Fraction/Expression".into(), image: false },
    ],
  }];
  rows.extend(expected.iter().enumerate().map(|(i, exp)| TableRow {
    header: false,
    cells: vec![
      TableCell::Static { value: format!("images/item-{}.png", i + 1), image: true },
      TableCell::DropZone { id: format!("cell-{}", i + 1), expected: (*exp).into() },
    ],
  }));
  rows
}

const OVERVIEW_PLACEHOLDER: &str = "Write your overview here...";

/// The pie-chart vocabulary activity.
pub fn pie_chart_activity() -> Activity {
  let exercises = vec![
    Exercise::Explanation {
      title: "Pie chart Overview".into(),
      body: "Write an overview for the following chart in the box and then compare your answer with the sample answer provided.".into(),
      image: None,
      audio: None,
      chart: None,
    },
    free_text(
      "The pie chart below shows how much water was used for several reasons by Americans in February in 2012.",
      AnswerKey::from("Overall, water usage for toilet was the highest among all categories, while the least amount of water was consumed for other purposes"),
      Some("images/11.png"),
      OVERVIEW_PLACEHOLDER,
    ),
    free_text(
      "The two pie charts below show the sources of income and the proportion of expenditure of these incomes in Lima in 2012.",
      AnswerKey::from("Overall, the largest share of revenue came from individual income taxes, while the highest proportion of expenditure was allocated to the 'other' category."),
      Some("images/12.png"),
      OVERVIEW_PLACEHOLDER,
    ),
    free_text(
      "Look at the following pie charts and define the greatest changes.",
      AnswerKey::from("Social networking,Video"),
      Some("images/13.png"),
      "",
    ),
    free_text(
      "Look at the following pie charts and define the small changes.",
      AnswerKey::from("audio,reading,news,game"),
      Some("images/13.png"),
      "",
    ),
    Exercise::DragDropTable(DragDropTask {
      title: "Match Fractions to Pie Chart Slices".into(),
      instructions: "Drag and drop the right fractions or expressions in the box to match to the right pictures.".into(),
      rows: fraction_rows(),
      labels: labels(&[
        "Three-quarters", "a half", "three-fifths", "four-fifths", "almost a third",
        "a quarter", "seven in ten", "a significant proportion", "a minority", "nearly a half",
      ]),
    }),
    audio("audios/audio2.mp3"),
    feedback_range("images/58.png", "Mid-Range"),
    audio("audios/audio3.mp3"),
    feedback_range("images/59.png", "High Range"),
    audio("audios/audio4.mp3"),
    feedback_range("images/60.png", "Low Range"),
  ];

  Activity {
    slug: "activity-2".into(),
    title: "Pie chart activity".into(),
    time_limit: "45 minutes".into(),
    description: "Pie chart overviews, fractions and proportions, assessor feedback listening".into(),
    difficulty: "Intermediate".into(),
    exercises,
  }
}

/// Every built-in activity.
pub fn seed_activities() -> Vec<Activity> {
  vec![line_graph_activity(), pie_chart_activity()]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exercise_layout() {
    let a = line_graph_activity();
    let kinds: Vec<_> = a.exercises.iter().map(Exercise::kind_name).collect();
    assert_eq!(kinds.len(), 18);
    assert_eq!(kinds[4], "drag_drop_table");
    assert_eq!(kinds[5], "drag_drop_table");
    assert_eq!(kinds[7], "interactive_draw");
    assert_eq!(kinds[15], "choice");
    assert_eq!(kinds[17], "chart");
  }

  #[test]
  fn fraction_table_has_one_ungraded_zone() {
    let a = pie_chart_activity();
    let Exercise::DragDropTable(task) = &a.exercises[5] else { panic!("wrong kind") };
    let engine = crate::dragdrop::AssignmentEngine::from_task(task);
    assert_eq!(engine.zone_count(), 10);
    let ungraded: Vec<_> = engine.zones().iter().filter(|z| !z.is_graded()).map(|z| z.id.as_str()).collect();
    assert_eq!(ungraded, ["cell-4"]);
  }

  #[test]
  fn choice_answers_are_offered() {
    for ex in seed_activities().into_iter().flat_map(|a| a.exercises) {
      if let Exercise::Choice { choices, answer, .. } = ex {
        assert!(choices.contains(&answer), "{answer} not offered");
      }
    }
  }
}

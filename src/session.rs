//! Per-exercise interaction sessions.
//!
//! A session is built from one interactive exercise record and owns all of its
//! state. Commands that make no sense for the session kind are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{Exercise, LabelDef};
use crate::dragdrop::{self, AssignmentEngine, GradingResult, Progress};
use crate::drawing::{self, AxisTick, DrawPhase, DrawingBoard, PathPoint, PlotGeometry, ReferenceSeries};
use crate::matcher::AnswerKey;
use crate::question::QuestionCard;

/// Commands sent by the input layer.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Interaction {
    SetAnswer { index: usize, value: String },
    SelectChoice { choice: String },
    StartDrag { label_id: String },
    CancelDrag,
    DropOn { zone_id: String },
    RemoveFromZone { zone_id: String },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Submit,
    Reset,
    RevealAnswers,
    HideAnswers,
}

#[derive(Clone, Debug)]
pub enum ExerciseSession {
    Question(QuestionCard),
    DragDrop(AssignmentEngine),
    Drawing(DrawingBoard),
}

impl ExerciseSession {
    /// `None` for explanations and chart-only records.
    pub fn from_exercise(exercise: &Exercise, geometry: PlotGeometry) -> Option<Self> {
        match exercise {
            Exercise::FreeText { answer, .. } => {
                Some(Self::Question(QuestionCard::free_text(answer.clone())))
            }
            Exercise::Choice {
                choices, answer, ..
            } => Some(Self::Question(QuestionCard::choice(
                choices.clone(),
                answer.clone(),
            ))),
            Exercise::DragDropTable(task) => Some(Self::DragDrop(AssignmentEngine::from_task(task))),
            Exercise::InteractiveDraw(task) => Some(Self::Drawing(DrawingBoard::new(
                ReferenceSeries::from_task(task),
                geometry,
            ))),
            Exercise::Explanation { .. } | Exercise::Chart(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Question(_) => "question",
            Self::DragDrop(_) => "drag_drop",
            Self::Drawing(_) => "drawing",
        }
    }

    /// Apply one command. Returns whether it changed or was meaningful for this session.
    pub fn apply(&mut self, interaction: &Interaction) -> bool {
        use Interaction as I;
        match (self, interaction) {
            (Self::Question(q), I::SetAnswer { index, value }) => q.set_answer(*index, value),
            (Self::Question(q), I::SelectChoice { choice }) => q.select_choice(choice),
            (Self::Question(q), I::Submit) => q.submit().is_some(),
            (Self::Question(q), I::RevealAnswers) => {
                q.reveal_answer();
                true
            }
            (Self::Question(q), I::HideAnswers) => {
                q.hide_answer();
                true
            }

            (Self::DragDrop(e), I::StartDrag { label_id }) => e.start_drag(label_id),
            (Self::DragDrop(e), I::CancelDrag) => e.cancel_drag(),
            (Self::DragDrop(e), I::DropOn { zone_id }) => e.drop_on(zone_id),
            (Self::DragDrop(e), I::RemoveFromZone { zone_id }) => e.remove_from_zone(zone_id),
            (Self::DragDrop(e), I::Submit) => e.submit().is_some(),
            (Self::DragDrop(e), I::Reset) => {
                e.reset();
                true
            }
            (Self::DragDrop(e), I::RevealAnswers) => {
                e.reveal_answers();
                true
            }
            (Self::DragDrop(e), I::HideAnswers) => {
                e.hide_answers();
                true
            }

            (Self::Drawing(b), I::PointerDown { x, y }) => b.pointer_down(PathPoint::new(*x, *y)),
            (Self::Drawing(b), I::PointerMove { x, y }) => b.pointer_move(PathPoint::new(*x, *y)),
            (Self::Drawing(b), I::PointerUp) => b.pointer_up(),
            (Self::Drawing(b), I::Submit) => b.submit().is_some(),
            (Self::Drawing(b), I::Reset) => {
                b.reset();
                true
            }
            (Self::Drawing(b), I::RevealAnswers) => {
                b.reveal_reference();
                true
            }
            (Self::Drawing(b), I::HideAnswers) => {
                b.hide_reference();
                true
            }

            _ => false,
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            Self::Question(q) => question_view(q),
            Self::DragDrop(e) => drag_drop_view(e),
            Self::Drawing(b) => drawing_view(b),
        }
    }
}

/// Client-facing snapshot of a session.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionView {
    Question {
        answers: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        choices: Option<Vec<String>>,
        submitted: bool,
        can_submit: bool,
        /// Only known after submission.
        correct: Option<bool>,
        show_answer: bool,
        /// Only present while the answer is shown.
        expected: Option<AnswerKey>,
    },
    DragDrop {
        progress: Progress,
        available: Vec<LabelDef>,
        zones: Vec<ZoneView>,
        dragging: Option<String>,
        placed: usize,
        zone_count: usize,
        can_submit: bool,
        result: Option<GradingResult>,
        feedback: Option<String>,
        show_answers: bool,
    },
    Drawing {
        phase: DrawPhase,
        geometry: PlotGeometry,
        labels: Vec<String>,
        ticks: Vec<AxisTick>,
        path: Vec<PathPoint>,
        can_submit: bool,
        accuracy: Option<f64>,
        feedback: Option<String>,
        show_reference: bool,
        /// Reference polyline in pixels, only while the overlay is shown.
        reference: Option<Vec<PathPoint>>,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct ZoneView {
    pub zone_id: String,
    pub label: Option<LabelDef>,
    pub verdict: Option<bool>,
    pub expected: Option<String>,
}

fn question_view(q: &QuestionCard) -> SessionView {
    SessionView::Question {
        answers: q.answers().to_vec(),
        choices: q.choices().map(<[String]>::to_vec),
        submitted: q.is_submitted(),
        can_submit: q.can_submit(),
        correct: q.is_submitted().then(|| q.is_correct()),
        show_answer: q.answer_shown(),
        expected: q.answer_shown().then(|| q.key().clone()),
    }
}

fn drag_drop_view(e: &AssignmentEngine) -> SessionView {
    let zones = e
        .zones()
        .iter()
        .map(|z| ZoneView {
            zone_id: z.id.clone(),
            label: e.occupant(&z.id).cloned(),
            verdict: e.zone_verdict(&z.id),
            expected: (e.answers_shown() && z.is_graded()).then(|| z.expected.clone()),
        })
        .collect();

    SessionView::DragDrop {
        progress: e.progress(),
        available: e.available().into_iter().cloned().collect(),
        zones,
        dragging: e.dragging().map(str::to_string),
        placed: e.placed_count(),
        zone_count: e.zone_count(),
        can_submit: e.can_submit(),
        result: e.result().cloned(),
        feedback: e
            .result()
            .map(|r| dragdrop::feedback_message(r.accuracy_percent).to_string()),
        show_answers: e.answers_shown(),
    }
}

fn drawing_view(b: &DrawingBoard) -> SessionView {
    let geometry = *b.geometry();
    SessionView::Drawing {
        phase: b.phase(),
        geometry,
        labels: b.series().points.iter().map(|p| p.label.clone()).collect(),
        ticks: b.series().axis_ticks(&geometry),
        path: b.path().to_vec(),
        can_submit: b.can_submit(),
        accuracy: b.accuracy(),
        feedback: b
            .accuracy()
            .map(|a| drawing::feedback_message(a).to_string()),
        show_reference: b.reference_shown(),
        reference: b.reference_shown().then(|| b.series().pixels(&geometry)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, DrawTask};

    fn draw_exercise() -> Exercise {
        Exercise::InteractiveDraw(DrawTask {
            title: "Sales".into(),
            description: String::new(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            series: vec![
                DataPoint { label: "Jan".into(), value: 50.0, bold: false },
                DataPoint { label: "Feb".into(), value: 200.0, bold: false },
            ],
            max_value: Some(250.0),
        })
    }

    #[test]
    fn explanation_has_no_session() {
        let ex = Exercise::Explanation {
            title: "t".into(),
            body: String::new(),
            image: None,
            audio: None,
            chart: None,
        };
        assert!(ExerciseSession::from_exercise(&ex, PlotGeometry::default()).is_none());
    }

    #[test]
    fn mismatched_interaction_is_ignored() {
        let mut s = ExerciseSession::from_exercise(&draw_exercise(), PlotGeometry::default()).unwrap();
        assert!(!s.apply(&Interaction::StartDrag { label_id: "l1".into() }));
        assert!(!s.apply(&Interaction::SetAnswer { index: 0, value: "x".into() }));
        assert!(matches!(s.view(), SessionView::Drawing { phase: DrawPhase::Empty, .. }));
    }

    #[test]
    fn reference_only_visible_when_revealed() {
        let mut s = ExerciseSession::from_exercise(&draw_exercise(), PlotGeometry::default()).unwrap();
        let SessionView::Drawing { reference, .. } = s.view() else { panic!() };
        assert!(reference.is_none());
        s.apply(&Interaction::RevealAnswers);
        let SessionView::Drawing { reference, ticks, .. } = s.view() else { panic!() };
        assert_eq!(reference.map(|r| r.len()), Some(2));
        assert_eq!(ticks.last().map(|t| t.value), Some(250.0));
    }

    #[test]
    fn question_expected_hidden_until_revealed() {
        let ex = Exercise::FreeText {
            question: "Trend?".into(),
            answer: AnswerKey::from("upward"),
            placeholders: vec![],
            image: None,
            chart: None,
        };
        let mut s = ExerciseSession::from_exercise(&ex, PlotGeometry::default()).unwrap();
        let SessionView::Question { expected, correct, .. } = s.view() else { panic!() };
        assert!(expected.is_none());
        assert!(correct.is_none());

        s.apply(&Interaction::SetAnswer { index: 0, value: "Upward".into() });
        assert!(s.apply(&Interaction::Submit));
        let SessionView::Question { expected, correct, .. } = s.view() else { panic!() };
        assert_eq!(expected, Some(AnswerKey::from("upward")));
        assert_eq!(correct, Some(true));
    }

    #[test]
    fn interaction_wire_format() {
        let i: Interaction = serde_json::from_str(r#"{"action":"drop_on","zone_id":"cell-1"}"#).unwrap();
        assert!(matches!(i, Interaction::DropOn { ref zone_id } if zone_id == "cell-1"));
        let i: Interaction = serde_json::from_str(r#"{"action":"pointer_move","x":100,"y":120.5}"#).unwrap();
        assert!(matches!(i, Interaction::PointerMove { .. }));
    }
}

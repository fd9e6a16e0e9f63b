//! Drag-and-drop assignment engine for matching tables.
//!
//! The engine owns the label pool, the drop zones and the zone → label
//! assignment. It knows nothing about pointer events; the input layer calls
//! `start_drag`, `drop_on`, `remove_from_zone` and friends.
//!
//! Invalid interactions (dropping with no drag payload, mutating after
//! submission, unknown ids) are ignored and reported as `false`.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::domain::{DragDropTask, LabelDef, TableCell};
use crate::matcher::answers_match;

/// A slot in the table that accepts one label.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DropZone {
    pub id: String,
    /// Empty means "accepts drops, not graded".
    pub expected: String,
}

impl DropZone {
    pub fn is_graded(&self) -> bool {
        !self.expected.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    InProgress,
    Submitted,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GradingResult {
    pub correct_count: usize,
    pub total_zones: usize,
    pub accuracy_percent: f64,
}

impl GradingResult {
    pub fn all_correct(&self) -> bool {
        self.correct_count == self.total_zones
    }
}

#[derive(Clone, Debug)]
pub struct AssignmentEngine {
    labels: Vec<LabelDef>,
    zones: Vec<DropZone>,
    // zone id -> label id
    assignment: BTreeMap<String, String>,
    dragging: Option<String>,
    progress: Progress,
    result: Option<GradingResult>,
    show_answers: bool,
}

impl AssignmentEngine {
    /// Build from zone and label definitions. Duplicate ids keep the first occurrence.
    pub fn new(zones: Vec<DropZone>, labels: Vec<LabelDef>) -> Self {
        let mut seen = HashSet::new();
        let zones: Vec<DropZone> = zones
            .into_iter()
            .filter(|z| {
                let fresh = seen.insert(z.id.clone());
                if !fresh {
                    warn!(target: "exercise", zone = %z.id, "Duplicate drop zone id ignored");
                }
                fresh
            })
            .collect();

        let mut seen = HashSet::new();
        let labels: Vec<LabelDef> = labels
            .into_iter()
            .filter(|l| {
                let fresh = seen.insert(l.id.clone());
                if !fresh {
                    warn!(target: "exercise", label = %l.id, "Duplicate label id ignored");
                }
                fresh
            })
            .collect();

        Self {
            labels,
            zones,
            assignment: BTreeMap::new(),
            dragging: None,
            progress: Progress::InProgress,
            result: None,
            show_answers: false,
        }
    }

    /// Collect drop zones from the table rows in reading order.
    pub fn from_task(task: &DragDropTask) -> Self {
        let zones = task
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter_map(|cell| match cell {
                TableCell::DropZone { id, expected } => Some(DropZone {
                    id: id.clone(),
                    expected: expected.clone(),
                }),
                TableCell::Static { .. } => None,
            })
            .collect();
        Self::new(zones, task.labels.clone())
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn is_submitted(&self) -> bool {
        self.progress == Progress::Submitted
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn result(&self) -> Option<&GradingResult> {
        self.result.as_ref()
    }

    pub fn answers_shown(&self) -> bool {
        self.show_answers
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn labels(&self) -> &[LabelDef] {
        &self.labels
    }

    fn label(&self, id: &str) -> Option<&LabelDef> {
        self.labels.iter().find(|l| l.id == id)
    }

    fn zone(&self, id: &str) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Label currently placed in `zone_id`.
    pub fn occupant(&self, zone_id: &str) -> Option<&LabelDef> {
        self.assignment.get(zone_id).and_then(|id| self.label(id))
    }

    /// Zone currently holding `label_id`.
    pub fn zone_of(&self, label_id: &str) -> Option<&str> {
        self.assignment
            .iter()
            .find(|(_, l)| l.as_str() == label_id)
            .map(|(z, _)| z.as_str())
    }

    /// Labels not placed in any zone, in configuration order.
    pub fn available(&self) -> Vec<&LabelDef> {
        self.labels
            .iter()
            .filter(|l| self.zone_of(&l.id).is_none())
            .collect()
    }

    /// Labels placed in some zone, in configuration order.
    pub fn placed(&self) -> Vec<&LabelDef> {
        self.labels
            .iter()
            .filter(|l| self.zone_of(&l.id).is_some())
            .collect()
    }

    pub fn placed_count(&self) -> usize {
        self.assignment.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn start_drag(&mut self, label_id: &str) -> bool {
        if self.is_submitted() || self.label(label_id).is_none() {
            return false;
        }
        self.dragging = Some(label_id.to_string());
        true
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.dragging.take().is_some()
    }

    /// Place the dragged label in `zone_id`, moving it out of its previous zone
    /// and evicting the zone's current occupant back to the pool.
    pub fn drop_on(&mut self, zone_id: &str) -> bool {
        let Some(label_id) = self.dragging.take() else {
            return false;
        };
        if self.is_submitted() || self.zone(zone_id).is_none() {
            return false;
        }

        if let Some(prev) = self.zone_of(&label_id).map(str::to_string) {
            self.assignment.remove(&prev);
        }
        // Insert overwrites the previous occupant, which returns it to the pool.
        self.assignment.insert(zone_id.to_string(), label_id);
        true
    }

    pub fn remove_from_zone(&mut self, zone_id: &str) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.assignment.remove(zone_id).is_some()
    }

    /// Every graded zone holds a label.
    pub fn is_complete(&self) -> bool {
        self.zones
            .iter()
            .filter(|z| z.is_graded())
            .all(|z| self.assignment.contains_key(&z.id))
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && self.is_complete()
    }

    /// Verdict for one zone once submitted; `None` before submission or for ungraded zones.
    pub fn zone_verdict(&self, zone_id: &str) -> Option<bool> {
        if !self.is_submitted() {
            return None;
        }
        let zone = self.zone(zone_id).filter(|z| z.is_graded())?;
        Some(
            self.occupant(zone_id)
                .is_some_and(|l| answers_match(&l.text, &zone.expected)),
        )
    }

    fn grade(&self) -> GradingResult {
        let graded: Vec<&DropZone> = self.zones.iter().filter(|z| z.is_graded()).collect();
        let correct_count = graded
            .iter()
            .filter(|z| {
                self.occupant(&z.id)
                    .is_some_and(|l| answers_match(&l.text, &z.expected))
            })
            .count();
        let total_zones = graded.len();
        let accuracy_percent = if total_zones > 0 {
            correct_count as f64 / total_zones as f64 * 100.0
        } else {
            0.0
        };
        GradingResult {
            correct_count,
            total_zones,
            accuracy_percent,
        }
    }

    /// Grade and freeze. Refused while any graded zone is empty or after submission.
    pub fn submit(&mut self) -> Option<&GradingResult> {
        if !self.can_submit() {
            return None;
        }
        self.result = Some(self.grade());
        self.dragging = None;
        self.progress = Progress::Submitted;
        self.result.as_ref()
    }

    pub fn reset(&mut self) {
        self.assignment.clear();
        self.dragging = None;
        self.result = None;
        self.show_answers = false;
        self.progress = Progress::InProgress;
    }

    pub fn reveal_answers(&mut self) {
        self.show_answers = true;
    }

    pub fn hide_answers(&mut self) {
        self.show_answers = false;
    }
}

/// Feedback line for a matching score.
pub fn feedback_message(accuracy: f64) -> &'static str {
    if accuracy >= 100.0 {
        "Perfect! All answers are correct."
    } else if accuracy >= 80.0 {
        "Excellent work! Most answers are correct."
    } else if accuracy >= 60.0 {
        "Good job! Keep practicing to improve."
    } else {
        "Keep trying! Review the vocabulary and try again."
    }
}

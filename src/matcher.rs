//! Answer matching for typed and selected answers.
//!
//! Comparison is exact after normalization (lower-case + trim). There is no
//! fuzzy matching: content that says "equivalent answers may be accepted" is
//! graded by a human, not here.

use serde::{Deserialize, Serialize};

/// Normalize an answer for comparison: trim surrounding whitespace, lower-case.
pub fn normalize(s: &str) -> String {
  s.trim().to_lowercase()
}

/// True if a single candidate equals the expected value after normalization.
pub fn answers_match(candidate: &str, expected: &str) -> bool {
  normalize(candidate) == normalize(expected)
}

/// One accepted answer, or an ordered list of answers for multi-blank questions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerKey {
  Single(String),
  Multiple(Vec<String>),
}

impl AnswerKey {
  pub fn as_slice(&self) -> &[String] {
    match self {
      AnswerKey::Single(s) => std::slice::from_ref(s),
      AnswerKey::Multiple(v) => v,
    }
  }

  /// Number of input slots a learner has to fill.
  pub fn len(&self) -> usize {
    self.as_slice().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Positional match: equal length and every slot equal after normalization.
  pub fn accepts(&self, candidate: &AnswerKey) -> bool {
    accepts_all(candidate.as_slice(), self.as_slice())
  }
}

impl From<&str> for AnswerKey {
  fn from(s: &str) -> Self {
    AnswerKey::Single(s.to_string())
  }
}

impl From<Vec<String>> for AnswerKey {
  fn from(v: Vec<String>) -> Self {
    AnswerKey::Multiple(v)
  }
}

/// Ordered comparison of candidate slots against expected slots.
pub fn accepts_all(candidates: &[String], expected: &[String]) -> bool {
  candidates.len() == expected.len()
    && expected
      .iter()
      .enumerate()
      .all(|(i, exp)| candidates.get(i).is_some_and(|c| answers_match(c, exp)))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn multi(items: &[&str]) -> AnswerKey {
    AnswerKey::Multiple(items.iter().map(|s| s.to_string()).collect())
  }

  #[test]
  fn single_ignores_case_and_surrounding_space() {
    assert!(answers_match("Surge ", "surge"));
    assert!(answers_match("  DOWNWARD", "downward"));
    assert!(!answers_match("surges", "surge"));
  }

  #[test]
  fn inner_whitespace_is_significant() {
    assert!(!answers_match("stood  at", "stood at"));
  }

  #[test]
  fn multiple_is_positional() {
    assert!(multi(&["A", "b"]).accepts(&multi(&["a", "B"])));
    assert!(!multi(&["a", "b"]).accepts(&multi(&["b", "a"])));
  }

  #[test]
  fn length_mismatch_is_not_a_match() {
    assert!(!multi(&["a", "b"]).accepts(&multi(&["a"])));
    assert!(!multi(&["a"]).accepts(&multi(&["a", "b"])));
  }

  #[test]
  fn empty_candidate_only_matches_empty_expected() {
    assert!(!AnswerKey::from("surge").accepts(&AnswerKey::from("")));
    assert!(AnswerKey::from("").accepts(&AnswerKey::from("  ")));
  }

  #[test]
  fn single_and_one_element_list_are_equivalent() {
    assert!(AnswerKey::from("peak").accepts(&multi(&["Peak"])));
    assert!(multi(&["peak"]).accepts(&AnswerKey::from("PEAK ")));
  }

  #[test]
  fn deserializes_string_or_array() {
    let one: AnswerKey = serde_json::from_str("\"upward\"").unwrap();
    assert_eq!(one, AnswerKey::from("upward"));
    let many: AnswerKey = serde_json::from_str("[\"decline\", \"rose\"]").unwrap();
    assert_eq!(many.len(), 2);
  }
}

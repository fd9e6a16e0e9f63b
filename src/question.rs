//! Question card state: typed answers, multi-blank gap fills and single choice.

use crate::matcher::AnswerKey;

#[derive(Clone, Debug)]
pub struct QuestionCard {
  key: AnswerKey,
  choices: Option<Vec<String>>,
  answers: Vec<String>,
  submitted: bool,
  show_answer: bool,
}

impl QuestionCard {
  /// Free-text question with one input per expected value.
  /// An empty key gives a card with no slots that never accepts a submission.
  pub fn free_text(key: AnswerKey) -> Self {
    let slots = key.len();
    Self { key, choices: None, answers: vec![String::new(); slots], submitted: false, show_answer: false }
  }

  /// Single-choice question; the learner's selection fills the only slot.
  pub fn choice(choices: Vec<String>, answer: String) -> Self {
    Self {
      key: AnswerKey::Single(answer),
      choices: Some(choices),
      answers: vec![String::new()],
      submitted: false,
      show_answer: false,
    }
  }

  pub fn answers(&self) -> &[String] { &self.answers }
  pub fn key(&self) -> &AnswerKey { &self.key }
  pub fn choices(&self) -> Option<&[String]> { self.choices.as_deref() }
  pub fn is_submitted(&self) -> bool { self.submitted }
  pub fn answer_shown(&self) -> bool { self.show_answer }

  pub fn set_answer(&mut self, index: usize, value: &str) -> bool {
    if self.submitted || self.choices.is_some() {
      return false;
    }
    match self.answers.get_mut(index) {
      Some(slot) => { *slot = value.to_string(); true }
      None => false,
    }
  }

  pub fn select_choice(&mut self, choice: &str) -> bool {
    let offered = self.choices.as_ref().is_some_and(|c| c.iter().any(|x| x == choice));
    if self.submitted || !offered {
      return false;
    }
    self.answers[0] = choice.to_string();
    true
  }

  /// There is at least one slot and every slot has non-blank content.
  pub fn can_submit(&self) -> bool {
    !self.submitted && !self.answers.is_empty() && self.answers.iter().all(|a| !a.trim().is_empty())
  }

  /// Current verdict against the key.
  pub fn is_correct(&self) -> bool {
    self.key.accepts(&AnswerKey::Multiple(self.answers.clone()))
  }

  /// Freeze the answers and reveal the expected answer. Returns the verdict.
  pub fn submit(&mut self) -> Option<bool> {
    if !self.can_submit() {
      return None;
    }
    self.submitted = true;
    self.show_answer = true;
    Some(self.is_correct())
  }

  pub fn reveal_answer(&mut self) { self.show_answer = true; }
  pub fn hide_answer(&mut self) { self.show_answer = false; }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn one_slot_per_expected_value() {
    let card = QuestionCard::free_text(AnswerKey::Multiple(vec!["stood at".into(), "a peak".into()]));
    assert_eq!(card.answers().len(), 2);
  }

  #[test]
  fn empty_key_has_no_slots_and_cannot_submit() {
    let mut card = QuestionCard::free_text(AnswerKey::Multiple(vec![]));
    assert!(card.answers().is_empty());
    assert!(!card.set_answer(0, "anything"));
    assert!(!card.can_submit());
    assert_eq!(card.submit(), None);
  }

  #[test]
  fn submit_requires_every_slot() {
    let mut card = QuestionCard::free_text(AnswerKey::Multiple(vec!["decline".into(), "rose".into()]));
    card.set_answer(0, "Decline");
    assert!(!card.can_submit());
    assert_eq!(card.submit(), None);
    card.set_answer(1, "  ");
    assert_eq!(card.submit(), None);
    card.set_answer(1, "ROSE ");
    assert_eq!(card.submit(), Some(true));
    assert!(card.answer_shown());
  }

  #[test]
  fn answers_frozen_after_submit() {
    let mut card = QuestionCard::free_text(AnswerKey::from("upward"));
    card.set_answer(0, "downward");
    assert_eq!(card.submit(), Some(false));
    assert!(!card.set_answer(0, "upward"));
    assert_eq!(card.submit(), None);
    assert_eq!(card.answers()[0], "downward");
  }

  #[test]
  fn out_of_range_index_is_ignored() {
    let mut card = QuestionCard::free_text(AnswerKey::from("upward"));
    assert!(!card.set_answer(3, "x"));
  }

  #[test]
  fn choice_accepts_only_offered_options() {
    let mut card = QuestionCard::choice(vec!["in order to".into(), "so as".into()], "in order to".into());
    assert!(!card.select_choice("to"));
    assert!(!card.set_answer(0, "in order to"));
    assert!(card.select_choice("so as"));
    assert!(card.select_choice("in order to"));
    assert_eq!(card.submit(), Some(true));
  }

  #[test]
  fn reveal_does_not_submit() {
    let mut card = QuestionCard::free_text(AnswerKey::from("upward"));
    card.reveal_answer();
    card.reveal_answer();
    assert!(card.answer_shown());
    assert!(!card.is_submitted());
    card.hide_answer();
    assert!(!card.answer_shown());
  }
}

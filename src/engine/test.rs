use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::store::schema::TestResultRecord;

pub const NO_EXPLANATION: &str = "Solution not available for this question.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
        }
    }
}

/// One generated question. The model is asked for bilingual fields, but
/// older prompts produced unnamed `question`/`options`/`explanation`, so
/// every accessor walks the same fallback chain: selected language, then
/// English, then the legacy field, then (for explanations only) a fixed
/// placeholder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub question_en: Option<String>,
    #[serde(default)]
    pub question_hi: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options_en: Vec<String>,
    #[serde(default)]
    pub options_hi: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation_en: Option<String>,
    #[serde(default)]
    pub explanation_hi: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl Question {
    pub fn question_text(&self, lang: Language) -> &str {
        if lang == Language::Hi {
            if let Some(text) = present(&self.question_hi) {
                return text;
            }
        }
        present(&self.question_en)
            .or_else(|| present(&self.question))
            .unwrap_or("")
    }

    pub fn option_texts(&self, lang: Language) -> &[String] {
        if lang == Language::Hi && !self.options_hi.is_empty() {
            return &self.options_hi;
        }
        if !self.options_en.is_empty() {
            return &self.options_en;
        }
        &self.options
    }

    pub fn explanation_text(&self, lang: Language) -> &str {
        if lang == Language::Hi {
            if let Some(text) = present(&self.explanation_hi) {
                return text;
            }
        }
        present(&self.explanation_en)
            .or_else(|| present(&self.explanation))
            .unwrap_or(NO_EXPLANATION)
    }
}

/// A generated test, held only in memory until its result is recorded.
#[derive(Clone, Debug)]
pub struct ActiveTest {
    pub title: String,
    pub questions: Vec<Question>,
    pub duration_secs: u32,
}

/// Test administration: navigation, answers keyed by question position, a
/// countdown, breach tracking, and an idempotent submission gate. After
/// submission every mutating entry point is a no-op.
pub struct TestSession {
    pub test: ActiveTest,
    pub current: usize,
    responses: HashMap<usize, usize>,
    time_left: u32,
    pub language: Language,
    breaches: u32,
    submitted: bool,
    score: u32,
}

impl TestSession {
    pub fn new(test: ActiveTest) -> Self {
        let time_left = test.duration_secs;
        Self {
            test,
            current: 0,
            responses: HashMap::new(),
            time_left,
            language: Language::En,
            breaches: 0,
            submitted: false,
            score: 0,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn breaches(&self) -> u32 {
        self.breaches
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn response(&self, index: usize) -> Option<usize> {
        self.responses.get(&index).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.test.questions[self.current]
    }

    /// Answers stay revisable until submission.
    pub fn select_option(&mut self, option: usize) {
        if self.submitted {
            return;
        }
        if option < self.current_question().option_texts(self.language).len() {
            self.responses.insert(self.current, option);
        }
    }

    pub fn next_question(&mut self) {
        if self.current + 1 < self.test.questions.len() {
            self.current += 1;
        }
    }

    pub fn prev_question(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn goto(&mut self, index: usize) {
        if index < self.test.questions.len() {
            self.current = index;
        }
    }

    pub fn toggle_language(&mut self) {
        if !self.submitted {
            self.language = self.language.toggle();
        }
    }

    /// Advance one second. When the countdown expires the session
    /// auto-submits and the graded record comes back on that tick.
    pub fn tick(&mut self) -> Option<TestResultRecord> {
        if self.submitted {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return self.submit();
        }
        None
    }

    /// One detected backgrounding event. The countdown keeps running; the
    /// caller applies the score penalty. Returns false after submission.
    pub fn record_breach(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        self.breaches += 1;
        true
    }

    /// Grade and lock the session. Idempotent: repeated calls return None.
    pub fn submit(&mut self) -> Option<TestResultRecord> {
        if self.submitted {
            return None;
        }
        self.submitted = true;
        self.score = self
            .test
            .questions
            .iter()
            .enumerate()
            .filter(|(idx, q)| self.responses.get(idx) == Some(&q.correct_index))
            .count() as u32;
        Some(TestResultRecord {
            test_title: self.test.title.clone(),
            score: self.score,
            total: self.test.questions.len() as u32,
            breaches: self.breaches,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question {
            id: 1,
            question_en: Some("Pick the synonym of diligent".to_string()),
            question_hi: Some("diligent का पर्यायवाची चुनें".to_string()),
            question: None,
            options_en: vec![
                "Lazy".to_string(),
                "Careless".to_string(),
                "Industrious".to_string(),
                "Proud".to_string(),
            ],
            options_hi: Vec::new(),
            options: Vec::new(),
            correct_index: correct,
            explanation_en: None,
            explanation_hi: None,
            explanation: None,
        }
    }

    fn session(corrects: &[usize]) -> TestSession {
        TestSession::new(ActiveTest {
            title: "Mock".to_string(),
            questions: corrects.iter().map(|&c| question(c)).collect(),
            duration_secs: 600,
        })
    }

    #[test]
    fn test_scoring_counts_matching_responses() {
        let mut s = session(&[2, 1]);
        s.select_option(2);
        s.next_question();
        s.select_option(0);
        let result = s.submit().expect("first submit grades");
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_submit_is_idempotent() {
        let mut s = session(&[0]);
        assert!(s.submit().is_some());
        assert!(s.submit().is_none());
    }

    #[test]
    fn test_no_mutation_after_submit() {
        let mut s = session(&[2]);
        s.submit();
        s.select_option(2);
        assert_eq!(s.response(0), None);
        assert!(s.tick().is_none());
        assert!(!s.record_breach());
        assert_eq!(s.breaches(), 0);
    }

    #[test]
    fn test_countdown_expiry_auto_submits() {
        let mut s = session(&[0]);
        for _ in 0..599 {
            assert!(s.tick().is_none());
        }
        let record = s.tick().unwrap();
        assert!(s.is_submitted());
        assert_eq!(record.total, 1);
    }

    #[test]
    fn test_answers_revisable_until_submit() {
        let mut s = session(&[3]);
        s.select_option(0);
        s.select_option(3);
        assert_eq!(s.response(0), Some(3));
        let result = s.submit().unwrap();
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_breaches_recorded_while_countdown_runs() {
        let mut s = session(&[0]);
        assert!(s.record_breach());
        s.tick();
        assert_eq!(s.time_left(), 599);
        assert_eq!(s.breaches(), 1);
    }

    #[test]
    fn test_question_fallback_selected_language_first() {
        let q = question(0);
        assert_eq!(q.question_text(Language::Hi), "diligent का पर्यायवाची चुनें");
        assert_eq!(q.question_text(Language::En), "Pick the synonym of diligent");
    }

    #[test]
    fn test_question_fallback_to_english_then_legacy() {
        let mut q = question(0);
        q.question_hi = None;
        assert_eq!(q.question_text(Language::Hi), "Pick the synonym of diligent");
        q.question_en = None;
        q.question = Some("Legacy wording".to_string());
        assert_eq!(q.question_text(Language::Hi), "Legacy wording");
        assert_eq!(q.question_text(Language::En), "Legacy wording");
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut q = question(0);
        q.question_hi = Some("  ".to_string());
        assert_eq!(q.question_text(Language::Hi), "Pick the synonym of diligent");
    }

    #[test]
    fn test_options_fallback_chain() {
        let mut q = question(0);
        assert_eq!(q.option_texts(Language::Hi).len(), 4);
        assert_eq!(q.option_texts(Language::Hi)[2], "Industrious");
        q.options_hi = vec!["क".to_string(); 4];
        assert_eq!(q.option_texts(Language::Hi)[0], "क");
        q.options_en = Vec::new();
        q.options_hi = Vec::new();
        q.options = vec!["legacy".to_string(); 4];
        assert_eq!(q.option_texts(Language::En)[0], "legacy");
    }

    #[test]
    fn test_explanation_placeholder_as_last_resort() {
        let q = question(0);
        assert_eq!(q.explanation_text(Language::En), NO_EXPLANATION);
        assert_eq!(q.explanation_text(Language::Hi), NO_EXPLANATION);
    }

    #[test]
    fn test_question_deserializes_model_shape() {
        let q: Question = serde_json::from_str(
            r#"{
                "id": 1,
                "question_en": "2 + 2?",
                "question_hi": "2 + 2?",
                "options_en": ["3", "4", "5", "6"],
                "options_hi": ["३", "४", "५", "६"],
                "correctIndex": 1,
                "explanation_en": "Basic addition.",
                "explanation_hi": "साधारण जोड़।"
            }"#,
        )
        .unwrap();
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.option_texts(Language::Hi)[1], "४");
    }
}

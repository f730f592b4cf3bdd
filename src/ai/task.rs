use std::sync::mpsc::Sender;
use std::thread;

use crate::ai::client::{GenClient, GenError};
use crate::ai::extract::extract_json;
use crate::ai::prompts::{self, PromptPair, TestPayload};
use crate::engine::schedule::GeneratedBlock;
use crate::engine::test::{ActiveTest, Question};
use crate::engine::vocab::VocabEntry;
use crate::event::AppEvent;
use crate::store::schema::Material;

pub const INVALID_JSON_MSG: &str = "AI returned invalid JSON. Please try again.";

const MATERIAL_TEST_SECS: u32 = 10 * 60;

#[derive(Clone, Debug)]
pub enum GenRequest {
    Plan {
        weak_subjects: Vec<String>,
        today: String,
    },
    MaterialTest {
        material: Material,
    },
    Vocab,
    VocabTest {
        words: Vec<String>,
    },
    Analysis {
        discipline_score: i32,
        target_hours: u32,
        weak_subjects: Vec<String>,
    },
}

/// What a finished worker hands back to the event loop. Err values carry
/// user-facing text, already chosen for the failure kind.
#[derive(Clone, Debug)]
pub enum GenOutcome {
    Plan(Result<Vec<GeneratedBlock>, String>),
    Test(Result<ActiveTest, String>),
    Vocab(Result<Vec<VocabEntry>, String>),
    Analysis(String),
}

/// Run one generation on its own thread. The sequence number lets the app
/// drop outcomes from requests it has since abandoned.
pub fn spawn(seq: u64, client: GenClient, request: GenRequest, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let outcome = run(&client, request);
        let _ = tx.send(AppEvent::Gen(seq, outcome));
    });
}

fn run(client: &GenClient, request: GenRequest) -> GenOutcome {
    match request {
        GenRequest::Plan {
            weak_subjects,
            today,
        } => GenOutcome::Plan(run_plan(client, &weak_subjects, &today)),
        GenRequest::MaterialTest { material } => {
            GenOutcome::Test(run_material_test(client, &material))
        }
        GenRequest::Vocab => GenOutcome::Vocab(run_vocab(client)),
        GenRequest::VocabTest { words } => GenOutcome::Test(run_vocab_test(client, &words)),
        GenRequest::Analysis {
            discipline_score,
            target_hours,
            weak_subjects,
        } => {
            let pair = prompts::analysis_prompt(discipline_score, target_hours, &weak_subjects);
            match generate(client, &pair) {
                Ok(text) => GenOutcome::Analysis(text),
                Err(err) => GenOutcome::Analysis(err.fallback_text().to_string()),
            }
        }
    }
}

fn generate(client: &GenClient, pair: &PromptPair) -> Result<String, GenError> {
    client.generate(&pair.user, &pair.system)
}

fn run_plan(
    client: &GenClient,
    weak_subjects: &[String],
    today: &str,
) -> Result<Vec<GeneratedBlock>, String> {
    let pair = prompts::plan_prompt(weak_subjects, today);
    let raw = generate(client, &pair).map_err(|e| e.fallback_text().to_string())?;
    let blocks: Vec<GeneratedBlock> =
        extract_json(&raw).map_err(|_| INVALID_JSON_MSG.to_string())?;
    if prompts::validate_plan(&blocks) {
        Ok(blocks)
    } else {
        Err(INVALID_JSON_MSG.to_string())
    }
}

fn run_material_test(client: &GenClient, material: &Material) -> Result<ActiveTest, String> {
    let pair = prompts::material_test_prompt(material);
    let raw = generate(client, &pair).map_err(|e| e.fallback_text().to_string())?;
    let payload: TestPayload = extract_json(&raw).map_err(|_| INVALID_JSON_MSG.to_string())?;
    build_test(
        format!("Mock Test: {}", material.title),
        payload.questions,
        MATERIAL_TEST_SECS,
    )
}

fn run_vocab(client: &GenClient) -> Result<Vec<VocabEntry>, String> {
    let pair = prompts::vocab_prompt();
    let raw = generate(client, &pair).map_err(|e| e.fallback_text().to_string())?;
    let words: Vec<VocabEntry> = extract_json(&raw).map_err(|_| INVALID_JSON_MSG.to_string())?;
    if words.is_empty() {
        Err(INVALID_JSON_MSG.to_string())
    } else {
        Ok(words)
    }
}

fn run_vocab_test(client: &GenClient, words: &[String]) -> Result<ActiveTest, String> {
    let pair = prompts::vocab_test_prompt(words);
    let raw = generate(client, &pair).map_err(|e| e.fallback_text().to_string())?;
    let payload: TestPayload = extract_json(&raw).map_err(|_| INVALID_JSON_MSG.to_string())?;
    build_test(
        format!("Vocab Revision: {} Words", words.len()),
        payload.questions,
        vocab_test_secs(words.len()),
    )
}

fn build_test(
    title: String,
    questions: Vec<Question>,
    duration_secs: u32,
) -> Result<ActiveTest, String> {
    if prompts::validate_test(&questions) {
        Ok(ActiveTest {
            title,
            questions,
            duration_secs,
        })
    } else {
        Err(INVALID_JSON_MSG.to_string())
    }
}

/// One minute per word, floored at five minutes.
fn vocab_test_secs(word_count: usize) -> u32 {
    (word_count as u32 * 60).max(300)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        serde_json::from_str(
            r#"{
                "id": 1,
                "question_en": "Synonym of diligent?",
                "options_en": ["Lazy", "Hardworking", "Slow", "Rude"],
                "correctIndex": 1,
                "explanation_en": "Diligent means hardworking."
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_vocab_test_duration_floor() {
        assert_eq!(vocab_test_secs(2), 300);
        assert_eq!(vocab_test_secs(5), 300);
        assert_eq!(vocab_test_secs(6), 360);
        assert_eq!(vocab_test_secs(20), 1200);
    }

    #[test]
    fn test_build_test_accepts_valid_questions() {
        let test = build_test("Mock Test: Polity".to_string(), vec![sample_question()], 600)
            .unwrap();
        assert_eq!(test.title, "Mock Test: Polity");
        assert_eq!(test.duration_secs, 600);
    }

    #[test]
    fn test_build_test_rejects_bad_option_count() {
        let mut question = sample_question();
        question.options_en.pop();
        let result = build_test("Bad".to_string(), vec![question], 600);
        assert_eq!(result.unwrap_err(), INVALID_JSON_MSG);
    }

    #[test]
    fn test_build_test_rejects_empty() {
        assert!(build_test("Empty".to_string(), Vec::new(), 600).is_err());
    }
}

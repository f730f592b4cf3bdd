use studyr::engine::discipline::session_score_delta;
use studyr::engine::schedule::{BlockStatus, DailySchedule, GeneratedBlock};
use studyr::engine::test::{ActiveTest, Language, Question, TestSession};
use studyr::engine::timer::{SessionTimer, TaskDescriptor, TimerPhase};
use studyr::engine::vocab::{VocabEntry, merge_history};
use studyr::store::json_store::JsonStore;
use studyr::store::schema::{ScheduleData, VocabData};
use tempfile::TempDir;

fn plan() -> Vec<GeneratedBlock> {
    vec![
        GeneratedBlock {
            title: "Quant Geometry".to_string(),
            duration_min: 90,
            kind: "Deep Work".to_string(),
        },
        GeneratedBlock {
            title: "Reading & Practice Task".to_string(),
            duration_min: 60,
            kind: "Reading".to_string(),
        },
    ]
}

#[test]
fn test_plan_to_completed_block_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    let mut schedule = DailySchedule::from_generated("2026-08-30", plan());
    assert_eq!(schedule.target_minutes, 150);

    // First sitting covers two thirds of the geometry block.
    assert!(!schedule.apply_block_progress(0, 60));
    store.save_schedule(&ScheduleData::new(schedule.clone())).unwrap();

    // Resume from disk: remaining time picks up where the session left off.
    let mut reloaded = store.load_schedule("2026-08-30").unwrap().schedule;
    assert_eq!(reloaded.blocks[0].remaining_min(), 30);
    assert_eq!(reloaded.blocks[0].status, BlockStatus::Pending);

    // Second sitting finishes it.
    assert!(reloaded.apply_block_progress(0, 30));
    assert_eq!(reloaded.blocks[0].status, BlockStatus::Completed);
    assert_eq!(reloaded.total_minutes_done, 90);
    assert!(!reloaded.is_complete());
}

#[test]
fn test_session_outcome_scoring_paths() {
    // Clean completion earns the reward.
    let mut timer = SessionTimer::new(TaskDescriptor::custom("Essay", 1));
    timer.start();
    for _ in 0..60 {
        timer.tick();
    }
    assert_eq!(timer.phase(), TimerPhase::Completed);
    let outcome = timer.finish().unwrap();
    assert!(!outcome.early_abandon);
    assert_eq!(session_score_delta(&outcome), 1);

    // Quitting with more than a minute left is an abandonment.
    let mut timer = SessionTimer::new(TaskDescriptor::custom("Essay", 10));
    timer.start();
    for _ in 0..120 {
        timer.tick();
    }
    let outcome = timer.finish().unwrap();
    assert!(outcome.early_abandon);
    assert_eq!(session_score_delta(&outcome), -5);

    // A breach forfeits the clean reward without the abandonment penalty.
    let mut timer = SessionTimer::new(TaskDescriptor::custom("Essay", 1));
    timer.start();
    for _ in 0..30 {
        timer.tick();
    }
    timer.record_breach();
    timer.resume();
    for _ in 0..30 {
        timer.tick();
    }
    let outcome = timer.finish().unwrap();
    assert_eq!(outcome.breaches, 1);
    assert_eq!(session_score_delta(&outcome), 0);
}

fn entry(word: &str, hindi: &str) -> VocabEntry {
    VocabEntry {
        word: word.to_string(),
        hindi: hindi.to_string(),
        kind: "Adj".to_string(),
        meaning: format!("meaning of {word}"),
    }
}

#[test]
fn test_vocab_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    let first_batch = vec![entry("Diligent", "मेहनती"), entry("Obsolete", "अप्रचलित")];
    let merged = merge_history(&first_batch, &[]);
    store
        .save_vocab(&VocabData {
            words: merged,
            ..Default::default()
        })
        .unwrap();

    // Second launch fetches an overlapping batch; the fresh definition of the
    // duplicate word wins and no word appears twice.
    let history = store.load_vocab().words;
    let second_batch = vec![entry("Diligent", "परिश्रमी"), entry("Candid", "स्पष्टवादी")];
    let merged = merge_history(&second_batch, &history);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].hindi, "परिश्रमी");
    let diligent_count = merged
        .iter()
        .filter(|w| w.word.eq_ignore_ascii_case("diligent"))
        .count();
    assert_eq!(diligent_count, 1);
}

#[test]
fn test_bilingual_test_grading_and_fallback() {
    let question: Question = serde_json::from_str(
        r#"{
            "id": 1,
            "question_en": "Capital of India?",
            "options_en": ["Mumbai", "New Delhi", "Kolkata", "Chennai"],
            "correctIndex": 1
        }"#,
    )
    .unwrap();

    let mut session = TestSession::new(ActiveTest {
        title: "Mock Test: Polity Notes".to_string(),
        questions: vec![question],
        duration_secs: 600,
    });

    // Hindi text was never generated; every accessor falls back to English,
    // and the missing explanation gets the fixed placeholder.
    session.toggle_language();
    assert_eq!(session.language, Language::Hi);
    let q = session.current_question();
    assert_eq!(q.question_text(Language::Hi), "Capital of India?");
    assert_eq!(
        q.explanation_text(Language::Hi),
        "Solution not available for this question."
    );

    session.select_option(1);
    let record = session.submit().unwrap();
    assert_eq!(record.score, 1);
    assert_eq!(record.total, 1);
    assert_eq!(record.test_title, "Mock Test: Polity Notes");
}

use std::sync::mpsc::Sender;
use std::time::Instant;

use chrono::{Duration as ChronoDuration, Local, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::ai::client::GenClient;
use crate::ai::task::{self, GenOutcome, GenRequest};
use crate::config::Config;
use crate::diag::Diagnostics;
use crate::engine::discipline::{self, TimedActivity};
use crate::engine::schedule::DailySchedule;
use crate::engine::test::{Language, TestSession};
use crate::engine::timer::{SessionOutcome, SessionTimer, TaskDescriptor, TaskKind};
use crate::engine::vocab::{self, VocabEntry};
use crate::event::AppEvent;
use crate::quotes;
use crate::store::json_store::JsonStore;
use crate::store::schema::{
    Material, MaterialKind, ProfileData, ScheduleData, SessionRecord, TestResultRecord,
};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::video;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Focus,
    Test,
    Library,
    Vocab,
    Analysis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionFormKind {
    Custom,
    Video,
}

/// Input form for starting an ad-hoc or video session.
pub struct SessionForm {
    pub kind: SessionFormKind,
    pub title: LineInput,
    pub minutes: LineInput,
    pub url: LineInput,
    pub field: usize,
    pub error: Option<String>,
}

impl SessionForm {
    pub fn new(kind: SessionFormKind, default_minutes: u32) -> Self {
        Self {
            kind,
            title: LineInput::new(""),
            minutes: LineInput::new(&default_minutes.to_string()),
            url: LineInput::new(""),
            field: 0,
            error: None,
        }
    }

    pub fn field_count(&self) -> usize {
        match self.kind {
            SessionFormKind::Custom => 2,
            SessionFormKind::Video => 3,
        }
    }

    pub fn active_input(&mut self) -> &mut LineInput {
        match (self.kind, self.field) {
            (SessionFormKind::Video, 0) => &mut self.url,
            (_, 0) | (SessionFormKind::Video, 1) => &mut self.title,
            _ => &mut self.minutes,
        }
    }
}

/// Input form for adding library material.
pub struct MaterialForm {
    pub title: LineInput,
    pub content: LineInput,
    pub instruction: LineInput,
    pub field: usize,
}

impl MaterialForm {
    pub fn new() -> Self {
        Self {
            title: LineInput::new(""),
            content: LineInput::new(""),
            instruction: LineInput::new(""),
            field: 0,
        }
    }

    pub fn active_input(&mut self) -> &mut LineInput {
        match self.field {
            0 => &mut self.title,
            1 => &mut self.content,
            _ => &mut self.instruction,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub store: Option<JsonStore>,
    pub diag: Option<Diagnostics>,

    pub profile: ProfileData,
    pub schedule: Option<DailySchedule>,
    pub materials: Vec<Material>,
    pub sessions: Vec<SessionRecord>,
    pub test_results: Vec<TestResultRecord>,
    pub vocab_current: Vec<VocabEntry>,
    pub vocab_history: Vec<VocabEntry>,

    pub timer: Option<SessionTimer>,
    pub test: Option<TestSession>,
    pub analysis: Option<String>,

    pub status: Option<String>,
    pub generating: Option<String>,
    gen_seq: u64,
    pending_gen: Option<u64>,
    gen_tx: Option<Sender<AppEvent>>,

    pub session_form: Option<SessionForm>,
    pub material_form: Option<MaterialForm>,

    pub dashboard_selected: usize,
    pub library_selected: usize,
    pub vocab_selected: usize,
    pub analysis_tab: usize,
    pub analysis_selected: usize,
    pub confirm_delete: bool,

    pub verse_translated: bool,
    pub verse_lang: Language,
    pub motivation: &'static str,

    pub should_quit: bool,
    last_second: Instant,
}

impl App {
    pub fn new(data_dir: Option<std::path::PathBuf>) -> Self {
        let config = Config::load();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = match data_dir {
            Some(dir) => JsonStore::with_base_dir(dir).ok(),
            None => JsonStore::new().ok(),
        };
        let diag = store.as_ref().map(|s| Diagnostics::new(s.base_dir()));

        let today = Local::now().date_naive().to_string();
        let (profile, schedule, materials, sessions, test_results, vocab_history) =
            if let Some(ref s) = store {
                // load_profile returns None if file exists but can't parse
                match s.load_profile() {
                    Some(pd) if !pd.needs_reset() => (
                        pd,
                        s.load_schedule(&today).map(|d| d.schedule),
                        s.load_materials().materials,
                        s.load_sessions().sessions,
                        s.load_test_results().results,
                        s.load_vocab().words,
                    ),
                    _ => {
                        // Schema mismatch or parse failure: start over
                        (
                            ProfileData::default(),
                            None,
                            Vec::new(),
                            Vec::new(),
                            Vec::new(),
                            Vec::new(),
                        )
                    }
                }
            } else {
                (
                    ProfileData::default(),
                    None,
                    Vec::new(),
                    Vec::new(),
                    Vec::new(),
                    Vec::new(),
                )
            };

        let mut rng = SmallRng::from_entropy();
        let motivation = quotes::random_motivation(&mut rng);

        Self {
            screen: AppScreen::Dashboard,
            config,
            theme,
            store,
            diag,
            profile,
            schedule,
            materials,
            sessions,
            test_results,
            vocab_current: Vec::new(),
            vocab_history,
            timer: None,
            test: None,
            analysis: None,
            status: None,
            generating: None,
            gen_seq: 0,
            pending_gen: None,
            gen_tx: None,
            session_form: None,
            material_form: None,
            dashboard_selected: 0,
            library_selected: 0,
            vocab_selected: 0,
            analysis_tab: 0,
            analysis_selected: 0,
            confirm_delete: false,
            verse_translated: false,
            verse_lang: Language::En,
            motivation,
            should_quit: false,
            last_second: Instant::now(),
        }
    }

    pub fn set_gen_sender(&mut self, tx: Sender<AppEvent>) {
        self.gen_tx = Some(tx);
    }

    pub fn today(&self) -> String {
        Local::now().date_naive().to_string()
    }

    fn log_info(&self, msg: impl Into<String>) {
        if let Some(diag) = &self.diag {
            diag.info(msg);
        }
    }

    fn log_warn(&self, msg: impl Into<String>) {
        if let Some(diag) = &self.diag {
            diag.warn(msg);
        }
    }

    fn log_error(&self, msg: impl Into<String>) {
        if let Some(diag) = &self.diag {
            diag.error(msg);
        }
    }

    // Wall-clock seconds drive the countdowns; ticks arrive faster than that
    // so renders stay responsive.
    pub fn on_tick(&mut self) {
        if self.last_second.elapsed().as_secs() == 0 {
            return;
        }
        self.last_second = Instant::now();
        self.advance_second();
    }

    fn advance_second(&mut self) {
        let timer_outcome = match self.timer.as_mut() {
            Some(timer) => {
                if timer.tick() {
                    timer.finish()
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some(outcome) = timer_outcome {
            self.complete_session(outcome);
        }

        let test_record = self.test.as_mut().and_then(|t| t.tick());
        if let Some(record) = test_record {
            self.status = Some("Time's up. Test auto-submitted.".to_string());
            self.record_test_result(record);
        }
    }

    pub fn on_focus_lost(&mut self) {
        let focus_breach = match self.timer.as_mut() {
            Some(timer) if timer.is_running() => {
                timer.record_breach();
                true
            }
            _ => false,
        };
        if focus_breach {
            let penalty = discipline::breach_penalty(TimedActivity::FocusSession);
            self.profile.discipline_score -= penalty;
            self.save_profile();
            self.status = Some(format!(
                "Focus breach! -{penalty} discipline. Timer paused."
            ));
            self.log_warn("focus breach during session");
            return;
        }

        let test_breach = self.test.as_mut().is_some_and(|t| t.record_breach());
        if test_breach {
            let penalty = discipline::breach_penalty(TimedActivity::Test);
            self.profile.discipline_score -= penalty;
            self.save_profile();
            self.status = Some(format!("Proctor alert: window left! -{penalty} discipline."));
            self.log_warn("test breach recorded");
        }
    }

    pub fn on_focus_gained(&mut self) {
        if self.timer.as_ref().is_some_and(|t| !t.is_running())
            && self.screen == AppScreen::Focus
        {
            self.status = Some("Back. Press space to resume.".to_string());
        }
    }

    // ---- focus sessions ----

    pub fn start_scheduled_block(&mut self, index: usize) {
        let Some(schedule) = &self.schedule else {
            self.status = Some("No plan for today yet.".to_string());
            return;
        };
        let Some(block) = schedule.blocks.get(index) else {
            return;
        };
        if block.status == crate::engine::schedule::BlockStatus::Completed {
            self.status = Some("Block already completed.".to_string());
            return;
        }
        let task =
            TaskDescriptor::scheduled(&block.title, &block.kind, block.remaining_min(), index);
        self.timer = Some(SessionTimer::new(task));
        self.screen = AppScreen::Focus;
        self.status = Some("Press space to start the countdown.".to_string());
    }

    pub fn open_session_form(&mut self, kind: SessionFormKind) {
        self.session_form = Some(SessionForm::new(kind, self.config.custom_session_minutes));
    }

    pub fn submit_session_form(&mut self) {
        let Some(form) = self.session_form.as_mut() else {
            return;
        };
        let minutes: u32 = form.minutes.value().trim().parse().unwrap_or(0);
        if minutes == 0 {
            form.error = Some("Duration must be a positive number of minutes.".to_string());
            return;
        }
        let task = match form.kind {
            SessionFormKind::Custom => TaskDescriptor::custom(form.title.value(), minutes),
            SessionFormKind::Video => {
                let url = form.url.value().trim().to_string();
                let Some(id) = video::video_id(&url) else {
                    form.error = Some("Not a recognizable YouTube link.".to_string());
                    return;
                };
                TaskDescriptor::video(form.title.value(), minutes, id, url)
            }
        };
        self.session_form = None;
        self.timer = Some(SessionTimer::new(task));
        self.screen = AppScreen::Focus;
        self.status = Some("Press space to start the countdown.".to_string());
    }

    /// Manual end from the focus screen. Without a minute on the clock the
    /// session is discarded rather than recorded.
    pub fn finish_session_early(&mut self) {
        let Some(timer) = &self.timer else {
            return;
        };
        match timer.finish() {
            Some(outcome) => self.complete_session(outcome),
            None => {
                self.timer = None;
                self.screen = AppScreen::Dashboard;
                self.status = Some("Session discarded; nothing elapsed.".to_string());
            }
        }
    }

    fn complete_session(&mut self, outcome: SessionOutcome) {
        let delta = discipline::session_score_delta(&outcome);
        self.profile.discipline_score += delta;
        self.profile.total_hours_studied += f64::from(outcome.spent_minutes) / 60.0;
        self.update_streak();

        match &outcome.task.kind {
            TaskKind::Scheduled { block_index } => {
                let index = *block_index;
                if let Some(schedule) = self.schedule.as_mut() {
                    schedule.apply_block_progress(index, outcome.spent_minutes);
                }
                self.save_schedule();
            }
            _ => {
                if let Some(schedule) = self.schedule.as_mut() {
                    schedule.add_unscheduled_minutes(outcome.spent_minutes);
                }
                self.save_schedule();
            }
        }

        let (video_id, video_url) = match &outcome.task.kind {
            TaskKind::Video { video_id, video_url } => {
                (Some(video_id.clone()), Some(video_url.clone()))
            }
            _ => (None, None),
        };
        self.sessions.push(SessionRecord {
            task: outcome.task.title.clone(),
            duration_min: outcome.spent_minutes,
            breaches: outcome.breaches,
            timestamp: Utc::now(),
            kind: outcome.task.kind.label().to_string(),
            video_id,
            video_url,
        });

        self.save_profile();
        self.save_sessions();
        self.log_info(format!(
            "session complete: {} ({} min, {} breaches)",
            outcome.task.title, outcome.spent_minutes, outcome.breaches
        ));

        self.status = Some(if outcome.early_abandon {
            format!("Session abandoned early. {delta} discipline.")
        } else if outcome.breaches == 0 {
            format!("Clean session! +{delta} discipline.")
        } else {
            format!(
                "Session saved: {} min, {} breaches.",
                outcome.spent_minutes, outcome.breaches
            )
        });

        self.timer = None;
        self.screen = AppScreen::Dashboard;
    }

    fn update_streak(&mut self) {
        let today = Local::now().date_naive();
        let today_str = today.to_string();
        if self.profile.last_study_date.as_deref() == Some(today_str.as_str()) {
            return;
        }
        let yesterday = (today - ChronoDuration::days(1)).to_string();
        if self.profile.last_study_date.as_deref() == Some(yesterday.as_str()) {
            self.profile.streak_days += 1;
        } else {
            self.profile.streak_days = 1;
        }
        self.profile.best_streak = self.profile.best_streak.max(self.profile.streak_days);
        self.profile.last_study_date = Some(today_str);
    }

    // ---- tests ----

    pub fn submit_test(&mut self) {
        let record = self.test.as_mut().and_then(|t| t.submit());
        if let Some(record) = record {
            self.status = Some(format!("Scored {}/{}.", record.score, record.total));
            self.record_test_result(record);
        }
    }

    fn record_test_result(&mut self, record: TestResultRecord) {
        self.log_info(format!(
            "test submitted: {} {}/{}",
            record.test_title, record.score, record.total
        ));
        self.test_results.push(record);
        self.save_test_results();
    }

    /// Leave the test screen. An unsubmitted test is graded first so the
    /// attempt is never silently lost.
    pub fn close_test(&mut self) {
        let record = self.test.as_mut().and_then(|t| t.submit());
        if let Some(record) = record {
            self.status = Some(format!(
                "Test closed and graded: {}/{}.",
                record.score, record.total
            ));
            self.record_test_result(record);
        }
        self.test = None;
        self.screen = AppScreen::Dashboard;
    }

    // ---- library ----

    pub fn open_material_form(&mut self) {
        self.material_form = Some(MaterialForm::new());
    }

    pub fn submit_material_form(&mut self) {
        let Some(form) = &self.material_form else {
            return;
        };
        let title = form.title.value().trim().to_string();
        if title.is_empty() {
            self.status = Some("Material needs a title.".to_string());
            return;
        }
        let raw_content = form.content.value().trim().to_string();
        let instruction = form.instruction.value().trim().to_string();

        // Content field takes pasted text or a readable file path. Empty
        // content stores a name-only reference; tests for it prompt off the
        // title alone.
        let (content, kind) = if raw_content.is_empty() {
            (String::new(), MaterialKind::Pdf)
        } else {
            match std::fs::read_to_string(&raw_content) {
                Ok(file_text) => (file_text, MaterialKind::Text),
                Err(_) => (raw_content, MaterialKind::Text),
            }
        };

        self.materials.push(Material {
            title,
            content,
            kind,
            instruction,
            timestamp: Utc::now(),
        });
        self.material_form = None;
        self.save_materials();
        self.status = Some("Material added to library.".to_string());
    }

    pub fn delete_material(&mut self, index: usize) {
        if index < self.materials.len() {
            self.materials.remove(index);
            self.library_selected = self.library_selected.min(self.materials.len().saturating_sub(1));
            self.save_materials();
        }
    }

    // ---- history ----

    pub fn delete_session_record(&mut self, index: usize) {
        if index < self.sessions.len() {
            self.sessions.remove(index);
            self.analysis_selected = self
                .analysis_selected
                .min(self.sessions.len().saturating_sub(1));
            self.save_sessions();
        }
    }

    /// Re-open a recorded video session as a fresh revision session.
    pub fn rewatch_session(&mut self, index: usize) {
        let Some(record) = self.sessions.get(index) else {
            return;
        };
        let (Some(id), Some(url)) = (record.video_id.clone(), record.video_url.clone()) else {
            self.status = Some("That record has no video attached.".to_string());
            return;
        };
        let task = TaskDescriptor::video(&record.task, record.duration_min, id, url);
        self.timer = Some(SessionTimer::new(task));
        self.screen = AppScreen::Focus;
        self.status = Some("Press space to start the countdown.".to_string());
    }

    // ---- generation ----

    pub fn is_generating(&self) -> bool {
        self.generating.is_some()
    }

    fn dispatch(&mut self, label: &str, request: GenRequest) {
        if self.is_generating() {
            self.status = Some("Another generation is still running.".to_string());
            return;
        }
        let Some(tx) = self.gen_tx.clone() else {
            return;
        };
        match GenClient::new(self.config.resolve_api_key(), self.config.model.clone()) {
            Ok(client) => {
                self.gen_seq += 1;
                self.pending_gen = Some(self.gen_seq);
                self.generating = Some(label.to_string());
                self.log_info(format!("generation started: {label}"));
                task::spawn(self.gen_seq, client, request, tx);
            }
            Err(_) => {
                self.status =
                    Some("No API key. Set api_key in config.toml or GEMINI_API_KEY.".to_string());
            }
        }
    }

    /// Abandon the in-flight generation. The worker finishes on its own; its
    /// outcome arrives with a stale sequence number and gets dropped.
    pub fn cancel_generation(&mut self) {
        if self.pending_gen.take().is_some() {
            self.generating = None;
            self.status = Some("Generation cancelled.".to_string());
        }
    }

    pub fn request_plan(&mut self) {
        let request = GenRequest::Plan {
            weak_subjects: self.profile.weak_subjects.clone(),
            today: self.today(),
        };
        self.dispatch("Planning your day", request);
    }

    pub fn request_material_test(&mut self, index: usize) {
        let Some(material) = self.materials.get(index) else {
            return;
        };
        let request = GenRequest::MaterialTest {
            material: material.clone(),
        };
        self.dispatch("Setting your mock test", request);
    }

    pub fn request_vocab(&mut self) {
        self.dispatch("Fetching new words", GenRequest::Vocab);
    }

    pub fn request_vocab_test(&mut self) {
        if self.vocab_history.is_empty() {
            self.status = Some("No vocabulary history to revise yet.".to_string());
            return;
        }
        let words = self
            .vocab_history
            .iter()
            .map(|w| w.word.clone())
            .collect();
        self.dispatch("Building revision test", GenRequest::VocabTest { words });
    }

    pub fn request_analysis(&mut self) {
        let request = GenRequest::Analysis {
            discipline_score: self.profile.discipline_score,
            target_hours: self.config.target_minutes / 60,
            weak_subjects: self.profile.weak_subjects.clone(),
        };
        self.dispatch("The Sergeant is reviewing", request);
    }

    pub fn apply_gen(&mut self, seq: u64, outcome: GenOutcome) {
        if self.pending_gen != Some(seq) {
            // A cancelled or superseded request finished late.
            return;
        }
        self.pending_gen = None;
        self.generating = None;

        match outcome {
            GenOutcome::Plan(Ok(blocks)) => {
                let schedule = DailySchedule::from_generated(&self.today(), blocks);
                self.schedule = Some(schedule);
                self.dashboard_selected = 0;
                self.save_schedule();
                self.status = Some("Today's battle plan is ready.".to_string());
                self.log_info("plan generated");
            }
            GenOutcome::Plan(Err(msg)) => {
                self.log_error(format!("plan generation failed: {msg}"));
                self.status = Some(msg);
            }
            GenOutcome::Test(Ok(active)) => {
                self.log_info(format!("test generated: {}", active.title));
                self.test = Some(TestSession::new(active));
                self.screen = AppScreen::Test;
            }
            GenOutcome::Test(Err(msg)) => {
                self.log_error(format!("test generation failed: {msg}"));
                self.status = Some(msg);
            }
            GenOutcome::Vocab(Ok(words)) => {
                self.vocab_history = vocab::merge_history(&words, &self.vocab_history);
                self.vocab_current = words;
                self.vocab_selected = 0;
                self.save_vocab();
                self.status = Some(format!("{} new words loaded.", self.vocab_current.len()));
            }
            GenOutcome::Vocab(Err(msg)) => {
                self.log_error(format!("vocab generation failed: {msg}"));
                self.status = Some(msg);
            }
            GenOutcome::Analysis(text) => {
                self.analysis = Some(text);
                self.analysis_tab = 2;
                self.screen = AppScreen::Analysis;
            }
        }
    }

    // ---- persistence ----

    fn save_profile(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_profile(&self.profile) {
                self.log_error(format!("profile save failed: {e}"));
            }
        }
    }

    fn save_schedule(&self) {
        if let (Some(store), Some(schedule)) = (&self.store, &self.schedule) {
            if let Err(e) = store.save_schedule(&ScheduleData::new(schedule.clone())) {
                self.log_error(format!("schedule save failed: {e}"));
            }
        }
    }

    fn save_materials(&self) {
        if let Some(store) = &self.store {
            let data = crate::store::schema::MaterialsData {
                materials: self.materials.clone(),
                ..Default::default()
            };
            if let Err(e) = store.save_materials(&data) {
                self.log_error(format!("materials save failed: {e}"));
            }
        }
    }

    fn save_sessions(&self) {
        if let Some(store) = &self.store {
            let data = crate::store::schema::SessionsData {
                sessions: self.sessions.clone(),
                ..Default::default()
            };
            if let Err(e) = store.save_sessions(&data) {
                self.log_error(format!("sessions save failed: {e}"));
            }
        }
    }

    fn save_test_results(&self) {
        if let Some(store) = &self.store {
            let data = crate::store::schema::TestResultsData {
                results: self.test_results.clone(),
                ..Default::default()
            };
            if let Err(e) = store.save_test_results(&data) {
                self.log_error(format!("results save failed: {e}"));
            }
        }
    }

    fn save_vocab(&self) {
        if let Some(store) = &self.store {
            let data = crate::store::schema::VocabData {
                words: self.vocab_history.clone(),
                ..Default::default()
            };
            if let Err(e) = store.save_vocab(&data) {
                self.log_error(format!("vocab save failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test::{ActiveTest, Question};
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        App::new(Some(dir.path().to_path_buf()))
    }

    fn question() -> Question {
        serde_json::from_str(
            r#"{"question_en": "2 + 2?", "options_en": ["3", "4", "5", "6"], "correctIndex": 1}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_focus_lost_during_session_pauses_and_docks_two() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        let mut timer = SessionTimer::new(TaskDescriptor::custom("Algebra", 30));
        timer.start();
        app.timer = Some(timer);
        let before = app.profile.discipline_score;

        app.on_focus_lost();

        assert_eq!(app.profile.discipline_score, before - 2);
        let timer = app.timer.as_ref().unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.breaches(), 1);
    }

    #[test]
    fn test_focus_lost_during_test_docks_five_and_clock_runs_on() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.test = Some(TestSession::new(ActiveTest {
            title: "Mock Test: Algebra".to_string(),
            questions: vec![question()],
            duration_secs: 600,
        }));
        let before = app.profile.discipline_score;

        app.on_focus_lost();

        assert_eq!(app.profile.discipline_score, before - 5);
        let test = app.test.as_ref().unwrap();
        assert_eq!(test.breaches(), 1);
        assert!(!test.is_submitted());

        app.advance_second();
        assert_eq!(app.test.as_ref().unwrap().time_left(), 599);
    }

    #[test]
    fn test_focus_lost_with_nothing_running_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        let before = app.profile.discipline_score;

        app.on_focus_lost();

        assert_eq!(app.profile.discipline_score, before);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_matching_outcome_is_applied() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.pending_gen = Some(3);
        app.apply_gen(3, GenOutcome::Analysis("Drop and give me twenty.".to_string()));
        assert_eq!(app.analysis.as_deref(), Some("Drop and give me twenty."));
        assert_eq!(app.screen, AppScreen::Analysis);
        assert!(app.pending_gen.is_none());
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.pending_gen = Some(4);
        app.apply_gen(3, GenOutcome::Analysis("late".to_string()));
        assert!(app.analysis.is_none());
        assert_eq!(app.pending_gen, Some(4));
    }

    #[test]
    fn test_cancelled_outcome_is_dropped() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.pending_gen = Some(1);
        app.generating = Some("Planning".to_string());
        app.cancel_generation();
        assert!(app.generating.is_none());
        app.apply_gen(1, GenOutcome::Analysis("late".to_string()));
        assert!(app.analysis.is_none());
    }
}

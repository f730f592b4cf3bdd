use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::schedule::DailySchedule;
use crate::engine::vocab::VocabEntry;

const SCHEMA_VERSION: u32 = 1;

/// Identity-scoped aggregate stats. The discipline score is intentionally
/// unclamped in both directions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub name: String,
    pub discipline_score: i32,
    pub weak_subjects: Vec<String>,
    pub total_hours_studied: f64,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_study_date: Option<String>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            name: "Aspirant".to_string(),
            discipline_score: 85,
            weak_subjects: vec!["Quant Geometry".to_string(), "English Vocab".to_string()],
            total_hours_studied: 0.0,
            streak_days: 0,
            best_streak: 0,
            last_study_date: None,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleData {
    pub schema_version: u32,
    pub schedule: DailySchedule,
}

impl ScheduleData {
    pub fn new(schedule: DailySchedule) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            schedule,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Text,
    Pdf,
}

/// User-supplied study content, append-only. File-kind materials carry only
/// a name; test prompts for them work from the implied topic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Material {
    pub title: String,
    pub content: String,
    pub kind: MaterialKind,
    #[serde(default)]
    pub instruction: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialsData {
    pub schema_version: u32,
    pub materials: Vec<Material>,
}

impl Default for MaterialsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            materials: Vec::new(),
        }
    }
}

/// One completed focus period. Write-once; the user may delete records from
/// the analysis screen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub task: String,
    pub duration_min: u32,
    pub breaches: u32,
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionsData {
    pub schema_version: u32,
    pub sessions: Vec<SessionRecord>,
}

impl Default for SessionsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sessions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResultRecord {
    pub test_title: String,
    pub score: u32,
    pub total: u32,
    pub breaches: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResultsData {
    pub schema_version: u32,
    pub results: Vec<TestResultRecord>,
}

impl Default for TestResultsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            results: Vec::new(),
        }
    }
}

/// Vocabulary history lives in its own file and is never synced anywhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabData {
    pub schema_version: u32,
    pub words: Vec<VocabEntry>,
}

impl Default for VocabData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            words: Vec::new(),
        }
    }
}

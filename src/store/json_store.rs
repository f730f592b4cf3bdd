use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{
    MaterialsData, ProfileData, ScheduleData, SessionsData, TestResultsData, VocabData,
};

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load and deserialize the profile. Returns None if the file exists but
    /// cannot be parsed (schema mismatch / corruption).
    pub fn load_profile(&self) -> Option<ProfileData> {
        let path = self.file_path("profile.json");
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            serde_json::from_str(&content).ok()
        } else {
            // No file yet: a fresh default, not a schema mismatch
            Some(ProfileData::default())
        }
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save("profile.json", data)
    }

    /// Schedules are keyed one file per calendar day.
    pub fn load_schedule(&self, date: &str) -> Option<ScheduleData> {
        let path = self.file_path(&format!("schedule_{date}.json"));
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save_schedule(&self, data: &ScheduleData) -> Result<()> {
        self.save(&format!("schedule_{}.json", data.schedule.date), data)
    }

    pub fn load_materials(&self) -> MaterialsData {
        self.load("materials.json")
    }

    pub fn save_materials(&self, data: &MaterialsData) -> Result<()> {
        self.save("materials.json", data)
    }

    pub fn load_sessions(&self) -> SessionsData {
        self.load("sessions.json")
    }

    pub fn save_sessions(&self, data: &SessionsData) -> Result<()> {
        self.save("sessions.json", data)
    }

    pub fn load_test_results(&self) -> TestResultsData {
        self.load("test_results.json")
    }

    pub fn save_test_results(&self, data: &TestResultsData) -> Result<()> {
        self.save("test_results.json", data)
    }

    pub fn load_vocab(&self) -> VocabData {
        self.load("vocab_history.json")
    }

    pub fn save_vocab(&self, data: &VocabData) -> Result<()> {
        self.save("vocab_history.json", data)
    }
}

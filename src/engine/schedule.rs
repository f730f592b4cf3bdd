use serde::{Deserialize, Serialize};

/// Floor for resuming a partially-done block: even a nearly-finished block
/// gets at least this many minutes on the clock.
pub const MIN_BLOCK_RESUME_MIN: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    Pending,
    Completed,
}

/// One block as the planner model emits it; status and progress are attached
/// locally when the plan is accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedBlock {
    pub title: String,
    pub duration_min: u32,
    #[serde(rename = "type", default = "default_block_kind")]
    pub kind: String,
}

fn default_block_kind() -> String {
    "Deep Work".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudyBlock {
    pub title: String,
    pub duration_min: u32,
    #[serde(rename = "type", default = "default_block_kind")]
    pub kind: String,
    pub status: BlockStatus,
    #[serde(default)]
    pub completed_min: u32,
}

impl StudyBlock {
    /// Remaining focus time when this block is picked up again.
    pub fn remaining_min(&self) -> u32 {
        self.duration_min
            .saturating_sub(self.completed_min)
            .max(MIN_BLOCK_RESUME_MIN)
    }

    /// Displayed progress, clamped: overshooting the target never shows
    /// more than 100%.
    pub fn progress(&self) -> f64 {
        if self.duration_min == 0 {
            return 1.0;
        }
        (self.completed_min as f64 / self.duration_min as f64).min(1.0)
    }
}

/// One day's plan. One record per date key; blocks are ordered as the
/// planner emitted them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailySchedule {
    pub date: String,
    pub blocks: Vec<StudyBlock>,
    #[serde(default)]
    pub total_minutes_done: u32,
    pub target_minutes: u32,
}

impl DailySchedule {
    pub fn from_generated(date: &str, blocks: Vec<GeneratedBlock>) -> Self {
        let target_minutes = blocks.iter().map(|b| b.duration_min).sum();
        Self {
            date: date.to_string(),
            blocks: blocks
                .into_iter()
                .map(|b| StudyBlock {
                    title: b.title,
                    duration_min: b.duration_min,
                    kind: b.kind,
                    status: BlockStatus::Pending,
                    completed_min: 0,
                })
                .collect(),
            total_minutes_done: 0,
            target_minutes,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.blocks.is_empty()
            && self
                .blocks
                .iter()
                .all(|b| b.status == BlockStatus::Completed)
    }

    /// Accumulate session minutes into one block, keyed by index. Touches
    /// only that block plus the day total, so two sessions finishing against
    /// different blocks never clobber each other's progress. Returns true
    /// when the block crossed into completed on this update.
    pub fn apply_block_progress(&mut self, index: usize, minutes: u32) -> bool {
        self.total_minutes_done += minutes;
        let Some(block) = self.blocks.get_mut(index) else {
            return false;
        };
        let was_pending = block.status == BlockStatus::Pending;
        block.completed_min += minutes;
        if block.completed_min >= block.duration_min {
            block.status = BlockStatus::Completed;
        }
        was_pending && block.status == BlockStatus::Completed
    }

    /// Ad-hoc sessions still count toward the day total.
    pub fn add_unscheduled_minutes(&mut self, minutes: u32) {
        self.total_minutes_done += minutes;
    }

    pub fn day_progress(&self, target_minutes: u32) -> f64 {
        if target_minutes == 0 {
            return 0.0;
        }
        (self.total_minutes_done as f64 / target_minutes as f64).min(1.0)
    }

    pub fn next_pending(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.status == BlockStatus::Pending)
    }
}

use crate::engine::schedule::MIN_BLOCK_RESUME_MIN;

/// What a focus session is bound to. Scheduled sessions feed progress back
/// into the day's plan; custom and video sessions only produce a history
/// record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Scheduled { block_index: usize },
    Custom,
    Video { video_id: String, video_url: String },
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Scheduled { .. } => "scheduled",
            TaskKind::Custom => "custom",
            TaskKind::Video { .. } => "video",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaskDescriptor {
    pub title: String,
    pub category: String,
    pub duration_min: u32,
    pub kind: TaskKind,
}

impl TaskDescriptor {
    pub fn custom(title: &str, duration_min: u32) -> Self {
        Self {
            title: if title.trim().is_empty() {
                "Self Study Session".to_string()
            } else {
                title.trim().to_string()
            },
            category: "Custom".to_string(),
            duration_min: duration_min.max(1),
            kind: TaskKind::Custom,
        }
    }

    pub fn video(title: &str, duration_min: u32, video_id: String, video_url: String) -> Self {
        Self {
            title: if title.trim().is_empty() {
                "Video Revision".to_string()
            } else {
                title.trim().to_string()
            },
            category: "Revision".to_string(),
            duration_min: duration_min.max(1),
            kind: TaskKind::Video { video_id, video_url },
        }
    }

    pub fn scheduled(title: &str, category: &str, remaining_min: u32, block_index: usize) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            duration_min: remaining_min.max(MIN_BLOCK_RESUME_MIN),
            kind: TaskKind::Scheduled { block_index },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Emitted by [`SessionTimer::finish`]. Carries everything the caller needs
/// to apply side effects (score, hours, block progress, history record); the
/// timer itself never touches persistence or the UI.
#[derive(Clone, Debug)]
pub struct SessionOutcome {
    pub task: TaskDescriptor,
    pub spent_minutes: u32,
    pub time_left: u32,
    pub breaches: u32,
    pub early_abandon: bool,
}

/// Countdown state machine for one focus session.
///
/// idle -> running -> (paused <-> running) -> completed. A breach while
/// running pauses the countdown. `initial_duration` is captured at
/// construction so elapsed time stays accurate even if the target is
/// retargeted before start.
pub struct SessionTimer {
    task: TaskDescriptor,
    phase: TimerPhase,
    time_left: u32,
    initial_duration: u32,
    breaches: u32,
}

impl SessionTimer {
    pub fn new(task: TaskDescriptor) -> Self {
        let secs = task.duration_min * 60;
        Self {
            task,
            phase: TimerPhase::Idle,
            time_left: secs,
            initial_duration: secs,
            breaches: 0,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn task(&self) -> &TaskDescriptor {
        &self.task
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn initial_duration(&self) -> u32 {
        self.initial_duration
    }

    pub fn breaches(&self) -> u32 {
        self.breaches
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Replace the target duration before the session starts. Covers the
    /// original's late-arriving media duration: a video session may learn its
    /// real length only after the link resolves.
    pub fn retarget(&mut self, duration_min: u32) {
        if self.phase == TimerPhase::Idle {
            let secs = duration_min.max(1) * 60;
            self.task.duration_min = duration_min.max(1);
            self.time_left = secs;
            self.initial_duration = secs;
        }
    }

    pub fn start(&mut self) {
        if self.phase == TimerPhase::Idle {
            self.phase = TimerPhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == TimerPhase::Paused {
            self.phase = TimerPhase::Running;
        }
    }

    pub fn toggle(&mut self) {
        match self.phase {
            TimerPhase::Idle => self.start(),
            TimerPhase::Running => self.pause(),
            TimerPhase::Paused => self.resume(),
            TimerPhase::Completed => {}
        }
    }

    /// One detected loss of foreground focus. Counts the breach and pauses
    /// the countdown; the score penalty is the caller's concern.
    pub fn record_breach(&mut self) {
        self.breaches += 1;
        self.pause();
    }

    /// Advance one second. Returns true on the tick that completes the
    /// session.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.phase = TimerPhase::Completed;
            return true;
        }
        false
    }

    pub fn has_elapsed(&self) -> bool {
        self.time_left < self.initial_duration
    }

    /// Close the session and report what happened. Legal once any time has
    /// elapsed (manual finish-and-save) or on natural completion; None means
    /// there is nothing to record yet.
    pub fn finish(&self) -> Option<SessionOutcome> {
        if !self.has_elapsed() && self.phase != TimerPhase::Completed {
            return None;
        }
        let spent_seconds = self.initial_duration - self.time_left;
        Some(SessionOutcome {
            task: self.task.clone(),
            spent_minutes: (spent_seconds / 60).max(1),
            time_left: self.time_left,
            breaches: self.breaches,
            early_abandon: self.time_left > 60,
        })
    }
}

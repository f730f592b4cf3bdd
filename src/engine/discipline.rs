use crate::engine::timer::SessionOutcome;

/// Score deltas for the discipline meter. The score is deliberately
/// unclamped: sustained distraction can push it negative, sustained
/// adherence can push it past 100.
pub const FOCUS_BREACH_PENALTY: i32 = 2;
pub const TEST_BREACH_PENALTY: i32 = 5;
pub const EARLY_ABANDON_PENALTY: i32 = 5;
pub const CLEAN_SESSION_REWARD: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedActivity {
    FocusSession,
    Test,
}

/// Penalty applied on each detected backgrounding event during a timed
/// activity. Tests bleed more per breach but keep their countdown running;
/// focus sessions pause instead.
pub fn breach_penalty(activity: TimedActivity) -> i32 {
    match activity {
        TimedActivity::FocusSession => FOCUS_BREACH_PENALTY,
        TimedActivity::Test => TEST_BREACH_PENALTY,
    }
}

/// Score adjustment applied once when a focus session closes. Abandoning
/// with more than a minute on the clock always costs points, even if the
/// session was otherwise breach-free; a clean full session earns a small
/// reward.
pub fn session_score_delta(outcome: &SessionOutcome) -> i32 {
    if outcome.early_abandon {
        -EARLY_ABANDON_PENALTY
    } else if outcome.breaches == 0 {
        CLEAN_SESSION_REWARD
    } else {
        0
    }
}

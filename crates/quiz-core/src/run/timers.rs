use contracts::{EventType, RunPhase};
use serde_json::json;

use super::QuizRun;
use crate::schedule::TransitionKind;

impl QuizRun {
    /// Apply every due delayed transition. Entries scheduled under an older
    /// generation (before a retry) are dropped without touching state.
    /// Returns the number of transitions that changed state.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let mut applied = 0;
        while let Some(transition) = self.transitions.pop_due(now_ms) {
            if transition.generation != self.generation {
                continue;
            }
            match transition.kind {
                TransitionKind::RevealElapsed => {
                    if self.outcome.is_none() && self.phase == RunPhase::Revealing {
                        self.phase = RunPhase::ReadyToAdvance;
                        let stage_id = self.current_stage().id.clone();
                        self.push_event(now_ms, EventType::AdvanceUnlocked, Some(stage_id), None);
                        applied += 1;
                    }
                }
                TransitionKind::AutoFinish => {
                    // The completion computation runs at most once per run;
                    // an explicit advance/finish that already fired consumed it.
                    if self.outcome.is_none()
                        && self.is_last_stage()
                        && self.selected_option_id.is_some()
                    {
                        self.push_event(
                            now_ms,
                            EventType::TimerExpired,
                            None,
                            Some(json!({ "kind": "auto_finish" })),
                        );
                        self.complete_run(now_ms);
                        applied += 1;
                    }
                }
            }
        }
        applied
    }

    /// Earliest pending fire time, if any transition is scheduled.
    pub fn next_transition_at(&self) -> Option<u64> {
        self.transitions.peek_next_fire_ms()
    }
}

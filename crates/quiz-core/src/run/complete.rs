use contracts::{EventType, RunOutcome, RunPhase, SCHEMA_VERSION_V1};
use serde_json::json;

use super::QuizRun;
use crate::rewards;

impl QuizRun {
    /// Compute the run outcome: final score, pass/fail, and the policy coin
    /// award that overwrites the cosmetic running total. Idempotent; both the
    /// automatic timer and the explicit finish control funnel through here
    /// and only the first invocation has any effect.
    pub(super) fn complete_run(&mut self, now_ms: u64) {
        if self.outcome.is_some() {
            return;
        }

        let final_score = self
            .attempt_history
            .iter()
            .filter(|attempt| attempt.is_correct)
            .count();
        let total_stages = self.stage_set.len();
        let passed = final_score == total_stages;
        let coins_awarded = rewards::completion_coins(&self.plan, final_score, total_stages);
        let xp_awarded = if passed { self.plan.xp } else { 0 };

        self.coins = coins_awarded;
        self.phase = RunPhase::Finished;
        self.outcome = Some(RunOutcome {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            final_score,
            total_stages,
            passed,
            coins_awarded,
            xp_awarded,
        });

        self.push_event(
            now_ms,
            EventType::RunCompleted,
            None,
            Some(json!({
                "final_score": final_score,
                "total_stages": total_stages,
                "passed": passed,
                "coins_awarded": coins_awarded,
                "xp_awarded": xp_awarded,
            })),
        );

        if passed && !self.completion_submitted {
            self.completion_submitted = true;
            self.push_event(
                now_ms,
                EventType::CompletionSubmitted,
                None,
                Some(json!({ "game_id": self.info.game_id })),
            );
        }
    }
}

use contracts::{AttemptRecord, EventType, FeedbackSignal, RunPhase, AUTO_FINISH_DELAY_MS, REVEAL_DELAY_MS};
use serde_json::json;

use super::QuizRun;
use crate::schedule::TransitionKind;

impl QuizRun {
    /// Record an answer for the current stage and enter the reveal phase.
    ///
    /// Ignored (returns false, state unchanged) if the stage already has a
    /// selection, the run is finished, or the option id is unknown.
    pub fn select_option(&mut self, option_id: &str, now_ms: u64) -> bool {
        if self.outcome.is_some() || self.selected_option_id.is_some() {
            return false;
        }

        let stage = self.current_stage();
        let stage_id = stage.id.clone();
        let stage_reward = stage.reward;
        let Some(option) = stage.option(option_id) else {
            return false;
        };
        let is_correct = option.is_correct;
        let option_id = option.id.clone();

        // Feedback resets once the selection is known to be valid.
        self.last_feedback = None;

        self.attempt_history.push(AttemptRecord {
            stage_id: stage_id.clone(),
            is_correct,
        });
        self.selected_option_id = Some(option_id.clone());
        self.phase = RunPhase::Revealing;

        if is_correct {
            // Cosmetic running total; completion overwrites it. A stage may
            // carry its own coin value, otherwise the flat increment applies.
            self.coins += stage_reward.unwrap_or(self.plan.coins_per_correct);
        }

        let feedback = if is_correct {
            FeedbackSignal::correct()
        } else {
            FeedbackSignal::incorrect()
        };
        self.last_feedback = Some(feedback);

        self.push_event(
            now_ms,
            EventType::OptionSelected,
            Some(stage_id.clone()),
            Some(json!({ "option_id": option_id, "is_correct": is_correct })),
        );
        self.push_event(
            now_ms,
            EventType::FeedbackEmitted,
            Some(stage_id.clone()),
            Some(json!({
                "magnitude": feedback.magnitude,
                "is_positive": feedback.is_positive,
            })),
        );
        self.push_event(now_ms, EventType::AnswerRevealed, Some(stage_id), None);

        self.schedule_transition(now_ms + REVEAL_DELAY_MS, TransitionKind::RevealElapsed);
        if self.is_last_stage() {
            self.schedule_transition(now_ms + AUTO_FINISH_DELAY_MS, TransitionKind::AutoFinish);
        }

        true
    }

    /// Advance to the next stage, or complete the run from the last stage.
    ///
    /// Ignored unless the reveal delay has elapsed (`ReadyToAdvance`).
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.outcome.is_some() || self.phase != RunPhase::ReadyToAdvance {
            return false;
        }

        if self.current_stage_index + 1 < self.stage_set.len() {
            self.current_stage_index += 1;
            self.selected_option_id = None;
            self.phase = RunPhase::Presenting;
            let stage_id = self.current_stage().id.clone();
            self.push_event(
                now_ms,
                EventType::StageAdvanced,
                Some(stage_id),
                Some(json!({ "stage_index": self.current_stage_index })),
            );
        } else {
            self.complete_run(now_ms);
        }

        true
    }

    /// Explicit finish control on the last stage. Same completion computation
    /// as the automatic timer path; `complete_run` guards double-invocation.
    pub fn finish(&mut self, now_ms: u64) -> bool {
        if self.outcome.is_some() || self.phase != RunPhase::ReadyToAdvance || !self.is_last_stage()
        {
            return false;
        }
        self.complete_run(now_ms);
        true
    }

    /// Discard all run state and start over. Only available from a finished,
    /// non-passed run.
    pub fn retry(&mut self, now_ms: u64) -> bool {
        let retry_available = self.phase == RunPhase::Finished
            && self.outcome.as_ref().is_some_and(|outcome| !outcome.passed);
        if !retry_available {
            return false;
        }

        // Outstanding timers for the abandoned run become no-ops.
        self.generation += 1;

        self.current_stage_index = 0;
        self.coins = 0;
        self.selected_option_id = None;
        self.attempt_history.clear();
        self.outcome = None;
        self.completion_submitted = false;
        self.last_feedback = None;
        self.phase = RunPhase::Presenting;

        self.push_event(
            now_ms,
            EventType::RunRetried,
            None,
            Some(json!({ "generation": self.generation })),
        );

        true
    }
}

use contracts::view::{ShellOption, ShellView};
use contracts::{RunPhase, SCHEMA_VERSION_V1};

use super::QuizRun;

impl QuizRun {
    /// Build the prop shape the GameShell renders from.
    pub fn shell_view(&self) -> ShellView {
        let stage = self.current_stage();
        let revealed = self.selected_option_id.is_some();
        let options = stage
            .options
            .iter()
            .map(|option| {
                let is_selected = self.selected_option_id.as_deref() == Some(option.id.as_str());
                ShellOption {
                    id: option.id.clone(),
                    label: option.label.clone(),
                    is_selected,
                    // Correctness becomes visible for every option once the
                    // stage is answered; reflection only for the chosen one.
                    is_correct: revealed.then_some(option.is_correct),
                    reflection: (revealed && is_selected).then(|| option.reflection.clone()),
                }
            })
            .collect();

        let score = self
            .attempt_history
            .iter()
            .filter(|attempt| attempt.is_correct)
            .count();
        let retry_available = self.phase == RunPhase::Finished
            && self.outcome.as_ref().is_some_and(|outcome| !outcome.passed);

        ShellView {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: self.config.run_id.clone(),
            game_id: self.info.game_id.clone(),
            game_type: self.info.game_type.clone(),
            title: self.info.title.clone(),
            subtitle: self.info.subtitle.clone(),
            phase: self.phase,
            current_stage_index: self.clamped_stage_index(),
            total_stages: self.stage_set.len(),
            prompt: stage.prompt.clone(),
            options,
            score,
            coins: self.coins,
            total_coins: self.plan.total_coins,
            total_xp: self.plan.xp,
            coins_per_correct: self.plan.coins_per_correct,
            can_advance: self.phase == RunPhase::ReadyToAdvance,
            is_game_over: self.phase == RunPhase::Finished,
            show_confetti: self.completion_submitted,
            completion_submitted: self.completion_submitted,
            retry_available,
            feedback: self.last_feedback,
            outcome: self.outcome.clone(),
        }
    }
}

use contracts::{
    ApiError, Command, CommandPayload, CommandResult, ErrorCode, EventType, RunPhase,
};
use serde_json::json;

use super::QuizRun;

impl QuizRun {
    /// Validate and apply one command, answering with an accepted/rejected
    /// result. Rejections leave state untouched; the guards mirror the
    /// silent no-ops of the transition methods but name the reason, since
    /// the kernel backs remote shells that cannot be trusted to hide
    /// unavailable controls.
    pub fn apply_command(&mut self, command: &Command, now_ms: u64) -> CommandResult {
        let result = match &command.payload {
            CommandPayload::SelectOption { option_id } => self.check_select(command, option_id),
            CommandPayload::Advance => self.check_advance(command),
            CommandPayload::Finish => self.check_finish(command),
            CommandPayload::Retry => self.check_retry(command),
        };
        if let Err(rejection) = result {
            return rejection;
        }

        let applied = match &command.payload {
            CommandPayload::SelectOption { option_id } => self.select_option(option_id, now_ms),
            CommandPayload::Advance => self.advance(now_ms),
            CommandPayload::Finish => self.finish(now_ms),
            CommandPayload::Retry => self.retry(now_ms),
        };
        debug_assert!(applied, "pre-checked command must apply");

        self.push_event(
            now_ms,
            EventType::CommandApplied,
            None,
            Some(json!({ "command_type": command.command_type })),
        );
        CommandResult::accepted(command)
    }

    fn check_select(&self, command: &Command, option_id: &str) -> Result<(), CommandResult> {
        if self.outcome.is_some() {
            return Err(reject(
                command,
                ErrorCode::RunStateConflict,
                "run is already finished",
                None,
            ));
        }
        if self.selected_option_id.is_some() {
            return Err(reject(
                command,
                ErrorCode::RunStateConflict,
                "current stage already has a selected option",
                self.selected_option_id
                    .as_ref()
                    .map(|selected| format!("selected_option_id={selected}")),
            ));
        }
        if self.current_stage().option(option_id).is_none() {
            return Err(reject(
                command,
                ErrorCode::OptionNotFound,
                "option id does not exist on the current stage",
                Some(format!(
                    "stage_id={} option_id={option_id}",
                    self.current_stage().id
                )),
            ));
        }
        Ok(())
    }

    fn check_advance(&self, command: &Command) -> Result<(), CommandResult> {
        if self.phase != RunPhase::ReadyToAdvance || self.outcome.is_some() {
            return Err(reject(
                command,
                ErrorCode::RunStateConflict,
                "advance is not available",
                Some(format!("phase={:?}", self.phase)),
            ));
        }
        Ok(())
    }

    fn check_finish(&self, command: &Command) -> Result<(), CommandResult> {
        if self.phase != RunPhase::ReadyToAdvance || !self.is_last_stage() || self.outcome.is_some()
        {
            return Err(reject(
                command,
                ErrorCode::RunStateConflict,
                "finish is only available from the last stage after reveal",
                Some(format!(
                    "phase={:?} stage_index={}",
                    self.phase, self.current_stage_index
                )),
            ));
        }
        Ok(())
    }

    fn check_retry(&self, command: &Command) -> Result<(), CommandResult> {
        let retry_available = self.phase == RunPhase::Finished
            && self.outcome.as_ref().is_some_and(|outcome| !outcome.passed);
        if !retry_available {
            return Err(reject(
                command,
                ErrorCode::RunStateConflict,
                "retry is only available after a non-passing run",
                Some(format!("phase={:?}", self.phase)),
            ));
        }
        Ok(())
    }
}

fn reject(
    command: &Command,
    error_code: ErrorCode,
    message: &str,
    details: Option<String>,
) -> CommandResult {
    CommandResult::rejected(command, ApiError::new(error_code, message, details))
}

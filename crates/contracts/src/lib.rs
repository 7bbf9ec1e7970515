//! v1 cross-boundary contracts for the quiz kernel, API, and shell frontend.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod view;

pub const SCHEMA_VERSION_V1: &str = "1.0";

/// Delay between selecting an option and the advance control unlocking.
pub const REVEAL_DELAY_MS: u64 = 1_500;
/// Delay between answering the final stage and the automatic completion path.
pub const AUTO_FINISH_DELAY_MS: u64 = 2_500;

// ---------------------------------------------------------------------------
// Stage content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageOption {
    pub id: String,
    pub label: String,
    pub reflection: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub id: String,
    pub prompt: String,
    pub options: Vec<StageOption>,
    /// Per-stage coin value; `None` means the set uses a flat per-correct value.
    #[serde(default)]
    pub reward: Option<i64>,
}

impl Stage {
    pub fn option(&self, option_id: &str) -> Option<&StageOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn correct_option(&self) -> Option<&StageOption> {
        self.options.iter().find(|option| option.is_correct)
    }
}

/// Ordered, immutable sequence of stages; fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSet {
    pub set_id: String,
    pub stages: Vec<Stage>,
}

impl StageSet {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// Full pot on a perfect run, nothing otherwise.
    #[default]
    ThresholdBinary,
    /// Full pot on a perfect run, `floor(total * score / n)` otherwise.
    Proportional,
}

/// Resolved reward configuration for one run, computed once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardPlan {
    pub policy: RewardPolicy,
    pub total_coins: i64,
    pub xp: i64,
    /// Cosmetic running increment shown during play; overwritten at completion.
    pub coins_per_correct: i64,
}

/// Caller-supplied fallback reward values (the navigation-state path in the
/// original shell). Lower precedence than a catalog lookup, higher than the
/// literal defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardOverride {
    pub coins: Option<i64>,
    pub xp: Option<i64>,
}

/// Catalog row for one game: shell metadata plus reward totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameInfo {
    pub game_id: String,
    pub game_type: String,
    pub title: String,
    pub subtitle: String,
    pub coins: i64,
    pub xp: i64,
}

// ---------------------------------------------------------------------------
// Run configuration and status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    pub schema_version: String,
    pub run_id: String,
    pub game_id: String,
    #[serde(default)]
    pub reward_override: Option<RewardOverride>,
    pub notes: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: "run_local_001".to_string(),
            game_id: "budget-builder".to_string(),
            reward_override: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Current stage shown, no option chosen yet.
    Presenting,
    /// An option is chosen and its reflection is shown; advance is locked.
    Revealing,
    /// The reveal delay elapsed; the advance control is available.
    ReadyToAdvance,
    /// Terminal: the stage set is exhausted and the outcome is computed.
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunStatus {
    pub schema_version: String,
    pub run_id: String,
    pub game_id: String,
    pub phase: RunPhase,
    pub current_stage_index: usize,
    pub total_stages: usize,
    pub coins: i64,
    pub can_advance: bool,
    pub pending_transitions: usize,
}

impl RunStatus {
    pub fn is_finished(&self) -> bool {
        self.phase == RunPhase::Finished
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={} game_id={} phase={:?} stage={}/{} coins={} pending_transitions={}",
            self.run_id,
            self.game_id,
            self.phase,
            self.current_stage_index + 1,
            self.total_stages,
            self.coins,
            self.pending_transitions
        )
    }
}

/// One answered stage; append-only within a run, cleared on retry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttemptRecord {
    pub stage_id: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOutcome {
    pub schema_version: String,
    pub final_score: usize,
    pub total_stages: usize,
    pub passed: bool,
    pub coins_awarded: i64,
    pub xp_awarded: i64,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score={}/{} passed={} coins={} xp={}",
            self.final_score, self.total_stages, self.passed, self.coins_awarded, self.xp_awarded
        )
    }
}

/// Transient signal sent to the feedback collaborator after each selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSignal {
    pub magnitude: i64,
    pub is_positive: bool,
}

impl FeedbackSignal {
    pub fn correct() -> Self {
        Self {
            magnitude: 1,
            is_positive: true,
        }
    }

    pub fn incorrect() -> Self {
        Self {
            magnitude: 0,
            is_positive: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    SelectOption,
    Advance,
    Finish,
    Retry,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandPayload {
    SelectOption { option_id: String },
    Advance,
    Finish,
    Retry,
}

impl CommandPayload {
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::SelectOption { .. } => CommandType::SelectOption,
            Self::Advance => CommandType::Advance,
            Self::Finish => CommandType::Finish,
            Self::Retry => CommandType::Retry,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Command {
    pub schema_version: String,
    pub command_id: String,
    pub run_id: String,
    pub issued_at_ms: u64,
    pub command_type: CommandType,
    pub payload: CommandPayload,
}

impl Command {
    pub fn new(
        command_id: impl Into<String>,
        run_id: impl Into<String>,
        issued_at_ms: u64,
        payload: CommandPayload,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            command_id: command_id.into(),
            run_id: run_id.into(),
            issued_at_ms,
            command_type: payload.command_type(),
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RunNotFound,
    GameNotFound,
    InvalidCommand,
    OptionNotFound,
    InvalidQuery,
    RunStateConflict,
    InternalError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub schema_version: String,
    pub error_code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error_code: ErrorCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            error_code,
            message: message.into(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResult {
    pub schema_version: String,
    pub command_id: String,
    pub run_id: String,
    pub accepted: bool,
    pub error: Option<ApiError>,
}

impl CommandResult {
    pub fn accepted(command: &Command) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            command_id: command.command_id.clone(),
            run_id: command.run_id.clone(),
            accepted: true,
            error: None,
        }
    }

    pub fn rejected(command: &Command, error: ApiError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            command_id: command.command_id.clone(),
            run_id: command.run_id.clone(),
            accepted: false,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    RunStarted,
    OptionSelected,
    AnswerRevealed,
    FeedbackEmitted,
    AdvanceUnlocked,
    StageAdvanced,
    TimerExpired,
    RunCompleted,
    CompletionSubmitted,
    RunRetried,
    CommandApplied,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub schema_version: String,
    pub run_id: String,
    pub at_ms: u64,
    pub event_id: String,
    pub sequence: u64,
    pub event_type: EventType,
    pub stage_id: Option<String>,
    pub details: Option<Value>,
}

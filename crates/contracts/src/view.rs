//! Shell view: the full prop shape the GameShell frontend renders from.

use serde::{Deserialize, Serialize};

use crate::{FeedbackSignal, RunOutcome, RunPhase};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShellOption {
    pub id: String,
    pub label: String,
    pub is_selected: bool,
    /// Populated only once an answer is revealed for the stage.
    pub is_correct: Option<bool>,
    /// Reflection text, exposed only for the selected option after reveal.
    pub reflection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellView {
    pub schema_version: String,
    pub run_id: String,
    pub game_id: String,
    pub game_type: String,
    pub title: String,
    pub subtitle: String,
    pub phase: RunPhase,
    pub current_stage_index: usize,
    pub total_stages: usize,
    pub prompt: String,
    pub options: Vec<ShellOption>,
    /// Count of correct answers so far in this run.
    pub score: usize,
    pub coins: i64,
    pub total_coins: i64,
    pub total_xp: i64,
    pub coins_per_correct: i64,
    pub can_advance: bool,
    pub is_game_over: bool,
    pub show_confetti: bool,
    pub completion_submitted: bool,
    pub retry_available: bool,
    pub feedback: Option<FeedbackSignal>,
    pub outcome: Option<RunOutcome>,
}

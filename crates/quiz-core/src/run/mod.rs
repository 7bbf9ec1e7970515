mod commands;
mod complete;
mod events;
mod timers;
mod transitions;
mod view;

use contracts::{
    AttemptRecord, Event, EventType, FeedbackSignal, GameInfo, RewardPlan, RunConfig, RunOutcome,
    RunPhase, RunStatus, Stage, StageSet, SCHEMA_VERSION_V1,
};
use serde_json::json;

use crate::schedule::{DelayedTransition, TransitionKind, TransitionQueue};
use crate::stage_set::{validate_stage_set, ValidationError};

/// One playthrough of a stage set.
///
/// `QuizRun` exclusively owns its mutable run state; the stage set is fixed at
/// construction. All mutating operations take an explicit `now_ms` so the
/// kernel never reads a wall clock; callers (API layer, CLI, tests) decide
/// what time it is.
#[derive(Debug)]
pub struct QuizRun {
    config: RunConfig,
    info: GameInfo,
    stage_set: StageSet,
    plan: RewardPlan,
    phase: RunPhase,
    current_stage_index: usize,
    coins: i64,
    selected_option_id: Option<String>,
    attempt_history: Vec<AttemptRecord>,
    outcome: Option<RunOutcome>,
    completion_submitted: bool,
    /// Bumped on retry; scheduled transitions from older generations are
    /// skipped when they fire.
    generation: u32,
    transitions: TransitionQueue,
    event_log: Vec<Event>,
    next_event_sequence: u64,
    last_feedback: Option<FeedbackSignal>,
}

impl QuizRun {
    pub fn new(
        config: RunConfig,
        info: GameInfo,
        stage_set: StageSet,
        plan: RewardPlan,
    ) -> Result<Self, ValidationError> {
        validate_stage_set(&stage_set)?;

        let mut run = Self {
            config,
            info,
            stage_set,
            plan,
            phase: RunPhase::Presenting,
            current_stage_index: 0,
            coins: 0,
            selected_option_id: None,
            attempt_history: Vec::new(),
            outcome: None,
            completion_submitted: false,
            generation: 0,
            transitions: TransitionQueue::new(),
            event_log: Vec::new(),
            next_event_sequence: 0,
            last_feedback: None,
        };
        run.push_event(
            0,
            EventType::RunStarted,
            None,
            Some(json!({
                "game_id": run.info.game_id,
                "total_stages": run.stage_set.len(),
            })),
        );
        Ok(run)
    }

    pub fn run_id(&self) -> &str {
        &self.config.run_id
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn stage_set(&self) -> &StageSet {
        &self.stage_set
    }

    pub fn plan(&self) -> &RewardPlan {
        &self.plan
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn coins(&self) -> i64 {
        self.coins
    }

    pub fn selected_option_id(&self) -> Option<&str> {
        self.selected_option_id.as_deref()
    }

    pub fn attempt_history(&self) -> &[AttemptRecord] {
        &self.attempt_history
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn completion_submitted(&self) -> bool {
        self.completion_submitted
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn events(&self) -> &[Event] {
        &self.event_log
    }

    pub fn last_feedback(&self) -> Option<FeedbackSignal> {
        self.last_feedback
    }

    pub fn status(&self) -> RunStatus {
        RunStatus {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: self.config.run_id.clone(),
            game_id: self.info.game_id.clone(),
            phase: self.phase,
            current_stage_index: self.clamped_stage_index(),
            total_stages: self.stage_set.len(),
            coins: self.coins,
            can_advance: self.phase == RunPhase::ReadyToAdvance,
            pending_transitions: self.transitions.pending_for(self.generation),
        }
    }

    fn is_last_stage(&self) -> bool {
        self.current_stage_index + 1 >= self.stage_set.len()
    }

    /// Rendering index, clamped defensively even if state briefly disagrees.
    fn clamped_stage_index(&self) -> usize {
        self.current_stage_index.min(self.stage_set.len() - 1)
    }

    fn current_stage(&self) -> &Stage {
        &self.stage_set.stages[self.clamped_stage_index()]
    }

    fn schedule_transition(&mut self, fire_at_ms: u64, kind: TransitionKind) {
        self.transitions.schedule(DelayedTransition {
            fire_at_ms,
            generation: self.generation,
            kind,
        });
    }
}

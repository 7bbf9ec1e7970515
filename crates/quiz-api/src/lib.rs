//! In-process API facade wrapping a single quiz run behind a pluggable clock.

mod server;

use std::fmt;
use std::time::Instant;

use contracts::view::ShellView;
use contracts::{
    Command, CommandPayload, CommandResult, Event, GameInfo, RunConfig, RunOutcome, RunStatus,
};
use quiz_core::catalog::{self, GameDefinition};
use quiz_core::rewards;
use quiz_core::run::QuizRun;
use quiz_core::stage_set::ValidationError;

pub use server::{serve, ServerError};

/// Time source for a run. The kernel only ever sees explicit millisecond
/// timestamps; this decides where they come from.
///
/// `Wall` measures elapsed milliseconds since the run was created, which is
/// what the HTTP server uses. `Manual` is a clock the caller advances by
/// hand, for tests and scripted simulations.
#[derive(Debug, Clone)]
pub enum EngineClock {
    Wall { started_at: Instant },
    Manual { now_ms: u64 },
}

impl EngineClock {
    pub fn wall() -> Self {
        Self::Wall {
            started_at: Instant::now(),
        }
    }

    pub fn manual() -> Self {
        Self::Manual { now_ms: 0 }
    }

    pub fn now_ms(&self) -> u64 {
        match self {
            Self::Wall { started_at } => started_at.elapsed().as_millis() as u64,
            Self::Manual { now_ms } => *now_ms,
        }
    }
}

#[derive(Debug)]
pub enum CreateRunError {
    GameNotFound(String),
    InvalidStageSet(ValidationError),
}

impl fmt::Display for CreateRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameNotFound(game_id) => write!(f, "game not found: {game_id}"),
            Self::InvalidStageSet(err) => write!(f, "invalid stage set: {err}"),
        }
    }
}

impl std::error::Error for CreateRunError {}

impl From<ValidationError> for CreateRunError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidStageSet(value)
    }
}

#[derive(Debug)]
pub struct EngineApi {
    engine: QuizRun,
    command_audit: Vec<CommandResult>,
    clock: EngineClock,
    next_command_sequence: u64,
}

impl EngineApi {
    /// Create a run for a catalog game, resolving the reward plan from the
    /// catalog row with the config's override as fallback.
    pub fn from_config(config: RunConfig, clock: EngineClock) -> Result<Self, CreateRunError> {
        let definition = catalog::load_game(&config.game_id)
            .ok_or_else(|| CreateRunError::GameNotFound(config.game_id.clone()))?;
        Self::from_definition(config, definition, clock)
    }

    /// Create a run for a caller-supplied game definition, e.g. a stage set
    /// loaded from JSON rather than the built-in catalog.
    pub fn from_definition(
        config: RunConfig,
        definition: GameDefinition,
        clock: EngineClock,
    ) -> Result<Self, CreateRunError> {
        let plan = rewards::resolve_reward_plan(
            definition.policy,
            definition.coins_per_correct,
            Some(&definition.info),
            config.reward_override.as_ref(),
        );
        let engine = QuizRun::new(config, definition.info, definition.stage_set, plan)?;

        Ok(Self {
            engine,
            command_audit: Vec::new(),
            clock,
            next_command_sequence: 0,
        })
    }

    pub fn run_id(&self) -> &str {
        self.engine.run_id()
    }

    pub fn config(&self) -> &RunConfig {
        self.engine.config()
    }

    pub fn info(&self) -> &GameInfo {
        self.engine.info()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Fire any timers whose deadline has passed on the current clock.
    /// Returns the number of transitions that actually applied.
    pub fn poll(&mut self) -> usize {
        self.engine.poll(self.clock.now_ms())
    }

    /// Advance a manual clock and fire due timers. On a wall clock this only
    /// polls; real time cannot be pushed forward.
    pub fn advance_clock(&mut self, delta_ms: u64) -> usize {
        if let EngineClock::Manual { now_ms } = &mut self.clock {
            *now_ms += delta_ms;
        }
        self.poll()
    }

    /// Wrap a payload in a command envelope stamped with the current clock
    /// and apply it. Due timers fire first so a command issued "after" a
    /// delay observes the post-timer state.
    pub fn submit(&mut self, payload: CommandPayload) -> CommandResult {
        let now_ms = self.clock.now_ms();
        self.engine.poll(now_ms);

        let command = Command::new(
            format!("cmd:{}", self.next_command_sequence),
            self.engine.run_id(),
            now_ms,
            payload,
        );
        self.next_command_sequence += 1;

        let result = self.engine.apply_command(&command, now_ms);
        self.command_audit.push(result.clone());
        result
    }

    pub fn status(&self) -> RunStatus {
        self.engine.status()
    }

    pub fn shell_view(&self) -> ShellView {
        self.engine.shell_view()
    }

    pub fn events(&self) -> &[Event] {
        self.engine.events()
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.engine.outcome()
    }

    pub fn command_audit(&self) -> &[CommandResult] {
        &self.command_audit
    }

    pub fn next_transition_at(&self) -> Option<u64> {
        self.engine.next_transition_at()
    }
}

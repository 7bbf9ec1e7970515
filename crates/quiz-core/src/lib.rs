//! Quiz stage kernel: the stage-sequencing state machine, delayed-transition
//! scheduling, reward policy computation, and the built-in game catalog.

pub mod catalog;
pub mod rewards;
pub mod run;
pub mod schedule;
pub mod stage_set;

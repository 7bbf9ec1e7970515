//! Stage-set validation and JSON loading.

use std::collections::BTreeSet;
use std::fmt;

use contracts::StageSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyStageSet,
    DuplicateStageId(String),
    TooFewOptions { stage_id: String, found: usize },
    DuplicateOptionId { stage_id: String, option_id: String },
    NoCorrectOption { stage_id: String },
    MultipleCorrectOptions { stage_id: String, found: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStageSet => write!(f, "stage set has no stages"),
            Self::DuplicateStageId(stage_id) => {
                write!(f, "duplicate stage id: {stage_id}")
            }
            Self::TooFewOptions { stage_id, found } => {
                write!(f, "stage {stage_id} has {found} option(s); at least 2 required")
            }
            Self::DuplicateOptionId { stage_id, option_id } => {
                write!(f, "stage {stage_id} has duplicate option id: {option_id}")
            }
            Self::NoCorrectOption { stage_id } => {
                write!(f, "stage {stage_id} has no correct option")
            }
            Self::MultipleCorrectOptions { stage_id, found } => {
                write!(f, "stage {stage_id} has {found} correct options; exactly 1 required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the content invariants a run relies on: N >= 1 stages with unique
/// ids, each with >= 2 uniquely-identified options of which exactly one is
/// correct.
pub fn validate_stage_set(stage_set: &StageSet) -> Result<(), ValidationError> {
    if stage_set.is_empty() {
        return Err(ValidationError::EmptyStageSet);
    }

    let mut stage_ids = BTreeSet::new();
    for stage in &stage_set.stages {
        if !stage_ids.insert(stage.id.as_str()) {
            return Err(ValidationError::DuplicateStageId(stage.id.clone()));
        }

        if stage.options.len() < 2 {
            return Err(ValidationError::TooFewOptions {
                stage_id: stage.id.clone(),
                found: stage.options.len(),
            });
        }

        let mut option_ids = BTreeSet::new();
        for option in &stage.options {
            if !option_ids.insert(option.id.as_str()) {
                return Err(ValidationError::DuplicateOptionId {
                    stage_id: stage.id.clone(),
                    option_id: option.id.clone(),
                });
            }
        }

        let correct = stage
            .options
            .iter()
            .filter(|option| option.is_correct)
            .count();
        match correct {
            0 => {
                return Err(ValidationError::NoCorrectOption {
                    stage_id: stage.id.clone(),
                })
            }
            1 => {}
            found => {
                return Err(ValidationError::MultipleCorrectOptions {
                    stage_id: stage.id.clone(),
                    found,
                })
            }
        }
    }

    Ok(())
}

#[derive(Debug)]
pub enum LoadError {
    Parse(serde_json::Error),
    Invalid(ValidationError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "stage set parse error: {err}"),
            Self::Invalid(err) => write!(f, "stage set invalid: {err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<ValidationError> for LoadError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Parse and validate a stage set from a JSON document.
pub fn stage_set_from_json(raw: &str) -> Result<StageSet, LoadError> {
    let stage_set: StageSet = serde_json::from_str(raw)?;
    validate_stage_set(&stage_set)?;
    Ok(stage_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Stage, StageOption};

    fn option(id: &str, is_correct: bool) -> StageOption {
        StageOption {
            id: id.to_string(),
            label: format!("option {id}"),
            reflection: format!("reflection {id}"),
            is_correct,
        }
    }

    fn valid_set() -> StageSet {
        StageSet {
            set_id: "set_1".to_string(),
            stages: vec![Stage {
                id: "stage_1".to_string(),
                prompt: "prompt".to_string(),
                options: vec![option("a", true), option("b", false)],
                reward: None,
            }],
        }
    }

    #[test]
    fn valid_set_passes() {
        assert!(validate_stage_set(&valid_set()).is_ok());
    }

    #[test]
    fn empty_set_is_rejected() {
        let set = StageSet {
            set_id: "set_1".to_string(),
            stages: Vec::new(),
        };
        assert_eq!(validate_stage_set(&set), Err(ValidationError::EmptyStageSet));
    }

    #[test]
    fn multiple_correct_options_are_rejected() {
        let mut set = valid_set();
        set.stages[0].options[1].is_correct = true;
        assert_eq!(
            validate_stage_set(&set),
            Err(ValidationError::MultipleCorrectOptions {
                stage_id: "stage_1".to_string(),
                found: 2,
            })
        );
    }

    #[test]
    fn missing_correct_option_is_rejected() {
        let mut set = valid_set();
        set.stages[0].options[0].is_correct = false;
        assert_eq!(
            validate_stage_set(&set),
            Err(ValidationError::NoCorrectOption {
                stage_id: "stage_1".to_string(),
            })
        );
    }

    #[test]
    fn json_round_trip_loads_and_validates() {
        let raw = serde_json::to_string(&valid_set()).expect("serialize");
        let decoded = stage_set_from_json(&raw).expect("load");
        assert_eq!(decoded, valid_set());
    }

    #[test]
    fn json_with_two_correct_options_fails_to_load() {
        let mut set = valid_set();
        set.stages[0].options[1].is_correct = true;
        let raw = serde_json::to_string(&set).expect("serialize");
        assert!(matches!(
            stage_set_from_json(&raw),
            Err(LoadError::Invalid(_))
        ));
    }
}

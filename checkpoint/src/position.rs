use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage string stored for pipelines that have not recorded a stage yet.
const UNKNOWN_STAGE: &str = "unknown";

/// Stage string stored while a pipeline runs its initial full copy.
const BATCH_STAGE: &str = "batch";

/// Stage string stored once a pipeline applies incremental changes.
const STREAM_STAGE: &str = "stream";

/// Lifecycle stage of a replication pipeline.
///
/// The stage is persisted next to the position so a restarted pipeline knows
/// whether it was still copying or already streaming. The stored form is the
/// lowercase string returned by [`Stage::as_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No stage has been recorded for the pipeline yet.
    #[default]
    Unknown,
    /// The pipeline is performing its initial full copy.
    Batch,
    /// The pipeline is applying incremental changes.
    Stream,
}

impl Stage {
    /// Returns the string form stored in the backing table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Unknown => UNKNOWN_STAGE,
            Stage::Batch => BATCH_STAGE,
            Stage::Stream => STREAM_STAGE,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored stage string is not one of the known stages.
#[derive(Debug, Error)]
#[error("'{0}' is not a known pipeline stage")]
pub struct ParseStageError(String);

impl FromStr for Stage {
    type Err = ParseStageError;

    /// Parses the stored string form of a stage.
    ///
    /// Unrecognized strings are rejected so that a corrupted row surfaces as
    /// an error instead of being coerced to a valid stage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UNKNOWN_STAGE => Ok(Stage::Unknown),
            BATCH_STAGE => Ok(Stage::Batch),
            STREAM_STAGE => Ok(Stage::Stream),
            other => Err(ParseStageError(other.to_owned())),
        }
    }
}

/// Errors raised when a [`Position`] fails validation.
#[derive(Debug, Error)]
pub enum PositionValidationError {
    #[error("position name must not be empty")]
    EmptyName,

    #[error("position value for pipeline '{0}' must not be empty")]
    EmptyValue(String),
}

/// A pipeline's resume cursor together with its lifecycle stage.
///
/// The `value` payload is opaque to the store: it is persisted and returned
/// verbatim, never interpreted. `update_time` is assigned by the backing
/// store on every successful write and is `None` on caller-constructed
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Position {
    /// Name of the pipeline this position belongs to.
    pub name: String,
    /// Lifecycle stage the pipeline was in when the position was written.
    pub stage: Stage,
    /// Opaque serialized cursor.
    pub value: String,
    /// Time of the last successful write, set by the store.
    pub update_time: Option<DateTime<Utc>>,
}

impl Position {
    pub fn new(name: impl Into<String>, stage: Stage, value: impl Into<String>) -> Position {
        Position {
            name: name.into(),
            stage,
            value: value.into(),
            update_time: None,
        }
    }

    /// Checks that the position can be persisted.
    ///
    /// An empty name or an empty value is rejected so that a pipeline can
    /// never store a position it cannot resume from.
    pub fn validate(&self) -> Result<(), PositionValidationError> {
        if self.name.is_empty() {
            return Err(PositionValidationError::EmptyName);
        }
        if self.value.is_empty() {
            return Err(PositionValidationError::EmptyValue(self.name.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_round_trips_through_its_string_form() {
        for stage in [Stage::Unknown, Stage::Batch, Stage::Stream] {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn unrecognized_stage_string_is_rejected() {
        let err = "bogus".parse::<Stage>().unwrap_err();

        assert_eq!(err.to_string(), "'bogus' is not a known pipeline stage");
    }

    #[test]
    fn default_stage_is_unknown() {
        assert_eq!(Stage::default(), Stage::Unknown);
    }

    #[test]
    fn validate_accepts_a_complete_position() {
        let position = Position::new("p1", Stage::Stream, "1-bin.000003:2543");

        assert!(position.validate().is_ok());
    }

    #[test]
    fn validate_rejects_an_empty_value() {
        let position = Position::new("p1", Stage::Stream, "");

        assert!(matches!(
            position.validate(),
            Err(PositionValidationError::EmptyValue(name)) if name == "p1"
        ));
    }

    #[test]
    fn validate_rejects_an_empty_name() {
        let position = Position::new("", Stage::Stream, "1-bin.000003:2543");

        assert!(matches!(
            position.validate(),
            Err(PositionValidationError::EmptyName)
        ));
    }

    #[test]
    fn position_serializes_with_lowercase_stage() {
        let position = Position::new("p1", Stage::Batch, "cursor");
        let json = serde_json::to_value(&position).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "p1",
                "stage": "batch",
                "value": "cursor",
                "update_time": null,
            })
        );
    }

    #[test]
    fn position_deserializes_from_its_serialized_form() {
        let json = serde_json::json!({
            "name": "p1",
            "stage": "stream",
            "value": "cursor",
            "update_time": null,
        });

        let position: Position = serde_json::from_value(json).unwrap();

        assert_eq!(position, Position::new("p1", Stage::Stream, "cursor"));
    }
}

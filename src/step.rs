//! Step records, typed steps and the record/step factory.
//!
//! A script travels as a JSON array of records, each `{"type": ..., ...}` with
//! kind-specific fields. [`parse_script`] is the single place a raw record's
//! `type` discriminator is interpreted; once data is inside [`StepRecord`],
//! the conversion to a typed [`Step`] is a total match over the closed kind
//! set, with no global state consulted in either direction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ChainError;
use crate::target::TargetRef;

/// Serialized form of one step, exactly as persisted and transmitted by the
/// surrounding tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepRecord {
    /// Click a document element.
    Click {
        #[serde(flatten)]
        target: TargetRef,
    },

    /// Set the text/value content of a document element.
    Input {
        #[serde(flatten)]
        target: TargetRef,
        text: String,
    },

    /// Pause replay for a number of milliseconds.
    Wait { time: i64 },

    /// Jump back to an earlier step and keep going.
    Goto {
        #[serde(rename = "gotoStep")]
        goto_step: i64,
    },

    /// Leave a loop after the step has been passed a limited number of times.
    Break { pass: u32 },
}

impl StepRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            StepRecord::Click { .. } => "click",
            StepRecord::Input { .. } => "input",
            StepRecord::Wait { .. } => "wait",
            StepRecord::Goto { .. } => "goto",
            StepRecord::Break { .. } => "break",
        }
    }
}

/// Parse a raw JSON script (an array of step records) into typed records.
///
/// A record whose `type` does not name a known kind fails with
/// [`ChainError::UnrecognizedKind`]; structural problems (missing or
/// wrongly-typed fields, non-array input) fail with
/// [`ChainError::MalformedRecord`].
pub fn parse_script(json: &str) -> Result<Vec<StepRecord>, ChainError> {
    let values: Vec<Value> = serde_json::from_str(json).map_err(|e| {
        ChainError::MalformedRecord(format!("script is not a JSON array of step records: {e}"))
    })?;
    values.iter().map(record_from_value).collect()
}

/// Convert one loose JSON object into a typed record.
pub fn record_from_value(value: &Value) -> Result<StepRecord, ChainError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainError::MalformedRecord("record has no \"type\" field".to_string()))?;
    if !matches!(kind, "click" | "input" | "wait" | "goto" | "break") {
        return Err(ChainError::UnrecognizedKind(kind.to_string()));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| ChainError::MalformedRecord(format!("{kind}: {e}")))
}

/// One typed unit of scripted work inside a [`Chain`](crate::Chain).
///
/// `Noop` is the distinguished sentinel kind that heads every chain; it has
/// no wire form and performs nothing. All execution-local state (the live
/// remaining-pass counter of a `Break`) lives in the executor, never here, so
/// a decoded step is immutable and freely re-executable.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Noop,
    Click {
        target: TargetRef,
    },
    Input {
        target: TargetRef,
        text: String,
    },
    Wait {
        time_ms: i64,
    },
    /// The jump target is kept raw here; [`Chain`](crate::Chain) construction
    /// validates it against the step's input position and encodes the jump
    /// structurally in the link graph.
    Goto {
        target_index: i64,
    },
    Break {
        pass_limit: u32,
    },
}

impl Step {
    /// Build the typed step for a wire record. Total over the closed kind
    /// set; unknown discriminators never reach this point (see
    /// [`parse_script`]).
    pub fn decode(record: &StepRecord) -> Self {
        match record {
            StepRecord::Click { target } => Step::Click {
                target: target.clone(),
            },
            StepRecord::Input { target, text } => Step::Input {
                target: target.clone(),
                text: text.clone(),
            },
            StepRecord::Wait { time } => Step::Wait { time_ms: *time },
            StepRecord::Goto { goto_step } => Step::Goto {
                target_index: *goto_step,
            },
            StepRecord::Break { pass } => Step::Break { pass_limit: *pass },
        }
    }

    /// Inverse of [`Step::decode`]. `None` only for the sentinel, which has
    /// no wire form. A `Break` always encodes its original pass limit.
    pub fn encode(&self) -> Option<StepRecord> {
        match self {
            Step::Noop => None,
            Step::Click { target } => Some(StepRecord::Click {
                target: target.clone(),
            }),
            Step::Input { target, text } => Some(StepRecord::Input {
                target: target.clone(),
                text: text.clone(),
            }),
            Step::Wait { time_ms } => Some(StepRecord::Wait { time: *time_ms }),
            Step::Goto { target_index } => Some(StepRecord::Goto {
                goto_step: *target_index,
            }),
            Step::Break { pass_limit } => Some(StepRecord::Break { pass: *pass_limit }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Step::Noop => "none",
            Step::Click { .. } => "click",
            Step::Input { .. } => "input",
            Step::Wait { .. } => "wait",
            Step::Goto { .. } => "goto",
            Step::Break { .. } => "break",
        }
    }
}

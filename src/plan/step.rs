//! Plan steps
//!
//! Defines the plan step variants, their JSON wire shape, and the decoding
//! used by the dispatcher to tell malformed steps apart from unknown ones.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StepError;

/// Kinds the dispatcher knows how to run.
pub const KNOWN_KINDS: [&str; 4] = ["mkdir", "copy", "move", "delete"];

/// One filesystem operation of a plan.
///
/// Serialized with an inline `kind` tag:
/// `{ "kind": "copy", "from": "...", "to": "...", "ensure_parent": true, "overwrite": false }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    Mkdir(MkdirStep),
    Copy(TransferStep),
    Move(TransferStep),
    Delete(DeleteStep),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MkdirStep {
    pub path: String,
    pub recursive: bool,
}

/// Payload shared by copy and move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferStep {
    pub from: String,
    pub to: String,
    pub ensure_parent: bool,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteStep {
    pub path: String,
    pub force: bool,
}

impl Step {
    /// The wire name of this step's kind
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Mkdir(_) => "mkdir",
            Step::Copy(_) => "copy",
            Step::Move(_) => "move",
            Step::Delete(_) => "delete",
        }
    }

    /// Decodes one raw plan entry.
    ///
    /// Not an object, or a missing/empty/non-string `kind`, is `Malformed(None)`.
    /// A kind outside `KNOWN_KINDS` is `UnknownKind`. Ill-typed fields of a known
    /// kind are `Malformed` with the decoder's detail. Missing fields default.
    pub fn decode(value: &Value) -> Result<Step, StepError> {
        let kind = value
            .as_object()
            .and_then(|obj| obj.get("kind"))
            .and_then(Value::as_str)
            .filter(|kind| !kind.is_empty())
            .ok_or(StepError::Malformed(None))?;

        if !KNOWN_KINDS.contains(&kind) {
            return Err(StepError::UnknownKind(kind.to_string()));
        }

        Step::deserialize(value).map_err(|e| StepError::Malformed(Some(e.to_string())))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Mkdir(s) => {
                write!(f, "[mkdir] {}", s.path)?;
                if s.recursive {
                    write!(f, " (recursive)")?;
                }
                Ok(())
            }
            Step::Copy(s) | Step::Move(s) => {
                write!(f, "[{}] {} -> {}", self.kind(), s.from, s.to)?;
                if s.ensure_parent {
                    write!(f, " (ensure_parent)")?;
                }
                if s.overwrite {
                    write!(f, " (overwrite)")?;
                }
                Ok(())
            }
            Step::Delete(s) => {
                write!(f, "[delete] {}", s.path)?;
                if s.force {
                    write!(f, " (force)")?;
                }
                Ok(())
            }
        }
    }
}

//! Response envelopes for the time façade
//!
//! Wire shapes:
//! - `{"type": "time_response", "data": {...}}` for reads
//! - `{"type": "time_update", "data": {...}, "update_type": "<kind>"}` for
//!   mutations
//! - `{"type": "error", "data": {"message": "..."}}` for rejected requests

use serde::Serialize;
use serde_json::{json, Value};
use tempo_core::{ClockEventKind, ClockSnapshot};

/// Successful response carrying a clock snapshot
#[derive(Clone, Debug, Serialize)]
pub struct StateEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ClockSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_type: Option<&'static str>,
}

impl StateEnvelope {
    /// Read response (`time_response`)
    pub fn response(data: ClockSnapshot) -> Self {
        StateEnvelope {
            kind: "time_response",
            data,
            update_type: None,
        }
    }

    /// Mutation response (`time_update`) tagged with the change kind
    pub fn update(data: ClockSnapshot, change: ClockEventKind) -> Self {
        StateEnvelope {
            kind: "time_update",
            data,
            update_type: Some(change.as_str()),
        }
    }

    pub fn into_value(self) -> Value {
        // Snapshot fields are plain finite numbers, strings, and bools;
        // serialization cannot fail for them
        serde_json::to_value(&self).unwrap_or_else(|e| error_value(&e.to_string()))
    }
}

/// Error response envelope
#[derive(Clone, Debug, Serialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ErrorBody,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorEnvelope {
            kind: "error",
            data: ErrorBody {
                message: message.into(),
            },
        }
    }

    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|e| error_value(&e.to_string()))
    }
}

fn error_value(message: &str) -> Value {
    json!({ "type": "error", "data": { "message": message } })
}

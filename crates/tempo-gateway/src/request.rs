//! Parsed time operation requests

use serde_json::Value;
use tempo_core::{GameTime, TimeError, TimeResult};

/// A validated time operation
///
/// Parsing performs all presence and type checks, so dispatching a
/// `TimeRequest` can only fail inside the engine itself (negative dilation
/// is caught here too, but the engine re-checks).
#[derive(Clone, Debug, PartialEq)]
pub enum TimeRequest {
    GetTime,
    SetDilation(f64),
    Pause,
    Resume,
    JumpTo(GameTime),
    /// Simulated seconds to move forward
    Advance(f64),
    /// Simulated seconds to move backward
    Rewind(f64),
}

impl TimeRequest {
    /// Parse a request envelope: `{"action": "<op>", ...}`
    pub fn from_value(value: &Value) -> TimeResult<Self> {
        let action = match value.get("action") {
            None | Some(Value::Null) => return Err(TimeError::MissingField("action")),
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(TimeError::InvalidField {
                    field: "action",
                    expected: "a string",
                })
            }
        };

        match action {
            "get_time" => Ok(TimeRequest::GetTime),
            "pause" => Ok(TimeRequest::Pause),
            "resume" => Ok(TimeRequest::Resume),
            "set_dilation" => Ok(TimeRequest::SetDilation(require_number(value, "value")?)),
            "jump_to" => {
                let raw = match value.get("target_time") {
                    None | Some(Value::Null) => return Err(TimeError::MissingField("target_time")),
                    Some(Value::String(s)) => s.as_str(),
                    Some(_) => {
                        return Err(TimeError::InvalidField {
                            field: "target_time",
                            expected: "an ISO-8601 timestamp string",
                        })
                    }
                };
                Ok(TimeRequest::JumpTo(GameTime::parse(raw)?))
            }
            "advance" => Ok(TimeRequest::Advance(require_seconds(value, "value")?)),
            "rewind" => Ok(TimeRequest::Rewind(require_seconds(value, "value")?)),
            other => Err(TimeError::UnknownAction(other.to_string())),
        }
    }
}

fn require_number(value: &Value, field: &'static str) -> TimeResult<f64> {
    match value.get(field) {
        None | Some(Value::Null) => Err(TimeError::MissingField(field)),
        Some(v) => v.as_f64().ok_or(TimeError::InvalidField {
            field,
            expected: "a number",
        }),
    }
}

/// A number of seconds: finite and non-negative
fn require_seconds(value: &Value, field: &'static str) -> TimeResult<f64> {
    let secs = require_number(value, field)?;
    if !secs.is_finite() {
        return Err(TimeError::InvalidField {
            field,
            expected: "a finite number of seconds",
        });
    }
    if secs < 0.0 {
        return Err(TimeError::NegativeDuration { value: secs });
    }
    Ok(secs)
}

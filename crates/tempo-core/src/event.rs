//! Change events emitted after every clock mutation
//!
//! Every mutating engine operation produces exactly one `ClockEvent`, which
//! is delivered synchronously to all subscribed observers in subscription
//! order. Observers see the post-mutation snapshot plus a typed detail
//! payload describing what changed.

use serde::Serialize;

use crate::{ClockSnapshot, GameTime, ObserverError};

/// Classification of a clock mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventKind {
    DilationChange,
    Pause,
    Resume,
    ManualJump,
    ManualAdvance,
    ManualRewind,
    Reset,
}

impl ClockEventKind {
    /// Wire name, as carried in the `update_type` response field
    pub fn as_str(self) -> &'static str {
        match self {
            ClockEventKind::DilationChange => "dilation_change",
            ClockEventKind::Pause => "pause",
            ClockEventKind::Resume => "resume",
            ClockEventKind::ManualJump => "manual_jump",
            ClockEventKind::ManualAdvance => "manual_advance",
            ClockEventKind::ManualRewind => "manual_rewind",
            ClockEventKind::Reset => "reset",
        }
    }
}

/// Per-kind detail payload
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClockEventDetails {
    /// Pause, resume, reset: the snapshot says it all
    None {},
    /// Dilation change: old and new factor
    Dilation { old: f64, new: f64 },
    /// Manual jump: instants on both sides of the discontinuity
    Jump { from: GameTime, to: GameTime },
    /// Manual advance/rewind: magnitude in simulated seconds
    Shift { seconds: f64 },
}

/// A clock change, carrying the post-mutation state
#[derive(Clone, Debug, Serialize)]
pub struct ClockEvent {
    pub kind: ClockEventKind,
    pub state: ClockSnapshot,
    pub details: ClockEventDetails,
}

/// Capability for receiving clock change events
///
/// Implementations must tolerate being called from whichever thread performed
/// the mutation. Returning an error (or panicking) affects neither the
/// mutation nor later observers.
pub trait ClockObserver: Send + Sync {
    fn on_clock_change(&self, event: &ClockEvent) -> Result<(), ObserverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(ClockEventKind::DilationChange.as_str(), "dilation_change");
        assert_eq!(ClockEventKind::ManualJump.as_str(), "manual_jump");
        assert_eq!(ClockEventKind::Reset.as_str(), "reset");
    }

    #[test]
    fn test_kind_serializes_to_wire_name() {
        for kind in [
            ClockEventKind::DilationChange,
            ClockEventKind::Pause,
            ClockEventKind::Resume,
            ClockEventKind::ManualJump,
            ClockEventKind::ManualAdvance,
            ClockEventKind::ManualRewind,
            ClockEventKind::Reset,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_details_serialization() {
        let details = ClockEventDetails::Dilation { old: 1.0, new: 2.5 };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["old"], 1.0);
        assert_eq!(value["new"], 2.5);

        let empty = serde_json::to_value(ClockEventDetails::None {}).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}

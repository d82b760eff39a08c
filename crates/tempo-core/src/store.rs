//! Durable clock record and the store capability
//!
//! The persisted record deliberately omits the monotonic anchor: monotonic
//! readings are meaningless across processes, so a reloaded engine re-anchors
//! to its own clock source.

use serde::{Deserialize, Serialize};

use crate::{ClockState, GameTime, StoreError, DEFAULT_DILATION};

fn default_previous_dilation() -> f64 {
    DEFAULT_DILATION
}

/// On-disk clock record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedClock {
    pub game_time: GameTime,
    pub time_dilation: f64,
    pub is_paused: bool,
    /// Older records may predate this field; default to real-time
    #[serde(default = "default_previous_dilation")]
    pub previous_dilation: f64,
}

impl PersistedClock {
    pub fn from_state(state: &ClockState) -> Self {
        PersistedClock {
            game_time: state.game_time,
            time_dilation: state.dilation,
            is_paused: state.is_paused,
            previous_dilation: state.previous_dilation,
        }
    }

    /// Whether the record satisfies the clock-state invariants. A record that
    /// fails this check is treated the same as an unreadable one.
    pub fn is_consistent(&self) -> bool {
        self.time_dilation.is_finite()
            && self.time_dilation >= 0.0
            && self.previous_dilation.is_finite()
            && self.previous_dilation > 0.0
            && (!self.is_paused || self.time_dilation == 0.0)
    }

    /// Rebuild live clock state, anchored to a fresh monotonic reading
    pub fn into_state(self, mono_now: std::time::Duration) -> ClockState {
        ClockState {
            game_time: self.game_time,
            dilation: self.time_dilation,
            is_paused: self.is_paused,
            previous_dilation: self.previous_dilation,
            last_sync: mono_now,
        }
    }
}

/// Capability for durably storing the clock record
pub trait ClockStore: Send + Sync {
    /// Persist the record, replacing any previous one atomically
    fn save(&self, record: &PersistedClock) -> Result<(), StoreError>;

    /// Load the stored record; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<PersistedClock>, StoreError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn record() -> PersistedClock {
        PersistedClock {
            game_time: GameTime::default_start(),
            time_dilation: 2.0,
            is_paused: false,
            previous_dilation: 2.0,
        }
    }

    #[test]
    fn test_state_roundtrip() {
        let state = record().into_state(Duration::from_secs(10));
        assert_eq!(state.dilation, 2.0);
        assert_eq!(state.last_sync, Duration::from_secs(10));
        assert_eq!(PersistedClock::from_state(&state), record());
    }

    #[test]
    fn test_missing_previous_dilation_defaults() {
        let json = r#"{"game_time":"2048-11-13T08:00:00Z","time_dilation":1.0,"is_paused":false}"#;
        let rec: PersistedClock = serde_json::from_str(json).unwrap();
        assert_eq!(rec.previous_dilation, DEFAULT_DILATION);
    }

    #[test]
    fn test_consistency_checks() {
        assert!(record().is_consistent());

        let mut bad = record();
        bad.time_dilation = -1.0;
        assert!(!bad.is_consistent());

        let mut bad = record();
        bad.previous_dilation = 0.0;
        assert!(!bad.is_consistent());

        let mut bad = record();
        bad.is_paused = true; // paused but still dilated
        assert!(!bad.is_consistent());
    }
}

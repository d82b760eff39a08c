//! Clock state - the authoritative record of simulated time
//!
//! INVARIANTS:
//! - `dilation >= 0` and finite
//! - `is_paused == true` implies `dilation == 0`
//! - `previous_dilation > 0` (the rate restored by resume)
//! - `game_time` moves backward only through explicit jump/rewind

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::GameTime;

/// Default dilation factor (1.0 = real-time)
pub const DEFAULT_DILATION: f64 = 1.0;

/// The full mutable state owned by the time engine
#[derive(Clone, Debug)]
pub struct ClockState {
    /// Current simulated instant
    pub game_time: GameTime,
    /// Rate of simulated time relative to wall time (0.0 = frozen)
    pub dilation: f64,
    /// True iff frozen through an explicit pause
    pub is_paused: bool,
    /// Dilation to restore on resume
    pub previous_dilation: f64,
    /// Monotonic reading at the last settlement
    pub last_sync: Duration,
}

impl ClockState {
    /// Fresh state at the given start instant and dilation, anchored to a
    /// monotonic reading taken by the caller
    pub fn new(game_time: GameTime, dilation: f64, mono_now: Duration) -> Self {
        ClockState {
            game_time,
            dilation,
            is_paused: dilation == 0.0,
            previous_dilation: if dilation > 0.0 { dilation } else { DEFAULT_DILATION },
            last_sync: mono_now,
        }
    }

    /// Capture an externally visible snapshot of this state
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            current_time: self.game_time,
            time_dilation: self.dilation,
            is_paused: self.is_paused,
            real_time: self.last_sync.as_secs_f64(),
        }
    }
}

/// Point-in-time view of the clock, as sent to clients
///
/// `real_time` is the monotonic reading (seconds) at which `current_time` was
/// settled; clients use it to interpolate between updates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub current_time: GameTime,
    pub time_dilation: f64,
    pub is_paused: bool,
    pub real_time: f64,
}

//! Time gateway - maps parsed requests onto the engine

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tempo_core::{ClockEventKind, TimeError, TimeResult};
use tempo_engine::TimeEngine;

use crate::{ErrorEnvelope, StateEnvelope, TimeRequest};

/// Stateless façade over a shared time engine
///
/// Every call returns an envelope; engine errors become error envelopes and
/// never propagate, so a bad request cannot tear down the caller's session.
pub struct TimeGateway {
    engine: Arc<TimeEngine>,
}

impl TimeGateway {
    pub fn new(engine: Arc<TimeEngine>) -> Self {
        TimeGateway { engine }
    }

    pub fn engine(&self) -> &Arc<TimeEngine> {
        &self.engine
    }

    /// Handle one request envelope
    pub fn handle(&self, request: &Value) -> Value {
        match TimeRequest::from_value(request).and_then(|req| self.dispatch(req)) {
            Ok(envelope) => envelope.into_value(),
            Err(e) => {
                tracing::debug!(error = %e, "time request rejected");
                ErrorEnvelope::new(e.to_string()).into_value()
            }
        }
    }

    fn dispatch(&self, request: TimeRequest) -> TimeResult<StateEnvelope> {
        Ok(match request {
            TimeRequest::GetTime => StateEnvelope::response(self.engine.snapshot()),
            TimeRequest::SetDilation(dilation) => StateEnvelope::update(
                self.engine.set_dilation(dilation)?,
                ClockEventKind::DilationChange,
            ),
            TimeRequest::Pause => StateEnvelope::update(self.engine.pause(), ClockEventKind::Pause),
            TimeRequest::Resume => {
                StateEnvelope::update(self.engine.resume(), ClockEventKind::Resume)
            }
            TimeRequest::JumpTo(target) => {
                StateEnvelope::update(self.engine.jump_to(target), ClockEventKind::ManualJump)
            }
            TimeRequest::Advance(secs) => StateEnvelope::update(
                self.engine.advance(seconds_to_duration(secs)?),
                ClockEventKind::ManualAdvance,
            ),
            TimeRequest::Rewind(secs) => StateEnvelope::update(
                self.engine.rewind(seconds_to_duration(secs)?),
                ClockEventKind::ManualRewind,
            ),
        })
    }
}

/// Parsed seconds are finite and non-negative; this only rejects values too
/// large to represent as a `Duration`
fn seconds_to_duration(secs: f64) -> TimeResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| TimeError::InvalidField {
        field: "value",
        expected: "a representable number of seconds",
    })
}

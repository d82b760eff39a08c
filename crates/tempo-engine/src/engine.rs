//! Time Engine - single source of truth for simulated time
//!
//! The engine settles lazily: every read and every mutation first folds the
//! wall-clock interval since the last settlement into `game_time` at the
//! dilation that was active during that interval, then applies the new
//! semantics. There is no ticking thread; between calls the clock is just
//! four stored fields.
//!
//! Lock discipline: the state mutex is held only for settlement plus the
//! field updates. Observer fan-out and the store write happen after release,
//! on the captured snapshot, so a slow observer or disk cannot block reads.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tempo_core::{
    ClockEvent, ClockEventDetails, ClockEventKind, ClockObserver, ClockSnapshot, ClockState,
    ClockStore, GameTime, PersistedClock, TimeError, TimeResult, DEFAULT_DILATION,
};

use crate::{ChangeNotifier, MonotonicClock, SystemClock};

/// Time Engine configuration
#[derive(Clone, Debug)]
pub struct TimeEngineConfig {
    /// Simulated instant a fresh clock starts at
    pub default_time: GameTime,
    /// Dilation a fresh clock starts at
    pub default_dilation: f64,
}

impl Default for TimeEngineConfig {
    fn default() -> Self {
        TimeEngineConfig {
            default_time: GameTime::default_start(),
            default_dilation: DEFAULT_DILATION,
        }
    }
}

/// Time Engine - owns the clock state and all mutations of it
pub struct TimeEngine {
    state: Mutex<ClockState>,
    clock: Arc<dyn MonotonicClock>,
    notifier: ChangeNotifier,
    store: Option<Arc<dyn ClockStore>>,
    config: TimeEngineConfig,
}

impl TimeEngine {
    /// Engine with default configuration and the system monotonic clock
    pub fn new() -> Self {
        Self::with_config(TimeEngineConfig::default())
    }

    /// Engine with custom configuration and the system monotonic clock
    pub fn with_config(config: TimeEngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Engine driven by an explicit clock source
    pub fn with_clock(config: TimeEngineConfig, clock: Arc<dyn MonotonicClock>) -> Self {
        let state = ClockState::new(config.default_time, config.default_dilation, clock.now());
        TimeEngine {
            state: Mutex::new(state),
            clock,
            notifier: ChangeNotifier::new(),
            store: None,
            config,
        }
    }

    /// Attach a durable store and restore any previously saved clock
    ///
    /// Missing, unreadable, or inconsistent records fall back to the
    /// configured defaults with a warning; the game must come up regardless.
    pub fn attach_store(mut self, store: Arc<dyn ClockStore>) -> Self {
        match store.load() {
            Ok(Some(record)) if record.is_consistent() => {
                tracing::info!(game_time = %record.game_time, "restored clock state");
                *self.state.lock() = record.into_state(self.clock.now());
            }
            Ok(Some(record)) => {
                tracing::warn!(?record, "stored clock record is inconsistent, using defaults");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to load clock state, using defaults");
            }
        }
        self.store = Some(store);
        self
    }

    /// Register an observer for all future clock changes
    pub fn subscribe(&self, observer: Arc<dyn ClockObserver>) {
        self.notifier.subscribe(observer);
    }

    /// Settle and return the current simulated instant
    pub fn current_time(&self) -> GameTime {
        let mut state = self.state.lock();
        Self::settle(&mut state, self.clock.now());
        state.game_time
    }

    /// Settle and return a full snapshot
    pub fn snapshot(&self) -> ClockSnapshot {
        let mut state = self.state.lock();
        Self::settle(&mut state, self.clock.now());
        state.snapshot()
    }

    /// Current dilation factor
    pub fn dilation(&self) -> f64 {
        self.state.lock().dilation
    }

    /// Whether the clock is explicitly paused
    pub fn is_paused(&self) -> bool {
        self.state.lock().is_paused
    }

    /// Set the dilation factor. Zero freezes the clock; any non-zero value
    /// becomes the rate restored by a later `resume`.
    pub fn set_dilation(&self, dilation: f64) -> TimeResult<ClockSnapshot> {
        if !dilation.is_finite() || dilation < 0.0 {
            return Err(TimeError::InvalidDilation { value: dilation });
        }

        let (snapshot, record, old) = {
            let mut state = self.state.lock();
            // Settle at the old rate first so the change is not retroactive
            Self::settle(&mut state, self.clock.now());
            let old = state.dilation;
            state.dilation = dilation;
            state.is_paused = dilation == 0.0;
            if dilation != 0.0 {
                state.previous_dilation = dilation;
            }
            (state.snapshot(), PersistedClock::from_state(&state), old)
        };

        Ok(self.finish_mutation(
            ClockEventKind::DilationChange,
            snapshot,
            ClockEventDetails::Dilation {
                old,
                new: dilation,
            },
            record,
        ))
    }

    /// Freeze the clock. Idempotent: pausing a paused clock emits no event.
    pub fn pause(&self) -> ClockSnapshot {
        let (snapshot, record) = {
            let mut state = self.state.lock();
            Self::settle(&mut state, self.clock.now());
            if state.is_paused {
                return state.snapshot();
            }
            state.previous_dilation = state.dilation;
            state.dilation = 0.0;
            state.is_paused = true;
            (state.snapshot(), PersistedClock::from_state(&state))
        };

        self.finish_mutation(
            ClockEventKind::Pause,
            snapshot,
            ClockEventDetails::None {},
            record,
        )
    }

    /// Unfreeze the clock at the rate active before the pause. Idempotent.
    pub fn resume(&self) -> ClockSnapshot {
        let (snapshot, record) = {
            let mut state = self.state.lock();
            Self::settle(&mut state, self.clock.now());
            if !state.is_paused {
                return state.snapshot();
            }
            state.dilation = state.previous_dilation;
            state.is_paused = false;
            (state.snapshot(), PersistedClock::from_state(&state))
        };

        self.finish_mutation(
            ClockEventKind::Resume,
            snapshot,
            ClockEventDetails::None {},
            record,
        )
    }

    /// Jump directly to `target`, past or future, regardless of dilation
    pub fn jump_to(&self, target: GameTime) -> ClockSnapshot {
        let (snapshot, record, from) = {
            let mut state = self.state.lock();
            // Flush time elapsed under the current dilation before the jump
            Self::settle(&mut state, self.clock.now());
            let from = state.game_time;
            state.game_time = target;
            (state.snapshot(), PersistedClock::from_state(&state), from)
        };

        self.finish_mutation(
            ClockEventKind::ManualJump,
            snapshot,
            ClockEventDetails::Jump { from, to: target },
            record,
        )
    }

    /// Move the clock forward by `duration` of simulated time
    pub fn advance(&self, duration: Duration) -> ClockSnapshot {
        self.shift(duration, ClockEventKind::ManualAdvance)
    }

    /// Move the clock backward by `duration` of simulated time
    pub fn rewind(&self, duration: Duration) -> ClockSnapshot {
        self.shift(duration, ClockEventKind::ManualRewind)
    }

    /// Restore the configured defaults
    pub fn reset_to_default(&self) -> ClockSnapshot {
        let (snapshot, record) = {
            let mut state = self.state.lock();
            *state = ClockState::new(
                self.config.default_time,
                self.config.default_dilation,
                self.clock.now(),
            );
            (state.snapshot(), PersistedClock::from_state(&state))
        };

        self.finish_mutation(
            ClockEventKind::Reset,
            snapshot,
            ClockEventDetails::None {},
            record,
        )
    }

    /// Settle and persist without mutating, e.g. on shutdown
    pub fn flush(&self) {
        let record = {
            let mut state = self.state.lock();
            Self::settle(&mut state, self.clock.now());
            PersistedClock::from_state(&state)
        };
        self.persist(&record);
    }

    /// Fold elapsed wall time into `game_time` at the active dilation
    fn settle(state: &mut ClockState, mono_now: Duration) {
        let elapsed = mono_now.saturating_sub(state.last_sync);
        if !state.is_paused && state.dilation > 0.0 {
            let scaled = Duration::try_from_secs_f64(elapsed.as_secs_f64() * state.dilation)
                .unwrap_or(Duration::MAX);
            state.game_time = state.game_time.saturating_add(scaled);
        }
        state.last_sync = mono_now;
    }

    fn shift(&self, duration: Duration, kind: ClockEventKind) -> ClockSnapshot {
        let (snapshot, record) = {
            let mut state = self.state.lock();
            Self::settle(&mut state, self.clock.now());
            state.game_time = match kind {
                ClockEventKind::ManualRewind => state.game_time.saturating_sub(duration),
                _ => state.game_time.saturating_add(duration),
            };
            (state.snapshot(), PersistedClock::from_state(&state))
        };

        self.finish_mutation(
            kind,
            snapshot,
            ClockEventDetails::Shift {
                seconds: duration.as_secs_f64(),
            },
            record,
        )
    }

    /// Post-mutation side effects, run with the state lock released
    fn finish_mutation(
        &self,
        kind: ClockEventKind,
        snapshot: ClockSnapshot,
        details: ClockEventDetails,
        record: PersistedClock,
    ) -> ClockSnapshot {
        self.notifier.dispatch(&ClockEvent {
            kind,
            state: snapshot,
            details,
        });
        self.persist(&record);
        snapshot
    }

    /// Best-effort save: in-memory state stays authoritative on failure
    fn persist(&self, record: &PersistedClock) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(record) {
                tracing::error!(error = %e, "failed to save clock state");
            }
        }
    }
}

impl Default for TimeEngine {
    fn default() -> Self {
        Self::new()
    }
}

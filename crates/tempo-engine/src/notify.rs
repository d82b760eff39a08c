//! Change notifier - synchronous fan-out of clock events

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tempo_core::{ClockEvent, ClockObserver};

/// Fan-out of clock change events to subscribed observers
///
/// Delivery is synchronous and in subscription order. A failing observer is
/// logged and skipped; it never blocks later observers and never affects the
/// mutation that produced the event.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: RwLock<Vec<Arc<dyn ClockObserver>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn ClockObserver>) {
        self.observers.write().push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Deliver `event` to every observer, isolating failures and panics
    pub fn dispatch(&self, event: &ClockEvent) {
        let observers = self.observers.read().clone();
        for observer in observers {
            match catch_unwind(AssertUnwindSafe(|| observer.on_clock_change(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(kind = event.kind.as_str(), error = %e, "clock observer failed");
                }
                Err(_) => {
                    tracing::warn!(kind = event.kind.as_str(), "clock observer panicked");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempo_core::{ClockEventDetails, ClockEventKind, ClockState, GameTime, ObserverError};

    use super::*;

    struct Counter(AtomicUsize);

    impl ClockObserver for Counter {
        fn on_clock_change(&self, _event: &ClockEvent) -> Result<(), ObserverError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct AlwaysFails;

    impl ClockObserver for AlwaysFails {
        fn on_clock_change(&self, _event: &ClockEvent) -> Result<(), ObserverError> {
            Err(ObserverError::from("broadcast channel closed"))
        }
    }

    fn event() -> ClockEvent {
        let state = ClockState::new(GameTime::default_start(), 1.0, std::time::Duration::ZERO);
        ClockEvent {
            kind: ClockEventKind::Pause,
            state: state.snapshot(),
            details: ClockEventDetails::None {},
        }
    }

    #[test]
    fn test_dispatch_reaches_all_observers() {
        let notifier = ChangeNotifier::new();
        let a = Arc::new(Counter(AtomicUsize::new(0)));
        let b = Arc::new(Counter(AtomicUsize::new(0)));
        notifier.subscribe(a.clone());
        notifier.subscribe(b.clone());

        notifier.dispatch(&event());

        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_observer_is_isolated() {
        let notifier = ChangeNotifier::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        notifier.subscribe(Arc::new(AlwaysFails));
        notifier.subscribe(counter.clone());

        notifier.dispatch(&event());

        // The observer after the failing one still ran
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    struct AlwaysPanics;

    impl ClockObserver for AlwaysPanics {
        fn on_clock_change(&self, _event: &ClockEvent) -> Result<(), ObserverError> {
            panic!("observer blew up");
        }
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let notifier = ChangeNotifier::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        notifier.subscribe(Arc::new(AlwaysPanics));
        notifier.subscribe(counter.clone());

        // The panic is contained; dispatch returns and later observers run
        notifier.dispatch(&event());

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}

//! "Go to middle" request signal
//!
//! A parent sets the signal; the component observes a false -> true
//! transition, recenters once and writes the signal back to false.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Externally toggleable boolean shared with the component
#[derive(Debug, Clone, Default)]
pub struct MiddleSignal(Arc<AtomicBool>);

impl MiddleSignal {
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }

    /// Ask the component to recenter
    pub fn request(&self) {
        self.set(true);
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Edge detector over a [`MiddleSignal`]
#[derive(Debug, Clone)]
pub struct MiddleTrigger {
    signal: MiddleSignal,
    last_seen: bool,
}

impl MiddleTrigger {
    /// Starts from the signal's current value, so a signal that is already
    /// set does not count as a transition
    pub fn new(signal: MiddleSignal) -> Self {
        let last_seen = signal.get();
        Self { signal, last_seen }
    }

    /// Observe the signal; returns true exactly once per false -> true
    /// transition and resets the signal when it does
    pub fn poll(&mut self) -> bool {
        let value = self.signal.get();
        let fired = value && !self.last_seen;
        if fired {
            self.signal.set(false);
            self.last_seen = false;
        } else {
            self.last_seen = value;
        }
        fired
    }
}

#![forbid(unsafe_code)]

//! Cancellable deferred actions with explicit deadlines.
//!
//! Nothing here owns a timer. The session polls with the current time on
//! every tick and each action fires at most once.
//!
//! # Invariants
//!
//! 1. A deferred value fires at most once; scheduling replaces any pending one.
//! 2. A cancelled action never fires.
//! 3. Activation suppression swallows at most one activation per arming.

use lumen_core::{Duration, Instant};

/// A value released once its deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    pending: Option<(T, Instant)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with `value` due at `deadline`, returning any value it replaced.
    pub fn schedule(&mut self, value: T, deadline: Instant) -> Option<T> {
        self.pending.replace((value, deadline)).map(|(old, _)| old)
    }

    /// Disarm, returning the value that will no longer fire.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Take the value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

// ---------------------------------------------------------------------------
// ActivationSuppressor
// ---------------------------------------------------------------------------

/// Swallows the synthetic click a browser fires after a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSuppressor {
    window: Duration,
    armed: Deferred<()>,
}

impl ActivationSuppressor {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed: Deferred::new(),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Suppress the next activation arriving within the window from `now`.
    pub fn suppress(&mut self, now: Instant) {
        self.armed.schedule((), now + self.window);
    }

    /// Returns `true` if this activation should be swallowed. Clears the arm
    /// either way.
    pub fn consume(&mut self, now: Instant) -> bool {
        match self.armed.deadline() {
            Some(deadline) => {
                self.armed.cancel();
                now < deadline
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.armed.cancel();
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_pending()
    }
}

impl Default for ActivationSuppressor {
    fn default() -> Self {
        Self::new(Duration::from_millis(350))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut d = Deferred::new();
        d.schedule("teardown", t0 + ms(300));
        assert_eq!(d.poll(t0 + ms(299)), None);
        assert_eq!(d.poll(t0 + ms(300)), Some("teardown"));
        assert_eq!(d.poll(t0 + ms(900)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut d = Deferred::new();
        d.schedule(7, t0 + ms(10));
        assert_eq!(d.cancel(), Some(7));
        assert_eq!(d.poll(t0 + ms(20)), None);
    }

    #[test]
    fn reschedule_replaces() {
        let t0 = Instant::now();
        let mut d = Deferred::new();
        assert_eq!(d.schedule(1, t0 + ms(10)), None);
        assert_eq!(d.schedule(2, t0 + ms(50)), Some(1));
        assert_eq!(d.deadline(), Some(t0 + ms(50)));
        assert_eq!(d.poll(t0 + ms(10)), None);
        assert_eq!(d.poll(t0 + ms(50)), Some(2));
    }

    #[test]
    fn suppression_consumes_once() {
        let t0 = Instant::now();
        let mut s = ActivationSuppressor::default();
        assert!(!s.consume(t0));
        s.suppress(t0);
        assert!(s.is_armed());
        assert!(s.consume(t0 + ms(100)));
        assert!(!s.consume(t0 + ms(110)));
    }

    #[test]
    fn suppression_expires() {
        let t0 = Instant::now();
        let mut s = ActivationSuppressor::new(ms(350));
        s.suppress(t0);
        assert!(!s.consume(t0 + ms(350)));
        assert!(!s.is_armed());
    }
}

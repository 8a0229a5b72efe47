#![forbid(unsafe_code)]

//! Animation intents and the busy flag that serializes them.
//!
//! # Invariants
//!
//! 1. At most one intent is in flight. Starting another supersedes it.
//! 2. [`AnimationIntentProducer::poll`] reports each completion exactly once.
//! 3. The producer is busy from `start` until the completion is polled or the
//!    intent is cancelled.

use web_time::{Duration, Instant};

use super::{AnimationConfig, Easing};
use crate::transform::ViewportTransform;

/// What an intent animates; picks its duration and curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Snap back after a gesture.
    Settle,
    /// Zoom toggle or double-tap zoom.
    Zoom,
    /// Slide to a neighbor.
    PageTurn,
    /// Fly-in on open.
    Open,
    /// Fade/fly-out on dismiss.
    Close,
}

/// A transition for the presentation layer to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationIntent {
    pub kind: AnimationKind,
    pub from: ViewportTransform,
    pub target: ViewportTransform,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
    /// Paint `from` for one frame before starting the transition.
    pub commit_start_frame: bool,
}

impl AnimationIntent {
    /// Eased transform at linear `progress` in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, progress: f64) -> ViewportTransform {
        self.from.lerp(&self.target, self.easing.apply(progress))
    }

    /// Linear progress at `now`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased transform at `now`.
    #[must_use]
    pub fn sample_at(&self, now: Instant) -> ViewportTransform {
        self.sample(self.progress_at(now))
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.started_at + self.duration
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    kind: AnimationKind,
    deadline: Instant,
}

/// Builds intents from the configuration and owns the busy flag.
#[derive(Debug, Clone, Default)]
pub struct AnimationIntentProducer {
    config: AnimationConfig,
    in_flight: Option<InFlight>,
}

impl AnimationIntentProducer {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnimationConfig) {
        self.config = config;
    }

    /// Duration and easing for `kind`.
    #[must_use]
    pub fn timing(&self, kind: AnimationKind) -> (Duration, Easing) {
        let c = &self.config;
        match kind {
            AnimationKind::Settle => (c.settle, c.release_easing),
            AnimationKind::Zoom => (c.settle, c.settle_easing),
            AnimationKind::PageTurn => (c.page_turn, c.page_turn_easing),
            AnimationKind::Open => (c.open, c.open_easing),
            AnimationKind::Close => (c.close, c.close_easing),
        }
    }

    /// Start an intent and mark the producer busy until it completes.
    pub fn start(
        &mut self,
        kind: AnimationKind,
        from: ViewportTransform,
        target: ViewportTransform,
        now: Instant,
    ) -> AnimationIntent {
        let (duration, easing) = self.timing(kind);
        let intent = AnimationIntent {
            kind,
            from,
            target,
            started_at: now,
            duration,
            easing,
            commit_start_frame: kind == AnimationKind::Open,
        };
        self.in_flight = Some(InFlight {
            kind,
            deadline: intent.deadline(),
        });
        intent
    }

    /// An intent is in flight.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<AnimationKind> {
        self.in_flight.map(|f| f.kind)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.in_flight.map(|f| f.deadline)
    }

    /// Report the kind of the in-flight intent once its duration has passed.
    pub fn poll(&mut self, now: Instant) -> Option<AnimationKind> {
        let flight = self.in_flight?;
        if now < flight.deadline {
            return None;
        }
        self.in_flight = None;
        Some(flight.kind)
    }

    /// Drop the in-flight intent without reporting completion.
    pub fn cancel(&mut self) -> Option<AnimationKind> {
        self.in_flight.take().map(|f| f.kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

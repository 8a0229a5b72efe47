#![forbid(unsafe_code)]

//! Live set of active pointer contacts.
//!
//! [`PointerTracker`] keeps the latest sample for every pointer that is down,
//! keyed by [`PointerId`]. It derives the centroid and span used by pan and
//! pinch, and owns the *pinch baseline*: the reference centroid and span that
//! the next move is measured against.
//!
//! # Invariants
//!
//! 1. Each pointer id appears at most once.
//! 2. The baseline is recaptured every time the pointer count changes (add or
//!    remove), not only at gesture start. Otherwise lifting one of two fingers
//!    makes the remaining finger jump by half the previous span.
//! 3. The session start (position + time) is recorded on the `0 → 1`
//!    transition and cleared when the last pointer lifts.
//!
//! # Failure Modes
//!
//! - Removing an untracked id is a no-op and reports `false`.
//! - Updating an untracked id via [`PointerTracker::update`] is ignored.

use web_time::Instant;

use crate::event::{PointerId, PointerSample};
use crate::geometry::{self, Point};

/// Reference centroid and span captured at the last pointer-count change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    pub centroid: Point,
    pub span: f64,
}

/// Where and when the current contact session began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactStart {
    pub pos: Point,
    pub time: Instant,
}

/// Active pointer set with derived centroid/span.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    samples: Vec<PointerSample>,
    baseline: Option<PinchBaseline>,
    start: Option<ContactStart>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(4),
            baseline: None,
            start: None,
        }
    }

    /// Insert a new pointer or move an existing one.
    ///
    /// Returns `true` when the pointer was newly added (count changed).
    pub fn add_or_update(&mut self, sample: PointerSample, now: Instant) -> bool {
        if let Some(existing) = self.samples.iter_mut().find(|s| s.id == sample.id) {
            existing.pos = sample.pos;
            return false;
        }
        if self.samples.is_empty() {
            self.start = Some(ContactStart {
                pos: sample.pos,
                time: now,
            });
        }
        self.samples.push(sample);
        self.recapture_baseline();
        true
    }

    /// Move an already-tracked pointer. Returns `false` for unknown ids.
    pub fn update(&mut self, sample: PointerSample) -> bool {
        match self.samples.iter_mut().find(|s| s.id == sample.id) {
            Some(existing) => {
                existing.pos = sample.pos;
                true
            }
            None => false,
        }
    }

    /// Drop a pointer. Returns `false` when the id was not tracked.
    pub fn remove(&mut self, id: PointerId) -> bool {
        let before = self.samples.len();
        self.samples.retain(|s| s.id != id);
        if self.samples.len() == before {
            return false;
        }
        if self.samples.is_empty() {
            self.baseline = None;
            self.start = None;
        } else {
            self.recapture_baseline();
        }
        true
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.baseline = None;
        self.start = None;
    }

    #[must_use]
    pub fn active(&self) -> &[PointerSample] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.samples.iter().any(|s| s.id == id)
    }

    /// Centroid of the active pointers.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        geometry::centroid(&self.positions())
    }

    /// Spread of the active pointers (0 with fewer than two).
    #[must_use]
    pub fn span(&self) -> f64 {
        geometry::span(&self.positions())
    }

    #[must_use]
    pub fn baseline(&self) -> Option<PinchBaseline> {
        self.baseline
    }

    /// Advance the baseline to the current centroid/span after a move has
    /// been applied.
    pub fn advance_baseline(&mut self) {
        self.recapture_baseline();
    }

    #[must_use]
    pub fn contact_start(&self) -> Option<ContactStart> {
        self.start
    }

    fn positions(&self) -> Vec<Point> {
        self.samples.iter().map(|s| s.pos).collect()
    }

    fn recapture_baseline(&mut self) {
        self.baseline = self.centroid().map(|centroid| PinchBaseline {
            centroid,
            span: self.span(),
        });
    }
}

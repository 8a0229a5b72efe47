#![forbid(unsafe_code)]

//! Navigation: current index, the slide window, and the gesture-end decision.
//!
//! # Gesture-end decision
//!
//! Evaluated on release with no pointers left, in this order:
//!
//! 1. `scale < 1`: snap back to rest.
//! 2. `scale > 1 + ε`: stay zoomed.
//! 3. Otherwise `|pan_y| > dismiss_distance` dismisses, `pan_x` past
//!    `-swipe_fraction · width` navigates forward (if a next item exists),
//!    past `+swipe_fraction · width` navigates backward (if a previous item
//!    exists), and anything else snaps back.
//!
//! # Commit protocol
//!
//! ```text
//!   Idle ──begin(dir)──▶ SlidingOut ──complete()──▶ (recycle slots) ──▶ Idle
//! ```
//!
//! The slide-out is timed by the page-turn animation; [`NavigationController::complete`]
//! is called once, when that animation finishes, and performs the recycle
//! synchronously.
//!
//! # Invariants
//!
//! 1. `index < count` whenever `count > 0`.
//! 2. The window's current slot is bound to `index`.
//! 3. At most one navigation is in flight.

use lumen_core::ViewportTransform;
use tracing::debug;

use crate::slide_window::SlideWindow;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Release thresholds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-files", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config-files", serde(default))]
pub struct NavigationConfig {
    /// Vertical pan (pixels) beyond which release dismisses (default: 60).
    pub dismiss_distance: f64,
    /// Horizontal pan, as a fraction of viewport width, that commits a page
    /// turn (default: 0.12).
    pub swipe_fraction: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            dismiss_distance: 60.0,
            swipe_fraction: 0.12,
        }
    }
}

impl NavigationConfig {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.dismiss_distance > 0.0 && self.dismiss_distance.is_finite()) {
            errors.push(format!(
                "navigation.dismiss_distance must be positive, got {}",
                self.dismiss_distance
            ));
        }
        if !(self.swipe_fraction > 0.0 && self.swipe_fraction < 1.0) {
            errors.push(format!(
                "navigation.swipe_fraction must be in (0, 1), got {}",
                self.swipe_fraction
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Navigation direction through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// Horizontal sign of the slide-out: forward moves the stage left.
    #[must_use]
    pub const fn slide_sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// What a release commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDecision {
    SnapBack,
    StayZoomed,
    Dismiss,
    Navigate(Direction),
}

/// Inputs to [`decide_release`] besides the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseContext {
    pub viewport_width: f64,
    pub has_previous: bool,
    pub has_next: bool,
    pub zoom_epsilon: f64,
}

/// Classify the end of a drag or pinch.
#[must_use]
pub fn decide_release(
    transform: ViewportTransform,
    ctx: ReleaseContext,
    config: &NavigationConfig,
) -> ReleaseDecision {
    if transform.scale < 1.0 {
        return ReleaseDecision::SnapBack;
    }
    if transform.scale > 1.0 + ctx.zoom_epsilon {
        return ReleaseDecision::StayZoomed;
    }
    let swipe = ctx.viewport_width * config.swipe_fraction;
    if transform.pan_y.abs() > config.dismiss_distance {
        ReleaseDecision::Dismiss
    } else if transform.pan_x < -swipe && ctx.has_next {
        ReleaseDecision::Navigate(Direction::Forward)
    } else if transform.pan_x > swipe && ctx.has_previous {
        ReleaseDecision::Navigate(Direction::Backward)
    } else {
        ReleaseDecision::SnapBack
    }
}

// ---------------------------------------------------------------------------
// NavigationController
// ---------------------------------------------------------------------------

/// Commit state of the navigation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationPhase {
    #[default]
    Idle,
    SlidingOut { direction: Direction, target: usize },
}

/// Owns the current index and the slide window.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    index: usize,
    count: usize,
    window: SlideWindow,
    phase: NavigationPhase,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn window(&self) -> &SlideWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut SlideWindow {
        &mut self.window
    }

    #[must_use]
    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.count > 0 && self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.count
    }

    /// Index one step away, if it exists.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Backward if self.has_previous() => Some(self.index - 1),
            Direction::Forward if self.has_next() => Some(self.index + 1),
            _ => None,
        }
    }

    /// Position on `index` (clamped) in a catalog of `count` items.
    ///
    /// Returns the clamped index, or `None` when the catalog is empty.
    pub fn open(&mut self, index: usize, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        self.count = count;
        self.index = index.min(last);
        self.phase = NavigationPhase::Idle;
        self.window.materialize(self.index, count);
        debug!(target: "lumen.nav", index = self.index, count, "window materialized");
        Some(self.index)
    }

    /// Start sliding towards the neighbor in `direction`.
    ///
    /// Returns the target index, or `None` at a boundary or while another
    /// navigation is in flight.
    pub fn begin(&mut self, direction: Direction) -> Option<usize> {
        if self.phase != NavigationPhase::Idle {
            return None;
        }
        let target = self.neighbor(direction)?;
        self.phase = NavigationPhase::SlidingOut { direction, target };
        debug!(target: "lumen.nav", ?direction, from = self.index, to = target, "slide out");
        Some(target)
    }

    /// Finish the slide-out: adopt the target index and recycle slots.
    pub fn complete(&mut self) -> Option<(Direction, usize)> {
        let NavigationPhase::SlidingOut { direction, target } = self.phase else {
            return None;
        };
        self.phase = NavigationPhase::Idle;
        self.index = target;
        self.window.recycle(direction, target, self.count);
        debug!(target: "lumen.nav", ?direction, index = target, "slides recycled");
        Some((direction, target))
    }

    /// Drop an in-flight slide without changing the index.
    pub fn abort(&mut self) -> bool {
        let was_sliding = self.phase != NavigationPhase::Idle;
        self.phase = NavigationPhase::Idle;
        was_sliding
    }

    /// Forget the catalog position and unbind all slots.
    pub fn clear(&mut self) {
        self.index = 0;
        self.count = 0;
        self.phase = NavigationPhase::Idle;
        self.window.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#![forbid(unsafe_code)]

//! Tap classification: single tap, double tap, background tap, or drag.
//!
//! Classification is lazy. A pointer-down only decides whether it completes a
//! double tap; everything else waits for pointer-up. A tap on the image is not
//! reported at pointer-up either: it stays pending until the double-tap window
//! expires, so that the first half of a double tap never fires its own action.
//!
//! # State Machine
//!
//! ```text
//!   down ──(< window, < radius, on image)──▶ DoubleTap
//!     │
//!     └─ up ──(moved ≥ slop or multi-touch)──▶ Drag
//!          ├─(outside image)──────────────────▶ BackgroundTap
//!          └─(on image)──▶ pending ──(window expires)──▶ ImageTap
//!                              └──(next down)──▶ DoubleTap (pending dropped)
//! ```
//!
//! # Invariants
//!
//! 1. A down→up pair whose maximum displacement reaches `tap_slop` is never a tap.
//! 2. At most one image tap is pending at a time.
//! 3. A double tap consumes the tap record; a third tap starts fresh.

use web_time::{Duration, Instant};

use crate::geometry::Point;

/// Tap thresholds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TapConfig {
    /// Two downs closer in time than this form a double tap (default: 300ms).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "double_tap_window_ms", with = "crate::serde_ms")
    )]
    pub double_tap_window: Duration,
    /// Two downs closer than this (pixels) form a double tap (default: 30).
    pub double_tap_radius: f64,
    /// Maximum displacement for a down→up pair to stay a tap (default: 30).
    pub tap_slop: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_window: Duration::from_millis(300),
            double_tap_radius: 30.0,
            tap_slop: 30.0,
        }
    }
}

impl TapConfig {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.double_tap_window.is_zero() {
            errors.push("tap.double_tap_window must be non-zero".to_owned());
        }
        if !(self.double_tap_radius > 0.0) {
            errors.push(format!(
                "tap.double_tap_radius must be positive, got {}",
                self.double_tap_radius
            ));
        }
        if !(self.tap_slop > 0.0) {
            errors.push(format!("tap.tap_slop must be positive, got {}", self.tap_slop));
        }
        errors
    }
}

/// Where a completed tap landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapTarget {
    /// The visible (non-letterboxed) part of the current image.
    Image,
    /// Letterbox or stage background.
    Background,
}

/// Decision taken at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DownClassification {
    /// Completes a double tap at this position.
    DoubleTap { pos: Point },
    /// Could still become a tap or a drag.
    Provisional,
}

/// Movement summary of a finished contact session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactMotion {
    /// Largest distance from the start position seen during the session.
    pub max_displacement: f64,
    /// More than one pointer was down at some point.
    pub multi_touch: bool,
}

/// Decision taken at pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpClassification {
    /// Movement disqualified the tap.
    Drag,
    /// Tap outside the visible image: dismiss intent.
    BackgroundTap { pos: Point },
    /// Tap on the image, waiting for the double-tap window to expire.
    PendingImageTap,
}

#[derive(Debug, Clone, Copy)]
struct TapRecord {
    pos: Point,
    time: Instant,
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    pos: Point,
    deadline: Instant,
}

/// Stateful tap classifier.
#[derive(Debug, Clone)]
pub struct TapClassifier {
    config: TapConfig,
    last_down: Option<TapRecord>,
    pending: Option<PendingTap>,
}

impl TapClassifier {
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            last_down: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TapConfig) {
        self.config = config;
    }

    /// First pointer of a contact session went down.
    pub fn on_down(&mut self, pos: Point, on_image: bool, now: Instant) -> DownClassification {
        if let Some(last) = self.last_down
            && on_image
            && now.saturating_duration_since(last.time) < self.config.double_tap_window
            && last.pos.distance(pos) < self.config.double_tap_radius
        {
            self.last_down = None;
            self.pending = None;
            return DownClassification::DoubleTap { pos };
        }
        self.last_down = Some(TapRecord { pos, time: now });
        DownClassification::Provisional
    }

    /// Last pointer of a contact session went up.
    ///
    /// `start` and `on_image` refer to where the session began.
    pub fn on_up(
        &mut self,
        start: Point,
        on_image: bool,
        motion: ContactMotion,
        now: Instant,
    ) -> UpClassification {
        if motion.multi_touch || motion.max_displacement >= self.config.tap_slop {
            // A drag cannot be the first half of a double tap.
            self.last_down = None;
            return UpClassification::Drag;
        }
        if !on_image {
            return UpClassification::BackgroundTap { pos: start };
        }
        let anchor = self.last_down.map_or(now, |r| r.time);
        self.pending = Some(PendingTap {
            pos: start,
            deadline: anchor + self.config.double_tap_window,
        });
        UpClassification::PendingImageTap
    }

    /// Confirm a pending image tap once its double-tap window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Point> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        Some(pending.pos)
    }

    /// Deadline of the pending image tap, if any.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    pub fn reset(&mut self) {
        self.last_down = None;
        self.pending = None;
    }
}

impl Default for TapClassifier {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

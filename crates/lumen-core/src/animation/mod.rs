#![forbid(unsafe_code)]

//! Timing curves and animation intents.
//!
//! The engine never animates anything itself. It decides *where* the
//! transform should end up and hands the presentation layer an
//! [`AnimationIntent`]: start value, target value, duration and easing. This
//! module provides the CSS-style timing curves those intents carry.
//!
//! # Invariants
//!
//! 1. Every easing maps `0 → 0` and `1 → 1`; input outside `[0, 1]` is clamped.
//! 2. [`CubicBezier::solve`] is monotone in its input for control points with
//!    `x1, x2 ∈ [0, 1]` (enforced by [`AnimationConfig::validate`]).

mod intent;

pub use intent::{AnimationIntent, AnimationIntentProducer, AnimationKind};

use web_time::Duration;

// ---------------------------------------------------------------------------
// CubicBezier
// ---------------------------------------------------------------------------

/// A `cubic-bezier(x1, y1, x2, y2)` timing curve anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Gentle deceleration for zoom toggles.
    pub const SETTLE: Self = Self::new(0.2, 0.8, 0.2, 1.0);
    /// Snappier deceleration for snapping back after a gesture.
    pub const RELEASE: Self = Self::new(0.1, 0.9, 0.2, 1.0);
    /// Page turn between neighboring items.
    pub const PAGE_TURN: Self = Self::new(0.22, 1.0, 0.36, 1.0);
    /// Fly-in from a thumbnail.
    pub const OPEN: Self = Self::new(0.19, 1.0, 0.22, 1.0);
    /// Fade/fly-out on dismiss.
    pub const CLOSE: Self = Self::new(0.2, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased output for a linear progress fraction.
    #[must_use]
    pub fn solve(&self, fraction: f64) -> f64 {
        if fraction.is_nan() || fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        let cx = 3.0 * self.x1;
        let bx = 3.0 * (self.x2 - self.x1) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * self.y1;
        let by = 3.0 * (self.y2 - self.y1) - cy;
        let ay = 1.0 - cy - by;

        let t = solve_parameter(ax, bx, cx, fraction);
        sample_curve(ay, by, cy, t)
    }
}

fn sample_curve(a: f64, b: f64, c: f64, t: f64) -> f64 {
    ((a * t + b) * t + c) * t
}

fn sample_derivative(a: f64, b: f64, c: f64, t: f64) -> f64 {
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Find the curve parameter whose x equals `fraction`.
///
/// Newton-Raphson first; bisection when the derivative flattens out.
fn solve_parameter(ax: f64, bx: f64, cx: f64, fraction: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut t = fraction;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < EPSILON {
            return t;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = fraction;
    for _ in 0..32 {
        let delta = sample_curve(ax, bx, cx, t) - fraction;
        if delta.abs() < EPSILON {
            break;
        }
        if delta > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Timing function attached to an intent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    CubicBezier(CubicBezier),
}

impl Easing {
    #[must_use]
    pub fn apply(&self, fraction: f64) -> f64 {
        match self {
            Self::Linear => {
                if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                }
            }
            Self::CubicBezier(curve) => curve.solve(fraction),
        }
    }

    /// CSS `transition-timing-function` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Linear => "linear".to_owned(),
            Self::CubicBezier(c) => format!("cubic-bezier({}, {}, {}, {})", c.x1, c.y1, c.x2, c.y2),
        }
    }

    fn validate(&self, name: &str, errors: &mut Vec<String>) {
        if let Self::CubicBezier(c) = self {
            if !((0.0..=1.0).contains(&c.x1) && (0.0..=1.0).contains(&c.x2)) {
                errors.push(format!(
                    "animation.{name}: x control points must be in [0, 1], got ({}, {})",
                    c.x1, c.x2
                ));
            }
            if !(c.y1.is_finite() && c.y2.is_finite()) {
                errors.push(format!("animation.{name}: y control points must be finite"));
            }
        }
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Self::CubicBezier(curve)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Durations and curves per intent kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Zoom toggles and post-gesture snaps (default: 300ms).
    #[cfg_attr(feature = "serde", serde(rename = "settle_ms", with = "crate::serde_ms"))]
    pub settle: Duration,
    /// Slide to a neighbor (default: 260ms).
    #[cfg_attr(feature = "serde", serde(rename = "page_turn_ms", with = "crate::serde_ms"))]
    pub page_turn: Duration,
    /// Fly-in from a thumbnail (default: 400ms).
    #[cfg_attr(feature = "serde", serde(rename = "open_ms", with = "crate::serde_ms"))]
    pub open: Duration,
    /// Dismiss fade (default: 300ms).
    #[cfg_attr(feature = "serde", serde(rename = "close_ms", with = "crate::serde_ms"))]
    pub close: Duration,
    pub settle_easing: Easing,
    pub release_easing: Easing,
    pub page_turn_easing: Easing,
    pub open_easing: Easing,
    pub close_easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(300),
            page_turn: Duration::from_millis(260),
            open: Duration::from_millis(400),
            close: Duration::from_millis(300),
            settle_easing: CubicBezier::SETTLE.into(),
            release_easing: CubicBezier::RELEASE.into(),
            page_turn_easing: CubicBezier::PAGE_TURN.into(),
            open_easing: CubicBezier::OPEN.into(),
            close_easing: CubicBezier::CLOSE.into(),
        }
    }
}

impl AnimationConfig {
    /// Human-readable violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.settle_easing.validate("settle_easing", &mut errors);
        self.release_easing.validate("release_easing", &mut errors);
        self.page_turn_easing.validate("page_turn_easing", &mut errors);
        self.open_easing.validate("open_easing", &mut errors);
        self.close_easing.validate("close_easing", &mut errors);
        errors
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

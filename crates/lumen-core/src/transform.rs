#![forbid(unsafe_code)]

//! Viewport transform and the engine that mutates it from pan/pinch input.
//!
//! [`ViewportTransform`] is `(pan_x, pan_y, scale)` where `scale` is relative
//! to the item's fit-to-viewport base scale. [`TransformEngine`] owns the live
//! transform during interaction and applies:
//!
//! - **Pinch**: scale by the span ratio, clamped to `[min_scale, max_scale]`,
//!   with pan adjusted so the point under the centroid stays put.
//! - **Pan**: translation with a per-gesture axis lock at rest scale, free
//!   panning while zoomed.
//!
//! # Invariants
//!
//! 1. After every [`TransformEngine::apply_pinch`], `scale` is within
//!    `[min_scale, max_scale]`.
//! 2. While an axis is locked, pans contribute zero on the other axis until
//!    [`TransformEngine::begin_gesture`] is called again.
//! 3. An inward pinch at 1× on an item with no zoom headroom changes nothing.
//!
//! # Failure Modes
//!
//! - A zero or non-finite span (coincident fingers) is ignored.

use crate::geometry::{self, Point, Size};

// ---------------------------------------------------------------------------
// ViewportTransform
// ---------------------------------------------------------------------------

/// Pan offset (pixels from the viewport center) and relative scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::REST
    }
}

impl ViewportTransform {
    /// Centered at 1×.
    pub const REST: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(pan_x: f64, pan_y: f64, scale: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            scale,
        }
    }

    /// Centered at `scale`.
    #[must_use]
    pub const fn centered(scale: f64) -> Self {
        Self::new(0.0, 0.0, scale)
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    #[must_use]
    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }

    /// Linear interpolation towards `to` at progress `t` (clamped to [0, 1]).
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return *to;
        }
        let t = t.max(0.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.pan_x, to.pan_x),
            mix(self.pan_y, to.pan_y),
            mix(self.scale, to.scale),
        )
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Damping applied when dragging towards a side with no neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum EdgeResistance {
    /// Full 1:1 drag everywhere.
    #[default]
    None,
    /// Multiply horizontal movement by `factor` (0..=1) past a missing neighbor.
    Damped { factor: f64 },
}

/// Scale bounds and pan policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// Lower bound during live pinch (default: 0.5).
    pub min_scale: f64,
    /// Hard upper bound on relative zoom (default: 5.0).
    pub max_zoom: f64,
    /// Tolerance around 1× for "at rest" / "zoomed" decisions (default: 0.01).
    pub zoom_epsilon: f64,
    pub edge_resistance: EdgeResistance,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_zoom: 5.0,
            zoom_epsilon: 0.01,
            edge_resistance: EdgeResistance::None,
        }
    }
}

impl TransformConfig {
    /// Human-readable violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            errors.push(format!(
                "transform.min_scale must be in (0, 1], got {}",
                self.min_scale
            ));
        }
        if !(self.max_zoom >= 1.0 && self.max_zoom.is_finite()) {
            errors.push(format!(
                "transform.max_zoom must be finite and >= 1, got {}",
                self.max_zoom
            ));
        }
        if !(self.zoom_epsilon >= 0.0 && self.zoom_epsilon < 0.5) {
            errors.push(format!(
                "transform.zoom_epsilon must be in [0, 0.5), got {}",
                self.zoom_epsilon
            ));
        }
        if let EdgeResistance::Damped { factor } = self.edge_resistance
            && !(0.0..=1.0).contains(&factor)
        {
            errors.push(format!(
                "transform.edge_resistance.factor must be in [0, 1], got {factor}"
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Axis chosen for the current single-pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DragAxis {
    #[default]
    None,
    X,
    Y,
}

/// Which neighbors exist; used by edge resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanEdges {
    pub has_previous: bool,
    pub has_next: bool,
}

/// Two consecutive multi-pointer measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSample {
    pub previous_centroid: Point,
    pub centroid: Point,
    pub previous_span: f64,
    pub span: f64,
}

// ---------------------------------------------------------------------------
// TransformEngine
// ---------------------------------------------------------------------------

/// Owns the live viewport transform and applies pan/pinch deltas to it.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    config: TransformConfig,
    transform: ViewportTransform,
    max_scale: f64,
    axis: DragAxis,
    origin: ViewportTransform,
}

impl TransformEngine {
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            transform: ViewportTransform::REST,
            max_scale: 1.0,
            axis: DragAxis::None,
            origin: ViewportTransform::REST,
        }
    }

    #[inline]
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TransformConfig) {
        self.config = config;
    }

    /// Replace the transform outright (animation targets, resets).
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.transform = transform;
    }

    pub fn reset(&mut self) {
        self.transform = ViewportTransform::REST;
        self.origin = ViewportTransform::REST;
        self.axis = DragAxis::None;
    }

    /// Upper scale bound for the current item.
    #[inline]
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Derive the upper bound from the item's base scale.
    pub fn set_base_scale(&mut self, base_scale: f64) {
        self.max_scale = geometry::max_scale_for(base_scale, self.config.max_zoom);
    }

    /// Zoomed in beyond the rest tolerance.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.transform.scale > 1.0 + self.config.zoom_epsilon
    }

    /// The current item can be zoomed beyond 1×.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.max_scale > 1.0 + self.config.zoom_epsilon
    }

    /// Locked axis for the current gesture.
    #[inline]
    #[must_use]
    pub fn axis(&self) -> DragAxis {
        self.axis
    }

    /// Start a new gesture: clear the axis lock and remember the origin.
    pub fn begin_gesture(&mut self) {
        self.axis = DragAxis::None;
        self.origin = self.transform;
    }

    /// Put the transform back where the gesture started.
    ///
    /// Returns `true` when the transform changed.
    pub fn restore_origin(&mut self) -> bool {
        let changed = self.transform != self.origin;
        self.transform = self.origin;
        changed
    }

    /// Choose the axis lock from the total displacement at drag start.
    ///
    /// Only locks near rest scale; while zoomed both axes stay free.
    pub fn lock_axis(&mut self, total: Point) -> DragAxis {
        self.axis = if self.is_zoomed() {
            DragAxis::None
        } else if total.x.abs() > total.y.abs() {
            DragAxis::X
        } else {
            DragAxis::Y
        };
        self.axis
    }

    /// Apply a single-pointer translation. Returns `true` if the pan moved.
    pub fn apply_pan(&mut self, delta: Point, edges: PanEdges) -> bool {
        let (mut dx, mut dy) = (delta.x, delta.y);
        if !self.is_zoomed() {
            match self.axis {
                DragAxis::X => dy = 0.0,
                DragAxis::Y => dx = 0.0,
                DragAxis::None => {}
            }
            dx = self.resist(dx, edges);
        }
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.transform.pan_x += dx;
        self.transform.pan_y += dy;
        true
    }

    /// Apply one pinch step. Returns `true` if the transform changed.
    pub fn apply_pinch(&mut self, sample: PinchSample, viewport: Size) -> bool {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(sample.previous_span) || !valid(sample.span) {
            return false;
        }
        let raw_factor = sample.span / sample.previous_span;
        let eps = self.config.zoom_epsilon;
        let at_unit = (self.transform.scale - 1.0).abs() <= eps;
        if !self.can_zoom_in() && at_unit && raw_factor < 1.0 {
            return false;
        }

        let upper = self.max_scale.max(self.config.min_scale);
        let old_scale = self.transform.scale;
        let new_scale = (old_scale * raw_factor).clamp(self.config.min_scale, upper);
        let factor = new_scale / old_scale;

        let before = self.transform;
        let moved = sample.centroid - sample.previous_centroid;
        self.transform.pan_x += moved.x;
        self.transform.pan_y += moved.y;

        let offset = geometry::offset_from_center(sample.centroid, viewport);
        self.transform.pan_x -= (offset.x - self.transform.pan_x) * (factor - 1.0);
        self.transform.pan_y -= (offset.y - self.transform.pan_y) * (factor - 1.0);
        self.transform.scale = new_scale;

        self.transform != before
    }

    /// Where the transform should come to rest after release, if it must move.
    ///
    /// Below 1× snaps back to rest; above the item bound snaps to the bound.
    #[must_use]
    pub fn rest_target(&self) -> Option<ViewportTransform> {
        let t = self.transform;
        if t.scale < 1.0 {
            Some(ViewportTransform::REST)
        } else if t.scale > self.max_scale.max(1.0) {
            Some(ViewportTransform::new(t.pan_x, t.pan_y, self.max_scale.max(1.0)))
        } else {
            None
        }
    }

    fn resist(&self, dx: f64, edges: PanEdges) -> f64 {
        let EdgeResistance::Damped { factor } = self.config.edge_resistance else {
            return dx;
        };
        let next_pan = self.transform.pan_x + dx;
        let past_missing_previous = next_pan > 0.0 && !edges.has_previous;
        let past_missing_next = next_pan < 0.0 && !edges.has_next;
        if past_missing_previous || past_missing_next {
            dx * factor
        } else {
            dx
        }
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

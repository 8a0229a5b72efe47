#![forbid(unsafe_code)]

//! Gesture recognition: turns raw pointer events into semantic gestures and a
//! live viewport transform.
//!
//! [`GestureRecognizer`] composes a [`PointerTracker`], a [`TapClassifier`]
//! and a [`TransformEngine`]. Feed it every [`PointerEvent`] through
//! [`process`](GestureRecognizer::process) and call
//! [`poll`](GestureRecognizer::poll) on each tick so that deferred single taps
//! are confirmed once the double-tap window has passed.
//!
//! # State Machine
//!
//! ```text
//!   Idle ──down──▶ Down ──move > pan_threshold──▶ Dragging
//!                   │ └──second pointer──▶ Pinching ◀──second pointer──┘
//!                   └──up──▶ tap classification ──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. `Tap` and `Released` never both emit for the same down → up interaction.
//! 2. A tap never moves the transform. Sub-slop panning is reverted and the
//!    revert is reported as `Transformed`.
//! 3. A double tap cancels the pending single tap and the in-flight pointer
//!    set; the matching up is stale and ignored.
//! 4. A gesture that ever had two or more pointers is never a tap.
//! 5. Tap eligibility uses the maximum displacement seen during the gesture.
//!
//! # Failure Modes
//!
//! - Up/move/cancel for an untracked pointer id is ignored.
//! - Events flagged `on_chrome` are dropped without touching any state.

use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind};
use crate::geometry::{self, Point, Size};
use crate::logging::{debug, trace};
use crate::pointer::PointerTracker;
use crate::tap::{
    ContactMotion, DownClassification, TapClassifier, TapConfig, TapTarget, UpClassification,
};
use crate::transform::{
    DragAxis, PanEdges, PinchSample, TransformConfig, TransformEngine, ViewportTransform,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    pub tap: TapConfig,
    pub transform: TransformConfig,
    /// Single-pointer movement (pixels) before a pan starts (default: 10).
    pub pan_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap: TapConfig::default(),
            transform: TransformConfig::default(),
            pan_threshold: 10.0,
        }
    }
}

impl GestureConfig {
    /// Human-readable violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.tap.validate();
        errors.extend(self.transform.validate());
        if !(self.pan_threshold >= 0.0 && self.pan_threshold.is_finite()) {
            errors.push(format!(
                "gesture.pan_threshold must be finite and >= 0, got {}",
                self.pan_threshold
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Per-call facts the recognizer does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current viewport size; read fresh on every call.
    pub viewport: Size,
    /// Natural size of the current item, once known.
    pub natural: Option<Size>,
    pub edges: PanEdges,
}

impl GestureContext {
    #[must_use]
    pub const fn new(viewport: Size, natural: Option<Size>, edges: PanEdges) -> Self {
        Self {
            viewport,
            natural,
            edges,
        }
    }
}

/// Semantic output of the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Second tap of a double tap landed on the image.
    DoubleTap { pos: Point },
    /// Confirmed single tap.
    Tap { pos: Point, target: TapTarget },
    /// Single-pointer movement crossed the pan threshold.
    PanStart { axis: DragAxis },
    /// A second pointer joined the gesture.
    PinchStart,
    /// The live transform changed.
    Transformed(ViewportTransform),
    /// Every pointer lifted after a drag or pinch.
    Released { transform: ViewportTransform },
    /// The platform cancelled the last pointer of a drag or pinch.
    Cancelled { transform: ViewportTransform },
}

/// Coarse phase of the current contact session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GesturePhase {
    #[default]
    Idle,
    Down,
    Dragging,
    Pinching,
}

/// Transient per-gesture record, reset on first contact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub phase: GesturePhase,
    pub start_centroid: Point,
    pub last_centroid: Point,
    pub last_span: f64,
    pub drag_axis: DragAxis,
    /// The first contact landed outside the visible image.
    pub is_background_tap: bool,
    pub max_displacement: f64,
    pub multi_touch: bool,
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful pointer-to-gesture processor.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    pan_threshold: f64,
    pointers: PointerTracker,
    taps: TapClassifier,
    engine: TransformEngine,
    state: GestureState,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            pan_threshold: config.pan_threshold,
            pointers: PointerTracker::new(),
            taps: TapClassifier::new(config.tap),
            engine: TransformEngine::new(config.transform),
            state: GestureState::default(),
        }
    }

    /// Process one raw pointer event.
    ///
    /// Most events produce zero or one gesture event. A sub-slop tap that
    /// moved the image produces the revert (`Transformed`) before the `Tap`.
    pub fn process(
        &mut self,
        event: &PointerEvent,
        ctx: &GestureContext,
        now: Instant,
    ) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        if event.on_chrome {
            return out;
        }
        match event.kind {
            PointerEventKind::Down => self.on_down(event, ctx, now, &mut out),
            PointerEventKind::Move => self.on_move(event, ctx, &mut out),
            PointerEventKind::Up => self.on_up(event, now, &mut out),
            PointerEventKind::Cancel => self.on_cancel(event, &mut out),
        }
        out
    }

    /// Confirm a deferred single tap on the image. Call on every tick.
    pub fn poll(&mut self, now: Instant) -> Option<GestureEvent> {
        let pos = self.taps.poll(now)?;
        debug!(target: "lumen.gesture", x = pos.x, y = pos.y, "image tap confirmed");
        Some(GestureEvent::Tap {
            pos,
            target: TapTarget::Image,
        })
    }

    /// Drop all pointer and tap state. The transform is left untouched.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.taps.reset();
        self.state = GestureState::default();
    }

    /// At least one pointer is down.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.pointers.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn pointers(&self) -> &PointerTracker {
        &self.pointers
    }

    #[must_use]
    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TransformEngine {
        &mut self.engine
    }

    /// Deadline of the pending single tap, if one is waiting.
    #[must_use]
    pub fn pending_tap_deadline(&self) -> Option<Instant> {
        self.taps.pending_deadline()
    }

    #[must_use]
    pub fn config(&self) -> GestureConfig {
        GestureConfig {
            tap: self.taps.config().clone(),
            transform: self.engine.config().clone(),
            pan_threshold: self.pan_threshold,
        }
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.pan_threshold = config.pan_threshold;
        self.taps.set_config(config.tap);
        self.engine.set_config(config.transform);
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureRecognizer {
    fn on_down(
        &mut self,
        event: &PointerEvent,
        ctx: &GestureContext,
        now: Instant,
        out: &mut Vec<GestureEvent>,
    ) {
        if !self.pointers.add_or_update(event.sample(), now) {
            return;
        }

        if self.pointers.count() > 1 {
            self.state.multi_touch = true;
            self.capture_reference();
            if self.state.phase != GesturePhase::Pinching {
                self.state.phase = GesturePhase::Pinching;
                debug!(target: "lumen.gesture", pointers = self.pointers.count(), "pinch start");
                out.push(GestureEvent::PinchStart);
            }
            return;
        }

        self.engine.begin_gesture();
        let container = geometry::transformed_container(ctx.viewport, &self.engine.transform());
        let on_image = geometry::is_point_on_visible_image(container, ctx.natural, event.pos);
        self.state = GestureState {
            phase: GesturePhase::Down,
            start_centroid: event.pos,
            last_centroid: event.pos,
            last_span: 0.0,
            drag_axis: DragAxis::None,
            is_background_tap: !on_image,
            max_displacement: 0.0,
            multi_touch: false,
        };

        if let DownClassification::DoubleTap { pos } = self.taps.on_down(event.pos, on_image, now) {
            debug!(target: "lumen.gesture", x = pos.x, y = pos.y, "double tap");
            self.pointers.clear();
            self.state = GestureState::default();
            out.push(GestureEvent::DoubleTap { pos });
        }
    }

    fn on_move(&mut self, event: &PointerEvent, ctx: &GestureContext, out: &mut Vec<GestureEvent>) {
        if !self.pointers.update(event.sample()) {
            return;
        }
        let (Some(baseline), Some(centroid)) = (self.pointers.baseline(), self.pointers.centroid())
        else {
            return;
        };

        let changed = if self.pointers.count() > 1 {
            let span = self.pointers.span();
            let sample = PinchSample {
                previous_centroid: baseline.centroid,
                centroid,
                previous_span: baseline.span,
                span,
            };
            self.engine.apply_pinch(sample, ctx.viewport)
        } else {
            self.single_pointer_move(centroid, baseline.centroid, ctx, out)
        };

        self.pointers.advance_baseline();
        self.capture_reference();
        if changed {
            let t = self.engine.transform();
            trace!(target: "lumen.gesture", pan_x = t.pan_x, pan_y = t.pan_y, scale = t.scale, "transform");
            out.push(GestureEvent::Transformed(t));
        }
    }

    /// Returns `true` when the transform moved.
    fn single_pointer_move(
        &mut self,
        centroid: Point,
        previous: Point,
        ctx: &GestureContext,
        out: &mut Vec<GestureEvent>,
    ) -> bool {
        let total = centroid - self.state.start_centroid;
        if !self.state.multi_touch {
            self.state.max_displacement = self.state.max_displacement.max(total.length());
        }
        match self.state.phase {
            GesturePhase::Down => {
                if total.length() <= self.pan_threshold {
                    return false;
                }
                let axis = self.engine.lock_axis(total);
                self.state.drag_axis = axis;
                self.state.phase = GesturePhase::Dragging;
                debug!(target: "lumen.gesture", ?axis, "pan start");
                out.push(GestureEvent::PanStart { axis });
                // Nothing was applied below the threshold; catch up in one step.
                self.engine.apply_pan(total, ctx.edges)
            }
            GesturePhase::Dragging | GesturePhase::Pinching => {
                self.engine.apply_pan(centroid - previous, ctx.edges)
            }
            GesturePhase::Idle => false,
        }
    }

    fn on_up(&mut self, event: &PointerEvent, now: Instant, out: &mut Vec<GestureEvent>) {
        if !self.pointers.remove(event.id) {
            return;
        }
        if !self.pointers.is_empty() {
            self.capture_reference();
            return;
        }

        let motion = ContactMotion {
            max_displacement: self.state.max_displacement,
            multi_touch: self.state.multi_touch,
        };
        let start = self.state.start_centroid;
        let on_image = !self.state.is_background_tap;
        match self.taps.on_up(start, on_image, motion, now) {
            UpClassification::Drag => {
                let transform = self.engine.transform();
                debug!(
                    target: "lumen.gesture",
                    pan_x = transform.pan_x,
                    pan_y = transform.pan_y,
                    scale = transform.scale,
                    "released"
                );
                out.push(GestureEvent::Released { transform });
            }
            UpClassification::BackgroundTap { pos } => {
                self.revert_for_tap(out);
                debug!(target: "lumen.gesture", x = pos.x, y = pos.y, "background tap");
                out.push(GestureEvent::Tap {
                    pos,
                    target: TapTarget::Background,
                });
            }
            UpClassification::PendingImageTap => self.revert_for_tap(out),
        }
        self.state.phase = GesturePhase::Idle;
    }

    fn on_cancel(&mut self, event: &PointerEvent, out: &mut Vec<GestureEvent>) {
        if !self.pointers.remove(event.id) {
            return;
        }
        if !self.pointers.is_empty() {
            self.capture_reference();
            return;
        }
        if matches!(
            self.state.phase,
            GesturePhase::Dragging | GesturePhase::Pinching
        ) {
            out.push(GestureEvent::Cancelled {
                transform: self.engine.transform(),
            });
        }
        self.state.phase = GesturePhase::Idle;
    }

    fn revert_for_tap(&mut self, out: &mut Vec<GestureEvent>) {
        if self.engine.restore_origin() {
            out.push(GestureEvent::Transformed(self.engine.transform()));
        }
    }

    fn capture_reference(&mut self) {
        if let Some(baseline) = self.pointers.baseline() {
            self.state.last_centroid = baseline.centroid;
            self.state.last_span = baseline.span;
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use web_time::Duration;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);
    const MS_40: Duration = Duration::from_millis(40);
    const MS_200: Duration = Duration::from_millis(200);
    const MS_299: Duration = Duration::from_millis(299);
    const MS_300: Duration = Duration::from_millis(300);

    fn ctx_for(natural: Size) -> GestureContext {
        GestureContext::new(
            VIEWPORT,
            Some(natural),
            PanEdges {
                has_previous: true,
                has_next: true,
            },
        )
    }

    fn ctx() -> GestureContext {
        ctx_for(VIEWPORT)
    }

    fn zoomable() -> GestureContext {
        // Base scale 0.25, so the item can zoom to 4×.
        ctx_for(Size::new(4000.0, 3200.0))
    }

    // --- Taps ---

    #[test]
    fn image_tap_is_deferred_until_window_expires() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        assert!(gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t).is_empty());
        assert!(gr.process(&PointerEvent::up(1, 500.0, 400.0), &ctx(), t + MS_40).is_empty());
        assert_eq!(gr.poll(t + MS_299), None);
        assert_eq!(
            gr.poll(t + MS_300),
            Some(GestureEvent::Tap {
                pos: Point::new(500.0, 400.0),
                target: TapTarget::Image,
            })
        );
        assert_eq!(gr.poll(t + MS_300 + MS_300), None);
    }

    #[test]
    fn letterbox_tap_is_background() {
        let mut gr = GestureRecognizer::default();
        let wide = ctx_for(Size::new(2000.0, 800.0));
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 50.0), &wide, t);
        let events = gr.process(&PointerEvent::up(1, 500.0, 50.0), &wide, t + MS_40);
        assert_eq!(
            events,
            vec![GestureEvent::Tap {
                pos: Point::new(500.0, 50.0),
                target: TapTarget::Background,
            }]
        );
    }

    #[test]
    fn double_tap_fires_on_second_down_and_swallows_up() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::up(1, 500.0, 400.0), &ctx(), t + MS_40);
        let events = gr.process(&PointerEvent::down(2, 510.0, 405.0), &ctx(), t + MS_200);
        assert_eq!(
            events,
            vec![GestureEvent::DoubleTap {
                pos: Point::new(510.0, 405.0),
            }]
        );
        assert!(!gr.is_active());
        assert!(gr.process(&PointerEvent::up(2, 510.0, 405.0), &ctx(), t + MS_299).is_empty());
        assert_eq!(gr.poll(t + MS_300 + MS_300), None);
    }

    #[test]
    fn sub_slop_drag_is_a_tap_and_reverts_pan() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        let events = gr.process(&PointerEvent::moved(1, 520.0, 400.0), &ctx(), t);
        assert_eq!(
            events,
            vec![
                GestureEvent::PanStart { axis: DragAxis::X },
                GestureEvent::Transformed(ViewportTransform::new(20.0, 0.0, 1.0)),
            ]
        );
        let events = gr.process(&PointerEvent::up(1, 520.0, 400.0), &ctx(), t + MS_40);
        assert_eq!(
            events,
            vec![GestureEvent::Transformed(ViewportTransform::REST)]
        );
        assert!(gr.engine().transform().is_rest());
    }

    #[test]
    fn drag_that_returns_home_is_still_a_drag() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::moved(1, 560.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::moved(1, 500.0, 400.0), &ctx(), t);
        let events = gr.process(&PointerEvent::up(1, 500.0, 400.0), &ctx(), t + MS_40);
        assert_eq!(
            events,
            vec![GestureEvent::Released {
                transform: ViewportTransform::REST,
            }]
        );
        assert_eq!(gr.poll(t + MS_300 + MS_300), None);
    }

    // --- Pan ---

    #[test]
    fn horizontal_drag_locks_x() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        let events = gr.process(&PointerEvent::moved(1, 515.0, 402.0), &ctx(), t);
        assert_eq!(events[0], GestureEvent::PanStart { axis: DragAxis::X });
        gr.process(&PointerEvent::moved(1, 600.0, 450.0), &ctx(), t);
        let events = gr.process(&PointerEvent::up(1, 600.0, 450.0), &ctx(), t + MS_40);
        assert_eq!(
            events,
            vec![GestureEvent::Released {
                transform: ViewportTransform::new(100.0, 0.0, 1.0),
            }]
        );
        assert_eq!(gr.phase(), GesturePhase::Idle);
    }

    #[test]
    fn movement_below_threshold_does_not_pan() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        assert!(gr.process(&PointerEvent::moved(1, 506.0, 408.0), &ctx(), t).is_empty());
        assert_eq!(gr.phase(), GesturePhase::Down);
        assert_eq!(gr.state().max_displacement, 10.0);
    }

    #[test]
    fn zoomed_drag_pans_freely() {
        let mut gr = GestureRecognizer::default();
        gr.engine_mut().set_base_scale(0.25);
        gr.engine_mut()
            .set_transform(ViewportTransform::centered(2.0));
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &zoomable(), t);
        let events = gr.process(&PointerEvent::moved(1, 540.0, 370.0), &zoomable(), t);
        assert_eq!(
            events,
            vec![
                GestureEvent::PanStart {
                    axis: DragAxis::None
                },
                GestureEvent::Transformed(ViewportTransform::new(40.0, -30.0, 2.0)),
            ]
        );
    }

    // --- Pinch ---

    #[test]
    fn pinch_scales_around_centroid_and_releases() {
        let mut gr = GestureRecognizer::default();
        gr.engine_mut().set_base_scale(0.25);
        let t = Instant::now();
        let c = zoomable();
        assert!(gr.process(&PointerEvent::down(1, 400.0, 400.0), &c, t).is_empty());
        assert_eq!(
            gr.process(&PointerEvent::down(2, 600.0, 400.0), &c, t),
            vec![GestureEvent::PinchStart]
        );
        let events = gr.process(&PointerEvent::moved(2, 800.0, 400.0), &c, t);
        assert_eq!(
            events,
            vec![GestureEvent::Transformed(ViewportTransform::new(
                100.0, 0.0, 2.0
            ))]
        );
        assert!(gr.process(&PointerEvent::up(2, 800.0, 400.0), &c, t).is_empty());
        let events = gr.process(&PointerEvent::up(1, 400.0, 400.0), &c, t + MS_40);
        assert_eq!(
            events,
            vec![GestureEvent::Released {
                transform: ViewportTransform::new(100.0, 0.0, 2.0),
            }]
        );
    }

    #[test]
    fn lifting_one_finger_does_not_jump() {
        let mut gr = GestureRecognizer::default();
        gr.engine_mut().set_base_scale(0.25);
        let t = Instant::now();
        let c = zoomable();
        gr.process(&PointerEvent::down(1, 400.0, 400.0), &c, t);
        gr.process(&PointerEvent::down(2, 600.0, 400.0), &c, t);
        gr.process(&PointerEvent::moved(2, 800.0, 400.0), &c, t);
        gr.process(&PointerEvent::up(2, 800.0, 400.0), &c, t);
        let before = gr.engine().transform();
        let events = gr.process(&PointerEvent::moved(1, 410.0, 400.0), &c, t);
        assert_eq!(
            events,
            vec![GestureEvent::Transformed(ViewportTransform::new(
                before.pan_x + 10.0,
                before.pan_y,
                before.scale
            ))]
        );
    }

    #[test]
    fn pinch_is_never_a_tap() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::down(2, 501.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::up(2, 501.0, 400.0), &ctx(), t);
        let events = gr.process(&PointerEvent::up(1, 500.0, 400.0), &ctx(), t);
        assert!(matches!(events[..], [GestureEvent::Released { .. }]));
        assert_eq!(gr.poll(t + MS_300 + MS_300), None);
    }

    // --- Robustness ---

    #[test]
    fn chrome_events_are_ignored() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        let ev = PointerEvent::down(1, 500.0, 400.0).on_chrome();
        assert!(gr.process(&ev, &ctx(), t).is_empty());
        assert!(!gr.is_active());
    }

    #[test]
    fn stale_up_is_ignored() {
        let mut gr = GestureRecognizer::default();
        assert!(
            gr.process(&PointerEvent::up(9, 1.0, 1.0), &ctx(), Instant::now())
                .is_empty()
        );
        assert_eq!(gr.phase(), GesturePhase::Idle);
    }

    #[test]
    fn cancel_mid_drag_reports_transform() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::moved(1, 500.0, 450.0), &ctx(), t);
        let events = gr.process(&PointerEvent::cancel(1, 500.0, 450.0), &ctx(), t);
        assert_eq!(
            events,
            vec![GestureEvent::Cancelled {
                transform: ViewportTransform::new(0.0, 50.0, 1.0),
            }]
        );
        assert!(!gr.is_active());
    }

    #[test]
    fn reset_clears_pending_tap() {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(1, 500.0, 400.0), &ctx(), t);
        gr.process(&PointerEvent::up(1, 500.0, 400.0), &ctx(), t);
        assert!(gr.pending_tap_deadline().is_some());
        gr.reset();
        assert_eq!(gr.poll(t + MS_300), None);
    }

    #[test]
    fn default_config_values() {
        let config = GestureConfig::default();
        assert_eq!(config.pan_threshold, 10.0);
        assert_eq!(config.tap.double_tap_window, MS_300);
        assert!(config.validate().is_empty());
        let gr = GestureRecognizer::new(config.clone());
        assert_eq!(gr.config(), config);
    }
}

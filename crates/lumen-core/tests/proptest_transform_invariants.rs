//! Property-based invariant tests for the transform engine and recognizer.
//!
//! 1. Live pinch scale stays within `[min_scale, max_scale]` at every step
//! 2. Release snapping lands on `[1, max_scale]`
//! 3. A horizontally locked drag never contributes vertical pan
//! 4. Zoom-to-point keeps the tapped point fixed and returns to exact zero
//! 5. Tap/drag boundary follows the slop exactly
//! 6. No panics on arbitrary pointer streams

use lumen_core::geometry::{self, Point, Size};
use lumen_core::tap::{ContactMotion, TapClassifier, UpClassification};
use lumen_core::transform::PinchSample;
use lumen_core::{
    GestureContext, GestureEvent, GestureRecognizer, Instant, PanEdges, PointerEvent,
    TransformEngine,
};
use proptest::prelude::*;

const VIEWPORT: Size = Size::new(1000.0, 800.0);

// ── Strategies ──────────────────────────────────────────────────────────

fn pinch_strategy() -> impl Strategy<Value = PinchSample> {
    (0.0..1000.0, 0.0..800.0, -40.0..40.0, -40.0..40.0, 1.0..600.0, 1.0..600.0).prop_map(
        |(x, y, dx, dy, previous_span, span)| PinchSample {
            previous_centroid: Point::new(x, y),
            centroid: Point::new(x + dx, y + dy),
            previous_span,
            span,
        },
    )
}

fn context() -> GestureContext {
    GestureContext::new(
        VIEWPORT,
        Some(VIEWPORT),
        PanEdges {
            has_previous: true,
            has_next: true,
        },
    )
}

#[derive(Debug, Clone)]
enum Op {
    Down(u32, f64, f64),
    Move(u32, f64, f64),
    Up(u32, f64, f64),
    Cancel(u32, f64, f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (0u32..3, 0.0..1000.0, 0.0..800.0, 0u8..4).prop_map(|(id, x, y, kind)| match kind {
        0 => Op::Down(id, x, y),
        1 => Op::Move(id, x, y),
        2 => Op::Up(id, x, y),
        _ => Op::Cancel(id, x, y),
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Clamp invariant
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pinch_scale_stays_in_bounds(
        base in 0.05f64..1.5,
        steps in proptest::collection::vec(pinch_strategy(), 1..40),
    ) {
        let mut engine = TransformEngine::default();
        engine.set_base_scale(base);
        let max = engine.max_scale();
        prop_assert!((1.0..=5.0).contains(&max));
        for step in steps {
            engine.apply_pinch(step, VIEWPORT);
            let scale = engine.transform().scale;
            prop_assert!(scale >= 0.5 - 1e-12, "scale {} below floor", scale);
            prop_assert!(scale <= max + 1e-12, "scale {} above {}", scale, max);
        }
        let end = engine.rest_target().unwrap_or(engine.transform());
        prop_assert!(end.scale >= 1.0 && end.scale <= max);
    }

    #[test]
    fn inward_pinch_at_rest_without_headroom_is_inert(
        base in 1.0f64..3.0,
        step in pinch_strategy(),
    ) {
        prop_assume!(step.span < step.previous_span);
        let mut engine = TransformEngine::default();
        engine.set_base_scale(base);
        prop_assert!(!engine.apply_pinch(step, VIEWPORT));
        prop_assert!(engine.transform().is_rest());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Axis lock determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn horizontal_lock_suppresses_vertical_pan(
        first_dx in 11.0f64..80.0,
        ratio in -0.99f64..0.99,
        rest in proptest::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 0..30),
    ) {
        let mut gr = GestureRecognizer::default();
        let ctx = context();
        let now = Instant::now();
        let (mut x, mut y) = (500.0, 400.0);
        gr.process(&PointerEvent::down(1, x, y), &ctx, now);
        x += first_dx;
        y += first_dx * ratio;
        let mut events = gr.process(&PointerEvent::moved(1, x, y), &ctx, now);
        for (dx, dy) in rest {
            x += dx;
            y += dy;
            events.extend(gr.process(&PointerEvent::moved(1, x, y), &ctx, now));
        }
        events.extend(gr.process(&PointerEvent::up(1, x, y), &ctx, now));
        for event in events {
            match event {
                GestureEvent::Transformed(t) | GestureEvent::Released { transform: t } => {
                    prop_assert_eq!(t.pan_y, 0.0);
                    prop_assert_eq!(t.scale, 1.0);
                }
                _ => {}
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Centering round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_to_point_round_trip(
        tx in 0.0f64..1000.0,
        ty in 0.0f64..800.0,
        scale in 1.0f64..5.0,
    ) {
        let tap = Point::new(tx, ty);
        let pan = geometry::zoom_to_point_pan(tap, VIEWPORT, scale);
        let offset = geometry::offset_from_center(tap, VIEWPORT);
        // The image point that was under the tap at rest is still under it.
        prop_assert!((pan.x + scale * offset.x - offset.x).abs() < 1e-9);
        prop_assert!((pan.y + scale * offset.y - offset.y).abs() < 1e-9);
        let back = geometry::zoom_to_point_pan(tap, VIEWPORT, 1.0);
        prop_assert_eq!(back, Point::ORIGIN);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Tap/drag boundary
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn displacement_below_slop_is_a_tap(d in 0.0f64..29.999) {
        let mut taps = TapClassifier::default();
        let now = Instant::now();
        taps.on_down(Point::ORIGIN, false, now);
        let motion = ContactMotion { max_displacement: d, multi_touch: false };
        let is_background_tap = matches!(
            taps.on_up(Point::ORIGIN, false, motion, now),
            UpClassification::BackgroundTap { .. }
        );
        prop_assert!(is_background_tap);
    }

    #[test]
    fn displacement_at_or_above_slop_is_a_drag(d in 30.0f64..500.0) {
        let mut taps = TapClassifier::default();
        let now = Instant::now();
        taps.on_down(Point::ORIGIN, true, now);
        let motion = ContactMotion { max_displacement: d, multi_touch: false };
        prop_assert_eq!(taps.on_up(Point::ORIGIN, true, motion, now), UpClassification::Drag);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Arbitrary streams
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_streams_keep_scale_bounded(
        base in 0.1f64..1.0,
        ops in proptest::collection::vec(op_strategy(), 0..80),
    ) {
        let mut gr = GestureRecognizer::default();
        gr.engine_mut().set_base_scale(base);
        let max = gr.engine().max_scale();
        let ctx = context();
        let now = Instant::now();
        for op in ops {
            let event = match op {
                Op::Down(id, x, y) => PointerEvent::down(id, x, y),
                Op::Move(id, x, y) => PointerEvent::moved(id, x, y),
                Op::Up(id, x, y) => PointerEvent::up(id, x, y),
                Op::Cancel(id, x, y) => PointerEvent::cancel(id, x, y),
            };
            gr.process(&event, &ctx, now);
            let scale = gr.engine().transform().scale;
            prop_assert!(scale >= 0.5 - 1e-12 && scale <= max + 1e-12);
            prop_assert!(gr.pointers().count() <= 3);
        }
    }
}

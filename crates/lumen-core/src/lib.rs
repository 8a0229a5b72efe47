#![forbid(unsafe_code)]

//! Core: pointer tracking, tap classification, and the viewport-transform engine.
//!
//! # Role in Lumen
//! `lumen-core` is the deterministic half of the media viewer. It turns a raw
//! multi-pointer input stream into semantic gestures and a continuously
//! updated viewport transform, and it describes (but never runs) the
//! animations that settle that transform.
//!
//! # Primary responsibilities
//! - **Geometry**: centroid/span, contain-fit hit testing, base/max scale.
//! - **PointerTracker**: live pointer set and the pinch baseline.
//! - **TapClassifier**: tap, double tap, background tap, or drag.
//! - **TransformEngine**: pinch and pan with axis lock and scale bounds.
//! - **GestureRecognizer**: the three above composed into one processor.
//! - **Animation**: timing curves and the intent producer with its busy flag.
//!
//! # How it fits in the system
//! `lumen-viewer` owns the session, navigation and catalog, and feeds
//! `lumen-core` with pointer events, the viewport size and the current item's
//! natural size. Nothing here reads a clock: every time-dependent call takes
//! an explicit `now`.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod pointer;
pub mod tap;
pub mod transform;

#[cfg(feature = "serde")]
pub mod serde_ms;

pub use animation::{
    AnimationConfig, AnimationIntent, AnimationIntentProducer, AnimationKind, CubicBezier, Easing,
};
pub use event::{KeyCode, PointerEvent, PointerEventKind, PointerId, PointerSample};
pub use geometry::{Point, Rect, Size};
pub use gesture::{GestureConfig, GestureContext, GestureEvent, GesturePhase, GestureRecognizer};
pub use tap::TapTarget;
pub use transform::{DragAxis, EdgeResistance, PanEdges, TransformEngine, ViewportTransform};

// Re-exported so downstream crates name one `Instant`/`Duration` on every target.
pub use web_time::{Duration, Instant};

#![forbid(unsafe_code)]

//! The viewer session: one overlay, its lifecycle, and the intents it emits.
//!
//! [`ViewerSession`] owns the catalog, the gesture recognizer (and through it
//! the live transform), the navigation controller with its slide window, the
//! animation producer, and the deferred teardown and activation suppression.
//! Every command returns the [`ViewerIntent`]s the presentation layer must
//! carry out, in order.
//!
//! # Lifecycle
//!
//! ```text
//!   new ──init──▶ ready ──open──▶ open ──close──▶ closing ──teardown──▶ ready
//!                   ▲                               │
//!                   └────────────dispose────────────┴──open (cancels teardown)
//! ```
//!
//! # Timing
//!
//! Nothing here owns a timer. The host calls [`ViewerSession::tick`] on each
//! frame (or at [`ViewerSession::next_deadline`]); it completes animations,
//! recycles slides after a page turn, fires the close teardown, and confirms
//! pending single taps.
//!
//! # Invariants
//!
//! 1. `current_index < item_count` whenever the session is open.
//! 2. The slide window's current slot is bound to the current index.
//! 3. At most one animation is in flight; while one is, pointer input and
//!    navigation commands are dropped.
//! 4. An `open` during the close delay cancels the pending teardown.
//! 5. A gesture that dismisses the overlay still suppresses the synthetic
//!    activation that follows it; only `open` disarms the suppression early.
//!
//! # Failure Modes
//!
//! - Commands before [`init`](ViewerSession::init) or after
//!   [`dispose`](ViewerSession::dispose) are ignored and logged at `warn`.
//! - Out-of-range indices are clamped on open; navigation past either end
//!   settles the transform back to rest instead.
//! - Missing natural sizes fall back to full-viewport hit testing and a base
//!   scale of 1.

use lumen_core::geometry;
use lumen_core::{
    AnimationIntent, AnimationIntentProducer, AnimationKind, GestureContext, GestureEvent,
    GestureRecognizer, Instant, KeyCode, PanEdges, Point, PointerEvent, PointerEventKind, Rect,
    Size, TapTarget, ViewportTransform,
};
use tracing::{debug, trace, warn};

use crate::config::ViewerConfig;
use crate::deferred::{ActivationSuppressor, Deferred};
use crate::error::{Result, ViewerError};
use crate::media::{AssetState, MediaCatalog};
use crate::navigation::{
    Direction, NavigationController, ReleaseContext, ReleaseDecision, decide_release,
};
use crate::slide_window::SlotPlacement;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Work for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerIntent {
    /// Lock or restore page scrolling behind the overlay.
    ScrollLock { locked: bool },
    /// Apply the transform immediately, without a transition.
    SetTransform(ViewportTransform),
    /// Run a transition.
    AnimateTo(AnimationIntent),
    /// A page turn started; slides move one viewport width.
    CommitNavigation { direction: Direction, target: usize },
    /// The page turn finished and slot roles rotated.
    SlidesRecycled { direction: Direction, index: usize },
    /// The overlay is closing; an `AnimateTo(Close)` follows.
    CommitDismiss,
    /// The close delay passed; slots were unbound.
    TeardownComplete,
    /// Start loading the full-resolution asset of the current item.
    LoadFullResolution { index: usize },
    /// Warm up a neighbor's asset.
    Preload { index: usize },
}

/// Read-only view for one render tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSnapshot {
    pub is_open: bool,
    pub current_index: usize,
    pub item_count: usize,
    pub transform: ViewportTransform,
    pub is_animating: bool,
    pub can_zoom_in: bool,
    pub is_zoomed: bool,
    pub has_previous: bool,
    pub has_next: bool,
    /// Arrow affordances are visible (hidden while zoomed).
    pub show_arrows: bool,
    pub placements: [SlotPlacement; 3],
}

// ---------------------------------------------------------------------------
// ViewerSession
// ---------------------------------------------------------------------------

/// Top-level aggregate of one media overlay.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    initialized: bool,
    config: ViewerConfig,
    catalog: MediaCatalog,
    is_open: bool,
    gestures: GestureRecognizer,
    animations: AnimationIntentProducer,
    navigation: NavigationController,
    teardown: Deferred<()>,
    activation: ActivationSuppressor,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerSession {
    /// An uninitialized session. Call [`init`](Self::init) before use.
    #[must_use]
    pub fn new() -> Self {
        let config = ViewerConfig::default();
        Self {
            initialized: false,
            gestures: GestureRecognizer::new(config.gesture.clone()),
            animations: AnimationIntentProducer::new(config.animation.clone()),
            activation: ActivationSuppressor::new(config.activation_suppression),
            config,
            catalog: MediaCatalog::default(),
            is_open: false,
            navigation: NavigationController::new(),
            teardown: Deferred::new(),
        }
    }

    /// Validate `config` and adopt it along with `catalog`.
    pub fn init(&mut self, config: ViewerConfig, catalog: MediaCatalog) -> Result<()> {
        let config = config.checked()?;
        self.gestures.set_config(config.gesture.clone());
        self.animations.set_config(config.animation.clone());
        self.activation.set_window(config.activation_suppression);
        self.config = config;
        self.catalog = catalog;
        self.initialized = true;
        debug!(target: "lumen.session", items = self.catalog.len(), "initialized");
        Ok(())
    }

    /// Drop all state and return to uninitialized.
    ///
    /// Releases the scroll lock if the overlay was open.
    pub fn dispose(&mut self) -> Vec<ViewerIntent> {
        let was_open = self.is_open;
        *self = Self::new();
        debug!(target: "lumen.session", was_open, "disposed");
        if was_open {
            vec![ViewerIntent::ScrollLock { locked: false }]
        } else {
            Vec::new()
        }
    }

    /// Swap the catalog while closed.
    ///
    /// Returns `Ok(false)` (catalog untouched) while the overlay is open.
    pub fn replace_catalog(&mut self, catalog: MediaCatalog) -> Result<bool> {
        if !self.initialized {
            return Err(ViewerError::NotInitialized);
        }
        if self.is_open {
            debug!(target: "lumen.session", "catalog replacement deferred: open");
            return Ok(false);
        }
        self.teardown_now();
        self.catalog = catalog;
        debug!(target: "lumen.session", items = self.catalog.len(), "catalog replaced");
        Ok(true)
    }

    // -- Queries ------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animations.is_busy()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigation.index()
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.gestures.engine().transform()
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.animations.deadline(),
            self.teardown.deadline(),
            self.gestures.pending_tap_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    #[must_use]
    pub fn snapshot(&self, viewport: Size) -> ViewerSnapshot {
        let engine = self.gestures.engine();
        let transform = engine.transform();
        let is_zoomed = engine.is_zoomed();
        ViewerSnapshot {
            is_open: self.is_open,
            current_index: self.navigation.index(),
            item_count: self.catalog.len(),
            transform,
            is_animating: self.animations.is_busy(),
            can_zoom_in: engine.can_zoom_in(),
            is_zoomed,
            has_previous: self.navigation.has_previous(),
            has_next: self.navigation.has_next(),
            show_arrows: self.is_open && !is_zoomed,
            placements: self
                .navigation
                .window()
                .placements(transform, viewport.width, is_zoomed),
        }
    }

    /// Whether a synthetic activation (click) arriving now must be swallowed.
    pub fn consume_activation(&mut self, now: Instant) -> bool {
        let swallowed = self.activation.consume(now);
        if swallowed {
            trace!(target: "lumen.session", "activation suppressed");
        }
        swallowed
    }

    // -- Asset lifecycle ------------------------------------------------------

    /// Record a finished full-resolution load.
    pub fn asset_loaded(&mut self, index: usize, natural: Option<Size>, viewport: Size) -> bool {
        if let Some(size) = natural {
            self.catalog.set_natural_size(index, size);
        }
        if !self.catalog.mark_loaded(index) {
            return false;
        }
        self.navigation
            .window_mut()
            .sync_load_state(index, AssetState::Loaded);
        if self.is_open {
            self.sync_window(viewport);
        }
        debug!(target: "lumen.session", index, "asset loaded");
        true
    }

    /// Record a failed load. The item keeps its thumbnail.
    pub fn asset_failed(&mut self, index: usize) -> bool {
        if !self.catalog.mark_failed(index) {
            return false;
        }
        self.navigation
            .window_mut()
            .sync_load_state(index, AssetState::Failed);
        debug!(target: "lumen.session", index, "asset failed; keeping thumbnail");
        true
    }

    // -- Commands -------------------------------------------------------------

    /// Open the overlay on `index` (clamped).
    ///
    /// With `origin` (the thumbnail's on-screen rect) the stage flies in from
    /// it; otherwise it appears at rest.
    pub fn open(
        &mut self,
        index: usize,
        origin: Option<Rect>,
        viewport: Size,
        now: Instant,
    ) -> Vec<ViewerIntent> {
        if !self.initialized {
            warn!(target: "lumen.session", index, "open ignored: session not initialized");
            return Vec::new();
        }
        if self.is_open {
            debug!(target: "lumen.session", index, "open ignored: already open");
            return Vec::new();
        }
        let Some(index) = self.navigation.open(index, self.catalog.len()) else {
            debug!(target: "lumen.session", "open ignored: empty catalog");
            return Vec::new();
        };
        if self.teardown.cancel().is_some() {
            debug!(target: "lumen.session", "pending teardown cancelled");
        }
        self.animations.cancel();
        self.gestures.reset();
        self.gestures.engine_mut().reset();
        self.activation.clear();
        self.is_open = true;
        self.sync_window(viewport);
        debug!(target: "lumen.session", index, items = self.catalog.len(), "opened");

        let mut out = vec![ViewerIntent::ScrollLock { locked: true }];
        let thumb = origin.filter(|r| !r.size().is_degenerate() && !viewport.is_degenerate());
        match thumb {
            Some(thumb) => {
                let offset = thumb.center() - viewport.center();
                let from = ViewportTransform::new(offset.x, offset.y, thumb.width / viewport.width);
                out.push(self.animate(AnimationKind::Open, from, ViewportTransform::REST, now));
            }
            None => out.push(ViewerIntent::SetTransform(ViewportTransform::REST)),
        }
        self.push_loads(&mut out);
        out
    }

    /// Dismiss: closed immediately, teardown after the configured delay.
    pub fn close(&mut self, now: Instant) -> Vec<ViewerIntent> {
        if !self.is_open {
            return Vec::new();
        }
        self.is_open = false;
        self.gestures.reset();
        self.navigation.abort();
        self.animations.cancel();
        let from = self.transform();
        let close = self.animate(AnimationKind::Close, from, from, now);
        self.teardown.schedule((), now + self.config.teardown_delay);
        debug!(
            target: "lumen.session",
            index = self.navigation.index(),
            teardown_ms = self.config.teardown_delay.as_millis() as u64,
            "closing"
        );
        vec![
            ViewerIntent::CommitDismiss,
            close,
            ViewerIntent::ScrollLock { locked: false },
        ]
    }

    /// Step to the neighbor in `direction`.
    ///
    /// At either end this only settles the transform back to rest.
    pub fn change_index(
        &mut self,
        direction: Direction,
        viewport: Size,
        now: Instant,
    ) -> Vec<ViewerIntent> {
        if !self.accepts_commands("change_index") {
            return Vec::new();
        }
        let from = self.transform();
        if let Some(out) = self.slide(direction, from, viewport, now) {
            return out;
        }
        debug!(target: "lumen.nav", ?direction, index = self.navigation.index(), "at boundary");
        if from.is_rest() {
            Vec::new()
        } else {
            vec![self.animate(AnimationKind::Settle, from, ViewportTransform::REST, now)]
        }
    }

    /// Zoom to the item's max scale, or back to rest when zoomed.
    pub fn toggle_zoom(&mut self, viewport: Size, now: Instant) -> Vec<ViewerIntent> {
        if !self.accepts_commands("toggle_zoom") {
            return Vec::new();
        }
        self.sync_window(viewport);
        let engine = self.gestures.engine();
        let from = engine.transform();
        let target = if engine.is_zoomed() {
            ViewportTransform::REST
        } else if engine.can_zoom_in() {
            ViewportTransform::centered(engine.max_scale())
        } else {
            trace!(target: "lumen.session", "toggle_zoom: no headroom");
            return Vec::new();
        };
        vec![self.animate(AnimationKind::Zoom, from, target, now)]
    }

    /// Feed one pointer event.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        viewport: Size,
        now: Instant,
    ) -> Vec<ViewerIntent> {
        if !self.is_open || event.on_chrome {
            return Vec::new();
        }
        if self.animations.is_busy() {
            trace!(target: "lumen.session", kind = ?event.kind, "pointer dropped: animating");
            return Vec::new();
        }
        let mut out = Vec::new();
        // An expired image tap must be confirmed before the next contact
        // starts, or the new tap would overwrite it.
        if event.kind == PointerEventKind::Down
            && let Some(gesture) = self.gestures.poll(now)
        {
            self.apply_gesture(gesture, viewport, now, &mut out);
            if !self.is_open || self.animations.is_busy() {
                return out;
            }
        }
        self.sync_window(viewport);
        let ctx = GestureContext::new(viewport, self.current_natural(), self.edges());
        let events = self.gestures.process(event, &ctx, now);
        for gesture in events {
            self.apply_gesture(gesture, viewport, now, &mut out);
        }
        out
    }

    /// Feed one key press. Only acted on while open.
    pub fn handle_key(&mut self, key: KeyCode, viewport: Size, now: Instant) -> Vec<ViewerIntent> {
        if !self.is_open {
            return Vec::new();
        }
        match key {
            KeyCode::Escape => self.close(now),
            KeyCode::ArrowLeft => self.change_index(Direction::Backward, viewport, now),
            KeyCode::ArrowRight => self.change_index(Direction::Forward, viewport, now),
            KeyCode::Other => Vec::new(),
        }
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, viewport: Size, now: Instant) -> Vec<ViewerIntent> {
        let mut out = Vec::new();
        if let Some(kind) = self.animations.poll(now) {
            debug!(target: "lumen.anim", ?kind, "animation complete");
            if kind == AnimationKind::PageTurn {
                self.finish_navigation(viewport, &mut out);
            }
        }
        if self.teardown.poll(now).is_some() {
            self.teardown_now();
            out.push(ViewerIntent::TeardownComplete);
        }
        if let Some(gesture) = self.gestures.poll(now)
            && self.is_open
        {
            self.apply_gesture(gesture, viewport, now, &mut out);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

impl ViewerSession {
    fn accepts_commands(&self, command: &'static str) -> bool {
        if !self.initialized {
            warn!(target: "lumen.session", command, "ignored: session not initialized");
            return false;
        }
        if !self.is_open {
            return false;
        }
        if self.animations.is_busy() {
            trace!(target: "lumen.session", command, "ignored: animating");
            return false;
        }
        true
    }

    fn current_natural(&self) -> Option<Size> {
        self.catalog
            .get(self.navigation.index())
            .and_then(|item| item.natural_size())
    }

    fn edges(&self) -> PanEdges {
        PanEdges {
            has_previous: self.navigation.has_previous(),
            has_next: self.navigation.has_next(),
        }
    }

    /// Recompute slot base scales and the current item's zoom bound.
    fn sync_window(&mut self, viewport: Size) {
        let window = self.navigation.window_mut();
        window.sync(&self.catalog, viewport);
        let base = window.current().base_scale;
        self.gestures.engine_mut().set_base_scale(base);
    }

    /// Start an intent. The engine jumps to the target and any gesture in
    /// progress is dropped.
    fn animate(
        &mut self,
        kind: AnimationKind,
        from: ViewportTransform,
        target: ViewportTransform,
        now: Instant,
    ) -> ViewerIntent {
        let intent = self.animations.start(kind, from, target, now);
        self.gestures.engine_mut().set_transform(target);
        self.gestures.reset();
        debug!(
            target: "lumen.anim",
            ?kind,
            duration_ms = intent.duration.as_millis() as u64,
            pan_x = target.pan_x,
            pan_y = target.pan_y,
            scale = target.scale,
            "animate"
        );
        ViewerIntent::AnimateTo(intent)
    }

    /// Begin a page turn towards `direction`, or `None` at a boundary.
    fn slide(
        &mut self,
        direction: Direction,
        from: ViewportTransform,
        viewport: Size,
        now: Instant,
    ) -> Option<Vec<ViewerIntent>> {
        let target = self.navigation.begin(direction)?;
        let off_screen = ViewportTransform::new(direction.slide_sign() * viewport.width, 0.0, 1.0);
        let turn = self.animate(AnimationKind::PageTurn, from, off_screen, now);
        Some(vec![
            ViewerIntent::CommitNavigation { direction, target },
            turn,
        ])
    }

    fn finish_navigation(&mut self, viewport: Size, out: &mut Vec<ViewerIntent>) {
        let Some((direction, index)) = self.navigation.complete() else {
            return;
        };
        self.gestures.engine_mut().reset();
        self.sync_window(viewport);
        out.push(ViewerIntent::SlidesRecycled { direction, index });
        out.push(ViewerIntent::SetTransform(ViewportTransform::REST));
        self.push_loads(out);
    }

    fn teardown_now(&mut self) {
        if self.is_open {
            return;
        }
        self.teardown.cancel();
        self.navigation.clear();
        self.gestures.reset();
        self.gestures.engine_mut().reset();
        debug!(target: "lumen.session", "teardown complete");
    }

    /// Full-resolution load for the current item, preload for its neighbors.
    /// Settled items are skipped; failures are not retried.
    fn push_loads(&self, out: &mut Vec<ViewerIntent>) {
        let pending = |index: usize| {
            self.catalog
                .get(index)
                .is_some_and(|item| item.load_state() == AssetState::Pending)
        };
        let index = self.navigation.index();
        if pending(index) {
            out.push(ViewerIntent::LoadFullResolution { index });
        }
        for direction in [Direction::Backward, Direction::Forward] {
            if let Some(neighbor) = self.navigation.neighbor(direction)
                && pending(neighbor)
            {
                out.push(ViewerIntent::Preload { index: neighbor });
            }
        }
    }

    fn apply_gesture(
        &mut self,
        gesture: GestureEvent,
        viewport: Size,
        now: Instant,
        out: &mut Vec<ViewerIntent>,
    ) {
        match gesture {
            GestureEvent::Transformed(t) => out.push(ViewerIntent::SetTransform(t)),
            GestureEvent::PanStart { axis } => {
                trace!(target: "lumen.session", ?axis, "pan start");
            }
            GestureEvent::PinchStart => trace!(target: "lumen.session", "pinch start"),
            GestureEvent::Tap {
                target: TapTarget::Background,
                ..
            } => {
                // The overlay is gone before the synthetic click lands.
                self.activation.suppress(now);
                out.extend(self.close(now));
            }
            GestureEvent::Tap {
                target: TapTarget::Image,
                ..
            } => out.extend(self.toggle_zoom(viewport, now)),
            GestureEvent::DoubleTap { pos } => {
                self.activation.suppress(now);
                out.extend(self.zoom_to_point(pos, viewport, now));
            }
            GestureEvent::Released { transform } => {
                self.activation.suppress(now);
                out.extend(self.release(transform, viewport, now));
            }
            GestureEvent::Cancelled { transform } => {
                if !self.gestures.engine().is_zoomed() && !transform.is_rest() {
                    out.push(self.animate(
                        AnimationKind::Settle,
                        transform,
                        ViewportTransform::REST,
                        now,
                    ));
                }
            }
        }
    }

    /// Double tap: back to rest when zoomed, else zoom around `pos`.
    fn zoom_to_point(&mut self, pos: Point, viewport: Size, now: Instant) -> Vec<ViewerIntent> {
        let engine = self.gestures.engine();
        let from = engine.transform();
        let target = if engine.is_zoomed() {
            ViewportTransform::REST
        } else if engine.can_zoom_in() {
            let scale = engine.max_scale();
            let pan = geometry::zoom_to_point_pan(pos, viewport, scale);
            ViewportTransform::new(pan.x, pan.y, scale)
        } else {
            return Vec::new();
        };
        vec![self.animate(AnimationKind::Zoom, from, target, now)]
    }

    fn release(
        &mut self,
        transform: ViewportTransform,
        viewport: Size,
        now: Instant,
    ) -> Vec<ViewerIntent> {
        let ctx = ReleaseContext {
            viewport_width: viewport.width,
            has_previous: self.navigation.has_previous(),
            has_next: self.navigation.has_next(),
            zoom_epsilon: self.config.gesture.transform.zoom_epsilon,
        };
        let decision = decide_release(transform, ctx, &self.config.navigation);
        debug!(
            target: "lumen.nav",
            ?decision,
            pan_x = transform.pan_x,
            pan_y = transform.pan_y,
            scale = transform.scale,
            "release decided"
        );
        match decision {
            ReleaseDecision::SnapBack if transform.is_rest() => Vec::new(),
            ReleaseDecision::SnapBack => vec![self.animate(
                AnimationKind::Settle,
                transform,
                ViewportTransform::REST,
                now,
            )],
            ReleaseDecision::StayZoomed => match self.gestures.engine().rest_target() {
                Some(target) => vec![self.animate(AnimationKind::Settle, transform, target, now)],
                None => Vec::new(),
            },
            ReleaseDecision::Dismiss => self.close(now),
            ReleaseDecision::Navigate(direction) => self
                .slide(direction, transform, viewport, now)
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Duration;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn catalog(n: usize) -> MediaCatalog {
        MediaCatalog::from_links((0..n).map(|i| (format!("img{i}.jpg"), None)))
    }

    fn session(n: usize) -> ViewerSession {
        let mut s = ViewerSession::new();
        s.init(ViewerConfig::default(), catalog(n))
            .expect("default config is valid");
        s
    }

    #[test]
    fn commands_before_init_are_ignored() {
        let mut s = ViewerSession::new();
        assert!(s.open(0, None, VIEWPORT, Instant::now()).is_empty());
        assert!(!s.is_open());
        assert!(matches!(
            s.replace_catalog(catalog(2)),
            Err(ViewerError::NotInitialized)
        ));
    }

    #[test]
    fn init_rejects_invalid_config() {
        let mut s = ViewerSession::new();
        let mut config = ViewerConfig::default();
        config.navigation.dismiss_distance = -1.0;
        assert!(matches!(
            s.init(config, catalog(1)),
            Err(ViewerError::InvalidConfig(_))
        ));
        assert!(!s.is_initialized());
    }

    #[test]
    fn open_clamps_and_requests_loads() {
        let mut s = session(3);
        let out = s.open(9, None, VIEWPORT, Instant::now());
        assert_eq!(
            out,
            vec![
                ViewerIntent::ScrollLock { locked: true },
                ViewerIntent::SetTransform(ViewportTransform::REST),
                ViewerIntent::LoadFullResolution { index: 2 },
                ViewerIntent::Preload { index: 1 },
            ]
        );
        assert_eq!(s.current_index(), 2);
        assert!(s.open(0, None, VIEWPORT, Instant::now()).is_empty());
    }

    #[test]
    fn open_on_empty_catalog_is_ignored() {
        let mut s = session(0);
        assert!(s.open(0, None, VIEWPORT, Instant::now()).is_empty());
        assert!(!s.is_open());
    }

    #[test]
    fn open_from_thumbnail_flies_in() {
        let mut s = session(1);
        let t0 = Instant::now();
        let thumb = Rect::new(100.0, 100.0, 200.0, 100.0);
        let out = s.open(0, Some(thumb), VIEWPORT, t0);
        let Some(ViewerIntent::AnimateTo(intent)) = out.get(1).copied() else {
            panic!("expected open animation, got {out:?}");
        };
        assert_eq!(intent.kind, AnimationKind::Open);
        assert_eq!(intent.from, ViewportTransform::new(-300.0, -250.0, 0.2));
        assert_eq!(intent.target, ViewportTransform::REST);
        assert!(intent.commit_start_frame);
        assert!(s.is_animating());
        assert!(s.tick(VIEWPORT, t0 + ms(400)).is_empty());
        assert!(!s.is_animating());
    }

    #[test]
    fn toggle_zoom_round_trip() {
        let mut s = session(1);
        let t0 = Instant::now();
        s.open(0, None, VIEWPORT, t0);
        s.asset_loaded(0, Some(Size::new(2000.0, 1600.0)), VIEWPORT);
        let out = s.toggle_zoom(VIEWPORT, t0);
        let [ViewerIntent::AnimateTo(intent)] = out.as_slice() else {
            panic!("expected zoom, got {out:?}");
        };
        assert_eq!(intent.target, ViewportTransform::centered(2.0));
        assert!(s.toggle_zoom(VIEWPORT, t0).is_empty(), "busy while animating");
        s.tick(VIEWPORT, t0 + ms(300));
        assert!(s.snapshot(VIEWPORT).is_zoomed);
        assert!(!s.snapshot(VIEWPORT).show_arrows);
        let out = s.toggle_zoom(VIEWPORT, t0 + ms(301));
        assert!(matches!(
            out.as_slice(),
            [ViewerIntent::AnimateTo(intent)] if intent.target.is_rest()
        ));
    }

    #[test]
    fn toggle_zoom_without_headroom_is_noop() {
        let mut s = session(1);
        let t0 = Instant::now();
        s.open(0, None, VIEWPORT, t0);
        s.asset_loaded(0, Some(Size::new(500.0, 400.0)), VIEWPORT);
        assert!(s.toggle_zoom(VIEWPORT, t0).is_empty());
        assert!(!s.snapshot(VIEWPORT).can_zoom_in);
    }

    #[test]
    fn failed_asset_is_settled_not_promoted() {
        let mut s = session(2);
        s.open(0, None, VIEWPORT, Instant::now());
        assert!(s.asset_failed(0));
        let current = s.navigation().window().current().clone();
        assert!(current.loaded);
        assert!(!current.full_resolution);
        assert!(!s.asset_failed(5));
    }

    #[test]
    fn replace_catalog_only_while_closed() {
        let mut s = session(2);
        s.open(0, None, VIEWPORT, Instant::now());
        assert!(!s.replace_catalog(catalog(4)).expect("initialized"));
        assert_eq!(s.catalog().len(), 2);
        s.close(Instant::now());
        assert!(s.replace_catalog(catalog(4)).expect("initialized"));
        assert_eq!(s.catalog().len(), 4);
    }

    #[test]
    fn dispose_releases_scroll_lock() {
        let mut s = session(2);
        s.open(1, None, VIEWPORT, Instant::now());
        assert_eq!(s.dispose(), vec![ViewerIntent::ScrollLock { locked: false }]);
        assert!(!s.is_initialized());
        assert!(s.dispose().is_empty());
    }

    #[test]
    fn keys_only_while_open() {
        let mut s = session(3);
        let t0 = Instant::now();
        assert!(s.handle_key(KeyCode::Escape, VIEWPORT, t0).is_empty());
        s.open(0, None, VIEWPORT, t0);
        assert!(s.handle_key(KeyCode::Other, VIEWPORT, t0).is_empty());
        let out = s.handle_key(KeyCode::ArrowRight, VIEWPORT, t0);
        assert_eq!(
            out.first(),
            Some(&ViewerIntent::CommitNavigation {
                direction: Direction::Forward,
                target: 1
            })
        );
    }

    #[test]
    fn next_deadline_tracks_earliest_timer() {
        let mut s = session(2);
        let t0 = Instant::now();
        assert_eq!(s.next_deadline(), None);
        s.open(0, None, VIEWPORT, t0);
        s.close(t0);
        assert_eq!(s.next_deadline(), Some(t0 + ms(300)));
    }
}

#![forbid(unsafe_code)]

//! Geometric primitives in client-pixel space.
//!
//! Everything here is a pure function of its inputs. The viewport is the
//! full-screen stage; its center is the origin that pan offsets are measured
//! from.
//!
//! # Invariants
//!
//! 1. [`contain_fit`] always returns a rect inside (or equal to) its container.
//! 2. [`base_scale`] is in `(0, 1]`; unknown natural size yields `1.0`.
//! 3. [`max_scale_for`] is in `[1, max_zoom]`.
//!
//! # Failure Modes
//!
//! - Degenerate natural sizes (zero or non-finite) are treated as unknown.
//! - An empty pointer slice has no centroid and a span of `0.0`.

use crate::transform::ViewportTransform;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Length of the vector from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or not finite.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Center of a rect of this size anchored at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect anchored at the origin with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Rect of `size` centered on `center`.
    #[must_use]
    pub fn centered_on(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point membership, edges inclusive.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

// ---------------------------------------------------------------------------
// Pointer aggregates
// ---------------------------------------------------------------------------

/// Mean position of a set of pointers.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
    Some(Point::new(sum.x / n, sum.y / n))
}

/// Spread of a set of pointers.
///
/// Twice the mean distance to the centroid, which is exactly the inter-pointer
/// distance for two pointers and degrades smoothly for three or more.
#[must_use]
pub fn span(points: &[Point]) -> f64 {
    let Some(center) = centroid(points) else {
        return 0.0;
    };
    if points.len() < 2 {
        return 0.0;
    }
    if let [a, b] = points {
        return a.distance(*b);
    }
    let mean = points.iter().map(|p| p.distance(center)).sum::<f64>() / points.len() as f64;
    mean * 2.0
}

// ---------------------------------------------------------------------------
// Fit and scale
// ---------------------------------------------------------------------------

fn known_size(natural: Option<Size>) -> Option<Size> {
    natural.filter(|s| !s.is_degenerate())
}

/// The "contain"-fit rect of an image of `natural` size inside `container`.
///
/// The image is scaled uniformly to fit and centered, so one axis may be
/// letterboxed.
#[must_use]
pub fn contain_fit(container: Rect, natural: Size) -> Rect {
    if natural.is_degenerate() {
        return container;
    }
    let scale = (container.width / natural.width).min(container.height / natural.height);
    let fitted = Size::new(natural.width * scale, natural.height * scale);
    Rect::centered_on(container.center(), fitted)
}

/// Whether `point` lands on the visible (non-letterboxed) part of the image.
///
/// Falls back to the full container bounds when the natural size is unknown.
#[must_use]
pub fn is_point_on_visible_image(container: Rect, natural: Option<Size>, point: Point) -> bool {
    match known_size(natural) {
        Some(size) => contain_fit(container, size).contains(point),
        None => container.contains(point),
    }
}

/// Fit-to-viewport factor: how much the natural image is shrunk at scale 1.
///
/// Never exceeds 1 (small images are not enlarged). Unknown size yields 1.
#[must_use]
pub fn base_scale(viewport: Size, natural: Option<Size>) -> f64 {
    let Some(size) = known_size(natural) else {
        return 1.0;
    };
    if viewport.is_degenerate() {
        return 1.0;
    }
    (viewport.width / size.width)
        .min(viewport.height / size.height)
        .min(1.0)
}

/// Largest relative scale for an item: zoom up to natural pixel size, capped.
#[must_use]
pub fn max_scale_for(base_scale: f64, max_zoom: f64) -> f64 {
    if !(base_scale.is_finite() && base_scale > 0.0) {
        return 1.0;
    }
    (1.0 / base_scale).clamp(1.0, max_zoom.max(1.0))
}

// ---------------------------------------------------------------------------
// Centering
// ---------------------------------------------------------------------------

/// Offset of `point` from the viewport center.
#[must_use]
pub fn offset_from_center(point: Point, viewport: Size) -> Point {
    point - viewport.center()
}

/// Pan that keeps `point` fixed on screen when zooming from rest to `target_scale`.
///
/// `-(offset_from_center) * (target_scale - 1)` on each axis. At
/// `target_scale == 1` this is exactly zero.
#[must_use]
pub fn zoom_to_point_pan(point: Point, viewport: Size, target_scale: f64) -> Point {
    let offset = offset_from_center(point, viewport);
    let k = target_scale - 1.0;
    // `0.0 - x` instead of `-x` keeps exact zero positive at k == 0.
    Point::new(0.0 - offset.x * k, 0.0 - offset.y * k)
}

/// The on-screen rect of the stage container under `transform`.
///
/// The container fills the viewport at rest and is scaled around its center
/// then translated by the pan.
#[must_use]
pub fn transformed_container(viewport: Size, transform: &ViewportTransform) -> Rect {
    let center = viewport.center() + Point::new(transform.pan_x, transform.pan_y);
    let size = Size::new(
        viewport.width * transform.scale,
        viewport.height * transform.scale,
    );
    Rect::centered_on(center, size)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

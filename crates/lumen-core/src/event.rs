#![forbid(unsafe_code)]

//! Canonical input events consumed by the gesture engine.
//!
//! Hosts translate their native pointer/keyboard events into these types.
//! Coordinates are client pixels.

use crate::geometry::Point;

/// Host-assigned identifier of one contact (finger, pen, mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// Latest known position of one active contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub pos: Point,
}

impl PointerSample {
    #[must_use]
    pub const fn new(id: PointerId, pos: Point) -> Self {
        Self { id, pos }
    }
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub id: PointerId,
    pub pos: Point,
    /// Target is a primary UI control (close, arrows, zoom). Such events
    /// bypass the gesture engine entirely.
    pub on_chrome: bool,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, id: u32, x: f64, y: f64) -> Self {
        Self {
            kind,
            id: PointerId(id),
            pos: Point::new(x, y),
            on_chrome: false,
        }
    }

    #[must_use]
    pub const fn down(id: u32, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, id, x, y)
    }

    #[must_use]
    pub const fn moved(id: u32, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, id, x, y)
    }

    #[must_use]
    pub const fn up(id: u32, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, id, x, y)
    }

    #[must_use]
    pub const fn cancel(id: u32, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Cancel, id, x, y)
    }

    /// Mark the event as targeting UI chrome (builder pattern).
    #[must_use]
    pub const fn on_chrome(mut self) -> Self {
        self.on_chrome = true;
        self
    }

    #[must_use]
    pub const fn sample(&self) -> PointerSample {
        PointerSample::new(self.id, self.pos)
    }
}

/// Keys the viewer reacts to. Everything else maps to [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#![forbid(unsafe_code)]

//! Three-slot slide window: previous, current, next.
//!
//! Slots have stable [`SlotId`]s so the presentation layer can keep one
//! reusable node per slot. Navigation moves slots between roles instead of
//! rebuilding them, and only the slot that wraps around to the new edge is
//! rebound to a different item.
//!
//! # Invariants
//!
//! 1. The three slot ids are always `{0, 1, 2}`, each held by exactly one role.
//! 2. After [`SlideWindow::materialize`] or [`SlideWindow::recycle`] for
//!    `index`, the current slot is bound to `index` and its neighbors to
//!    `index ± 1` when those exist.
//! 3. Rebinding a slot to a different item resets its load flags.

use lumen_core::geometry;
use lumen_core::{Size, ViewportTransform};

use crate::media::{AssetState, MediaCatalog};
use crate::navigation::Direction;

/// Stable identity of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u8);

/// Position of a slot relative to the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Previous,
    Current,
    Next,
}

/// One slot's binding.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSlot {
    pub id: SlotId,
    /// Bound item; `None` past either end of the catalog.
    pub index: Option<usize>,
    /// Fit-to-viewport factor of the bound item.
    pub base_scale: f64,
    /// Loading settled (spinner hidden).
    pub loaded: bool,
    /// The full-resolution asset replaced the thumbnail.
    pub full_resolution: bool,
}

impl SlideSlot {
    fn empty(id: u8) -> Self {
        Self {
            id: SlotId(id),
            index: None,
            base_scale: 1.0,
            loaded: false,
            full_resolution: false,
        }
    }

    fn bind(&mut self, index: Option<usize>) {
        if self.index == index {
            return;
        }
        self.index = index;
        self.base_scale = 1.0;
        self.loaded = false;
        self.full_resolution = false;
    }
}

/// Where the presentation layer should draw one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub id: SlotId,
    pub role: SlotRole,
    pub index: Option<usize>,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub visible: bool,
}

/// Previous/current/next slots with rotating roles.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideWindow {
    previous: SlideSlot,
    current: SlideSlot,
    next: SlideSlot,
}

impl Default for SlideWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideWindow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous: SlideSlot::empty(0),
            current: SlideSlot::empty(1),
            next: SlideSlot::empty(2),
        }
    }

    #[must_use]
    pub fn previous(&self) -> &SlideSlot {
        &self.previous
    }

    #[must_use]
    pub fn current(&self) -> &SlideSlot {
        &self.current
    }

    #[must_use]
    pub fn next(&self) -> &SlideSlot {
        &self.next
    }

    #[must_use]
    pub fn slot(&self, role: SlotRole) -> &SlideSlot {
        match role {
            SlotRole::Previous => &self.previous,
            SlotRole::Current => &self.current,
            SlotRole::Next => &self.next,
        }
    }

    /// Slots in `[previous, current, next]` order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotRole, &SlideSlot)> {
        [
            (SlotRole::Previous, &self.previous),
            (SlotRole::Current, &self.current),
            (SlotRole::Next, &self.next),
        ]
        .into_iter()
    }

    /// Bind all three slots around `index`.
    pub fn materialize(&mut self, index: usize, count: usize) {
        self.current.bind(Some(index));
        self.bind_neighbors(index, count);
    }

    /// Rotate roles after navigating to `index` in `direction`.
    ///
    /// The incoming neighbor becomes current without being rebound; the slot
    /// leaving on the trailing side wraps around to the newly exposed edge.
    pub fn recycle(&mut self, direction: Direction, index: usize, count: usize) {
        match direction {
            Direction::Forward => {
                // [p, c, n] -> [c, n, p]
                std::mem::swap(&mut self.previous, &mut self.current);
                std::mem::swap(&mut self.current, &mut self.next);
            }
            Direction::Backward => {
                // [p, c, n] -> [n, p, c]
                std::mem::swap(&mut self.next, &mut self.current);
                std::mem::swap(&mut self.current, &mut self.previous);
            }
        }
        self.current.bind(Some(index));
        self.bind_neighbors(index, count);
    }

    /// Unbind every slot.
    pub fn clear(&mut self) {
        for slot in [&mut self.previous, &mut self.current, &mut self.next] {
            slot.bind(None);
        }
    }

    /// Refresh base scales and load flags from the catalog.
    pub fn sync(&mut self, catalog: &MediaCatalog, viewport: Size) {
        for slot in [&mut self.previous, &mut self.current, &mut self.next] {
            let Some(item) = slot.index.and_then(|i| catalog.get(i)) else {
                continue;
            };
            slot.base_scale = geometry::base_scale(viewport, item.natural_size());
            slot.loaded = item.load_state().is_settled();
            slot.full_resolution = item.load_state() == AssetState::Loaded;
        }
    }

    /// Refresh load flags for one item without touching base scales.
    pub fn sync_load_state(&mut self, index: usize, state: AssetState) {
        for slot in [&mut self.previous, &mut self.current, &mut self.next] {
            if slot.index == Some(index) {
                slot.loaded = state.is_settled();
                slot.full_resolution = state == AssetState::Loaded;
            }
        }
    }

    /// Placements under `transform`: current follows the transform, neighbors
    /// sit one viewport width to either side and hide while zoomed.
    #[must_use]
    pub fn placements(
        &self,
        transform: ViewportTransform,
        viewport_width: f64,
        zoomed: bool,
    ) -> [SlotPlacement; 3] {
        let neighbor = |role: SlotRole, slot: &SlideSlot, dx: f64| SlotPlacement {
            id: slot.id,
            role,
            index: slot.index,
            x: transform.pan_x + dx,
            y: 0.0,
            scale: 1.0,
            visible: slot.index.is_some() && !zoomed,
        };
        [
            neighbor(SlotRole::Previous, &self.previous, -viewport_width),
            SlotPlacement {
                id: self.current.id,
                role: SlotRole::Current,
                index: self.current.index,
                x: transform.pan_x,
                y: transform.pan_y,
                scale: transform.scale,
                visible: self.current.index.is_some(),
            },
            neighbor(SlotRole::Next, &self.next, viewport_width),
        ]
    }

    fn bind_neighbors(&mut self, index: usize, count: usize) {
        self.previous.bind(index.checked_sub(1));
        let next = index + 1;
        self.next.bind((next < count).then_some(next));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

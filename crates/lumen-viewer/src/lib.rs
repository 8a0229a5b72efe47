#![forbid(unsafe_code)]

//! Viewer: the session aggregate around the `lumen-core` gesture engine.
//!
//! # Role in Lumen
//! `lumen-viewer` turns commands (open, close, navigate, zoom), pointer and
//! key input, and timer ticks into an ordered list of [`ViewerIntent`]s for a
//! presentation layer to carry out. It never touches a DOM, a clock or a
//! decoder; the host supplies the viewport size, `now`, and asset load
//! outcomes.
//!
//! # Primary responsibilities
//! - **MediaCatalog**: ordered items, natural sizes, load state.
//! - **SlideWindow**: three recycled slots around the current item.
//! - **NavigationController**: current index, release decision, page turns.
//! - **ViewerSession**: lifecycle, busy gating, deferred teardown, and click
//!   suppression.
//! - **ViewerConfig**: every tunable as data, optionally loaded from TOML/JSON
//!   with the `config-files` feature.
//!
//! # Logging
//! Events are emitted with `tracing` under the targets `lumen.session`,
//! `lumen.nav` and `lumen.anim` (plus `lumen.gesture` from the core). No
//! subscriber is installed here.

pub mod config;
pub mod deferred;
pub mod error;
pub mod media;
pub mod navigation;
pub mod session;
pub mod slide_window;

pub use config::ViewerConfig;
pub use deferred::{ActivationSuppressor, Deferred};
pub use error::{Result, ViewerError};
pub use media::{AssetState, MediaCatalog, MediaItem};
pub use navigation::{Direction, NavigationConfig, NavigationController, ReleaseDecision};
pub use session::{ViewerIntent, ViewerSession, ViewerSnapshot};
pub use slide_window::{SlideSlot, SlideWindow, SlotId, SlotPlacement, SlotRole};

pub use lumen_core;

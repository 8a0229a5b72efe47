#![forbid(unsafe_code)]

//! Logging macros that compile away when the `tracing` feature is off.
//!
//! Modules import `debug`/`trace` from here instead of from `tracing`
//! directly, so the engine builds with zero logging dependencies.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    pub(crate) use debug;
    pub(crate) use trace;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, trace};

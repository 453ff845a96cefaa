//! Conditional logging macros.
//!
//! With the `tracing` feature enabled these re-export the `tracing` macros, so
//! editor operations show up under whatever subscriber the front end installs.
//! Without it they expand to nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, info, warn};

//! Filesystem utilities.
//!
//! Provides the atomic file write used by the config writer so a failed
//! write never leaves a half-written file observable at the target path.

pub mod atomic;

pub use atomic::atomic_write;

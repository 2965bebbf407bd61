//! Pure build-configuration logic.
//!
//! Everything here is deterministic and free of I/O: the same inputs always
//! produce the same argument lists, flag strings, and decisions.

pub mod args;
pub mod env;
pub mod flags;
pub mod mode;
pub mod platform;
pub mod version;

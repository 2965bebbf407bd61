//! Side-effecting operations: manifest loading, process spawning, toolchain
//! verification.

pub mod manifest;
pub mod process;
pub mod toolchain;

//! Configuration management for the checkpoint crates.
//!
//! Provides environment detection, configuration loading from YAML files,
//! secret handling, and the shared configuration types used by the position
//! store and its binaries.

mod environment;
mod load;
mod secret;
pub mod shared;

pub use environment::*;
pub use load::*;
pub use secret::*;

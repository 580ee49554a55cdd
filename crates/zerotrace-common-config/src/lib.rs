//! Configuration types for zerotrace.
//!
//! This crate provides the configuration types used by zerotrace
//! for `.zerotrace/config.yaml` files.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

//! zerotrace CLI Library
//!
//! Command dispatch and presentation for the `zerotrace` binary. The directive
//! engine itself lives in `zerotrace-directive`; this crate only reads it,
//! renders it and writes files.

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod render;
pub mod templates;

pub use error::CliError;

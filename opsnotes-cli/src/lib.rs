//! Library half of the `opsnotes` binary.
//!
//! Argument types, command handlers and logging setup live here so they can
//! be exercised without spawning the binary.

/// Command-line argument definitions.
pub mod cli;
/// Command handlers.
pub mod commands;
/// Error types for the binary.
pub mod errors;
/// Tracing subscriber setup.
pub mod logging;

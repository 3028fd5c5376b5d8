//! Shared helpers for command implementations.

pub mod logging;

pub use logging::initialize_logging;

//! Display models for CLI output
//!
//! Converts API types into the rows and records the CLI prints.

pub mod display;

pub use display::AppDisplay;

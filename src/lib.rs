//! DRAWODDS — card draw odds for replace-mechanic card games
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod simulator;
pub mod report;
pub mod prompt;

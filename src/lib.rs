//! DICE: Over/Under dice betting game
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod engine;
pub mod history;
pub mod session;
pub mod feedback;
pub mod shell;
pub mod dashboard;

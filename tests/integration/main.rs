//! Integration tests for DICE.
//!
//! Drive the public API end to end: session rounds, shell commands and
//! the dashboard router, all with scripted draws.

mod scripted_source;
mod session_flow;
mod shell_flow;
mod dashboard_flow;

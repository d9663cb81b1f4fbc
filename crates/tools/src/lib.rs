//! Operator tooling for the artist attribution engine.
//!
//! The `p100-tools` binary reports on character artwork credits, traces
//! filename extraction, checks and seeds the artist table, and watches
//! artist change notifications.

pub mod cli;
pub mod commands;
pub mod config;
pub mod roster;

//! Drill loading, ranking, linking, and the end-to-end sync workflow.
//!
//! This crate ties together repository discovery, drill parsing, and
//! document editing into a single `run_sync` call.

pub mod drill;
pub mod link;
pub mod pipeline;
pub mod rank;

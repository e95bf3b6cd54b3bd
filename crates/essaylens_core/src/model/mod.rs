//! Structured units produced by the parsers.
//!
//! # Responsibility
//! - Define the addressable essay/feedback units handed to orchestration.
//! - Keep wire naming aligned with what downstream consumers read.
//!
//! # Invariants
//! - Every unit carries a 1-based integer id, dense within one parse result.
//! - Units are immutable snapshots; a re-parse replaces them wholesale.

pub mod feedback;
pub mod segment;

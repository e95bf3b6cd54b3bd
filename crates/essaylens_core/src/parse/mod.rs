//! Deterministic text parsers.
//!
//! # Responsibility
//! - Segment essays into sentences and rubric feedback into blocks.
//! - Classify feedback blocks with keyword-table heuristics.
//!
//! # Invariants
//! - Every entry point is a pure function of its input text.
//! - Parsers never fail; unusable input produces empty output.

pub mod essay;
pub mod feedback;
pub mod heuristics;

//! Orchestration-side state built on top of the parsers.
//!
//! # Responsibility
//! - Cache parse results per work index with explicit "computed" checks.
//! - Hold collaborator mapping results and derive checklist matrices.
//!
//! # Invariants
//! - Parsers stay stateless; every cache lives in a caller-owned value.
//! - A work is re-parsed only after explicit invalidation.

pub mod cache;
pub mod checklist;

pub use cache::{FeedbackEntry, ParsedWork, WorkCache, WorkIndex};
pub use checklist::{
    checklist_items, checklist_satisfaction_counts, essay_checklist_rows,
    feedback_checklist_rows, sort_checklist, ChecklistCell, ChecklistCounts, ChecklistItem,
    ChecklistOrder, EssayChecklistCell, EssayChecklistRow, FeedbackChecklistRow,
    RankedChecklistItem,
};

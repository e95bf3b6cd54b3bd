//! Feedback block model.
//!
//! # Invariants
//! - `id` values are dense over emitted blocks; dropped candidates never
//!   consume an id.
//! - `text` is never empty.
//! - `has_body == false` implies `is_low_info == true`.

use serde::{Deserialize, Serialize};

/// Integer id of one feedback block inside a single extraction result.
pub type FeedbackId = u32;

/// One rubric-item comment extracted from raw feedback text.
///
/// Serialized with camelCase keys (`hasBody`, `isLowInfo`, ...) to match the
/// shape consumed by the matrix and mapping layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBlock {
    pub id: FeedbackId,
    /// Heading line stripped from the block; empty when none was detected.
    pub title: String,
    /// Cleaned body with markdown list markers removed.
    pub text: String,
    /// True when the source block had content beyond its heading line.
    pub has_body: bool,
    /// Too short or too generic to carry actionable content.
    pub is_low_info: bool,
    pub is_negative: bool,
    pub is_positive: bool,
}

impl FeedbackBlock {
    /// Returns whether a heading line was detected for this block.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

//! Essay segment model.
//!
//! # Invariants
//! - `id` is assigned in document order starting at 1.
//! - `text` is trimmed and never empty.

use serde::{Deserialize, Serialize};

/// Integer id of one essay segment inside a single parse result.
pub type SegmentId = u32;

/// One sentence-level unit of an essay.
///
/// Consumers sometimes call these "paragraphs" even though a segment is
/// usually a single sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssaySegment {
    pub id: SegmentId,
    /// Sentence text with its terminal punctuation attached.
    pub text: String,
}

/// Envelope returned by essay segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEssay {
    /// Segments in document order, ids `1..=len`.
    pub segments: Vec<EssaySegment>,
}

impl ParsedEssay {
    /// Returns whether segmentation produced nothing.
    ///
    /// Callers treat an empty result as a signal to fall back, e.g. skip
    /// mapping for this work.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Looks up one segment by id.
    pub fn segment(&self, id: SegmentId) -> Option<&EssaySegment> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.segments.get(index)
    }
}

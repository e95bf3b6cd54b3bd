//! Payload contracts for the feedback-to-paragraph mapping collaborator.
//!
//! # Responsibility
//! - Build the `{ paragraphs, feedback_items }` request from parsed units.
//! - Decode the `{ mappings: [...] }` response shape.
//!
//! # Invariants
//! - Request ids are copied verbatim from parser output.
//! - Response ids are not cross-checked against the parsed id spaces.
//!
//! Transport is someone else's job; this module only shapes JSON.

use crate::model::feedback::{FeedbackBlock, FeedbackId};
use crate::model::segment::{EssaySegment, SegmentId};
use crate::workspace::ParsedWork;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Checklist item id (`C{id}` in the UI).
pub type ChecklistId = u32;

/// Error raised while decoding a collaborator response.
#[derive(Debug)]
pub enum MappingError {
    InvalidJson(serde_json::Error),
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid mapping response: {err}"),
        }
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for MappingError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphInput {
    pub id: SegmentId,
    pub text: String,
}

impl From<&EssaySegment> for ParagraphInput {
    fn from(value: &EssaySegment) -> Self {
        Self {
            id: value.id,
            text: value.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItemInput {
    pub id: FeedbackId,
    pub title: String,
    pub text: String,
}

impl From<&FeedbackBlock> for FeedbackItemInput {
    fn from(value: &FeedbackBlock) -> Self {
        Self {
            id: value.id,
            title: value.title.clone(),
            text: value.text.clone(),
        }
    }
}

/// Request body for one work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRequest {
    pub paragraphs: Vec<ParagraphInput>,
    pub feedback_items: Vec<FeedbackItemInput>,
}

impl MappingRequest {
    pub fn new(segments: &[EssaySegment], blocks: &[FeedbackBlock]) -> Self {
        Self {
            paragraphs: segments.iter().map(ParagraphInput::from).collect(),
            feedback_items: blocks.iter().map(FeedbackItemInput::from).collect(),
        }
    }

    pub fn from_parsed(parsed: &ParsedWork) -> Self {
        Self::new(&parsed.segments, &parsed.feedback_blocks)
    }

    /// Nothing to map when either side is empty.
    pub fn is_mappable(&self) -> bool {
        !self.paragraphs.is_empty() && !self.feedback_items.is_empty()
    }

    pub fn to_json(&self) -> Result<String, MappingError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One feedback entry of a collaborator response.
///
/// The paragraph mapper fills `related_paragraph_ids` and `reason`; the
/// checklist mapper fills `checklist_items` and `essay_part_ids`. Missing
/// arrays decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMapping {
    pub feedback_id: FeedbackId,
    pub related_paragraph_ids: Vec<SegmentId>,
    pub checklist_items: Vec<ChecklistId>,
    pub essay_part_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingResponse {
    pub mappings: Vec<FeedbackMapping>,
}

impl MappingResponse {
    /// Related segment ids keyed by feedback id.
    ///
    /// A feedback id listed twice keeps its last entry.
    pub fn related_segments(&self) -> BTreeMap<FeedbackId, Vec<SegmentId>> {
        self.mappings
            .iter()
            .map(|mapping| (mapping.feedback_id, mapping.related_paragraph_ids.clone()))
            .collect()
    }

    pub fn mapping_for(&self, feedback_id: FeedbackId) -> Option<&FeedbackMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.feedback_id == feedback_id)
    }
}

/// Decodes a collaborator response body.
pub fn decode_mapping_response(input: &str) -> Result<MappingResponse, MappingError> {
    Ok(serde_json::from_str(input)?)
}

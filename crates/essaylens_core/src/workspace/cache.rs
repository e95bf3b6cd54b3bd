//! Per-work parse cache.
//!
//! # Responsibility
//! - Parse each work's essay and feedback once and keep the result by index.
//! - Track which works already have collaborator mapping results.
//! - Flatten feedback blocks of all works into one ordered list.
//!
//! # Invariants
//! - `get_or_parse` never re-parses a cached index.
//! - `invalidate` drops the parse result and any mapping for that index.
//! - Flattened entries follow work order, then block id order.

use crate::import::StudentWork;
use crate::mapping::FeedbackMapping;
use crate::model::feedback::{FeedbackBlock, FeedbackId};
use crate::model::segment::EssaySegment;
use crate::parse::essay::segment_essay;
use crate::parse::feedback::FeedbackExtractor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Zero-based position of a work inside the imported list.
pub type WorkIndex = usize;

/// Parse result for one work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWork {
    pub segments: Vec<EssaySegment>,
    pub feedback_blocks: Vec<FeedbackBlock>,
}

impl ParsedWork {
    pub fn parse(work: &StudentWork) -> Self {
        Self::parse_with(work, &FeedbackExtractor::default())
    }

    pub fn parse_with(work: &StudentWork, extractor: &FeedbackExtractor) -> Self {
        Self {
            segments: segment_essay(&work.essay).segments,
            feedback_blocks: extractor.extract(&work.feedbacks),
        }
    }
}

/// One feedback block addressed across all works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub work_index: WorkIndex,
    pub feedback_id: FeedbackId,
    pub title: String,
    pub text: String,
    pub is_low_info: bool,
    pub is_negative: bool,
    pub is_positive: bool,
}

impl FeedbackEntry {
    fn from_block(work_index: WorkIndex, block: &FeedbackBlock) -> Self {
        Self {
            work_index,
            feedback_id: block.id,
            title: block.title.clone(),
            text: block.text.clone(),
            is_low_info: block.is_low_info,
            is_negative: block.is_negative,
            is_positive: block.is_positive,
        }
    }

    /// `"{work_index}-{feedback_id}"`, unique across works.
    pub fn key(&self) -> String {
        format!("{}-{}", self.work_index, self.feedback_id)
    }
}

/// Caller-owned cache of parse and mapping results keyed by work index.
#[derive(Debug, Clone, Default)]
pub struct WorkCache {
    extractor: FeedbackExtractor,
    parsed: BTreeMap<WorkIndex, ParsedWork>,
    mappings: BTreeMap<WorkIndex, Vec<FeedbackMapping>>,
}

impl WorkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `extractor` for every feedback parse performed by this cache.
    pub fn with_extractor(extractor: FeedbackExtractor) -> Self {
        Self {
            extractor,
            ..Self::default()
        }
    }

    pub fn is_parsed(&self, index: WorkIndex) -> bool {
        self.parsed.contains_key(&index)
    }

    pub fn get(&self, index: WorkIndex) -> Option<&ParsedWork> {
        self.parsed.get(&index)
    }

    /// Returns the cached parse for `index`, computing it on first access.
    pub fn get_or_parse(&mut self, index: WorkIndex, work: &StudentWork) -> &ParsedWork {
        let extractor = self.extractor;
        self.parsed.entry(index).or_insert_with(|| {
            let parsed = ParsedWork::parse_with(work, &extractor);
            debug!(
                "event=work_parsed module=workspace status=ok work_index={} segments={} feedback_blocks={}",
                index,
                parsed.segments.len(),
                parsed.feedback_blocks.len()
            );
            parsed
        })
    }

    /// Parses every work not yet cached.
    pub fn parse_all(&mut self, works: &[StudentWork]) {
        for (index, work) in works.iter().enumerate() {
            self.get_or_parse(index, work);
        }
    }

    /// Drops cached state for `index`. Returns whether anything was cached.
    pub fn invalidate(&mut self, index: WorkIndex) -> bool {
        let had_parse = self.parsed.remove(&index).is_some();
        let had_mapping = self.mappings.remove(&index).is_some();
        had_parse || had_mapping
    }

    pub fn clear(&mut self) {
        self.parsed.clear();
        self.mappings.clear();
    }

    pub fn parsed_count(&self) -> usize {
        self.parsed.len()
    }

    /// Stores collaborator results for one work, replacing earlier ones.
    pub fn record_mappings(&mut self, index: WorkIndex, mappings: Vec<FeedbackMapping>) {
        debug!(
            "event=mappings_recorded module=workspace status=ok work_index={} mappings={}",
            index,
            mappings.len()
        );
        self.mappings.insert(index, mappings);
    }

    /// Mapping results for `index`; empty when none were recorded.
    pub fn mappings_for(&self, index: WorkIndex) -> &[FeedbackMapping] {
        self.mappings.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mappings_by_work(&self) -> &BTreeMap<WorkIndex, Vec<FeedbackMapping>> {
        &self.mappings
    }

    /// A work counts as analyzed once mapping results were recorded.
    pub fn is_analyzed(&self, index: WorkIndex) -> bool {
        self.mappings.contains_key(&index)
    }

    /// Indexes in `0..total` still waiting for mapping results.
    pub fn pending_analysis(&self, total: usize) -> Vec<WorkIndex> {
        (0..total).filter(|index| !self.is_analyzed(*index)).collect()
    }

    /// Flattens feedback blocks of `works`, parsing uncached ones on the way.
    pub fn feedback_entries(&mut self, works: &[StudentWork]) -> Vec<FeedbackEntry> {
        let mut entries = Vec::new();
        for (index, work) in works.iter().enumerate() {
            let parsed = self.get_or_parse(index, work);
            entries.extend(
                parsed
                    .feedback_blocks
                    .iter()
                    .map(|block| FeedbackEntry::from_block(index, block)),
            );
        }
        entries
    }
}

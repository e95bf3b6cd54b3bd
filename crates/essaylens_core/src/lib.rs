//! Core text pipeline for essay feedback annotation.
//! Segments essays, extracts rubric feedback blocks and classifies them.

pub mod config;
pub mod import;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod parse;
pub mod workspace;

pub use config::{ConfigError, ParseConfig};
pub use import::{load_import_file, ImportBundle, ImportError, ModelWork, StudentWork};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mapping::{
    decode_mapping_response, FeedbackMapping, MappingError, MappingRequest, MappingResponse,
};
pub use model::feedback::{FeedbackBlock, FeedbackId};
pub use model::segment::{EssaySegment, ParsedEssay, SegmentId};
pub use parse::essay::{segment_essay, segment_essay_opt};
pub use parse::feedback::{extract_feedback, extract_feedback_opt, FeedbackExtractor};
pub use parse::heuristics::{classify, Classification};
pub use workspace::{FeedbackEntry, ParsedWork, WorkCache, WorkIndex};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

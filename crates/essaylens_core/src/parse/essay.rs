//! Essay sentence segmentation.
//!
//! # Responsibility
//! - Turn one raw essay string into ordered, addressable sentence segments.
//!
//! # Invariants
//! - Line breaks never force a boundary; text is whitespace-normalized first.
//! - A boundary is `.`/`!`/`?` + whitespace + uppercase letter (optionally
//!   behind an opening quote). Punctuation stays with the left sentence.
//! - A trailing fragment without terminal punctuation is still emitted.
//! - Ids are `1..=n` in document order.
//!
//! The capital-letter heuristic also splits after abbreviations such as
//! "Mr." when a capitalized word follows. That is an accepted limitation.

use crate::model::segment::{EssaySegment, ParsedEssay, SegmentId};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("valid line regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static SENTENCE_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]\s+["\u{201C}]?[A-Z]"#).expect("valid sentence boundary regex")
});

/// Splits `text` into sentence segments.
///
/// Returns an empty envelope for empty or whitespace-only input.
pub fn segment_essay(text: &str) -> ParsedEssay {
    let normalized = normalize_essay_text(text);
    if normalized.is_empty() {
        return ParsedEssay::default();
    }

    let segments = split_sentences(&normalized)
        .into_iter()
        .zip(1..)
        .map(|(sentence, id): (&str, SegmentId)| EssaySegment {
            id,
            text: sentence.to_string(),
        })
        .collect::<Vec<_>>();

    debug!(
        "event=essay_segmented module=parse status=ok input_chars={} segments={}",
        text.chars().count(),
        segments.len()
    );

    ParsedEssay { segments }
}

/// [`segment_essay`] for callers holding possibly-absent text.
pub fn segment_essay_opt(text: Option<&str>) -> ParsedEssay {
    text.map(segment_essay).unwrap_or_default()
}

/// Collapses line breaks and whitespace runs into single spaces.
pub fn normalize_essay_text(text: &str) -> String {
    let joined = LINE_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

fn split_sentences(normalized: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY_RE.find_iter(normalized) {
        // Terminal punctuation is a single ASCII byte.
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &normalized[start..end]);
        start = end;
    }
    push_trimmed(&mut sentences, &normalized[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

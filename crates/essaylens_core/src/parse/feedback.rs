//! Rubric feedback block extraction.
//!
//! # Responsibility
//! - Split raw rubric-feedback text into cleaned, addressable blocks.
//! - Strip heading and markdown-list noise before classification.
//!
//! # Invariants
//! - Preamble lines before the first `CONCEPTS &` heading are discarded.
//! - A bare `CONCEPTS &` section heading sitting directly on top of the first
//!   rubric item is removed; item headings that merely start with
//!   `Concepts &` stay titles.
//! - `OVERALL SCORE` summary blocks never become feedback blocks.
//! - When any block carries `(N pts)`, blocks without it are dropped.
//! - Heading-only and empty-after-cleaning blocks are dropped, not emitted.
//! - Ids are dense over emitted blocks.
//! - Extraction never fails; degenerate input yields an empty list.

use crate::config::ParseConfig;
use crate::model::feedback::{FeedbackBlock, FeedbackId};
use crate::parse::heuristics::classify_with;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static CONCEPTS_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^CONCEPTS\s*&").expect("valid concepts regex"));
static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid blank line regex"));
static POINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(\d+\s*pts?\)").expect("valid points regex"));
static OVERALL_SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^OVERALL SCORE\b").expect("valid overall score regex"));
static UPPERCASE_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z\s&]+$").expect("valid heading regex"));
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s*").expect("valid list marker regex"));

/// Returns whether `text` contains a rubric points marker such as `(10 pts)`.
pub fn has_points_format(text: &str) -> bool {
    POINTS_RE.is_match(text)
}

/// Extracts feedback blocks using default thresholds.
pub fn extract_feedback(text: &str) -> Vec<FeedbackBlock> {
    FeedbackExtractor::default().extract(text)
}

/// [`extract_feedback`] for callers holding possibly-absent text.
pub fn extract_feedback_opt(text: Option<&str>) -> Vec<FeedbackBlock> {
    text.map(extract_feedback).unwrap_or_default()
}

/// Feedback extraction pipeline bound to one threshold configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackExtractor {
    config: ParseConfig,
}

/// Block that survived heading detection and body cleaning.
struct CleanedBlock {
    title: String,
    text: String,
    has_body: bool,
}

impl FeedbackExtractor {
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Runs the full pipeline over one feedback document.
    pub fn extract(&self, text: &str) -> Vec<FeedbackBlock> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let normalized = text.replace("\r\n", "\n");
        let relevant = skip_preamble(&normalized);
        let mut candidates = split_blocks(relevant);
        if let Some(first) = candidates.first_mut() {
            *first = self.strip_section_marker(*first);
        }
        let candidate_count = candidates.len();
        let kept = filter_scored_blocks(candidates);
        let kept_count = kept.len();

        let blocks = kept
            .into_iter()
            .filter_map(|block| self.clean_block(block))
            .zip(1..)
            .map(|(cleaned, id): (CleanedBlock, FeedbackId)| {
                let flags = classify_with(
                    &cleaned.text,
                    cleaned.has_body,
                    self.config.short_text_chars,
                );
                FeedbackBlock {
                    id,
                    title: cleaned.title,
                    text: cleaned.text,
                    has_body: cleaned.has_body,
                    is_low_info: flags.is_low_info,
                    is_negative: flags.is_negative,
                    is_positive: flags.is_positive,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "event=feedback_extracted module=parse status=ok candidates={} scored={} emitted={}",
            candidate_count,
            kept_count,
            blocks.len()
        );

        blocks
    }

    fn clean_block(&self, block: &str) -> Option<CleanedBlock> {
        let lines = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let first_line = lines.first().copied().unwrap_or("");

        let (title, body_lines) = if self.is_title_line(first_line) {
            if lines.len() <= 1 {
                return None;
            }
            (first_line.to_string(), &lines[1..])
        } else {
            (String::new(), &lines[..])
        };

        let has_body = body_lines.iter().any(|line| !line.is_empty());
        let text = strip_list_markers(body_lines);
        if text.is_empty() || self.looks_like_heading(&text) {
            return None;
        }

        Some(CleanedBlock {
            title,
            text,
            has_body,
        })
    }

    /// Drops a bare `CONCEPTS &` section heading when the next line already
    /// heads the first rubric item.
    fn strip_section_marker<'a>(&self, block: &'a str) -> &'a str {
        let Some((first_line, rest)) = block.split_once('\n') else {
            return block;
        };
        let first_line = first_line.trim();
        if !CONCEPTS_START_RE.is_match(first_line)
            || first_line.contains(':')
            || has_points_format(first_line)
        {
            return block;
        }
        let next_line = rest.lines().map(str::trim).find(|line| !line.is_empty());
        match next_line {
            Some(line) if self.is_title_line(line) => rest.trim(),
            _ => block,
        }
    }

    fn is_title_line(&self, line: &str) -> bool {
        line.contains(':')
            || (UPPERCASE_HEADING_RE.is_match(line)
                && line.chars().count() < self.config.heading_max_chars)
            || has_points_format(line)
    }

    /// Whole-text heading check applied after cleaning.
    fn looks_like_heading(&self, text: &str) -> bool {
        let chars = text.chars().count();
        (text.contains(':') && chars < self.config.disguised_heading_max_chars)
            || (UPPERCASE_HEADING_RE.is_match(text) && chars < self.config.heading_max_chars)
            || has_points_format(text)
    }
}

fn skip_preamble(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split('\n') {
        if CONCEPTS_START_RE.is_match(line.trim()) {
            return &text[offset..];
        }
        offset += line.len() + 1;
    }
    text
}

fn split_blocks(text: &str) -> Vec<&str> {
    BLANK_LINES_RE
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

fn filter_scored_blocks(blocks: Vec<&str>) -> Vec<&str> {
    let any_points = blocks.iter().any(|block| has_points_format(block));
    blocks
        .into_iter()
        .filter(|block| {
            let first_line = block.lines().next().unwrap_or("").trim();
            !OVERALL_SCORE_RE.is_match(first_line) && (!any_points || has_points_format(block))
        })
        .collect()
}

fn strip_list_markers(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| LIST_MARKER_RE.replace(line.trim(), ""))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        extract_feedback, filter_scored_blocks, skip_preamble, split_blocks, FeedbackExtractor,
    };

    #[test]
    fn skip_preamble_starts_at_concepts_heading() {
        let text = "Hello teacher\nintro\n  Concepts & Ideas\nBody";
        assert_eq!(skip_preamble(text), "  Concepts & Ideas\nBody");
        assert_eq!(skip_preamble("no marker\nhere"), "no marker\nhere");
    }

    #[test]
    fn split_blocks_needs_consecutive_newlines() {
        let blocks = split_blocks("one\ntwo\n\nthree\n  \t\nfour\n\n\nfive");
        assert_eq!(blocks, vec!["one\ntwo", "three\n  \t\nfour", "five"]);
    }

    #[test]
    fn whitespace_only_line_does_not_split_a_block() {
        let blocks = extract_feedback(
            "The thesis paragraph states a clear and arguable claim right here.\n   \n\
             The closing paragraph returns to that claim with new evidence.",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, 1);
        assert!(blocks[0].text.contains("closing paragraph"));
    }

    #[test]
    fn bare_section_heading_is_removed_only_above_an_item_heading() {
        let extractor = FeedbackExtractor::default();
        let block = "CONCEPTS & APPLICATION\nCLARITY: Meets (5 pts)\nBody";
        assert_eq!(
            extractor.strip_section_marker(block),
            "CLARITY: Meets (5 pts)\nBody"
        );
        assert_eq!(
            extractor.strip_section_marker("CONCEPTS & APPLICATION\nPlain body line"),
            "CONCEPTS & APPLICATION\nPlain body line"
        );
        assert_eq!(
            extractor.strip_section_marker("Concepts & Theory: Exceeds (10 pts)\nANALYSIS"),
            "Concepts & Theory: Exceeds (10 pts)\nANALYSIS"
        );
    }

    #[test]
    fn concepts_item_heading_with_points_stays_the_title() {
        let blocks = extract_feedback(
            "Concepts & Application (30 pts)\n\
             The essay applies supply and demand to the rental market with care.",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Concepts & Application (30 pts)");
        assert!(blocks[0].text.starts_with("The essay applies supply and demand"));
    }

    #[test]
    fn later_concepts_item_keeps_its_heading() {
        let text = "CONCEPTS & APPLICATION\n\
                    CLARITY: Meets (5 pts)\n\
                    The argument is easy to follow from start to finish.\n\n\
                    Concepts & Theory: Exceeds (10 pts)\n\
                    The essay ties marginal cost to the pricing decision convincingly.";
        let blocks = extract_feedback(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "CLARITY: Meets (5 pts)");
        assert_eq!(blocks[1].id, 2);
        assert_eq!(blocks[1].title, "Concepts & Theory: Exceeds (10 pts)");
        assert_eq!(
            blocks[1].text,
            "The essay ties marginal cost to the pricing decision convincingly."
        );
    }

    #[test]
    fn scored_documents_keep_only_points_blocks() {
        let blocks = vec![
            "CONCEPTS & APPLICATION",
            "CLARITY: Meets (5 pts)\nBody",
            "OVERALL SCORE (90 pts)",
            "Loose note",
        ];
        assert_eq!(
            filter_scored_blocks(blocks),
            vec!["CLARITY: Meets (5 pts)\nBody"]
        );
    }

    #[test]
    fn unscored_documents_only_drop_overall_score() {
        let blocks = vec!["First note", "Overall score: 80", "Second note"];
        assert_eq!(
            filter_scored_blocks(blocks),
            vec!["First note", "Second note"]
        );
    }

    #[test]
    fn uppercase_first_line_is_a_title() {
        let blocks = extract_feedback(
            "EVIDENCE & SUPPORT\nThe essay cites three peer-reviewed studies to back each claim.",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "EVIDENCE & SUPPORT");
        assert!(blocks[0].has_body);
    }

    #[test]
    fn disguised_heading_body_is_dropped() {
        assert!(extract_feedback("Rubric: Organization\nScore: 4 out of 5").is_empty());
        assert!(extract_feedback("- STRUCTURE & FLOW\n* ANALYSIS").is_empty());
    }

    #[test]
    fn dropped_blocks_do_not_consume_ids() {
        let text = "ONLY A HEADING\n\nThe introduction frames the debate with a vivid anecdote.\n\n\
                    SECOND HEADING ONLY\n\nThe conclusion restates the thesis without new insight.";
        let blocks = extract_feedback(text);
        let ids = blocks.iter().map(|block| block.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
    }
}

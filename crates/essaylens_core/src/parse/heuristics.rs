//! Keyword-table heuristics for feedback classification.
//!
//! # Responsibility
//! - Own the generic/negative/positive keyword tables as plain data.
//! - Compile each table group into one case-insensitive word-boundary regex.
//! - Expose named predicates so callers never hand-roll inline patterns.
//!
//! # Invariants
//! - Negative and positive axes are independent; both may be true.
//! - Multi-word terms match with any run of whitespace between words.
//! - Predicates are pure and allocation-free apart from lazy compilation.

use crate::config::DEFAULT_SHORT_TEXT_CHARS;
use once_cell::sync::Lazy;
use regex::Regex;

/// Named list of terms that fire together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    /// Stable label used in diagnostics.
    pub label: &'static str,
    pub terms: &'static [&'static str],
}

/// Classification axis backed by a keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Negative,
    Positive,
}

/// Praise phrases that are generic wherever they appear.
pub const PRAISE_PHRASES: KeywordGroup = KeywordGroup {
    label: "praise_phrase",
    terms: &["good job", "nice job", "well done", "excellent work", "great work"],
};

/// Single praise words that are generic when they end the text or are the
/// whole text (optionally followed by `.` or `!`).
pub const GENERIC_WORDS: &[&str] = &[
    "good",
    "nice",
    "well",
    "great",
    "excellent",
    "fine",
    "okay",
    "ok",
];

pub const NEGATIVE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        label: "deficit",
        terms: &[
            "not",
            "bad",
            "poor",
            "lacks",
            "missing",
            "fails",
            "didn't",
            "doesn't",
            "inadequate",
            "insufficient",
        ],
    },
    KeywordGroup {
        label: "absence",
        terms: &["no clear", "no evidence", "no examples", "no support"],
    },
    KeywordGroup {
        label: "fault",
        terms: &[
            "weak",
            "weakness",
            "problem",
            "issue",
            "error",
            "mistake",
            "incorrect",
            "wrong",
        ],
    },
    KeywordGroup {
        label: "prescription",
        terms: &["needs improvement", "could be better", "should be", "must be"],
    },
    KeywordGroup {
        label: "contrast",
        terms: &[
            "but",
            "however",
            "although",
            "though",
            "even though",
            "despite",
            "nevertheless",
            "yet",
            "whereas",
        ],
    },
];

pub const POSITIVE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        label: "praise",
        terms: &[
            "good",
            "great",
            "excellent",
            "outstanding",
            "well",
            "nice",
            "strong",
            "clear",
            "effective",
            "solid",
        ],
    },
    KeywordGroup {
        label: "evidence",
        terms: &["demonstrates", "shows", "illustrates", "exemplifies", "highlights"],
    },
    KeywordGroup {
        label: "craft",
        terms: &[
            "good use of",
            "well-developed",
            "well-written",
            "well-structured",
            "well-organized",
        ],
    },
    KeywordGroup {
        label: "depth",
        terms: &[
            "impressive",
            "thorough",
            "comprehensive",
            "detailed",
            "insightful",
            "thoughtful",
        ],
    },
    KeywordGroup {
        label: "achievement",
        terms: &[
            "successful",
            "successfully",
            "achieved",
            "accomplished",
            "strongly",
            "clearly",
        ],
    },
    KeywordGroup {
        label: "precision",
        terms: &[
            "appropriate",
            "relevant",
            "accurate",
            "precise",
            "convincing",
            "persuasive",
        ],
    },
    KeywordGroup {
        label: "reinforcement",
        terms: &[
            "enhances",
            "strengthens",
            "improves",
            "supports",
            "reinforces",
            "validates",
        ],
    },
];

static PRAISE_PHRASE_RE: Lazy<Regex> = Lazy::new(|| compile_group(&PRAISE_PHRASES));
static GENERIC_TAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\s*[.!]?\s*$", alternation(GENERIC_WORDS)))
        .expect("valid generic tail regex")
});
static GENERIC_WHOLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(?:{})\s*[.!]?\s*$", alternation(GENERIC_WORDS)))
        .expect("valid generic whole regex")
});
static NEGATIVE_RES: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_groups(NEGATIVE_GROUPS));
static POSITIVE_RES: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_groups(POSITIVE_GROUPS));

/// Flags derived for one cleaned feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_generic: bool,
    pub is_short: bool,
    pub is_low_info: bool,
    pub is_negative: bool,
    pub is_positive: bool,
}

/// Classifies `text` with the default short-text threshold.
pub fn classify(text: &str, has_body: bool) -> Classification {
    classify_with(text, has_body, DEFAULT_SHORT_TEXT_CHARS)
}

/// Classifies `text`, treating fewer than `short_text_chars` chars as short.
pub fn classify_with(text: &str, has_body: bool, short_text_chars: usize) -> Classification {
    let is_generic = is_generic(text);
    let is_short = is_shorter_than(text, short_text_chars);
    Classification {
        is_generic,
        is_short,
        is_low_info: !has_body || is_short || is_generic,
        is_negative: is_negative(text),
        is_positive: is_positive(text),
    }
}

/// Returns whether `text` is boilerplate praise.
pub fn is_generic(text: &str) -> bool {
    PRAISE_PHRASE_RE.is_match(text)
        || GENERIC_TAIL_RE.is_match(text)
        || GENERIC_WHOLE_RE.is_match(text)
}

/// Returns whether `text` is shorter than the default threshold.
pub fn is_short(text: &str) -> bool {
    is_shorter_than(text, DEFAULT_SHORT_TEXT_CHARS)
}

fn is_shorter_than(text: &str, limit: usize) -> bool {
    text.chars().count() < limit
}

/// Low-information means no body, too short, or generic.
pub fn is_low_info(text: &str, has_body: bool) -> bool {
    !has_body || is_short(text) || is_generic(text)
}

pub fn is_negative(text: &str) -> bool {
    NEGATIVE_RES.iter().any(|(_, re)| re.is_match(text))
}

pub fn is_positive(text: &str) -> bool {
    POSITIVE_RES.iter().any(|(_, re)| re.is_match(text))
}

/// Labels of every group on `axis` that matches `text`, in table order.
pub fn matched_groups(text: &str, axis: Axis) -> Vec<&'static str> {
    let compiled = match axis {
        Axis::Negative => &*NEGATIVE_RES,
        Axis::Positive => &*POSITIVE_RES,
    };
    compiled
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(label, _)| *label)
        .collect()
}

fn compile_groups(groups: &[KeywordGroup]) -> Vec<(&'static str, Regex)> {
    groups
        .iter()
        .map(|group| (group.label, compile_group(group)))
        .collect()
}

fn compile_group(group: &KeywordGroup) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(group.terms)))
        .expect("valid keyword group regex")
}

fn alternation(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|term| term_pattern(term))
        .collect::<Vec<_>>()
        .join("|")
}

fn term_pattern(term: &str) -> String {
    term.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

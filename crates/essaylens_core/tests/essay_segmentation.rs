use essaylens_core::{segment_essay, segment_essay_opt, EssaySegment};

const ESSAY: &str = "Carbon taxes price an externality.\nEconomists largely agree on this point!\n\n\
                     Yet adoption is slow. Why? \"Politics,\" one analyst said. The debate\n\
                     continues into 2024 and beyond";

#[test]
fn two_sentences_become_two_segments() {
    let parsed = segment_essay("This is sentence one. This is sentence two!");
    assert_eq!(
        parsed.segments,
        vec![
            EssaySegment {
                id: 1,
                text: "This is sentence one.".to_string(),
            },
            EssaySegment {
                id: 2,
                text: "This is sentence two!".to_string(),
            },
        ]
    );
}

#[test]
fn segmentation_is_idempotent() {
    assert_eq!(segment_essay(ESSAY), segment_essay(ESSAY));
}

#[test]
fn ids_are_dense_from_one() {
    let parsed = segment_essay(ESSAY);
    let ids = parsed.segments.iter().map(|s| s.id).collect::<Vec<_>>();
    let expected = (1..=parsed.len() as u32).collect::<Vec<_>>();
    assert_eq!(ids, expected);
}

#[test]
fn all_but_last_segment_end_with_terminal_punctuation() {
    let parsed = segment_essay(ESSAY);
    assert_eq!(parsed.len(), 6);
    let (last, rest) = parsed.segments.split_last().expect("segments");
    for segment in rest {
        assert!(
            segment.text.ends_with(['.', '!', '?']),
            "unterminated segment: {}",
            segment.text
        );
    }
    assert_eq!(last.text, "The debate continues into 2024 and beyond");
}

#[test]
fn segments_are_trimmed_and_non_empty() {
    for segment in segment_essay(ESSAY).segments {
        assert!(!segment.text.is_empty());
        assert_eq!(segment.text, segment.text.trim());
        assert!(!segment.text.contains('\n'));
    }
}

#[test]
fn empty_input_yields_empty_envelope() {
    assert!(segment_essay("").segments.is_empty());
    assert!(segment_essay("   \n ").segments.is_empty());
    assert!(segment_essay_opt(None).segments.is_empty());
}

#[test]
fn envelope_serializes_as_segments_object() {
    let json = serde_json::to_value(segment_essay("Alpha. Beta.")).expect("serialize");
    assert_eq!(json["segments"][1]["id"], 2);
    assert_eq!(json["segments"][1]["text"], "Beta.");
}

use essaylens_core::workspace::{
    checklist_items, checklist_satisfaction_counts, essay_checklist_rows,
    feedback_checklist_rows, sort_checklist, ChecklistOrder,
};
use essaylens_core::{
    decode_mapping_response, load_import_file, ImportError, MappingRequest, WorkCache,
};
use std::io::Write;

const BUNDLE: &str = r#"{
  "knowledgeList": ["Defines the externality", "Uses quantitative evidence"],
  "studentWorks": [
    {
      "essay": "Pollution imposes costs on third parties. A tax can correct this. Revenue funds cleanup.",
      "feedbacks": "CONCEPTS & APPLICATION\nDEFINITION: Exceeds (10 pts)\nThe externality is defined precisely with a concrete factory example.\n\nEVIDENCE: Developing (5 pts)\nThe essay lacks numbers to support the claim about revenue.\n\nOVERALL SCORE: 15/20"
    },
    {
      "essay": "Markets fail sometimes.",
      "feedbacks": null
    }
  ]
}"#;

fn write_bundle() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(BUNDLE.as_bytes()).expect("write bundle");
    file
}

#[test]
fn imported_works_parse_once_and_build_mapping_requests() {
    let file = write_bundle();
    let bundle = load_import_file(file.path()).expect("bundle should load");
    assert_eq!(bundle.student_works.len(), 2);

    let mut cache = WorkCache::new();
    cache.parse_all(&bundle.student_works);
    assert!(cache.is_parsed(0) && cache.is_parsed(1));

    let first = cache.get(0).expect("work 0 parsed");
    assert_eq!(first.segments.len(), 3);
    assert_eq!(first.feedback_blocks.len(), 2);
    assert!(first.feedback_blocks[1].is_negative);

    let request = MappingRequest::from_parsed(first);
    assert!(request.is_mappable());
    assert_eq!(request.feedback_items[0].title, "DEFINITION: Exceeds (10 pts)");

    let second = MappingRequest::from_parsed(cache.get(1).expect("work 1 parsed"));
    assert!(!second.is_mappable());
}

#[test]
fn mapping_results_drive_checklist_matrices() {
    let file = write_bundle();
    let bundle = load_import_file(file.path()).expect("bundle should load");
    let mut cache = WorkCache::new();
    let entries = cache.feedback_entries(&bundle.student_works);
    assert_eq!(entries.len(), 2);

    let response = decode_mapping_response(
        r#"{"mappings": [
            {"feedback_id": 1, "related_paragraph_ids": [1], "checklist_items": [1]},
            {"feedback_id": 2, "related_paragraph_ids": [3], "checklist_items": [2]}
        ]}"#,
    )
    .expect("response should decode");
    cache.record_mappings(0, response.mappings);
    assert_eq!(cache.pending_analysis(2), vec![1]);

    let checklist = checklist_items(&bundle.knowledge_list);
    let counts = checklist_satisfaction_counts(cache.mappings_by_work());
    assert_eq!(counts.get(&1), Some(&1));

    let ranked = sort_checklist(&checklist, &counts, ChecklistOrder::CountDesc);
    assert_eq!(ranked.len(), 2);

    let rows = feedback_checklist_rows(&entries, cache.mappings_by_work(), &checklist);
    assert!(rows[0].satisfies(1));
    assert!(!rows[0].satisfies(2));
    assert_eq!(rows[1].checklist_status[1].paragraph_ids, vec![3]);
    assert!(rows[1].is_negative);

    let essays = essay_checklist_rows(2, &entries, cache.mappings_by_work(), &checklist);
    let cell = &essays[0].checklist_status[1];
    assert!(cell.satisfied);
    assert_eq!(cell.feedback_id, Some(2));
    assert!(cell.is_negative);
    assert!(essays[1]
        .checklist_status
        .iter()
        .all(|cell| !cell.satisfied && cell.feedback_id.is_none()));
}

#[test]
fn missing_import_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_import_file(dir.path().join("absent.json")).expect_err("missing file");
    assert!(matches!(err, ImportError::Io { .. }));
}

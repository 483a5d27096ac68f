use docgraph_core::document::{load_elements, parse_elements, DocumentError};
use docgraph_core::{ElementType, HierarchyBuilder};
use tempfile::TempDir;

const ELEMENTS: &str = r#"[
  {"type": "Title", "element_id": "t1", "text": "Overview", "metadata": {"page_number": 1}},
  {"type": "NarrativeText", "element_id": "n1", "text": "Body text.", "metadata": {"parent_id": "t1"}},
  {"type": "PageBreak", "element_id": "pb1"},
  {"type": "Sidebar", "element_id": "x1", "text": "?"}
]"#;

#[test]
fn test_parse_elements() {
    let elements = parse_elements(ELEMENTS).unwrap();
    assert_eq!(elements.len(), 4);

    assert_eq!(elements[0].element_type(), Some(ElementType::Title));
    assert_eq!(elements[1].parent_id(), Some("t1"));
    assert_eq!(elements[2].text, "");
    assert_eq!(elements[3].element_type(), None);
}

#[test]
fn test_load_and_build() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("elements.json");
    std::fs::write(&path, ELEMENTS).unwrap();

    let elements = load_elements(&path).unwrap();
    let mut builder = HierarchyBuilder::new("elements");
    let summary = builder.process_all(&elements).unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.unknown, vec!["Sidebar".to_string()]);
    assert_eq!(builder.graph().node("t1").unwrap().metadata["page_number"], 1);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = load_elements(temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, DocumentError::Io { .. }));
}

#[test]
fn test_parse_rejects_non_array() {
    let err = parse_elements(r#"{"type": "Title"}"#).unwrap_err();
    assert!(matches!(err, DocumentError::Json(_)));
}

use docgraph_core::visualize::{build_view, render_html};
use docgraph_core::{Element, ElementType, HierarchyBuilder};
use tempfile::TempDir;

fn sample_graph() -> docgraph_core::DocumentGraph {
    let mut builder = HierarchyBuilder::new("paper");
    builder
        .process_all(&[
            Element::typed(ElementType::Title, "t1", "Method"),
            Element::typed(ElementType::Table, "tb1", "a | b"),
        ])
        .unwrap();
    builder.into_graph()
}

#[test]
fn test_view_labels_and_edges() {
    let view = build_view(&sample_graph());

    let labels: Vec<_> = view
        .nodes
        .iter()
        .map(|n| n.attributes.label.clone().unwrap())
        .collect();
    assert_eq!(labels, vec!["paper document", "t1 section", "tb1 table"]);

    assert_eq!(view.edges.len(), 2);
    assert_eq!(view.edges[1].source, "t1");
    assert_eq!(view.edges[1].target, "tb1");
    assert_eq!(view.edges[1].attributes.relationship, "inferred");
}

#[test]
fn test_render_html_appends_extension() {
    let temp = TempDir::new().unwrap();
    let path = render_html(&sample_graph(), temp.path().join("paper")).unwrap();

    assert_eq!(path, temp.path().join("paper.html"));
    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.contains("t1 section"));
    assert!(page.contains("<title>paper - docgraph</title>"));
}

#[test]
fn test_render_html_keeps_html_name() {
    let temp = TempDir::new().unwrap();
    let path = render_html(&sample_graph(), temp.path().join("out.html")).unwrap();
    assert_eq!(path, temp.path().join("out.html"));
    assert!(path.exists());
}

#[test]
fn test_render_html_missing_directory() {
    let temp = TempDir::new().unwrap();
    let result = render_html(&sample_graph(), temp.path().join("missing").join("out"));
    assert!(result.is_err());
}

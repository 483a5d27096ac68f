use docgraph_core::{
    DocumentGraph, EdgeType, Element, ElementType, GraphError, HierarchyBuilder, HierarchyConfig,
    NodeKind, ProcessOutcome,
};

fn edge_list(graph: &DocumentGraph) -> Vec<(String, String, EdgeType)> {
    graph
        .edges()
        .map(|(from, to, edge_type)| (from.id.clone(), to.id.clone(), edge_type))
        .collect()
}

fn edge(from: &str, to: &str, edge_type: EdgeType) -> (String, String, EdgeType) {
    (from.to_string(), to.to_string(), edge_type)
}

#[test]
fn test_inferred_edge_sequence() {
    let elements = vec![
        Element::typed(ElementType::Title, "A", "Introduction"),
        Element::typed(ElementType::NarrativeText, "B", "Some prose."),
        Element::typed(ElementType::ListItem, "C", "A point"),
        Element::typed(ElementType::Title, "D", "Results"),
        Element::typed(ElementType::Image, "E", ""),
    ];

    let mut builder = HierarchyBuilder::new("report");
    let summary = builder.process_all(&elements).unwrap();
    assert_eq!(summary.added, 5);

    assert_eq!(
        edge_list(builder.graph()),
        vec![
            edge("report", "A", EdgeType::Root),
            edge("A", "B", EdgeType::Inferred),
            edge("A", "C", EdgeType::Inferred),
            edge("report", "D", EdgeType::Root),
            edge("D", "E", EdgeType::Inferred),
        ]
    );
    assert_eq!(builder.anchor(), Some("D"));
}

#[test]
fn test_inferred_graph_is_tree() {
    let mut elements = Vec::new();
    for section in 0..4 {
        elements.push(Element::typed(
            ElementType::Title,
            format!("t{}", section),
            format!("Section {}", section),
        ));
        for (i, element_type) in [
            ElementType::NarrativeText,
            ElementType::Table,
            ElementType::FigureCaption,
            ElementType::PageNumber,
            ElementType::ListItem,
        ]
        .into_iter()
        .enumerate()
        {
            // Explicit parents are ignored while inference is on
            elements.push(
                Element::typed(element_type, format!("e{}_{}", section, i), "text").with_parent("t0"),
            );
        }
    }

    let mut builder = HierarchyBuilder::new("doc");
    let summary = builder.process_all(&elements).unwrap();
    assert_eq!(summary.added, 4 + 4 * 4);
    assert_eq!(summary.skipped, 4);

    let graph = builder.graph();
    graph.validate_tree().unwrap();
    assert_eq!(graph.edge_count(), graph.node_count() - 1);
    assert_eq!(graph.parent("e3_0").map(|(p, _)| p.id.as_str()), Some("t3"));
}

#[test]
fn test_inheritance_edge_without_inference() {
    let config = HierarchyConfig {
        infer_hierarchy: false,
    };
    let mut builder = HierarchyBuilder::with_config("doc", config);
    builder
        .process(&Element::typed(ElementType::Title, "X", "Chapter"))
        .unwrap();
    builder
        .process(&Element::typed(ElementType::Title, "Y", "Later chapter"))
        .unwrap();
    builder
        .process(&Element::typed(ElementType::NarrativeText, "B", "Body").with_parent("X"))
        .unwrap();

    let (parent, edge_type) = builder.graph().parent("B").unwrap();
    assert_eq!(parent.id, "X");
    assert_eq!(edge_type, EdgeType::Inheritance);
}

#[test]
fn test_without_inference_falls_back_to_anchor() {
    let config = HierarchyConfig {
        infer_hierarchy: false,
    };
    let mut builder = HierarchyBuilder::with_config("doc", config);
    builder
        .process(&Element::typed(ElementType::Title, "T", "Chapter"))
        .unwrap();
    builder
        .process(&Element::typed(ElementType::Table, "no-parent", "a | b"))
        .unwrap();
    builder
        .process(&Element::typed(ElementType::Table, "dangling", "c | d").with_parent("missing"))
        .unwrap();

    let graph = builder.graph();
    assert_eq!(graph.parent("no-parent").map(|(p, e)| (p.id.as_str(), e)), Some(("T", EdgeType::Inferred)));
    assert_eq!(graph.parent("dangling").map(|(p, e)| (p.id.as_str(), e)), Some(("T", EdgeType::Inferred)));
    graph.validate_tree().unwrap();
}

#[test]
fn test_content_before_first_title_fails() {
    let mut builder = HierarchyBuilder::new("doc");
    let err = builder
        .process(&Element::typed(ElementType::NarrativeText, "B", "orphan"))
        .unwrap_err();

    assert!(matches!(err, GraphError::NoSectionAnchor { ref element_id } if element_id == "B"));
    assert_eq!(builder.graph().node_count(), 1);
    assert_eq!(builder.graph().edge_count(), 0);
}

#[test]
fn test_unknown_and_skipped_elements_leave_graph_untouched() {
    let mut builder = HierarchyBuilder::new("doc");

    let outcome = builder.process(&Element::new("Sidebar", "s1", "aside")).unwrap();
    assert_eq!(outcome, ProcessOutcome::Unknown("Sidebar".to_string()));

    let outcome = builder
        .process(&Element::typed(ElementType::Footer, "f1", "page footer"))
        .unwrap();
    assert_eq!(outcome, ProcessOutcome::Skipped(ElementType::Footer));

    assert_eq!(builder.graph().node_count(), 1);
}

#[test]
fn test_node_attributes() {
    let mut builder = HierarchyBuilder::new("doc");
    builder
        .process(&Element::typed(ElementType::Title, "t", "Heading").with_metadata("page_number", 3))
        .unwrap();

    let graph = builder.graph();
    assert_eq!(graph.root().kind, NodeKind::Document);
    assert!(graph.root().txt.is_none());

    let node = graph.node("t").unwrap();
    assert_eq!(node.kind, NodeKind::Section);
    assert_eq!(node.txt.as_deref(), Some("Heading"));
    assert_eq!(node.metadata["page_number"], 3);
}

#[test]
fn test_duplicate_element_rejected() {
    let mut builder = HierarchyBuilder::new("doc");
    builder
        .process(&Element::typed(ElementType::Title, "t", "One"))
        .unwrap();
    let err = builder
        .process(&Element::typed(ElementType::Title, "t", "Two"))
        .unwrap_err();

    assert!(matches!(err, GraphError::DuplicateNode(ref id) if id == "t"));
    assert_eq!(builder.graph().node("t").unwrap().txt.as_deref(), Some("One"));
}

//! Edge case tests for sm-dom
//!
//! Detached nodes, stale ids and deep trees.

use sm_dom::{Document, DomError, DomTree, NodeId, NodeType};

#[test]
fn test_document_node_cannot_be_moved() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    assert!(matches!(
        tree.append_child(div, NodeId::DOCUMENT),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_unknown_node_id() {
    let mut tree = DomTree::new();
    let other = {
        let mut big = DomTree::new();
        for _ in 0..10 {
            big.create_element("p");
        }
        big.create_element("p")
    };
    assert_eq!(tree.parent(other), None);
    assert!(matches!(tree.set_attribute(other, "id", "x"), Err(DomError::NotFound(_))));
}

#[test]
fn test_attribute_on_text_node() {
    let mut tree = DomTree::new();
    let text = tree.create_text("hi");
    assert_eq!(tree.set_attribute(text, "id", "x"), Err(DomError::NotAnElement(text)));
    assert_eq!(tree.attribute(text, "id"), None);
}

#[test]
fn test_detached_subtree_is_not_found_by_id() {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    let tree = doc.tree_mut();
    let div = tree.create_element("div");
    tree.set_attribute(div, "id", "floating").unwrap();
    assert_eq!(doc.get_element_by_id("floating"), None);

    doc.tree_mut().append_child(body, div).unwrap();
    assert_eq!(doc.get_element_by_id("floating"), Some(div));
}

#[test]
fn test_deep_chain_descendants_order() {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    let mut chain = Vec::new();
    for _ in 0..500 {
        let child = tree.create_element("div");
        tree.append_child(parent, child).unwrap();
        chain.push(child);
        parent = child;
    }
    let walked: Vec<NodeId> = tree.descendants(tree.root()).collect();
    assert_eq!(walked, chain);
    assert!(tree.contains(chain[0], chain[499]));
    assert!(!tree.contains(chain[499], chain[0]));
}

#[test]
fn test_reappend_moves_node() {
    let mut tree = DomTree::new();
    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let x = tree.create_element("x");
    tree.append_child(tree.root(), a).unwrap();
    tree.append_child(tree.root(), b).unwrap();
    tree.append_child(a, x).unwrap();
    tree.append_child(b, x).unwrap();

    assert_eq!(tree.children(a).count(), 0);
    assert_eq!(tree.parent(x), Some(b));
    assert_eq!(tree.get(x).unwrap().node_type(), NodeType::Element);
}

#[test]
fn test_empty_class_and_tag_queries() {
    let tree = DomTree::new();
    assert!(tree.elements_by_class_name(tree.root(), "   ").is_empty());
    assert!(tree.elements_by_tag_name(tree.root(), "").is_empty());
}

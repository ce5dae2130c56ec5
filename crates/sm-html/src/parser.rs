//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and copies the result into our arena tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use sm_dom::{Document, DomTree, Node, NodeId, ReadyState};

use crate::HtmlError;

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL.
    ///
    /// The returned document is `Interactive`: parsing is over, so
    /// ready callbacks registered against it run immediately.
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_rcdom(html)?;

        let mut document = Document::empty(url);
        let root = document.tree().root();
        import_children(&dom.document, document.tree_mut(), root)?;
        document.set_ready_state(ReadyState::Interactive);

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }
}

/// Run html5ever over a complete document source
pub(crate) fn parse_rcdom(html: &str) -> Result<RcDom, HtmlError> {
    Ok(parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?)
}

/// Copy every child of `handle` under `parent`
pub(crate) fn import_children(handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), HtmlError> {
    for child in handle.children.borrow().iter() {
        if let Some(id) = import_node(child, tree)? {
            tree.append_child(parent, id)?;
        }
    }
    Ok(())
}

/// Copy one RcDom node (and its subtree) into the arena, detached
pub(crate) fn import_node(handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, HtmlError> {
    let id = match &handle.data {
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return Ok(None),
        RcNodeData::Doctype { name, .. } => tree.push(Node::doctype(name.to_string())),
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
        RcNodeData::Comment { contents } => tree.create_comment(contents),
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(&*name.local);
            for attr in attrs.borrow().iter() {
                tree.set_attribute(id, &attr.name.local, &attr.value)?;
            }
            import_children(handle, tree, id)?;
            id
        }
    };
    Ok(Some(id))
}

/// Element child of `handle` with the given local name
pub(crate) fn child_element(handle: &Handle, tag: &str) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}

/// First element child of `handle`
pub(crate) fn first_element_child(handle: &Handle) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, RcNodeData::Element { .. }))
        .cloned()
}

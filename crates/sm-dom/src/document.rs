//! Document - High-level document API

use crate::{DomTree, NodeId};

/// Document loading lifecycle, as exposed by `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadyState {
    /// Still parsing
    #[default]
    Loading,
    /// Parsed; subresources may still be loading (DOMContentLoaded has fired)
    Interactive,
    /// Fully loaded
    Complete,
}

impl ReadyState {
    /// The `readyState` string
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Interactive => "interactive",
            Self::Complete => "complete",
        }
    }

    /// Whether parsing has finished
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Loading lifecycle state
    ready_state: ReadyState,
}

impl Document {
    /// Create a document with the basic `html`/`head`/`body` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            ready_state: ReadyState::Loading,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            ready_state: ReadyState::Loading,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current loading state
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Move to a new loading state, returning the previous one
    pub fn set_ready_state(&mut self, state: ReadyState) -> ReadyState {
        tracing::debug!("Document {} ready state: {} -> {}", self.url, self.ready_state.as_str(), state.as_str());
        std::mem::replace(&mut self.ready_state, state)
    }

    /// Get the `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.element_children(self.tree.root()).next()
    }

    /// Get the `<head>` element
    pub fn head(&self) -> Option<NodeId> {
        self.child_of_html("head")
    }

    /// Get the `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        self.child_of_html("body")
    }

    fn child_of_html(&self, tag: &str) -> Option<NodeId> {
        let html = self.document_element()?;
        self.tree
            .element_children(html)
            .find(|&child| self.tree.tag_name(child) == Some(tag))
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.head()
            .and_then(|head| {
                self.tree
                    .element_children(head)
                    .find(|&child| self.tree.tag_name(child) == Some("title"))
            })
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.element_by_id(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

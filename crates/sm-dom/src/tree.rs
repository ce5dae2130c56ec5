//! DOM Tree (arena-based allocation)
//!
//! All nodes of a document, attached or detached, live in one `Vec`.
//! Detaching a node only unlinks it; the slot stays valid so stale
//! [`NodeId`]s held by callers keep pointing at the same node.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true: the document node always exists)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push a node into the arena, detached
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    // ------------------------------------------------------------------
    // Structural links
    // ------------------------------------------------------------------

    /// Parent node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Whether the node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Element data, if the node is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Lowercased tag name, if the node is an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// All child nodes (elements, text, comments)
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Element children only
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|&child| self.is_element(child))
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.next_sibling;
        while let Some(sibling) = cursor {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            cursor = self.get(sibling)?.next_sibling;
        }
        None
    }

    /// Previous sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.prev_sibling;
        while let Some(sibling) = cursor {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            cursor = self.get(sibling)?.prev_sibling;
        }
        None
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.node(child)?.is_document() || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            if self.node(reference)?.parent != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(child);
            }
        }

        self.detach(child)?;

        let prev = match reference {
            Some(reference) => self.node(reference)?.prev_sibling,
            None => self.node(parent)?.last_child,
        };

        {
            let node = self.node_mut(child)?;
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = Some(child),
            None => self.node_mut(parent)?.first_child = Some(child),
        }
        match reference {
            Some(reference) => self.node_mut(reference)?.prev_sibling = Some(child),
            None => self.node_mut(parent)?.last_child = Some(child),
        }
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child)?;
        Ok(child)
    }

    /// Unlink a node from its parent and siblings; no-op when detached
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return Ok(());
        };

        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = next,
            None => self.node_mut(parent)?.first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next)?.prev_sibling = prev,
            None => self.node_mut(parent)?.last_child = prev,
        }

        let node = self.node_mut(id)?;
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        Ok(())
    }

    /// Detach every child of `id`
    pub fn remove_children(&mut self, id: NodeId) -> DomResult<()> {
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child)?;
        }
        Ok(())
    }

    /// Copy a node (and its subtree when `deep`) into fresh, detached slots
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let data = self.node(id)?.data.clone();
        let copy = self.push(Node {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data,
        });

        if deep {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    // ------------------------------------------------------------------
    // Attributes and text
    // ------------------------------------------------------------------

    /// Read an attribute of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self
            .node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?
            .remove_attr(name))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if let NodeData::Text(content) = &mut self.node_mut(id)?.data {
            *content = text.to_string();
            return Ok(());
        }
        self.remove_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// First attached element with the given id, in document order
    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&node| self.element(node).and_then(|e| e.id.as_deref()) == Some(id_value))
    }

    /// Descendant elements of `scope` carrying every class in `names`
    /// (whitespace separated)
    pub fn elements_by_class_name(&self, scope: NodeId, names: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = names.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.descendants(scope)
            .filter(|&node| {
                self.element(node)
                    .is_some_and(|e| wanted.iter().all(|class| e.has_class(class)))
            })
            .collect()
    }

    /// Descendant elements of `scope` with the given tag (`*` for all)
    pub fn elements_by_tag_name(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        if tag.is_empty() {
            return Vec::new();
        }
        self.descendants(scope)
            .filter(|&node| {
                self.element(node)
                    .is_some_and(|e| tag == "*" || e.tag.eq_ignore_ascii_case(tag))
            })
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order iterator over the descendants of a node
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let node = self.tree.get(current)?;

        self.next = if let Some(child) = node.first_child {
            Some(child)
        } else {
            // Climb until a node with a next sibling, never leaving the root
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break None;
                }
                let n = self.tree.get(cursor)?;
                if let Some(sibling) = n.next_sibling {
                    break Some(sibling);
                }
                match n.parent {
                    Some(parent) => cursor = parent,
                    None => break None,
                }
            }
        };
        Some(current)
    }
}

//! Collections
//!
//! An immutable, ordered list of element references plus the selector it
//! was built from. Every query and traversal builds a fresh one; clones
//! share the same instance.

use std::fmt;
use std::rc::Rc;

use sm_dom::NodeId;

use crate::iter::EachResult;
use crate::{Function, Sm};

struct Inner {
    nodes: Vec<NodeId>,
    selector: String,
    namespace: Sm,
}

/// Ordered element list
#[derive(Clone)]
pub struct Collection {
    inner: Rc<Inner>,
}

impl Collection {
    pub(crate) fn new(namespace: Sm, nodes: Vec<NodeId>, selector: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(Inner {
                nodes,
                selector: selector.into(),
                namespace,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.nodes.len()
    }

    /// Same as [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.nodes.is_empty()
    }

    /// The string this collection was built from, `""` for non-string input
    pub fn selector(&self) -> &str {
        &self.inner.selector
    }

    /// The namespace that built this collection
    pub fn namespace(&self) -> &Sm {
        &self.inner.namespace
    }

    /// Entry at `index`; negative indices count from the end
    pub fn get(&self, index: isize) -> Option<NodeId> {
        let resolved = if index >= 0 {
            index
        } else {
            index + self.len() as isize
        };
        usize::try_from(resolved)
            .ok()
            .and_then(|i| self.inner.nodes.get(i))
            .copied()
    }

    /// Snapshot of every entry
    pub fn get_all(&self) -> Vec<NodeId> {
        self.inner.nodes.clone()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.inner.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.nodes.iter().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.inner.nodes.contains(&node)
    }

    /// Collection holding only the entry at `index` (empty when out of range)
    pub fn eq(&self, index: isize) -> Collection {
        self.namespace().wrap(self.get(index).into_iter().collect())
    }

    pub fn first(&self) -> Collection {
        self.eq(0)
    }

    pub fn last(&self) -> Collection {
        self.eq(-1)
    }

    /// Register a ready callback; returns this collection
    pub fn ready(&self, callback: Function) -> Collection {
        self.namespace().ready(callback);
        self.clone()
    }

    /// Call `f(index, node)` for each entry until it returns `false`
    pub fn each<R: EachResult>(&self, mut f: impl FnMut(usize, NodeId) -> R) -> &Self {
        for (index, &node) in self.inner.nodes.iter().enumerate() {
            if !f(index, node).should_continue() {
                break;
            }
        }
        self
    }

    /// Collect `f(index, node)` for each entry, dropping `None`
    pub fn map<U>(&self, mut f: impl FnMut(usize, NodeId) -> Option<U>) -> Vec<U> {
        self.iter().enumerate().filter_map(|(index, node)| f(index, node)).collect()
    }

    /// Whether both handles are the same instance
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("nodes", &self.inner.nodes)
            .field("selector", &self.inner.selector)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.nodes.iter().copied()
    }
}

//! Selector resolution and matching
//!
//! Single id/class/tag selectors are answered by direct lookups; anything
//! else goes through the general evaluator in `sm-css`.

use sm_css::{SelectorList, SimpleSelector, matches_list, parse_selector, query_all};
use sm_dom::{Document, NodeId};

use crate::{Config, Result};

/// Turns selector text into element lists
#[derive(Debug, Clone, Copy)]
pub struct SelectorResolver {
    fast_path: bool,
}

impl Default for SelectorResolver {
    fn default() -> Self {
        Self { fast_path: true }
    }
}

impl SelectorResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            fast_path: config.fast_path,
        }
    }

    /// Elements matching `selector` under `scope` (the document by default),
    /// in document order.
    ///
    /// `#id` is looked up across the whole document regardless of scope.
    pub fn resolve(&self, document: &Document, selector: &str, scope: Option<NodeId>) -> Result<Vec<NodeId>> {
        let scope = scope.unwrap_or(NodeId::DOCUMENT);
        let tree = document.tree();

        let simple = if self.fast_path {
            SimpleSelector::classify(selector)
        } else {
            None
        };

        let Some(simple) = simple else {
            tracing::debug!("Resolving {:?} with the general evaluator", selector);
            return Ok(query_all(tree, scope, selector)?);
        };

        tracing::debug!("Resolving {:?} by direct lookup", selector);
        let found = match simple {
            SimpleSelector::Id("") | SimpleSelector::Class("") | SimpleSelector::Tag("") => Vec::new(),
            SimpleSelector::Id(name) => document.get_element_by_id(name).into_iter().collect(),
            SimpleSelector::Class(name) => tree.elements_by_class_name(scope, name),
            SimpleSelector::Tag(name) => tree.elements_by_tag_name(scope, name),
        };
        Ok(found)
    }
}

/// A selector bound to a per-element test. An empty or absent selector
/// matches everything.
#[derive(Debug, Clone)]
pub struct MatchPredicate {
    list: Option<SelectorList>,
}

impl MatchPredicate {
    pub fn new(selector: Option<&str>) -> Result<Self> {
        let list = match selector {
            Some(text) if !text.is_empty() => Some(parse_selector(text)?),
            _ => None,
        };
        Ok(Self { list })
    }

    pub fn test(&self, document: &Document, node: NodeId) -> bool {
        match &self.list {
            None => true,
            Some(list) => matches_list(document.tree(), node, list),
        }
    }
}

/// Whether `element` satisfies `selector`
pub fn matches(document: &Document, element: NodeId, selector: Option<&str>) -> Result<bool> {
    Ok(MatchPredicate::new(selector)?.test(document, element))
}

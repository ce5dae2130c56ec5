//! Fragment Builder
//!
//! Turns a markup string into one detached element of the target tree.
//! Markup is parsed inside the parent element the HTML parser requires
//! for its first tag (an `li` only survives inside a list, a `tr` only
//! inside a table body, ...), and only the wrapper's first element child
//! is copied out, so nothing links back to the scratch wrapper.

use markup5ever_rcdom::Handle;
use sm_dom::{DomTree, NodeId};

use crate::HtmlError;
use crate::markup::{empty_tag_pair, expand_self_closing, first_tag_name};
use crate::parser::{child_element, first_element_child, import_children, import_node, parse_rcdom};

/// Builds detached elements from markup
#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentBuilder;

impl FragmentBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Innermost wrapper element the markup is parsed in
    pub fn wrapper_for(markup: &str) -> &'static str {
        wrapper_chain(first_tag_name(markup).as_deref())
            .last()
            .copied()
            .unwrap_or("div")
    }

    /// Build one detached element from `markup`, then assign `attributes`.
    ///
    /// Returns `None` when the markup produces no element.
    pub fn build(
        &self,
        tree: &mut DomTree,
        markup: &str,
        attributes: &[(&str, &str)],
    ) -> Result<Option<NodeId>, HtmlError> {
        let markup = markup.trim();

        let element = match empty_tag_pair(markup) {
            Some(tag) => Some(tree.create_element(tag)),
            None => {
                let normalized = expand_self_closing(markup);
                let Some(wrapper) = parse_in_wrapper(&normalized)? else {
                    tracing::warn!("Markup produced no wrapper: {:?}", markup);
                    return Ok(None);
                };
                match first_element_child(&wrapper) {
                    Some(first) => import_node(&first, tree)?,
                    None => None,
                }
            }
        };

        let Some(element) = element else {
            tracing::warn!("Markup produced no element: {:?}", markup);
            return Ok(None);
        };
        for (name, value) in attributes {
            tree.set_attribute(element, name, value)?;
        }
        Ok(Some(element))
    }

    /// Build every top-level node of `markup` (elements, text, comments),
    /// detached, in order. Used to replace an element's children.
    pub fn build_children(&self, tree: &mut DomTree, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
        let normalized = expand_self_closing(markup);
        let Some(wrapper) = parse_in_wrapper(&normalized)? else {
            return Ok(Vec::new());
        };

        // Stage under a scratch element so the nodes come out in order
        let scratch = tree.create_element("template");
        import_children(&wrapper, tree, scratch)?;
        let nodes: Vec<NodeId> = tree.children(scratch).collect();
        tree.remove_children(scratch)?;
        Ok(nodes)
    }
}

/// Parent elements the first tag has to be nested in, outermost first
fn wrapper_chain(first_tag: Option<&str>) -> &'static [&'static str] {
    match first_tag {
        Some("li") => &["ul"],
        Some("option" | "optgroup") => &["select"],
        Some("tr") => &["table", "tbody"],
        Some("td" | "th") => &["table", "tbody", "tr"],
        Some("thead" | "tbody" | "tfoot" | "caption" | "colgroup") => &["table"],
        Some("col") => &["table", "colgroup"],
        _ => &["div"],
    }
}

/// Parse `markup` inside its wrapper chain and return the innermost wrapper
fn parse_in_wrapper(markup: &str) -> Result<Option<Handle>, HtmlError> {
    let chain = wrapper_chain(first_tag_name(markup).as_deref());

    let mut source = String::from("<!DOCTYPE html><html><head></head><body>");
    for tag in chain {
        source.push('<');
        source.push_str(tag);
        source.push('>');
    }
    source.push_str(markup);
    for tag in chain.iter().rev() {
        source.push_str("</");
        source.push_str(tag);
        source.push('>');
    }
    source.push_str("</body></html>");

    let dom = parse_rcdom(&source)?;
    let mut cursor = child_element(&dom.document, "html").and_then(|html| child_element(&html, "body"));
    for tag in chain {
        cursor = cursor.and_then(|parent| child_element(&parent, tag));
    }
    Ok(cursor)
}

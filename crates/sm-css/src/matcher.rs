//! Selector matching against the DOM tree
//!
//! Complex selectors are matched right to left: the subject compound is
//! tested on the element itself, then each combinator walks to the
//! candidate ancestors or preceding siblings for the compound on its left.

use sm_dom::{DomTree, NodeId};

use crate::SelectorError;
use crate::parser::parse_selector;
use crate::selectors::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorComponent, SelectorList,
};

/// Test a single element against selector text
pub fn matches(tree: &DomTree, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
    let list = parse_selector(selector)?;
    Ok(matches_list(tree, element, &list))
}

/// Test a single element against a parsed selector list
pub fn matches_list(tree: &DomTree, element: NodeId, list: &SelectorList) -> bool {
    tree.is_element(element) && list.0.iter().any(|complex| match_complex(tree, element, complex))
}

/// All descendant elements of `scope` matching `selector`, in document order
pub fn query_all(tree: &DomTree, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
    let list = parse_selector(selector)?;
    let found: Vec<NodeId> = tree
        .descendants(scope)
        .filter(|&node| matches_list(tree, node, &list))
        .collect();
    tracing::trace!("query_all({:?}) under {} -> {} elements", selector, scope, found.len());
    Ok(found)
}

/// First descendant element of `scope` matching `selector`
pub fn query_first(tree: &DomTree, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
    let list = parse_selector(selector)?;
    Ok(tree.descendants(scope).find(|&node| matches_list(tree, node, &list)))
}

fn match_complex(tree: &DomTree, element: NodeId, complex: &ComplexSelector) -> bool {
    match complex.compounds.len() {
        0 => false,
        n => match_from(tree, element, complex, n - 1),
    }
}

/// Match `compounds[index]` on `element`, then everything to its left
fn match_from(tree: &DomTree, element: NodeId, complex: &ComplexSelector, index: usize) -> bool {
    if !match_compound(tree, element, &complex.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }

    let next = index - 1;
    match complex.combinators[next] {
        Combinator::Child => {
            parent_element(tree, element).is_some_and(|parent| match_from(tree, parent, complex, next))
        }
        Combinator::Descendant => {
            let mut cursor = parent_element(tree, element);
            while let Some(ancestor) = cursor {
                if match_from(tree, ancestor, complex, next) {
                    return true;
                }
                cursor = parent_element(tree, ancestor);
            }
            false
        }
        Combinator::NextSibling => tree
            .previous_element_sibling(element)
            .is_some_and(|prev| match_from(tree, prev, complex, next)),
        Combinator::SubsequentSibling => {
            let mut cursor = tree.previous_element_sibling(element);
            while let Some(prev) = cursor {
                if match_from(tree, prev, complex, next) {
                    return true;
                }
                cursor = tree.previous_element_sibling(prev);
            }
            false
        }
    }
}

fn parent_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.parent(node).filter(|&parent| tree.is_element(parent))
}

fn match_compound(tree: &DomTree, element: NodeId, compound: &CompoundSelector) -> bool {
    compound
        .0
        .iter()
        .all(|component| match_component(tree, element, component))
}

/// Match a selector component against an element
fn match_component(tree: &DomTree, element: NodeId, component: &SelectorComponent) -> bool {
    let Some(data) = tree.element(element) else {
        return false;
    };
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => data.tag.eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => data.id.as_deref() == Some(id.as_str()),
        SelectorComponent::Class(class) => data.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(data.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(tree, element, pseudo),
    }
}

/// Position of an element among its element siblings
struct SiblingPosition {
    /// 1-based index among all element siblings
    index: usize,
    count: usize,
    /// 1-based index among siblings with the same tag
    type_index: usize,
    type_count: usize,
}

fn sibling_position(tree: &DomTree, element: NodeId) -> SiblingPosition {
    let tag = tree.tag_name(element).unwrap_or_default();
    let mut position = SiblingPosition {
        index: 1,
        count: 1,
        type_index: 1,
        type_count: 1,
    };
    let Some(parent) = tree.parent(element) else {
        return position;
    };

    let (mut count, mut type_count) = (0, 0);
    for sibling in tree.element_children(parent) {
        count += 1;
        let same_type = tree.tag_name(sibling) == Some(tag);
        if same_type {
            type_count += 1;
        }
        if sibling == element {
            position.index = count;
            position.type_index = type_count;
        }
    }
    position.count = count;
    position.type_count = type_count;
    position
}

/// Match a pseudo-class against an element
fn match_pseudo_class(tree: &DomTree, element: NodeId, pseudo: &PseudoClass) -> bool {
    let attr = |name: &str| tree.attribute(element, name).is_some();

    match pseudo {
        PseudoClass::Root => tree.parent(element).is_some_and(|p| p.is_document()),
        PseudoClass::Empty => tree.children(element).all(|child| {
            tree.get(child)
                .is_some_and(|n| !n.is_element() && n.as_text().is_none_or(str::is_empty))
        }),
        PseudoClass::FirstChild => sibling_position(tree, element).index == 1,
        PseudoClass::LastChild => {
            let pos = sibling_position(tree, element);
            pos.index == pos.count
        }
        PseudoClass::OnlyChild => sibling_position(tree, element).count == 1,
        PseudoClass::FirstOfType => sibling_position(tree, element).type_index == 1,
        PseudoClass::LastOfType => {
            let pos = sibling_position(tree, element);
            pos.type_index == pos.type_count
        }
        PseudoClass::OnlyOfType => sibling_position(tree, element).type_count == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, element).index as i32),
        PseudoClass::NthLastChild(expr) => {
            let pos = sibling_position(tree, element);
            expr.matches((pos.count - pos.index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => {
            expr.matches(sibling_position(tree, element).type_index as i32)
        }
        PseudoClass::NthLastOfType(expr) => {
            let pos = sibling_position(tree, element);
            expr.matches((pos.type_count - pos.type_index + 1) as i32)
        }
        PseudoClass::Not(list) => !matches_list(tree, element, list),
        PseudoClass::Is(list) => matches_list(tree, element, list),
        PseudoClass::Checked => attr("checked") || attr("selected"),
        PseudoClass::Disabled => attr("disabled"),
        PseudoClass::Enabled => is_form_control(tree, element) && !attr("disabled"),
    }
}

fn is_form_control(tree: &DomTree, element: NodeId) -> bool {
    matches!(
        tree.tag_name(element),
        Some("input" | "button" | "select" | "textarea" | "option" | "optgroup" | "fieldset")
    )
}

//! Traversal Engine
//!
//! Each operation gathers raw candidates from the live tree, then drops
//! duplicates (first occurrence wins) and keeps the candidates matching
//! the optional selector, exactly once, before wrapping the result.

use std::collections::HashSet;

use sm_dom::NodeId;

use crate::iter::map;
use crate::resolve::{MatchPredicate, SelectorResolver};
use crate::{Collection, Result};

impl Collection {
    /// Parent of each entry
    pub fn parent(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            map(self, |node, _, _| tree.parent(node))
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Every ancestor of every entry below the document, one generation at
    /// a time (all parents, then all grandparents, ...)
    pub fn parents(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            let mut found = Vec::new();
            let mut generation = self.get_all();
            while !generation.is_empty() {
                generation = map(&generation, |node, _, _| {
                    tree.parent(node).filter(|parent| !parent.is_document())
                });
                found.extend_from_slice(&generation);
            }
            found
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Entries that match `selector` themselves, followed by every ancestor
    /// (below the document) of the entries that do not. The ancestors are
    /// filtered afterwards, so non-matching ones drop out there.
    pub fn closest(&self, selector: Option<&str>) -> Result<Collection> {
        let predicate = MatchPredicate::new(selector)?;
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();

            let (mut matched, mut unmatched): (Vec<NodeId>, Vec<NodeId>) =
                self.iter().partition(|&node| predicate.test(&document, node));

            let mut ancestors = Vec::new();
            while !unmatched.is_empty() {
                unmatched = map(&unmatched, |node, _, _| {
                    tree.parent(node).filter(|parent| !parent.is_document())
                });
                ancestors.extend_from_slice(&unmatched);
            }
            matched.append(&mut ancestors);
            matched
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Element children of each entry, in entry order
    pub fn children(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            self.iter().flat_map(|node| tree.element_children(node)).collect()
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Descendants of each entry matching `selector` (every descendant
    /// element when absent)
    pub fn find(&self, selector: Option<&str>) -> Result<Collection> {
        let query = selector.filter(|s| !s.is_empty()).unwrap_or("*");
        let candidates = {
            let document = self.namespace().document();
            let resolver = SelectorResolver::new(self.namespace().config());
            let mut found = Vec::new();
            for node in self {
                found.extend(resolver.resolve(&document, query, Some(node))?);
            }
            found
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Element siblings of each entry, excluding the entry itself
    pub fn siblings(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            let mut found = Vec::new();
            for node in self {
                if let Some(parent) = tree.parent(node) {
                    found.extend(tree.element_children(parent).filter(|&sibling| sibling != node));
                }
            }
            found
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Next element sibling of each entry
    pub fn next(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            map(self, |node, _, _| tree.next_element_sibling(node))
        };
        self.dedup_and_filter(candidates, selector)
    }

    /// Previous element sibling of each entry
    pub fn prev(&self, selector: Option<&str>) -> Result<Collection> {
        let candidates = {
            let document = self.namespace().document();
            let tree = document.tree();
            map(self, |node, _, _| tree.previous_element_sibling(node))
        };
        self.dedup_and_filter(candidates, selector)
    }

    fn dedup_and_filter(&self, candidates: Vec<NodeId>, selector: Option<&str>) -> Result<Collection> {
        let predicate = MatchPredicate::new(selector)?;
        let total = candidates.len();
        let kept: Vec<NodeId> = {
            let document = self.namespace().document();
            let mut seen = HashSet::with_capacity(total);
            candidates
                .into_iter()
                .filter(|&node| seen.insert(node) && predicate.test(&document, node))
                .collect()
        };
        tracing::trace!("Traversal kept {} of {} candidates", kept.len(), total);
        Ok(self.namespace().wrap(kept))
    }
}

#[cfg(test)]
mod tests {
    use crate::Sm;

    fn sample() -> Sm {
        Sm::from_html(
            r#"<div id="root" class="match">
                 <ul id="list">
                   <li id="a" class="match">A</li>
                   <li id="b"><span id="s">B</span></li>
                   <li id="c">C</li>
                 </ul>
               </div>"#,
        )
        .unwrap()
    }

    fn ids(sm: &Sm, collection: &crate::Collection) -> Vec<String> {
        let document = sm.document();
        collection
            .iter()
            .map(|node| document.tree().attribute(node, "id").unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_parent_dedups() {
        let sm = sample();
        let parents = sm.query("li").unwrap().parent(None).unwrap();
        assert_eq!(ids(&sm, &parents), vec!["list"]);
    }

    #[test]
    fn test_parents_by_generation() {
        let sm = sample();
        let parents = sm.query("#s").unwrap().parents(None).unwrap();
        let document = sm.document();
        let tags: Vec<&str> = parents.iter().filter_map(|n| document.tree().tag_name(n)).collect();
        assert_eq!(tags, vec!["li", "ul", "div", "body", "html"]);
    }

    #[test]
    fn test_closest_quirk() {
        let sm = sample();
        let start = sm.query("#a, #s").unwrap();
        let closest = start.closest(Some(".match")).unwrap();
        assert_eq!(ids(&sm, &closest), vec!["a", "root"]);
    }

    #[test]
    fn test_closest_keeps_every_matching_ancestor() {
        let sm = Sm::from_html(
            r#"<div class="m" id="outer"><div class="m" id="inner"><p id="leaf">x</p></div></div>"#,
        )
        .unwrap();
        let closest = sm.query("#leaf").unwrap().closest(Some(".m")).unwrap();
        assert_eq!(ids(&sm, &closest), vec!["inner", "outer"]);

        // A matching entry stays itself and contributes no ancestors
        let inner = sm.query("#inner").unwrap().closest(Some(".m")).unwrap();
        assert_eq!(ids(&sm, &inner), vec!["inner"]);
    }

    #[test]
    fn test_children_and_find() {
        let sm = sample();
        let list = sm.query("#list").unwrap();
        assert_eq!(ids(&sm, &list.children(None).unwrap()), vec!["a", "b", "c"]);
        assert_eq!(ids(&sm, &list.children(Some(".match")).unwrap()), vec!["a"]);
        assert_eq!(ids(&sm, &list.find(Some("span")).unwrap()), vec!["s"]);
        assert_eq!(list.find(None).unwrap().len(), 4);
    }

    #[test]
    fn test_siblings_next_prev() {
        let sm = sample();
        let b = sm.query("#b").unwrap();
        assert_eq!(ids(&sm, &b.siblings(None).unwrap()), vec!["a", "c"]);
        assert_eq!(ids(&sm, &b.next(None).unwrap()), vec!["c"]);
        assert_eq!(ids(&sm, &b.prev(None).unwrap()), vec!["a"]);
        assert!(sm.query("#c").unwrap().next(None).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_filter_errors() {
        let sm = sample();
        assert!(sm.query("li").unwrap().parent(Some("ul[")).is_err());
    }
}

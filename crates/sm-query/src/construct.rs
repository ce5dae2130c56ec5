//! Collection Constructor
//!
//! One entry point that dispatches on the kind of its input:
//!
//! 1. function: ready callback, wraps the document
//! 2. collection: returned as is
//! 3. object: a single node, or nothing
//! 4. array: its node entries, in order
//! 5. string: markup, scoped selector, or document-wide selector
//! 6. anything else: empty

use sm_dom::NodeId;
use sm_html::{FragmentBuilder, looks_like_markup};

use crate::resolve::SelectorResolver;
use crate::{Collection, Kind, Result, Sm, Value, kind_of};

impl Sm {
    /// Build a collection from `input`, optionally scoped to `scope`
    pub fn construct(&self, input: Value, scope: Option<Value>) -> Result<Collection> {
        // An empty or nullish scope counts as no scope
        let scope = scope.filter(Value::is_truthy);

        match (kind_of(&input), input) {
            (Kind::Function, Value::Function(callback)) => {
                tracing::debug!("Constructing from a ready callback");
                Ok(self.wrap(vec![NodeId::DOCUMENT]).ready(callback))
            }
            (_, Value::Collection(existing)) => Ok(existing),
            (Kind::Object, value) => {
                tracing::debug!("Constructing from a single object");
                Ok(self.wrap(value.as_node().into_iter().collect()))
            }
            (Kind::Array, Value::Array(items)) => {
                tracing::debug!("Constructing from an array of {} entries", items.len());
                Ok(self.wrap(items.iter().filter_map(Value::as_node).collect()))
            }
            (Kind::String, Value::String(text)) => self.construct_from_string(text, scope),
            (kind, _) => {
                tracing::debug!("Nothing to construct from a {} value", kind);
                Ok(self.wrap(Vec::new()))
            }
        }
    }

    /// Wrap an element list as a collection with an empty selector
    pub fn wrap(&self, nodes: Vec<NodeId>) -> Collection {
        Collection::new(self.clone(), nodes, String::new())
    }

    fn construct_from_string(&self, text: String, scope: Option<Value>) -> Result<Collection> {
        if looks_like_markup(&text) {
            tracing::debug!("Constructing from markup");
            let built = {
                let mut document = self.document_mut();
                FragmentBuilder::new().build(document.tree_mut(), &text, &[])?
            };
            return Ok(Collection::new(self.clone(), built.into_iter().collect(), text));
        }

        if let Some(scope) = scope {
            tracing::debug!("Constructing {:?} within a scope", text);
            let found = self.construct(scope, None)?.find(Some(text.as_str()))?;
            return Ok(Collection::new(self.clone(), found.get_all(), text));
        }

        let nodes = {
            let document = self.document();
            SelectorResolver::new(self.config()).resolve(&document, &text, None)?
        };
        Ok(Collection::new(self.clone(), nodes, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Function, Object};
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample() -> Sm {
        Sm::from_html(r#"<div id="app"><p class="x">a</p><p>b</p></div><p class="x">c</p>"#).unwrap()
    }

    #[test]
    fn test_id_selector() {
        let sm = sample();
        let app = sm.query("#app").unwrap();
        assert_eq!(app.len(), 1);
        assert_eq!(app.selector(), "#app");
        assert!(sm.query("#missing").unwrap().is_empty());
    }

    #[test]
    fn test_node_and_array_inputs() {
        let sm = sample();
        let all = sm.query("p").unwrap().get_all();
        let rebuilt = sm.query(all.clone()).unwrap();
        assert_eq!(rebuilt.get_all(), all);
        assert_eq!(rebuilt.selector(), "");

        let single = sm.query(all[1]).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0), Some(all[1]));
    }

    #[test]
    fn test_collection_passthrough() {
        let sm = sample();
        let first = sm.query("p").unwrap();
        let again = sm.query(&first).unwrap();
        assert!(again.ptr_eq(&first));
    }

    #[test]
    fn test_markup() {
        let sm = sample();
        let li = sm.query("<li></li>").unwrap();
        assert_eq!(li.len(), 1);
        assert_eq!(li.selector(), "<li></li>");
        let node = li.get(0).unwrap();
        assert_eq!(sm.document().tree().tag_name(node), Some("li"));
        assert_eq!(sm.document().tree().parent(node), None);
    }

    #[test]
    fn test_scoped_selector() {
        let sm = sample();
        let inside = sm.query_in(".x", "#app").unwrap();
        assert_eq!(inside.len(), 1);
        assert_eq!(inside.selector(), ".x");

        // An empty scope is ignored
        assert_eq!(sm.query_in(".x", "").unwrap().len(), 2);
    }

    #[test]
    fn test_function_wraps_document() {
        let sm = sample();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let doc = sm.query(Function::new(move |_| flag.set(true))).unwrap();
        assert!(fired.get());
        assert_eq!(doc.get_all(), vec![NodeId::DOCUMENT]);
    }

    #[test]
    fn test_other_inputs_are_empty() {
        let sm = sample();
        assert!(sm.query(Value::Null).unwrap().is_empty());
        assert!(sm.query(Value::Undefined).unwrap().is_empty());
        assert!(sm.query(42).unwrap().is_empty());
        assert!(sm.query(Value::Object(Object::new())).unwrap().is_empty());
        assert!(sm.query(Value::Window).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector_errors() {
        let sm = sample();
        assert!(sm.query("div >").is_err());
    }
}

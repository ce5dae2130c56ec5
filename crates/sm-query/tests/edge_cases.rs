//! Edge case tests for sm-query
//!
//! Empty and odd inputs, detached nodes, the document node, disabled fast
//! path, configuration and error propagation.

use anyhow::Result;
use sm_query::{
    Config, CssValue, Document, Error, Kind, NodeId, Object, Sm, Value, extend, is_collection, is_plain_object,
    kind_of,
};

fn sm() -> Result<Sm> {
    Ok(Sm::from_html(
        r#"<div id="a" class="c"><span class="c">x</span></div><p id="b" style="display: none">y</p>"#,
    )?)
}

#[test]
fn test_nullish_and_scalar_inputs_are_empty() -> Result<()> {
    let sm = sm()?;
    for input in [
        Value::Undefined,
        Value::Null,
        Value::from(false),
        Value::from(0),
        Value::Date(0.0),
        Value::RegExp("x".into()),
        Value::Error("e".into()),
        Value::Window,
        Value::Object(Object::new()),
        Value::Array(Vec::new()),
        Value::from(""),
    ] {
        let collection = sm.query(input.clone())?;
        assert!(collection.is_empty(), "{input:?}");
        assert_eq!(collection.selector(), "", "{input:?}");
    }
    Ok(())
}

#[test]
fn test_array_skips_non_nodes() -> Result<()> {
    let sm = sm()?;
    let a = sm.query("#a")?.get(0).expect("a");
    let mixed = Value::Array(vec![Value::from("text"), Value::Node(a), Value::Null]);
    assert_eq!(sm.query(mixed)?.get_all(), vec![a]);
    Ok(())
}

#[test]
fn test_document_node_input() -> Result<()> {
    let sm = sm()?;
    let doc = sm.query(NodeId::DOCUMENT)?;
    assert_eq!(doc.len(), 1);
    assert!(doc.parent(None)?.is_empty());
    assert!(doc.parents(None)?.is_empty());
    assert!(doc.siblings(None)?.is_empty());
    assert_eq!(doc.children(None)?.len(), 1);
    assert_eq!(doc.find(Some("span"))?.len(), 1);
    Ok(())
}

#[test]
fn test_root_element_parents_stop_at_document() -> Result<()> {
    let sm = sm()?;
    let html = sm.query("html")?;
    assert!(html.parents(None)?.is_empty());
    // The plain parent step does reach the document node
    assert_eq!(html.parent(None)?.get_all(), vec![NodeId::DOCUMENT]);
    assert!(html.parent(Some("*"))?.is_empty());
    Ok(())
}

#[test]
fn test_empty_collection_traversals() -> Result<()> {
    let sm = sm()?;
    let empty = sm.query("#nope")?;
    assert!(empty.parent(None)?.is_empty());
    assert!(empty.closest(Some("div"))?.is_empty());
    assert!(empty.find(None)?.is_empty());
    assert!(empty.next(None)?.is_empty());
    assert!(empty.first().is_empty());
    assert_eq!(empty.get(0), None);
    assert_eq!(empty.html(), None);
    assert_eq!(empty.text(), "");
    assert_eq!(empty.index(None)?, None);
    Ok(())
}

#[test]
fn test_detached_fragment_traversal() -> Result<()> {
    let sm = sm()?;
    let list = sm.query("<ul><li>1</li><li>2</li></ul>")?;
    assert!(list.parent(None)?.is_empty());
    assert!(list.siblings(None)?.is_empty());
    assert_eq!(list.children(None)?.len(), 2);
    assert_eq!(list.find(Some("li"))?.len(), 2);
    // Detached nodes are invisible to document-wide queries
    assert_eq!(sm.query("li")?.len(), 0);
    Ok(())
}

#[test]
fn test_find_id_is_document_global() -> Result<()> {
    let sm = sm()?;
    let span = sm.query("span")?;
    assert_eq!(span.find(Some("#b"))?.len(), 1);
    Ok(())
}

#[test]
fn test_empty_and_prefix_only_selectors() -> Result<()> {
    let sm = sm()?;
    assert!(sm.query("#")?.is_empty());
    assert!(sm.query(".")?.is_empty());
    Ok(())
}

#[test]
fn test_invalid_selector_propagates() {
    let sm = sm().expect("page parses");
    assert!(matches!(sm.query("div["), Err(Error::Selector(_))));
    assert!(matches!(sm.query_in("p >", "#a"), Err(Error::Selector(_))));
    let a = sm.query("#a").expect("valid");
    assert!(matches!(a.children(Some(":unknown")), Err(Error::Selector(_))));
}

#[test]
fn test_disabled_fast_path() -> Result<()> {
    let html = r#"<div class="c"><span class="c">x</span></div>"#;
    let config = Config {
        fast_path: false,
        ..Config::default()
    };
    let slow = Sm::with_config(sm_query::html::HtmlParser::new().parse(html)?, config);
    let fast = Sm::from_html(html)?;
    assert_eq!(slow.query(".c")?.get_all(), fast.query(".c")?.get_all());
    assert_eq!(slow.query("span")?.get_all(), fast.query("span")?.get_all());
    // Without the fast path the general evaluator rejects a bare prefix
    assert!(slow.query("#").is_err());
    Ok(())
}

#[test]
fn test_config_from_json_unitless() -> Result<()> {
    let config = Config::from_json(r#"{"unitless_properties": ["flex-grow"]}"#)?;
    let sm = Sm::with_config(Document::new("about:blank"), config);
    let body = sm.query("body")?;
    body.set_css("flexGrow", 2)?.set_css("width", 3)?;
    assert_eq!(body.css("flex-grow")?.as_deref(), Some("2"));
    assert_eq!(body.css("width")?.as_deref(), Some("3px"));
    assert!(!sm.config().is_unitless("z-index"));
    Ok(())
}

#[test]
fn test_css_on_missing_style() -> Result<()> {
    let sm = sm()?;
    let a = sm.query("#a")?;
    assert_eq!(a.css("color")?, None);
    assert_eq!(sm.query("#b")?.css("display")?.as_deref(), Some("none"));
    a.set_css_map(&[("width", CssValue::from(1.5)), ("opacity", CssValue::from(0.5))])?;
    assert_eq!(a.attr("style").as_deref(), Some("width: 1.5px; opacity: 0.5"));
    Ok(())
}

#[test]
fn test_data_with_invalid_json() -> Result<()> {
    let sm = sm()?;
    let a = sm.query("#a")?;
    a.set_attr("data-label", "not json")?;
    assert!(matches!(a.data("label"), Err(Error::Data(_))));
    Ok(())
}

#[test]
fn test_update_callbacks_may_query() -> Result<()> {
    let sm = sm()?;
    let target = sm.query("#b")?;
    let outer = sm.clone();
    target.update_text(|old| {
        let count = outer.query(".c").map(|c| c.len()).unwrap_or(0);
        format!("{old}{count}")
    })?;
    assert_eq!(target.text(), "y2");
    Ok(())
}

#[test]
fn test_kind_of_collections_and_nodes() -> Result<()> {
    let sm = sm()?;
    let value = Value::Collection(sm.query("div")?);
    assert_eq!(kind_of(&value), Kind::Object);
    assert!(is_collection(&value));
    assert!(!is_plain_object(&Value::Node(NodeId::DOCUMENT)));
    assert_eq!(Sm::kind_of(&Value::Null).as_str(), "null");
    Ok(())
}

#[test]
fn test_extend_into_array() {
    let mut target = Value::Array(vec![Value::from(1)]);
    let source = Value::Array(vec![Value::from(9), Value::from(2), Value::from(3)]);
    extend(&mut target, &[source], false);
    assert_eq!(
        target,
        Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
}

#[test]
fn test_namespace_string_helpers() {
    assert_eq!(Sm::trim("\t spaced \n"), "spaced");
    assert_eq!(Sm::camel_case("border-top-width"), "borderTopWidth");
    assert_eq!(Sm::camel_connector("borderTopWidth"), "border-top-width");
    assert!(Sm::is_empty_object(&Value::Object(Object::new())));
}

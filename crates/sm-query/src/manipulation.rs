//! Content, attribute and style accessors
//!
//! Getters read the first entry (except `text`, which concatenates all of
//! them); setters write every element entry and return the collection.

use sm_css::{InlineStyle, camel_connector};
use sm_dom::{DomTree, NodeId};
use sm_html::{FragmentBuilder, HtmlSerializer};

use crate::{Collection, Config, Result, Value, util};

/// Value handed to the style setters
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Gets a `px` unit unless the property is unitless
    Number(f64),
    Text(String),
    /// Removes the property
    Remove,
}

impl CssValue {
    /// Declaration text for `property`, `None` when it should be removed
    fn to_css(&self, property: &str, config: &Config) -> Option<String> {
        match self {
            CssValue::Number(n) if config.is_unitless(property) => Some(n.to_string()),
            CssValue::Number(n) => Some(format!("{n}px")),
            CssValue::Text(text) if text.is_empty() => None,
            CssValue::Text(text) => Some(text.clone()),
            CssValue::Remove => None,
        }
    }
}

impl From<f64> for CssValue {
    fn from(n: f64) -> Self {
        CssValue::Number(n)
    }
}

impl From<i32> for CssValue {
    fn from(n: i32) -> Self {
        CssValue::Number(n.into())
    }
}

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        CssValue::Text(s.to_string())
    }
}

impl From<String> for CssValue {
    fn from(s: String) -> Self {
        CssValue::Text(s)
    }
}

impl From<bool> for CssValue {
    fn from(b: bool) -> Self {
        if b {
            CssValue::Text("true".to_string())
        } else {
            CssValue::Remove
        }
    }
}

impl Collection {
    // ------------------------------------------------------------------
    // HTML
    // ------------------------------------------------------------------

    /// Inner HTML of the first entry
    pub fn html(&self) -> Option<String> {
        let node = self.get(0)?;
        let document = self.namespace().document();
        Some(HtmlSerializer::new().serialize_inner(document.tree(), node))
    }

    /// Replace the children of every element with parsed `markup`
    pub fn set_html(&self, markup: &str) -> Result<&Self> {
        self.update_html(|_| markup.to_string())
    }

    /// Replace the children of every element with `f(current inner HTML)`
    pub fn update_html(&self, mut f: impl FnMut(&str) -> String) -> Result<&Self> {
        for node in self.elements() {
            let current = {
                let document = self.namespace().document();
                HtmlSerializer::new().serialize_inner(document.tree(), node)
            };
            let markup = f(&current);

            let mut document = self.namespace().document_mut();
            let tree = document.tree_mut();
            let children = FragmentBuilder::new().build_children(tree, &markup)?;
            tree.remove_children(node)?;
            for child in children {
                tree.append_child(node, child)?;
            }
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Text content of every entry, concatenated. The document node has
    /// no text content of its own and is skipped.
    pub fn text(&self) -> String {
        let document = self.namespace().document();
        let tree = document.tree();
        self.map(|_, node| (!node.is_document()).then(|| tree.text_content(node)))
            .concat()
    }

    pub fn set_text(&self, text: &str) -> Result<&Self> {
        self.update_text(|_| text.to_string())
    }

    /// Set every element's text to `f(current text)`
    pub fn update_text(&self, mut f: impl FnMut(&str) -> String) -> Result<&Self> {
        for node in self.elements() {
            let current = self.namespace().document().tree().text_content(node);
            let text = f(&current);
            self.namespace().document_mut().tree_mut().set_text_content(node, &text)?;
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Form values
    // ------------------------------------------------------------------

    /// Form value of the first entry
    pub fn val(&self) -> Option<String> {
        let node = self.get(0)?;
        let document = self.namespace().document();
        form_value(document.tree(), node)
    }

    pub fn set_val(&self, value: &str) -> Result<&Self> {
        self.update_val(|_| value.to_string())
    }

    /// Set every element's form value to `f(current value)`
    pub fn update_val(&self, mut f: impl FnMut(&str) -> String) -> Result<&Self> {
        for node in self.elements() {
            let current = form_value(self.namespace().document().tree(), node).unwrap_or_default();
            let value = f(&current);

            let mut document = self.namespace().document_mut();
            let tree = document.tree_mut();
            let tag = tree.tag_name(node).map(str::to_string);
            match tag.as_deref() {
                Some("textarea") => tree.set_text_content(node, &value)?,
                Some("select") => select_option(tree, node, &value)?,
                _ => tree.set_attribute(node, "value", &value)?,
            }
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Attribute of the first entry
    pub fn attr(&self, name: &str) -> Option<String> {
        let node = self.get(0)?;
        let document = self.namespace().document();
        document.tree().attribute(node, name).map(String::from)
    }

    pub fn set_attr(&self, name: &str, value: &str) -> Result<&Self> {
        self.set_attrs(&[(name, value)])
    }

    pub fn set_attrs(&self, attributes: &[(&str, &str)]) -> Result<&Self> {
        let elements = self.elements();
        let mut document = self.namespace().document_mut();
        let tree = document.tree_mut();
        for node in elements {
            for (name, value) in attributes {
                tree.set_attribute(node, name, value)?;
            }
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------

    /// Inline style value of the first entry; `name` may be camelCase
    pub fn css(&self, name: &str) -> Result<Option<String>> {
        let Some(style) = self.first_style()? else {
            return Ok(None);
        };
        Ok(style.get(name).map(String::from))
    }

    /// Inline style values of the first entry, joined with `,`. Missing
    /// properties contribute an empty slot.
    pub fn css_many(&self, names: &[&str]) -> Result<String> {
        let Some(style) = self.first_style()? else {
            return Ok(String::new());
        };
        Ok(names
            .iter()
            .map(|name| style.get(name).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(","))
    }

    pub fn set_css(&self, name: &str, value: impl Into<CssValue>) -> Result<&Self> {
        self.set_css_map(&[(name, value.into())])
    }

    /// Apply several style properties to every element
    pub fn set_css_map(&self, properties: &[(&str, CssValue)]) -> Result<&Self> {
        let config = self.namespace().config();
        let elements = self.elements();
        let mut document = self.namespace().document_mut();
        let tree = document.tree_mut();
        for node in elements {
            let mut style = InlineStyle::parse(tree.attribute(node, "style").unwrap_or(""))?;
            for (name, value) in properties {
                let property = camel_connector(name).to_ascii_lowercase();
                match value.to_css(&property, config) {
                    Some(text) => style.set(&property, &text),
                    None => {
                        style.remove(&property);
                    }
                }
            }
            if style.is_empty() {
                tree.remove_attribute(node, "style")?;
            } else {
                tree.set_attribute(node, "style", &style.to_css_text())?;
            }
        }
        Ok(self)
    }

    fn first_style(&self) -> Result<Option<InlineStyle>> {
        let Some(node) = self.get(0) else {
            return Ok(None);
        };
        let document = self.namespace().document();
        let text = document.tree().attribute(node, "style").unwrap_or("");
        Ok(Some(InlineStyle::parse(text)?))
    }

    // ------------------------------------------------------------------
    // Position and data
    // ------------------------------------------------------------------

    /// With an element: its position in this collection. Without: the
    /// position of the first entry among its parent's element children.
    pub fn index(&self, element: Option<Value>) -> Result<Option<usize>> {
        match element.filter(Value::is_truthy) {
            Some(element) => {
                let target = self.namespace().query(element)?.get(0);
                Ok(target.and_then(|target| self.iter().position(|node| node == target)))
            }
            None => {
                let Some(first) = self.get(0) else {
                    return Ok(None);
                };
                let siblings = self.parent(None)?.children(None)?;
                Ok(siblings.iter().position(|node| node == first))
            }
        }
    }

    /// JSON value of a `data-*` attribute on the first entry
    pub fn data(&self, name: &str) -> Result<Option<Value>> {
        let key = if name.starts_with("data-") {
            name.to_string()
        } else {
            data_attribute_name(name)
        };
        match self.attr(&key) {
            Some(text) => Ok(Some(util::parse(&text)?)),
            None => Ok(None),
        }
    }

    /// Element entries, snapshotted so the tree can be mutated meanwhile
    fn elements(&self) -> Vec<NodeId> {
        let document = self.namespace().document();
        self.iter().filter(|&node| document.tree().is_element(node)).collect()
    }
}

/// `fooBar` → `data-foo-bar`
fn data_attribute_name(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 8);
    key.push_str("data-");
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            key.push('-');
            key.push(c.to_ascii_lowercase());
        } else {
            key.push(c);
        }
    }
    key
}

fn form_value(tree: &DomTree, node: NodeId) -> Option<String> {
    match tree.tag_name(node)? {
        "textarea" => Some(tree.text_content(node)),
        "select" => {
            let options = tree.elements_by_tag_name(node, "option");
            let chosen = options
                .iter()
                .copied()
                .find(|&option| tree.attribute(option, "selected").is_some())
                .or_else(|| options.first().copied())?;
            Some(option_value(tree, chosen))
        }
        _ => Some(tree.attribute(node, "value").unwrap_or("").to_string()),
    }
}

fn option_value(tree: &DomTree, option: NodeId) -> String {
    match tree.attribute(option, "value") {
        Some(value) => value.to_string(),
        None => tree.text_content(option).trim().to_string(),
    }
}

/// Mark the option whose value is `value` as selected, unmarking the rest
fn select_option(tree: &mut DomTree, select: NodeId, value: &str) -> Result<()> {
    for option in tree.elements_by_tag_name(select, "option") {
        if option_value(tree, option) == value {
            tree.set_attribute(option, "selected", "")?;
        } else {
            tree.remove_attribute(option, "selected")?;
        }
    }
    Ok(())
}

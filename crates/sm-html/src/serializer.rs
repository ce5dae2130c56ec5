//! HTML Serialization (innerHTML/outerHTML)

use sm_dom::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// HTML serializer
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    fn serialize_children(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        for child in tree.children(node_id) {
            self.serialize_node(tree, child, output);
        }
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => self.serialize_children(tree, node_id, output),
            NodeData::Element(elem) => {
                output.push('<');
                output.push_str(&elem.tag);
                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(&attr.name);
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
                    return;
                }
                if RAW_TEXT_ELEMENTS.contains(&elem.tag.as_str()) {
                    output.push_str(&tree.text_content(node_id));
                } else {
                    self.serialize_children(tree, node_id, output);
                }
                output.push_str("</");
                output.push_str(&elem.tag);
                output.push('>');
            }
            NodeData::Text(text) => escape_text(text, output),
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
        }
    }
}

fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

fn escape_attribute(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FragmentBuilder;

    #[test]
    fn test_serialize_outer() {
        let mut tree = DomTree::new();
        let ul = FragmentBuilder::new()
            .build(&mut tree, r#"<ul class="x"><li>a &amp; b</li><li><br></li></ul>"#, &[])
            .unwrap()
            .unwrap();
        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, ul),
            r#"<ul class="x"><li>a &amp; b</li><li><br></li></ul>"#
        );
    }

    #[test]
    fn test_serialize_inner_escapes() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "title", "say \"hi\"").unwrap();
        tree.set_text_content(div, "1 < 2").unwrap();
        let serializer = HtmlSerializer::new();
        assert_eq!(serializer.serialize_inner(&tree, div), "1 &lt; 2");
        assert_eq!(
            serializer.serialize_outer(&tree, div),
            r#"<div title="say &quot;hi&quot;">1 &lt; 2</div>"#
        );
    }
}

//! # Serializer Strategies
//!
//! Every node holds a serializer strategy that turns it (and, through
//! [`Tree::inner_html`], its children) into markup. The default strategy is
//! [`NativeSerializer`]; other strategies can be swapped in per node and
//! swapped back later without touching the rest of the node's state.

use crate::node::{AttrValue, NodeId, NodeKind};
use crate::tree::Tree;
use std::fmt;

/// Turns one node into an HTML string
pub trait Serializer: fmt::Debug + Send + Sync {
    /// Serialize node `id` of `tree`
    fn serialize(&self, tree: &Tree, id: NodeId) -> String;

    /// Get a debug name for this strategy
    fn name(&self) -> &'static str;
}

/// Plain HTML output of a node and its children
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeSerializer;

impl Serializer for NativeSerializer {
    fn serialize(&self, tree: &Tree, id: NodeId) -> String {
        let Some(node) = tree.node(id) else {
            return String::new();
        };

        match node.kind() {
            NodeKind::Text { content } => escape_text(content),
            NodeKind::Element { tag_name } => {
                let mut html = format!("<{}", tag_name);
                for (key, value) in node.attributes() {
                    if let Some(attr) = render_attribute(key, value) {
                        html.push(' ');
                        html.push_str(&attr);
                    }
                }
                if !node.classes().is_empty() {
                    html.push_str(&format!(
                        " class=\"{}\"",
                        escape_attribute(&node.classes().join(" "))
                    ));
                }
                html.push('>');

                if is_void_element(tag_name) {
                    return html;
                }

                html.push_str(&tree.inner_html(id));
                html.push_str(&format!("</{}>", tag_name));
                html
            }
        }
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Render `key="value"`, a bare `key` for `true`, nothing for `false`
pub fn render_attribute(key: &str, value: &AttrValue) -> Option<String> {
    match value {
        AttrValue::Bool(true) => Some(key.to_string()),
        AttrValue::Bool(false) => None,
        AttrValue::Text(text) => Some(format!("{}=\"{}\"", key, escape_attribute(text))),
    }
}

pub fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Elements that never have children or a closing tag
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_attribute_variants() {
        assert_eq!(
            render_attribute("type", &AttrValue::from("button")).as_deref(),
            Some("type=\"button\"")
        );
        assert_eq!(
            render_attribute("disabled", &AttrValue::Bool(true)).as_deref(),
            Some("disabled")
        );
        assert_eq!(render_attribute("hidden", &AttrValue::Bool(false)), None);
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(
            render_attribute("title", &AttrValue::from("say \"hi\" & bye")).as_deref(),
            Some("title=\"say &quot;hi&quot; &amp; bye\"")
        );
    }

    #[test]
    fn test_native_serializes_nested_tree() {
        let mut tree = Tree::new();
        let root = tree.create_element("section");
        tree.add_root(root).unwrap();
        let link = tree.create_element("a");
        tree.append_child(root, link).unwrap();
        let text = tree.create_text("Tom & Jerry");
        tree.append_child(link, text).unwrap();
        let br = tree.create_element("br");
        tree.append_child(root, br).unwrap();

        {
            let node = tree.node_mut(link).unwrap();
            node.set_attribute("href", AttrValue::from("/about"));
            node.add_class("nav");
        }

        assert_eq!(
            tree.to_html(root),
            "<section><a href=\"/about\" class=\"nav\">Tom &amp; Jerry</a><br></section>"
        );
    }

    #[test]
    fn test_unknown_node_serializes_empty() {
        let tree = Tree::new();
        assert_eq!(NativeSerializer.serialize(&tree, NodeId(42)), "");
    }
}

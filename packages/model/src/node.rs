use crate::serializer::{NativeSerializer, Serializer};
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stable identity of a node within its [`Tree`](crate::Tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// HTML attribute value
///
/// Boolean attributes render as a bare name when `true` and are omitted
/// when `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag_name: String },
    Text { content: String },
}

/// One component of the page tree
///
/// Besides its markup state, a node owns two pieces of node-local state:
/// its optional [`Template`] and the serializer strategy used to turn it
/// into HTML.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, AttrValue>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    template: Option<Template>,
    serializer: Arc<dyn Serializer>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
            template: None,
            serializer: Arc::new(NativeSerializer),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Tag name, `None` for text nodes
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag_name } => Some(tag_name),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { content } => Some(content),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Add a class token, ignoring duplicates
    pub fn add_class(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && !self.has_class(name) {
            self.classes.push(name.to_string());
        }
    }

    pub fn remove_class(&mut self, name: &str) {
        self.classes.retain(|c| c != name);
    }

    /// Replace the class list with the whitespace-separated tokens of `names`
    pub fn set_classes(&mut self, names: &str) {
        self.classes.clear();
        for name in names.split_whitespace() {
            self.add_class(name);
        }
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttrValue> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Set an attribute. `class` is routed to the class list.
    pub fn set_attribute(&mut self, name: &str, value: AttrValue) {
        if name == "class" {
            match value {
                AttrValue::Text(names) => self.set_classes(&names),
                AttrValue::Bool(_) => self.classes.clear(),
            }
            return;
        }
        self.attributes.insert(name.to_string(), value);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<AttrValue> {
        self.attributes.remove(name)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Current override record, if any
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Normalize and store `fields`, replacing any previous record.
    ///
    /// An all-blank record clears the template instead of storing it.
    pub fn set_template(&mut self, fields: &Template) {
        self.template = fields.normalized();
    }

    pub fn clear_template(&mut self) -> Option<Template> {
        self.template.take()
    }

    /// Serializer strategy currently installed on this node
    pub fn serializer(&self) -> &Arc<dyn Serializer> {
        &self.serializer
    }

    /// Install a serializer strategy, returning the previous one
    pub fn set_serializer(&mut self, serializer: Arc<dyn Serializer>) -> Arc<dyn Serializer> {
        std::mem::replace(&mut self.serializer, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateField;

    fn div() -> Node {
        Node::new(
            NodeId(1),
            NodeKind::Element {
                tag_name: "div".to_string(),
            },
        )
    }

    #[test]
    fn test_class_attribute_routes_to_class_list() {
        let mut node = div();
        node.set_attribute("class", AttrValue::from("foo  bar foo"));

        assert_eq!(node.classes(), ["foo", "bar"]);
        assert!(node.attribute("class").is_none());
    }

    #[test]
    fn test_set_template_replaces_wholesale() {
        let mut node = div();
        node.set_template(&Template::new().with(TemplateField::Before, "<!--A-->"));
        node.set_template(&Template::new().with(TemplateField::After, "<!--B-->"));

        let template = node.template().unwrap();
        assert_eq!(template.before, None);
        assert_eq!(template.after.as_deref(), Some("<!--B-->"));
    }

    #[test]
    fn test_blank_template_clears_record() {
        let mut node = div();
        node.set_template(&Template::new().with(TemplateField::Style, "color: red"));
        assert!(node.template().is_some());

        node.set_template(&Template::new().with(TemplateField::Style, "  \n "));
        assert!(node.template().is_none());
    }

    #[test]
    fn test_attr_value_json_shape() {
        let text: AttrValue = serde_json::from_str(r#""submit""#).unwrap();
        let flag: AttrValue = serde_json::from_str("true").unwrap();

        assert_eq!(text, AttrValue::from("submit"));
        assert_eq!(flag, AttrValue::Bool(true));
    }
}

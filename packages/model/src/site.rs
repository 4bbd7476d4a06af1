//! # Site Documents
//!
//! Serde shape of a saved website: pages, each with a root component.
//! Templates are persisted with the node that owns them.
//!
//! ```json
//! {
//!   "name": "My site",
//!   "pages": [{
//!     "id": "index",
//!     "name": "Home",
//!     "root": {
//!       "type": "element",
//!       "tagName": "body",
//!       "components": [
//!         { "type": "textnode", "content": "Hello", "template": { "before": "[" } }
//!       ]
//!     }
//!   }]
//! }
//! ```

use crate::node::{AttrValue, NodeId};
use crate::template::Template;
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

fn default_site_name() -> String {
    "New website".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub root: NodeSpec,
}

/// Serialized component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeSpec {
    #[serde(rename = "element", rename_all = "camelCase")]
    Element {
        tag_name: String,

        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, AttrValue>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        classes: Vec<String>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        components: Vec<NodeSpec>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<Template>,
    },

    #[serde(rename = "textnode")]
    Text {
        content: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<Template>,
    },
}

impl NodeSpec {
    pub fn element(tag_name: impl Into<String>) -> Self {
        NodeSpec::Element {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            components: Vec::new(),
            template: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        NodeSpec::Text {
            content: content.into(),
            template: None,
        }
    }
}

impl Site {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Tree {
    /// Build a detached subtree from `spec`, returning its root id.
    ///
    /// Stored templates go through the same normalization as edits.
    pub fn build(&mut self, spec: &NodeSpec) -> NodeId {
        match spec {
            NodeSpec::Text { content, template } => {
                let id = self.create_text(content);
                self.attach_template(id, template.as_ref());
                id
            }
            NodeSpec::Element {
                tag_name,
                attributes,
                classes,
                components,
                template,
            } => {
                let id = self.create_element(tag_name);
                if let Some(node) = self.node_mut(id) {
                    for (key, value) in attributes {
                        node.set_attribute(key, value.clone());
                    }
                    for class in classes {
                        node.add_class(class);
                    }
                }
                self.attach_template(id, template.as_ref());

                for child in components {
                    let child_id = self.build(child);
                    // Freshly built nodes are detached and acyclic
                    let _ = self.append_child(id, child_id);
                }
                id
            }
        }
    }

    fn attach_template(&mut self, id: NodeId, template: Option<&Template>) {
        if let (Some(node), Some(template)) = (self.node_mut(id), template) {
            node.set_template(template);
        }
    }
}

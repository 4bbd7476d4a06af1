//! # Component Tree
//!
//! Arena of [`Node`]s keyed by [`NodeId`]. Every page of a site is one root
//! of the tree; nodes created but not yet attached to a root are detached
//! and are not visited by [`Tree::walk`].

use crate::error::TreeError;
use crate::node::{Node, NodeId, NodeKind};
use crate::serializer::{escape_text, Serializer};
use crate::template::Template;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u32,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create(NodeKind::Element {
            tag_name: tag_name.to_string(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.create(NodeKind::Text {
            content: content.to_string(),
        })
    }

    fn create(&mut self, kind: NodeKind) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Attach a detached node as a new root
    pub fn add_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::NodeNotFound(id))?;
        if node.parent.is_some() || self.roots.contains(&id) {
            return Err(TreeError::AlreadyAttached(id));
        }
        self.roots.push(id);
        Ok(())
    }

    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        self.insert_child(parent_id, usize::MAX, child_id)
    }

    /// Move `child_id` under `parent_id` at `index` (clamped to the end)
    pub fn insert_child(
        &mut self,
        parent_id: NodeId,
        index: usize,
        child_id: NodeId,
    ) -> Result<(), TreeError> {
        let parent = self
            .nodes
            .get(&parent_id)
            .ok_or(TreeError::ParentNotFound(parent_id))?;
        if parent.is_text() {
            return Err(TreeError::NotAnElement);
        }
        if !self.contains(child_id) {
            return Err(TreeError::NodeNotFound(child_id));
        }
        if self.is_ancestor_or_self(child_id, parent_id) {
            return Err(TreeError::CycleDetected);
        }

        self.detach(child_id);

        let parent = self.require_mut(parent_id)?;
        let index = index.min(parent.children.len());
        parent.children.insert(index, child_id);
        self.require_mut(child_id)?.parent = Some(parent_id);
        Ok(())
    }

    /// Unlink a node from its parent (or from the roots), keeping its subtree
    pub fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(&id).and_then(|node| node.parent);
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|c| *c != id);
                }
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.parent = None;
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
    }

    /// Delete a node and its whole subtree, returning the removed ids.
    ///
    /// Templates owned by the removed nodes go with them.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id));
        }
        self.detach(id);

        let removed = self.descendants(id);
        for node_id in &removed {
            self.nodes.remove(node_id);
        }
        debug!(node_id = %id, count = removed.len(), "Removed subtree");
        Ok(removed)
    }

    /// True if `ancestor` is `id` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            current = self.nodes.get(&node_id).and_then(|node| node.parent);
        }
        false
    }

    /// Pre-order ids of `id` and everything below it
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        self.collect(id, &mut visited, &mut out);
        out
    }

    /// Pre-order ids of every node reachable from the roots
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        for root in &self.roots {
            self.collect(*root, &mut visited, &mut out);
        }
        out
    }

    fn collect(&self, id: NodeId, visited: &mut HashSet<NodeId>, out: &mut Vec<NodeId>) {
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            let Some(node) = self.nodes.get(&node_id) else {
                continue;
            };
            out.push(node_id);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Serialize a node through its installed serializer strategy
    pub fn to_html(&self, id: NodeId) -> String {
        match self.nodes.get(&id) {
            Some(node) => node.serializer().serialize(self, id),
            None => String::new(),
        }
    }

    /// Markup of a node's children, each through its own serializer.
    ///
    /// For a text node this is its escaped content.
    pub fn inner_html(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(&id) else {
            return String::new();
        };

        match node.kind() {
            NodeKind::Text { content } => escape_text(content),
            NodeKind::Element { .. } => node
                .children
                .iter()
                .map(|child| self.to_html(*child))
                .collect(),
        }
    }

    pub fn template(&self, id: NodeId) -> Option<&Template> {
        self.nodes.get(&id).and_then(|node| node.template())
    }

    /// Normalize and store a node's template; all-blank fields clear it
    pub fn set_template(&mut self, id: NodeId, fields: &Template) -> Result<(), TreeError> {
        self.require_mut(id)?.set_template(fields);
        Ok(())
    }

    /// Swap a node's serializer strategy, returning the previous one
    pub fn set_serializer(
        &mut self,
        id: NodeId,
        serializer: Arc<dyn Serializer>,
    ) -> Result<Arc<dyn Serializer>, TreeError> {
        Ok(self.require_mut(id)?.set_serializer(serializer))
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), TreeError> {
        match &mut self.require_mut(id)?.kind {
            NodeKind::Text { content } => {
                *content = text.to_string();
                Ok(())
            }
            NodeKind::Element { .. } => Err(TreeError::NotText),
        }
    }
}

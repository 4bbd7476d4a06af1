//! # Tree Mutations
//!
//! High-level operations on the component tree, as issued by the editor UI.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Atomic relocation of node to new parent
//! - Fails if would create cycle
//!
//! ### Remove
//! - Removes node and all descendants, with their templates
//!
//! ### SetTemplate
//! - Wholesale replacement of the node's template (no field merge)
//! - All-blank fields clear the template

use crate::error::TreeError;
use crate::node::{AttrValue, NodeId};
use crate::site::NodeSpec;
use crate::template::Template;
use crate::tree::Tree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Move a node to a new parent at index
    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        index: usize,
    },

    /// Replace the content of a text node
    UpdateText { node_id: NodeId, content: String },

    /// Set an attribute value (`class` sets the class list)
    SetAttribute {
        node_id: NodeId,
        name: String,
        value: AttrValue,
    },

    RemoveAttribute { node_id: NodeId, name: String },

    AddClass { node_id: NodeId, name: String },

    RemoveClass { node_id: NodeId, name: String },

    /// Remove a node from the tree
    RemoveNode { node_id: NodeId },

    /// Build a new subtree and insert it under a parent
    InsertNode {
        parent_id: NodeId,
        index: usize,
        node: NodeSpec,
    },

    /// Store (or clear) a node's publish template
    SetTemplate { node_id: NodeId, template: Template },
}

/// What a mutation changed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MutationResult {
    /// Root of an inserted subtree
    pub inserted: Option<NodeId>,

    /// Nodes deleted by the mutation
    pub removed: Vec<NodeId>,
}

impl Mutation {
    /// Node the mutation targets
    pub fn target(&self) -> NodeId {
        match self {
            Mutation::MoveNode { node_id, .. }
            | Mutation::UpdateText { node_id, .. }
            | Mutation::SetAttribute { node_id, .. }
            | Mutation::RemoveAttribute { node_id, .. }
            | Mutation::AddClass { node_id, .. }
            | Mutation::RemoveClass { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::SetTemplate { node_id, .. } => *node_id,
            Mutation::InsertNode { parent_id, .. } => *parent_id,
        }
    }

    /// Apply mutation to the tree with validation
    pub fn apply(&self, tree: &mut Tree) -> Result<MutationResult, TreeError> {
        self.validate(tree)?;

        let mut result = MutationResult::default();
        match self {
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => tree.insert_child(*new_parent_id, *index, *node_id)?,

            Mutation::UpdateText { node_id, content } => tree.set_text(*node_id, content)?,

            Mutation::SetAttribute {
                node_id,
                name,
                value,
            } => Self::element_mut(tree, *node_id)?.set_attribute(name, value.clone()),

            Mutation::RemoveAttribute { node_id, name } => {
                Self::element_mut(tree, *node_id)?.remove_attribute(name);
            }

            Mutation::AddClass { node_id, name } => {
                Self::element_mut(tree, *node_id)?.add_class(name)
            }

            Mutation::RemoveClass { node_id, name } => {
                Self::element_mut(tree, *node_id)?.remove_class(name)
            }

            Mutation::RemoveNode { node_id } => {
                result.removed = tree.remove(*node_id)?;
            }

            Mutation::InsertNode {
                parent_id,
                index,
                node,
            } => {
                let id = tree.build(node);
                if let Err(err) = tree.insert_child(*parent_id, *index, id) {
                    // Do not leave a detached orphan behind
                    let _ = tree.remove(id);
                    return Err(err);
                }
                result.inserted = Some(id);
            }

            Mutation::SetTemplate { node_id, template } => tree.set_template(*node_id, template)?,
        }

        Ok(result)
    }

    /// Validate without applying
    pub fn validate(&self, tree: &Tree) -> Result<(), TreeError> {
        match self {
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => {
                tree.node(*node_id)
                    .ok_or(TreeError::NodeNotFound(*node_id))?;
                let parent = tree
                    .node(*new_parent_id)
                    .ok_or(TreeError::ParentNotFound(*new_parent_id))?;
                if parent.is_text() {
                    return Err(TreeError::NotAnElement);
                }
                if tree.is_ancestor_or_self(*node_id, *new_parent_id) {
                    return Err(TreeError::CycleDetected);
                }
                Ok(())
            }

            Mutation::UpdateText { node_id, .. } => {
                let node = tree.node(*node_id).ok_or(TreeError::NodeNotFound(*node_id))?;
                if node.is_text() {
                    Ok(())
                } else {
                    Err(TreeError::NotText)
                }
            }

            Mutation::SetAttribute { node_id, .. }
            | Mutation::RemoveAttribute { node_id, .. }
            | Mutation::AddClass { node_id, .. }
            | Mutation::RemoveClass { node_id, .. } => {
                let node = tree.node(*node_id).ok_or(TreeError::NodeNotFound(*node_id))?;
                if node.is_text() {
                    Err(TreeError::NotAnElement)
                } else {
                    Ok(())
                }
            }

            Mutation::RemoveNode { node_id } | Mutation::SetTemplate { node_id, .. } => {
                tree.node(*node_id).ok_or(TreeError::NodeNotFound(*node_id))?;
                Ok(())
            }

            Mutation::InsertNode { parent_id, .. } => {
                let parent = tree
                    .node(*parent_id)
                    .ok_or(TreeError::ParentNotFound(*parent_id))?;
                if parent.is_text() {
                    Err(TreeError::NotAnElement)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn element_mut(tree: &mut Tree, id: NodeId) -> Result<&mut crate::Node, TreeError> {
        let node = tree.node_mut(id).ok_or(TreeError::NodeNotFound(id))?;
        if node.is_text() {
            return Err(TreeError::NotAnElement);
        }
        Ok(node)
    }
}

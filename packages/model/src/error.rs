use crate::node::NodeId;
use thiserror::Error;

/// Errors raised by tree queries and mutations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Node {0} is already attached")]
    AlreadyAttached(NodeId),

    #[error("Node is not an element")]
    NotAnElement,

    #[error("Node is not text")]
    NotText,
}

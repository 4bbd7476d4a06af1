//! Error types for the editor

use sitecraft_model::{NodeId, TreeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Duplicate page id: {0}")]
    DuplicatePage(String),

    #[error("Node {0} is a page root, remove the page instead")]
    PageRoot(NodeId),

    #[error("Unknown trait: {0}")]
    UnknownTrait(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site document: {0}")]
    Json(#[from] serde_json::Error),
}

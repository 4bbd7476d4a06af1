//! # Edit Session
//!
//! The state the editor hands to traits and plugins: the document being
//! edited and the current selection. Passed explicitly to every hook
//! rather than reached through a global editor.

use crate::SiteDocument;
use sitecraft_model::{Node, NodeId, Template};

#[derive(Debug, Default)]
pub struct EditSession {
    /// Document being edited
    pub document: SiteDocument,

    /// Currently selected component
    pub selected: Option<NodeId>,
}

impl EditSession {
    pub fn new(document: SiteDocument) -> Self {
        Self {
            document,
            selected: None,
        }
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.document.tree().node(id))
    }

    /// Template of the selected component, if any
    pub fn selected_template(&self) -> Option<&Template> {
        self.selected_node().and_then(|node| node.template())
    }
}

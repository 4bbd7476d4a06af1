//! # Site Document
//!
//! A website under edit: the component tree plus the list of pages rooted
//! in it.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Build tree → Edit → Publish
//!   ↓        ↓          ↓        ↓
//! JSON     Tree    Mutations   HTML
//! ```

use crate::EditorError;
use sitecraft_model::{Mutation, MutationResult, NodeId, NodeSpec, Site, Tree};
use std::path::PathBuf;

/// One page of the site
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub root: NodeId,
}

#[derive(Debug, Default)]
pub struct SiteDocument {
    /// Path of the site file (if any)
    pub path: Option<PathBuf>,

    pub name: String,

    /// Current version number (increments on each applied mutation)
    pub version: u64,

    tree: Tree,
    pages: Vec<Page>,
}

impl SiteDocument {
    /// Empty site
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a document from a parsed site
    pub fn from_site(site: &Site) -> Result<Self, EditorError> {
        let mut doc = Self::new(site.name.clone());
        for page in &site.pages {
            doc.add_page(&page.id, &page.name, &page.root)?;
        }
        Ok(doc)
    }

    /// Load document from a site JSON file
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(&path)?;
        let site: Site = serde_json::from_str(&source)?;

        let mut doc = Self::from_site(&site)?;
        doc.path = Some(path);
        Ok(doc)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Direct tree access, for lifecycle hooks that swap serializers
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn is_page_root(&self, id: NodeId) -> bool {
        self.pages.iter().any(|p| p.root == id)
    }

    /// Add a page whose root is built from `root`
    pub fn add_page(&mut self, id: &str, name: &str, root: &NodeSpec) -> Result<NodeId, EditorError> {
        if self.page(id).is_some() {
            return Err(EditorError::DuplicatePage(id.to_string()));
        }

        let root_id = self.tree.build(root);
        self.tree.add_root(root_id)?;
        self.pages.push(Page {
            id: id.to_string(),
            name: name.to_string(),
            root: root_id,
        });
        Ok(root_id)
    }

    /// Remove a page and every component on it
    pub fn remove_page(&mut self, id: &str) -> Result<(Page, Vec<NodeId>), EditorError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EditorError::UnknownPage(id.to_string()))?;

        let page = self.pages.remove(index);
        let removed = self.tree.remove(page.root)?;
        Ok((page, removed))
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        if let Mutation::RemoveNode { node_id } | Mutation::MoveNode { node_id, .. } = &mutation {
            if self.is_page_root(*node_id) {
                return Err(EditorError::PageRoot(*node_id));
            }
        }

        let result = mutation.apply(&mut self.tree)?;
        self.version += 1;
        Ok(result)
    }
}

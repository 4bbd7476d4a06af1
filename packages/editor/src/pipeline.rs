//! # Publish Pipeline
//!
//! Serializes every page of a document. Whatever serializers are installed
//! on the nodes at that moment are used, so this runs between the publish
//! start and stop events.

use crate::SiteDocument;
use serde::Serialize;
use tracing::debug;

/// Output of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedPage {
    pub id: String,
    pub name: String,
    pub html: String,
}

/// Output of one publish cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Publication {
    pub site_name: String,
    pub pages: Vec<PublishedPage>,
}

impl Publication {
    pub fn page(&self, id: &str) -> Option<&PublishedPage> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// Serialize each page root through its current serializer
pub fn render_pages(document: &SiteDocument) -> Publication {
    let pages = document
        .pages()
        .iter()
        .map(|page| {
            let html = document.tree().to_html(page.root);
            debug!(page_id = %page.id, bytes = html.len(), "Serialized page");
            PublishedPage {
                id: page.id.clone(),
                name: page.name.clone(),
                html,
            }
        })
        .collect();

    Publication {
        site_name: document.name.clone(),
        pages,
    }
}

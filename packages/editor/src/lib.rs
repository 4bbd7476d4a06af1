//! # Sitecraft Editor
//!
//! Editing engine of the website builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: component tree + templates           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + lifecycle events          │
//! │  - Load site documents                      │
//! │  - Apply mutations with validation          │
//! │  - Trait forms bound to the selection       │
//! │  - Plugins hooked on publish events         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ publisher: template interception → HTML     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: trait forms are re-rendered from it
//! 2. **Templates only at publish time**: the editing model never changes
//! 3. **Explicit state**: hooks receive the session, there is no global editor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_editor::{plugins::template, Editor, SiteDocument, TraitInput};
//!
//! let mut editor = Editor::new(SiteDocument::load("site.json".into())?);
//! template::install(&mut editor, Default::default());
//!
//! editor.select(Some(node_id))?;
//! editor.trait_input(
//!     "template",
//!     &TraitInput::new().with("template-before", "<!-- hello -->"),
//! )?;
//!
//! let publication = editor.publish();
//! ```

mod config;
mod document;
mod editor;
mod errors;
mod pipeline;
pub mod plugins;
mod session;
mod traits;

pub use config::{EditorConfig, EventNames};
pub use document::{Page, SiteDocument};
pub use editor::Editor;
pub use errors::EditorError;
pub use pipeline::{render_pages, Publication, PublishedPage};
pub use session::EditSession;
pub use traits::{TraitInput, TraitManager, TraitType, TraitView};

// Re-export model types for convenience
pub use sitecraft_model::{Mutation, NodeId, NodeSpec, Site, Template, TemplateField};

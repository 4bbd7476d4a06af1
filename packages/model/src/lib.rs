//! # Sitecraft Model
//!
//! Component tree of a website under edit.
//!
//! - [`Tree`] / [`Node`]: arena of components, one root per page
//! - [`Template`]: per-node publish-time overrides, stored normalized
//! - [`Serializer`]: per-node serializer strategy, swappable at runtime
//! - [`Mutation`]: validated edits issued by the editor

mod error;
mod mutations;
mod node;
mod serializer;
mod site;
mod template;
mod tree;

pub use error::TreeError;
pub use mutations::{Mutation, MutationResult};
pub use node::{AttrValue, Node, NodeId, NodeKind};
pub use serializer::{
    escape_attribute, escape_text, is_void_element, render_attribute, NativeSerializer,
    Serializer,
};
pub use site::{NodeSpec, PageSpec, Site};
pub use template::{is_blank, normalize, Template, TemplateField};
pub use tree::Tree;

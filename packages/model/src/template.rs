//! # Template Overrides
//!
//! Per-node publish-time overrides ("templates") and the text normalizer
//! used to canonicalize them.
//!
//! A template is attached to at most one node. It is stored normalized:
//! a field is `Some` only when it still has content after [`normalize`],
//! and a template whose fields are all blank is never stored at all.

use serde::{Deserialize, Serialize};

/// Trim every line, drop blank lines, rejoin with `\n`.
///
/// Idempotent: `normalize(&normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when `text` has no content once normalized
pub fn is_blank(text: &str) -> bool {
    text.split('\n').all(|line| line.trim().is_empty())
}

/// The six override axes of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    Before,
    Replace,
    After,
    Attributes,
    Classname,
    Style,
}

impl TemplateField {
    pub const ALL: [TemplateField; 6] = [
        TemplateField::Before,
        TemplateField::Replace,
        TemplateField::After,
        TemplateField::Attributes,
        TemplateField::Classname,
        TemplateField::Style,
    ];

    /// Field name as persisted in site documents
    pub fn key(self) -> &'static str {
        match self {
            TemplateField::Before => "before",
            TemplateField::Replace => "replace",
            TemplateField::After => "after",
            TemplateField::Attributes => "attributes",
            TemplateField::Classname => "classname",
            TemplateField::Style => "style",
        }
    }
}

/// Publish-time override record for one node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    /// Markup inserted right before the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    /// Markup inserted right after the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Markup used instead of the node's children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<String>,

    /// Raw `key="value"` text spliced into the opening tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,

    /// Extra class tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,

    /// Inline CSS declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, field: TemplateField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Raw value of a field, empty when unset
    pub fn get(&self, field: TemplateField) -> &str {
        self.slot(field).as_deref().unwrap_or_default()
    }

    /// Set a field verbatim. Use [`Template::normalized`] before storing.
    pub fn set(&mut self, field: TemplateField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Normalized copy, or `None` if every field is blank.
    pub fn normalized(&self) -> Option<Template> {
        let mut out = Template::default();
        for field in TemplateField::ALL {
            let value = normalize(self.get(field));
            if !value.is_empty() {
                *out.slot_mut(field) = Some(value);
            }
        }

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// True when no field carries content
    pub fn is_empty(&self) -> bool {
        TemplateField::ALL
            .iter()
            .all(|field| is_blank(self.get(*field)))
    }

    fn slot(&self, field: TemplateField) -> &Option<String> {
        match field {
            TemplateField::Before => &self.before,
            TemplateField::Replace => &self.replace,
            TemplateField::After => &self.after,
            TemplateField::Attributes => &self.attributes,
            TemplateField::Classname => &self.classname,
            TemplateField::Style => &self.style,
        }
    }

    fn slot_mut(&mut self, field: TemplateField) -> &mut Option<String> {
        match field {
            TemplateField::Before => &mut self.before,
            TemplateField::Replace => &mut self.replace,
            TemplateField::After => &mut self.after,
            TemplateField::Attributes => &mut self.attributes,
            TemplateField::Classname => &mut self.classname,
            TemplateField::Style => &mut self.style,
        }
    }
}

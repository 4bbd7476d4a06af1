//! # Trait Manager
//!
//! Traits are the per-component property editors of the side panel. A
//! trait type renders a form for the selected component ([`TraitView`]),
//! turns submitted form values ([`TraitInput`]) into edits, and renders
//! again from the component once it changed.
//!
//! Views are derived state: the manager renders them again from the
//! session after every selection change, page change or edit.

use crate::{EditSession, EditorError};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Rendered form of a trait
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitView {
    /// Form markup for the side panel
    pub html: String,

    /// Value shown in each field, keyed by element id
    pub values: BTreeMap<String, String>,
}

impl TraitView {
    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or_default()
    }
}

/// Values submitted from a trait form, keyed by element id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitInput {
    fields: BTreeMap<String, String>,
}

impl TraitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }

    /// Submitted value, empty when the field is missing
    pub fn value(&self, id: &str) -> &str {
        self.fields.get(id).map(String::as_str).unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for TraitInput {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A kind of property editor
pub trait TraitType: fmt::Debug {
    /// Registered type name
    fn type_name(&self) -> &'static str;

    /// Name of the trait instance added to components
    fn name(&self) -> &'static str;

    /// First render of the form
    fn create_input(&mut self, session: &EditSession) -> TraitView;

    /// Apply submitted form values to the selected component
    fn on_event(&mut self, input: &TraitInput, session: &mut EditSession) -> Result<(), EditorError>;

    /// Render again after the component changed
    fn on_update(&mut self, session: &EditSession) -> TraitView;
}

/// Registry of trait types and their current views
#[derive(Debug, Default)]
pub struct TraitManager {
    types: Vec<Box<dyn TraitType>>,
    views: HashMap<&'static str, TraitView>,
}

impl TraitManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trait type, replacing one with the same type name
    pub fn add_type(&mut self, trait_type: Box<dyn TraitType>) {
        self.types
            .retain(|t| t.type_name() != trait_type.type_name());
        self.views.remove(trait_type.name());
        self.types.push(trait_type);
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.type_name() == type_name)
    }

    /// Traits listed on every component, in registration order
    pub fn trait_names(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.name()).collect()
    }

    pub fn view(&self, name: &str) -> Option<&TraitView> {
        self.views.get(name)
    }

    /// Render every trait from the session
    pub fn render_all(&mut self, session: &EditSession) {
        for trait_type in &mut self.types {
            let view = if self.views.contains_key(trait_type.name()) {
                trait_type.on_update(session)
            } else {
                trait_type.create_input(session)
            };
            self.views.insert(trait_type.name(), view);
        }
    }

    /// Forward submitted values to the trait called `name`
    pub fn handle_input(
        &mut self,
        name: &str,
        input: &TraitInput,
        session: &mut EditSession,
    ) -> Result<(), EditorError> {
        let trait_type = self
            .types
            .iter_mut()
            .find(|t| t.name() == name)
            .ok_or_else(|| EditorError::UnknownTrait(name.to_string()))?;

        trait_type.on_event(input, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SiteDocument;

    /// Counts renders, to check create/update dispatch
    #[derive(Debug, Default)]
    struct Counter {
        created: usize,
        updated: usize,
    }

    impl TraitType for Counter {
        fn type_name(&self) -> &'static str {
            "counterType"
        }

        fn name(&self) -> &'static str {
            "counter"
        }

        fn create_input(&mut self, _session: &EditSession) -> TraitView {
            self.created += 1;
            TraitView::default()
        }

        fn on_event(&mut self, _input: &TraitInput, _session: &mut EditSession) -> Result<(), EditorError> {
            Ok(())
        }

        fn on_update(&mut self, _session: &EditSession) -> TraitView {
            self.updated += 1;
            TraitView {
                html: format!("update {}", self.updated),
                values: BTreeMap::new(),
            }
        }
    }

    #[test]
    fn test_first_render_creates_then_updates() {
        let session = EditSession::new(SiteDocument::new("Test"));
        let mut manager = TraitManager::new();
        manager.add_type(Box::new(Counter::default()));

        assert!(manager.view("counter").is_none());
        manager.render_all(&session);
        assert_eq!(manager.view("counter").unwrap().html, "");
        manager.render_all(&session);
        assert_eq!(manager.view("counter").unwrap().html, "update 1");
    }

    #[test]
    fn test_unknown_trait_input() {
        let mut session = EditSession::new(SiteDocument::new("Test"));
        let mut manager = TraitManager::new();

        let result = manager.handle_input("missing", &TraitInput::new(), &mut session);
        assert!(matches!(result, Err(EditorError::UnknownTrait(name)) if name == "missing"));
    }

    #[test]
    fn test_add_type_replaces_same_type() {
        let mut manager = TraitManager::new();
        manager.add_type(Box::new(Counter::default()));
        manager.add_type(Box::new(Counter::default()));

        assert_eq!(manager.trait_names(), vec!["counter"]);
        assert!(manager.has_type("counterType"));
    }

    #[test]
    fn test_trait_input_missing_field_is_empty() {
        let input: TraitInput = vec![("a".to_string(), "1".to_string())].into_iter().collect();
        assert_eq!(input.value("a"), "1");
        assert_eq!(input.value("b"), "");
    }
}

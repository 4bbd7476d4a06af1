//! # Editor
//!
//! Owns the edit session, the trait manager and the plugins, and emits the
//! lifecycle events that tie them together.
//!
//! A publish cycle emits, in order:
//!
//! ```text
//! publish:before  →  serialize every page  →  publish:start  →  publish:stop
//! ```
//!
//! The stop event always follows a start event fired by [`Editor::publish`].

use crate::config::EditorConfig;
use crate::pipeline::{render_pages, Publication};
use crate::plugins::Plugin;
use crate::traits::{TraitInput, TraitManager};
use crate::{EditSession, EditorError, Page, SiteDocument};
use sitecraft_model::{Mutation, MutationResult, NodeId, NodeSpec, TreeError};
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    session: EditSession,
    traits: TraitManager,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Editor {
    pub fn new(document: SiteDocument) -> Self {
        Self::with_config(document, EditorConfig::default())
    }

    pub fn with_config(document: SiteDocument, config: EditorConfig) -> Self {
        Self {
            config,
            session: EditSession::new(document),
            traits: TraitManager::new(),
            plugins: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn document(&self) -> &SiteDocument {
        &self.session.document
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.session.selected
    }

    pub fn traits(&self) -> &TraitManager {
        &self.traits
    }

    pub fn traits_mut(&mut self) -> &mut TraitManager {
        &mut self.traits
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        debug!(plugin = plugin.name(), "Registered plugin");
        self.plugins.push(plugin);
    }

    /// Deliver `event` to every plugin, then refresh trait views if needed
    pub fn emit(&mut self, event: &str) {
        debug!(event, "Emitting editor event");
        for plugin in &mut self.plugins {
            plugin.on_event(event, &mut self.session);
        }

        if self.config.events.refreshes_traits(event) {
            self.traits.render_all(&self.session);
        }
    }

    /// Change the selected component (`None` clears it)
    pub fn select(&mut self, id: Option<NodeId>) -> Result<(), EditorError> {
        if let Some(id) = id {
            if !self.session.document.tree().contains(id) {
                return Err(TreeError::NodeNotFound(id).into());
            }
        }

        self.session.selected = id;
        let event = self.config.events.selected.clone();
        self.emit(&event);
        Ok(())
    }

    /// Apply a mutation to the document
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.session.document.apply(mutation)?;
        self.forget_removed(&result.removed);

        let event = self.config.events.update.clone();
        self.emit(&event);
        Ok(result)
    }

    pub fn add_page(&mut self, id: &str, name: &str, root: &NodeSpec) -> Result<NodeId, EditorError> {
        let root_id = self.session.document.add_page(id, name, root)?;
        let event = self.config.events.page.clone();
        self.emit(&event);
        Ok(root_id)
    }

    pub fn remove_page(&mut self, id: &str) -> Result<Page, EditorError> {
        let (page, removed) = self.session.document.remove_page(id)?;
        self.forget_removed(&removed);

        let event = self.config.events.page.clone();
        self.emit(&event);
        Ok(page)
    }

    /// Submit form values of the trait called `trait_name`
    pub fn trait_input(&mut self, trait_name: &str, input: &TraitInput) -> Result<(), EditorError> {
        self.traits
            .handle_input(trait_name, input, &mut self.session)?;

        let event = self.config.events.update.clone();
        self.emit(&event);
        Ok(())
    }

    /// Run one publish cycle and return the published pages
    #[instrument(skip(self), fields(site = %self.session.document.name))]
    pub fn publish(&mut self) -> Publication {
        let events = self.config.events.clone();

        self.emit(&events.publish_before);
        let publication = render_pages(&self.session.document);
        self.emit(&events.publish_start);
        self.emit(&events.publish_stop);

        info!(pages = publication.pages.len(), "Site published");
        publication
    }

    fn forget_removed(&mut self, removed: &[NodeId]) {
        if let Some(selected) = self.session.selected {
            if removed.contains(&selected) {
                self.session.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::template::{self, TemplateOptions, TRAIT_NAME};
    use sitecraft_model::{Template, TemplateField};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every event it sees
    #[derive(Debug, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Plugin for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn on_event(&mut self, event: &str, _session: &mut EditSession) {
            self.events.borrow_mut().push(event.to_string());
        }
    }

    fn editor() -> (Editor, NodeId) {
        let mut editor = Editor::new(SiteDocument::new("Test"));
        template::install(&mut editor, TemplateOptions::default());
        let root = editor
            .add_page("index", "Home", &NodeSpec::element("div"))
            .unwrap();
        (editor, root)
    }

    #[test]
    fn test_publish_event_order() {
        let (mut editor, _) = editor();
        let events = Rc::new(RefCell::new(Vec::new()));
        editor.add_plugin(Box::new(Recorder {
            events: events.clone(),
        }));

        editor.publish();

        assert_eq!(
            *events.borrow(),
            vec!["publish:before", "publish:start", "publish:stop"]
        );
    }

    #[test]
    fn test_select_unknown_node_fails() {
        let (mut editor, _) = editor();
        let result = editor.select(Some(NodeId(999)));
        assert!(matches!(
            result,
            Err(EditorError::Tree(TreeError::NodeNotFound(_)))
        ));
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_selection_rerenders_trait() {
        let (mut editor, root) = editor();
        editor
            .apply(Mutation::SetTemplate {
                node_id: root,
                template: Template::new().with(TemplateField::Style, "color: red"),
            })
            .unwrap();

        editor.select(None).unwrap();
        assert_eq!(
            editor.traits().view(TRAIT_NAME).unwrap().value("template-style"),
            ""
        );

        editor.select(Some(root)).unwrap();
        assert_eq!(
            editor.traits().view(TRAIT_NAME).unwrap().value("template-style"),
            "color: red"
        );
    }

    #[test]
    fn test_removing_selected_node_clears_selection() {
        let (mut editor, root) = editor();
        let child = editor
            .apply(Mutation::InsertNode {
                parent_id: root,
                index: 0,
                node: NodeSpec::element("p"),
            })
            .unwrap()
            .inserted
            .unwrap();
        editor.select(Some(child)).unwrap();

        editor.apply(Mutation::RemoveNode { node_id: child }).unwrap();
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_custom_event_names() {
        let mut config = EditorConfig::default();
        config.events.publish_before = "site:publish".to_string();
        config.events.publish_stop = "site:published".to_string();

        let mut editor = Editor::with_config(SiteDocument::new("Test"), config);
        template::install(
            &mut editor,
            TemplateOptions {
                event_start: "site:publish".to_string(),
                event_stop: "site:published".to_string(),
                ..TemplateOptions::default()
            },
        );
        let root = editor
            .add_page("index", "Home", &NodeSpec::element("div"))
            .unwrap();
        editor
            .apply(Mutation::SetTemplate {
                node_id: root,
                template: Template::new().with(TemplateField::Before, "<!doctype html>"),
            })
            .unwrap();

        let publication = editor.publish();
        assert_eq!(
            publication.page("index").unwrap().html,
            "<!doctype html><div></div>"
        );
    }
}

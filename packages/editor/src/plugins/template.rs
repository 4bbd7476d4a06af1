//! # Template Plugin
//!
//! Lets users attach a [`Template`] to any component and injects it into
//! the published HTML only.
//!
//! - [`TemplateTrait`]: side panel form bound to the selected component's
//!   template
//! - [`TemplatePlugin`]: wraps every serializer when publishing starts and
//!   restores them when it stops
//!
//! ```rust,ignore
//! let mut editor = Editor::new(SiteDocument::load(path)?);
//! template::install(&mut editor, TemplateOptions::default());
//! let publication = editor.publish();
//! ```

use crate::plugins::Plugin;
use crate::traits::{TraitInput, TraitType, TraitView};
use crate::{EditSession, Editor, EditorError};
use serde::{Deserialize, Serialize};
use sitecraft_model::{escape_attribute, escape_text, Mutation, Template, TemplateField};
use sitecraft_publisher::TemplateInterceptor;
use std::collections::BTreeMap;
use tracing::debug;

pub const TRAIT_TYPE: &str = "templateType";
pub const TRAIT_NAME: &str = "template";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateOptions {
    /// Event that installs the template serializers
    pub event_start: String,

    /// Event that restores the original serializers
    pub event_stop: String,

    pub styles: FormStyles,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            event_start: "publish:before".to_string(),
            event_stop: "publish:stop".to_string(),
            styles: FormStyles::default(),
        }
    }
}

/// Inline styles of the template form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyles {
    pub textarea: String,
    pub sep: String,
}

impl Default for FormStyles {
    fn default() -> Self {
        Self {
            textarea: "background-color: var(--darkerPrimaryColor);".to_string(),
            sep: "height: 10px;".to_string(),
        }
    }
}

/// Register the template trait and the publish hooks on `editor`
pub fn install(editor: &mut Editor, options: TemplateOptions) {
    editor
        .traits_mut()
        .add_type(Box::new(TemplateTrait::new(options.styles.clone())));
    editor.add_plugin(Box::new(TemplatePlugin::new(options)));
}

/// Form element id of a template field
pub fn element_id(field: TemplateField) -> String {
    format!("template-{}", field.key())
}

fn label(field: TemplateField) -> &'static str {
    match field {
        TemplateField::Before => "<strong>Before</strong> the element",
        TemplateField::Replace => "<strong>Replace</strong> the element's children",
        TemplateField::After => "<strong>After</strong> the element",
        TemplateField::Attributes => "HTML attributes",
        TemplateField::Classname => "CSS classes",
        TemplateField::Style => "CSS styles",
    }
}

const INLINE_FIELDS: [TemplateField; 3] = [
    TemplateField::Classname,
    TemplateField::Attributes,
    TemplateField::Style,
];

const BLOCK_FIELDS: [TemplateField; 3] = [
    TemplateField::Before,
    TemplateField::Replace,
    TemplateField::After,
];

/// Side panel editor of the selected component's template
#[derive(Debug, Default)]
pub struct TemplateTrait {
    styles: FormStyles,
}

impl TemplateTrait {
    pub fn new(styles: FormStyles) -> Self {
        Self { styles }
    }

    fn render(&self, session: &EditSession) -> TraitView {
        let empty = Template::default();
        let template = session.selected_template().unwrap_or(&empty);
        let style = escape_attribute(&self.styles.textarea);

        let mut values = BTreeMap::new();
        let mut html = String::from("<div class=\"gjs-one-bg\">");
        html.push_str("<div><h3>Template</h3><p>This will be inserted in the published version</p></div>");

        for field in INLINE_FIELDS {
            let id = element_id(field);
            let value = template.get(field);
            html.push_str(&format!(
                "<label>{} <input id=\"{}\" value=\"{}\" style=\"{}\"/></label>",
                label(field),
                id,
                escape_attribute(value),
                style
            ));
            values.insert(id, value.to_string());
        }

        html.push_str(&format!(
            "<div style=\"{}\"></div>",
            escape_attribute(&self.styles.sep)
        ));

        for field in BLOCK_FIELDS {
            let id = element_id(field);
            let value = template.get(field);
            html.push_str(&format!(
                "<label for=\"{}\">{}</label><textarea id=\"{}\" style=\"{}\">{}</textarea>",
                id,
                label(field),
                id,
                style,
                escape_text(value)
            ));
            values.insert(id, value.to_string());
        }

        html.push_str("</div>");
        TraitView { html, values }
    }
}

impl TraitType for TemplateTrait {
    fn type_name(&self) -> &'static str {
        TRAIT_TYPE
    }

    fn name(&self) -> &'static str {
        TRAIT_NAME
    }

    fn create_input(&mut self, session: &EditSession) -> TraitView {
        self.render(session)
    }

    fn on_event(&mut self, input: &TraitInput, session: &mut EditSession) -> Result<(), EditorError> {
        let Some(node_id) = session.selected else {
            debug!("No component selected, ignoring template input");
            return Ok(());
        };

        let mut template = Template::new();
        for field in TemplateField::ALL {
            template.set(field, input.value(&element_id(field)));
        }

        session
            .document
            .apply(Mutation::SetTemplate { node_id, template })?;
        debug!(node_id = %node_id, "Template updated");
        Ok(())
    }

    fn on_update(&mut self, session: &EditSession) -> TraitView {
        self.render(session)
    }
}

/// Installs and removes template serializers around each publication
#[derive(Debug)]
pub struct TemplatePlugin {
    event_start: String,
    event_stop: String,
    interceptor: TemplateInterceptor,
}

impl TemplatePlugin {
    pub fn new(options: TemplateOptions) -> Self {
        Self {
            event_start: options.event_start,
            event_stop: options.event_stop,
            interceptor: TemplateInterceptor::new(),
        }
    }
}

impl Plugin for TemplatePlugin {
    fn name(&self) -> &'static str {
        "template"
    }

    fn on_event(&mut self, event: &str, session: &mut EditSession) {
        if event == self.event_start {
            self.interceptor.begin(session.document.tree_mut());
        } else if event == self.event_stop {
            self.interceptor.end(session.document.tree_mut());
        }
    }
}

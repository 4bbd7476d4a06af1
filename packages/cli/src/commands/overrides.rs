use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitecraft_editor::{NodeId, SiteDocument, Template, TemplateField};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct OverridesArgs {
    /// Site document (JSON)
    pub site: PathBuf,
}

/// A component carrying a template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEntry {
    pub page_id: String,
    pub node_id: NodeId,
    /// Tag name, `#text` for text nodes
    pub label: String,
    pub template: Template,
}

pub fn overrides(args: OverridesArgs, _cwd: &str) -> Result<()> {
    let document = SiteDocument::load(args.site)?;
    let entries = collect_templates(&document);

    if entries.is_empty() {
        println!("{}", "⚠️  No templates found".yellow());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {} <{}>",
            entry.page_id.bright_blue(),
            entry.node_id,
            entry.label
        );
        for field in TemplateField::ALL {
            let value = entry.template.get(field);
            if !value.is_empty() {
                println!("    {}: {}", field.key().dimmed(), value.replace('\n', "\\n"));
            }
        }
    }

    println!();
    println!("Found {} templates", entries.len());
    Ok(())
}

/// Templates of every page, in page then tree order
pub fn collect_templates(document: &SiteDocument) -> Vec<TemplateEntry> {
    let tree = document.tree();
    let mut entries = Vec::new();

    for page in document.pages() {
        for id in tree.descendants(page.root) {
            let Some(node) = tree.node(id) else {
                continue;
            };
            if let Some(template) = node.template() {
                entries.push(TemplateEntry {
                    page_id: page.id.clone(),
                    node_id: id,
                    label: node.tag_name().unwrap_or("#text").to_string(),
                    template: template.clone(),
                });
            }
        }
    }

    entries
}

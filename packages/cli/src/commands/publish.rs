use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_editor::plugins::template;
use sitecraft_editor::{Editor, Publication, SiteDocument};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Site document (JSON)
    pub site: PathBuf,

    /// Only print the page with this id
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the whole publication as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let publication = publish_site(&args.site, &config)?;

    if let Some(id) = &args.page {
        let page = publication
            .page(id)
            .ok_or_else(|| anyhow!("Unknown page: {}", id))?;
        println!("{}", page.html);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&publication)?);
        return Ok(());
    }

    // Status goes to stderr so stdout stays plain HTML
    eprintln!(
        "{} {}",
        "📦 Publishing".bright_blue().bold(),
        publication.site_name
    );
    for page in &publication.pages {
        eprintln!("  {} {} ({})", "✓".green(), page.name, page.id);
        println!("{}", page.html);
    }

    Ok(())
}

/// Load a site and run one publish cycle with the template plugin installed
pub fn publish_site(path: &Path, config: &Config) -> Result<Publication> {
    let document = SiteDocument::load(path.to_path_buf())?;
    let mut editor = Editor::with_config(document, config.editor.clone());
    template::install(&mut editor, config.template.clone());

    Ok(editor.publish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r#"{
        "name": "Blog",
        "pages": [{
            "id": "index",
            "name": "Home",
            "root": {
                "type": "element",
                "tagName": "main",
                "template": { "before": "---\nlayout: base\n---" }
            }
        }]
    }"#;

    #[test]
    fn test_publish_site() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, SITE).unwrap();

        let publication = publish_site(&path, &Config::default()).unwrap();
        assert_eq!(publication.site_name, "Blog");
        assert_eq!(
            publication.page("index").unwrap().html,
            "---\nlayout: base\n---<main></main>"
        );
    }

    #[test]
    fn test_mismatched_events_publish_without_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, SITE).unwrap();

        let mut config = Config::default();
        config.template.event_start = "never".to_string();

        let publication = publish_site(&path, &config).unwrap();
        assert_eq!(publication.page("index").unwrap().html, "<main></main>");
    }

    #[test]
    fn test_missing_site_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = publish_site(&dir.path().join("nope.json"), &Config::default());
        assert!(result.is_err());
    }
}

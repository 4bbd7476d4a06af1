//! # HTML Assembly
//!
//! Splices a node's [`Template`] into its markup:
//!
//! ```text
//! before + <tag attrs… attributes class="…" style="…"> + children + </tag> + after
//! ```
//!
//! `children` is the template's `replace` text when set, the node's inner
//! HTML otherwise. Tagless nodes (text) only get `before`/`after`.

use sitecraft_model::{
    escape_attribute, normalize, render_attribute, AttrValue, Node, Template, TemplateField,
};

/// Markup state of a node captured when interception starts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeSnapshot {
    pub tag_name: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, AttrValue)>,
}

impl NodeSnapshot {
    pub fn of(node: &Node) -> Self {
        Self {
            tag_name: node.tag_name().map(str::to_string),
            classes: node.classes().to_vec(),
            attributes: node
                .attributes()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

/// Build the final markup of one node.
///
/// `inner_html` is only called when the template does not replace the
/// children.
pub fn assemble<F>(snapshot: &NodeSnapshot, template: &Template, inner_html: F) -> String
where
    F: FnOnce() -> String,
{
    let field = |f: TemplateField| normalize(template.get(f));
    let before = field(TemplateField::Before);
    let after = field(TemplateField::After);
    let replace = field(TemplateField::Replace);

    let children = if replace.is_empty() {
        inner_html()
    } else {
        replace
    };

    let Some(tag_name) = snapshot.tag_name.as_deref() else {
        return format!("{}{}{}", before, children, after);
    };

    let open = opening_tag(
        tag_name,
        snapshot,
        &field(TemplateField::Attributes),
        &field(TemplateField::Classname),
        &field(TemplateField::Style),
    );

    format!("{}{}{}</{}>{}", before, open, children, tag_name, after)
}

fn opening_tag(
    tag_name: &str,
    snapshot: &NodeSnapshot,
    attributes: &str,
    classname: &str,
    style: &str,
) -> String {
    let mut parts = vec![format!("<{}", tag_name)];

    parts.extend(
        snapshot
            .attributes
            .iter()
            .filter_map(|(key, value)| render_attribute(key, value)),
    );

    // Spliced as text: a key repeated here shows up twice in the output
    if !attributes.is_empty() {
        parts.push(attributes.to_string());
    }

    let classes = merge_classes(&snapshot.classes, classname);
    if !classes.is_empty() {
        parts.push(format!("class=\"{}\"", escape_attribute(&classes.join(" "))));
    }

    if !style.is_empty() {
        parts.push(format!("style=\"{}\"", style));
    }

    let mut tag = parts.join(" ");
    tag.push('>');
    tag
}

/// Ordered union of the node's classes and the extra tokens
fn merge_classes<'a>(existing: &'a [String], extra: &'a str) -> Vec<&'a str> {
    let mut merged: Vec<&str> = Vec::new();
    for class in existing
        .iter()
        .map(String::as_str)
        .chain(extra.split_whitespace())
    {
        if !merged.contains(&class) {
            merged.push(class);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div(classes: &[&str]) -> NodeSnapshot {
        NodeSnapshot {
            tag_name: Some("div".to_string()),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: Vec::new(),
        }
    }

    fn hi() -> String {
        "hi".to_string()
    }

    #[test]
    fn test_wraps_and_merges_classes() {
        let template = Template::new()
            .with(TemplateField::Before, "<!--A-->")
            .with(TemplateField::After, "<!--B-->")
            .with(TemplateField::Classname, "bar");

        assert_eq!(
            assemble(&div(&["foo"]), &template, hi),
            "<!--A--><div class=\"foo bar\">hi</div><!--B-->"
        );
    }

    #[test]
    fn test_replace_discards_children() {
        let template = Template::new().with(TemplateField::Replace, "<span>X</span>");

        let html = assemble(&div(&["foo"]), &template, || {
            panic!("children must not be serialized when replaced")
        });
        assert_eq!(html, "<div class=\"foo\"><span>X</span></div>");
    }

    #[test]
    fn test_tagless_node_ignores_tag_fields() {
        let snapshot = NodeSnapshot::default();
        let template = Template::new()
            .with(TemplateField::Before, "[")
            .with(TemplateField::After, "]")
            .with(TemplateField::Classname, "ignored")
            .with(TemplateField::Style, "color: red")
            .with(TemplateField::Attributes, "data-x=\"1\"");

        assert_eq!(assemble(&snapshot, &template, || "text".to_string()), "[text]");
    }

    #[test]
    fn test_opening_tag_order() {
        let snapshot = NodeSnapshot {
            tag_name: Some("input".to_string()),
            classes: vec!["field".to_string()],
            attributes: vec![
                ("disabled".to_string(), AttrValue::Bool(true)),
                ("hidden".to_string(), AttrValue::Bool(false)),
                ("name".to_string(), AttrValue::from("email")),
            ],
        };
        let template = Template::new()
            .with(TemplateField::Attributes, "name=\"other\" required")
            .with(TemplateField::Style, "  width: 100%;  ");

        assert_eq!(
            assemble(&snapshot, &template, String::new),
            "<input disabled name=\"email\" name=\"other\" required class=\"field\" style=\"width: 100%;\"></input>"
        );
    }

    #[test]
    fn test_fields_are_normalized() {
        let template = Template::new()
            .with(TemplateField::Before, "\n   <header>\n\n   <h1>T</h1>\n")
            .with(TemplateField::Classname, "\n");

        assert_eq!(
            assemble(&div(&[]), &template, hi),
            "<header>\n<h1>T</h1><div>hi</div>"
        );
    }

    #[test]
    fn test_duplicate_classes_are_merged_once() {
        let template = Template::new().with(TemplateField::Classname, "foo baz\nbaz");

        assert_eq!(
            assemble(&div(&["foo", "bar"]), &template, hi),
            "<div class=\"foo bar baz\">hi</div>"
        );
    }
}

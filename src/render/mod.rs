//! HTML fragment assembly. Issues render through an embedded minijinja
//! template (auto-escaped); children render bottom-up and are passed into
//! the parent as pre-rendered safe HTML.

pub mod contrast;

use minijinja::{Environment, context};
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::preview::LinkPreview;
use crate::relations::IssueForest;

const ISSUE_TEMPLATE: &str = include_str!("templates/issue.html.jinja");

/// Rendered when the repository has nothing to show.
pub const EMPTY_FRAGMENT: &str = "<p>No open issues.</p>";

#[derive(Debug, Serialize)]
struct LabelView {
    name: String,
    background: String,
    foreground: &'static str,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.add_template("issue.html", ISSUE_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the whole forest to an HTML fragment.
    pub fn render_fragment(
        &self,
        forest: &IssueForest,
        previews: &BTreeMap<u64, LinkPreview>,
    ) -> anyhow::Result<String> {
        if forest.is_empty() {
            return Ok(EMPTY_FRAGMENT.to_string());
        }

        let mut parts = Vec::with_capacity(forest.roots().len());
        for &root in forest.roots() {
            parts.push(self.render_issue(forest, previews, root, 0)?);
        }
        Ok(parts.join("\n"))
    }

    fn render_issue(
        &self,
        forest: &IssueForest,
        previews: &BTreeMap<u64, LinkPreview>,
        number: u64,
        depth: usize,
    ) -> anyhow::Result<String> {
        let issue = forest
            .issue(number)
            .ok_or_else(|| anyhow::anyhow!("issue #{number} missing from forest"))?;

        let mut children_html = String::new();
        for &child in forest.children(number) {
            children_html.push_str(&self.render_issue(forest, previews, child, depth + 1)?);
            children_html.push('\n');
        }

        let css_class = if depth == 0 { "issue-parent" } else { "issue-child" };
        let labels: Vec<LabelView> = issue.labels.iter().map(label_view).collect();
        let data_labels = issue
            .labels
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let assignees: Vec<&str> = issue.assignees.iter().map(|a| a.login.as_str()).collect();
        let body_html = issue
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .map(markdown_to_html);

        let rendered = self.env.get_template("issue.html")?.render(context! {
            css_class => css_class,
            number => issue.number,
            title => &issue.title,
            html_url => &issue.html_url,
            author => &issue.user.login,
            assignees => assignees,
            updated => issue.updated_at.format("%Y-%m-%d").to_string(),
            labels => labels,
            data_labels => data_labels,
            body_html => body_html,
            preview => previews.get(&number),
            children_html => if children_html.is_empty() {
                None
            } else {
                Some(children_html)
            },
        })?;
        Ok(rendered)
    }
}

fn label_view(label: &crate::github::model::Label) -> LabelView {
    let (background, foreground) = contrast::chip_colors(&label.color);
    LabelView {
        name: label.name.clone(),
        background,
        foreground,
    }
}

/// Markdown to HTML via pulldown-cmark, GitHub-flavored extensions on.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

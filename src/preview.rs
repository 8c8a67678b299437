//! Open Graph link previews: find the first external URL in an issue body
//! and pull `og:` meta tags out of the fetched page by regex.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'()\[\]]+"#).expect("url regex"));

#[derive(Debug, Clone, Serialize)]
pub struct LinkPreview {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// First http(s) URL in `body` that does not point back into the tracked
/// repository. Trailing sentence punctuation is trimmed.
pub fn first_external_url(body: &str, repo: &str) -> Option<String> {
    let own_prefix = if repo.is_empty() {
        None
    } else {
        Some(format!("https://github.com/{repo}"))
    };

    for found in URL_RE.find_iter(body) {
        let url = found.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if let Some(prefix) = &own_prefix
            && url.starts_with(prefix.as_str())
        {
            continue;
        }
        return Some(url.to_string());
    }
    None
}

/// Build a preview from a fetched page. Returns None when the page carries
/// no `og:title`.
pub fn from_html(url: &str, html: &str) -> Option<LinkPreview> {
    let title = og_content(html, "og:title")?;
    Some(LinkPreview {
        url: url.to_string(),
        title,
        description: og_content(html, "og:description"),
        image: og_content(html, "og:image"),
    })
}

/// Extract the `content` of a meta tag by property name, tolerating either
/// attribute order and either quote style.
fn og_content(html: &str, property: &str) -> Option<String> {
    let patterns = [
        format!(r#"<meta[^>]*?property=["']{property}["'][^>]*?content=["']([^"']*)["']"#),
        format!(r#"<meta[^>]*?content=["']([^"']*)["'][^>]*?property=["']{property}["']"#),
    ];
    for pattern in patterns {
        if let Ok(re) = Regex::new(&pattern)
            && let Some(captures) = re.captures(html)
        {
            let content = unescape_entities(&captures[1]);
            if !content.is_empty() {
                return Some(content);
            }
        }
    }
    None
}

fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_url_found() {
        let body = "See https://example.com/post for background.";
        assert_eq!(
            first_external_url(body, "octocat/hello"),
            Some("https://example.com/post".to_string())
        );
    }

    #[test]
    fn test_own_repo_links_skipped() {
        let body = "Relates to https://github.com/octocat/hello/issues/3 \
                    and https://blog.example.com/why";
        assert_eq!(
            first_external_url(body, "octocat/hello"),
            Some("https://blog.example.com/why".to_string())
        );
    }

    #[test]
    fn test_no_url() {
        assert_eq!(first_external_url("plain text only", "octocat/hello"), None);
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        let body = "Read https://example.com/a.";
        assert_eq!(
            first_external_url(body, ""),
            Some("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_from_html_property_first() {
        let html = r#"<head>
            <meta property="og:title" content="Hello Page">
            <meta property="og:description" content="A &amp; B">
        </head>"#;
        let preview = from_html("https://example.com", html).unwrap();
        assert_eq!(preview.title, "Hello Page");
        assert_eq!(preview.description.as_deref(), Some("A & B"));
        assert!(preview.image.is_none());
    }

    #[test]
    fn test_from_html_content_first() {
        let html = r#"<meta content="Reversed" property="og:title">"#;
        let preview = from_html("https://example.com", html).unwrap();
        assert_eq!(preview.title, "Reversed");
    }

    #[test]
    fn test_from_html_without_og_title() {
        let html = "<title>Only a plain title</title>";
        assert!(from_html("https://example.com", html).is_none());
    }
}

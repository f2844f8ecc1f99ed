//! Assembling a full HTML page from markdown and a template.

use thiserror::Error;

use crate::builder::markdown_to_html_node;
use crate::error::Error;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("No H1 header found in markdown")]
    MissingTitle,

    #[error(transparent)]
    Convert(#[from] Error),
}

/// The text of the first `# ` heading line, trimmed.
///
/// Only level-one headings count; `##` and deeper are skipped.
pub fn extract_title(markdown: &str) -> Result<String, PageError> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(PageError::MissingTitle)
}

/// Render `markdown` into `template`, filling the title and content
/// placeholders. Root-relative `href`/`src` attributes are prefixed with
/// `base_path` unless it is `/`.
pub fn assemble_page(markdown: &str, template: &str, base_path: &str) -> Result<String, PageError> {
    let content = markdown_to_html_node(markdown)?.render()?;
    let title = extract_title(markdown)?;

    let page = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content);

    Ok(rewrite_base_path(&page, base_path))
}

/// Point root-relative `href="/…"` and `src="/…"` attributes at `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    let base = normalize_base_path(base_path);
    if base == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    let mut base = trimmed.to_string();
    if !base.starts_with('/') {
        base.insert(0, '/');
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

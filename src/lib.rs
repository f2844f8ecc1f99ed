mod block;
mod builder;
mod config;
mod error;
mod extract;
mod html;
mod inline;
mod page;
mod parser;
mod site;

pub use block::{Block, BlockKind, InlineKind, InlineRun};
pub use config::{Config, ConfigError, SiteConfig};
pub use error::{Error, Result};
pub use extract::{extract_images, extract_links};
pub use html::{HtmlNode, LeafNode, ParentNode, Props};
pub use inline::{split_runs, text_to_runs};
pub use page::{PageError, assemble_page, extract_title, rewrite_base_path};
pub use parser::{block_kind, dedent, markdown_to_blocks};
pub use site::{SiteError, SiteSummary, generate_page, generate_pages_recursive, generate_site};

/// Dedent, split and classify markdown into blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown into a `div.markdown-body` node tree.
pub fn convert(markdown: &str) -> Result<HtmlNode> {
    builder::markdown_to_html_node(markdown)
}

/// Convert markdown straight to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    convert(markdown)?.render()
}

/// Classify and convert a single block.
pub fn block_to_html_node(block: &str) -> Result<HtmlNode> {
    builder::block_to_html_node(&Block {
        kind: block_kind(block),
        source: block.to_string(),
    })
}

/// Convert a block as a given kind, skipping classification.
pub fn block_to_html_node_as(block: &str, kind: BlockKind) -> Result<HtmlNode> {
    builder::block_to_html_node(&Block {
        kind,
        source: block.to_string(),
    })
}

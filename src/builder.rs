//! Turning classified blocks into HTML node subtrees.
//!
//! Each converter re-checks the structure its block kind promises and
//! fails with [`Error::Format`] rather than guessing. Text payloads go
//! through the inline splitter, except the body of a code block which is
//! kept literally.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, BlockKind};
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline::text_to_runs;
use crate::parser;

static ORDERED_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").unwrap());

const CODE_FENCE: &str = "```";

/// Convert a whole document into its root `div.markdown-body` node.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    let children = parser::parse(markdown)
        .iter()
        .map(block_to_html_node)
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent("div", children).with_prop("class", "markdown-body"))
}

/// Convert one classified block into its subtree.
pub fn block_to_html_node(block: &Block) -> Result<HtmlNode> {
    let source = block.source.as_str();
    match block.kind {
        BlockKind::Paragraph => paragraph_to_html_node(source),
        BlockKind::Heading => heading_to_html_node(source),
        BlockKind::Code => code_to_html_node(source),
        BlockKind::Quote => quote_to_html_node(source),
        BlockKind::UnorderedList => list_to_html_node(source, false),
        BlockKind::OrderedList => list_to_html_node(source, true),
    }
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(text_to_runs(text)?.into_iter().map(HtmlNode::from).collect())
}

fn paragraph_to_html_node(block: &str) -> Result<HtmlNode> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&text)?))
}

fn heading_to_html_node(block: &str) -> Result<HtmlNode> {
    let level = block.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return Err(Error::format(
            BlockKind::Heading,
            "marker must be 1 to 6 '#'",
            block,
        ));
    }
    // '#' is one byte, so `level` is also a byte offset
    let Some(content) = block[level..].strip_prefix(' ') else {
        return Err(Error::format(
            BlockKind::Heading,
            "marker must be followed by a space",
            block,
        ));
    };
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::format(BlockKind::Heading, "no content", block));
    }

    Ok(HtmlNode::parent(
        &format!("h{level}"),
        text_to_children(content)?,
    ))
}

fn code_to_html_node(block: &str) -> Result<HtmlNode> {
    if !block.starts_with(CODE_FENCE) || !block.ends_with(CODE_FENCE) {
        return Err(Error::format(
            BlockKind::Code,
            "unterminated code fence",
            block,
        ));
    }

    // Overlapping open and close fences leave no interior
    let inner = block
        .get(CODE_FENCE.len()..block.len().saturating_sub(CODE_FENCE.len()))
        .unwrap_or("");
    let body = match inner.split_once('\n') {
        // The rest of the opening fence line is a language tag, possibly empty
        Some((_, body)) => body.trim_start_matches(['\r', '\n']),
        // A single-line block always gives up one character to the opening fence
        None => {
            let mut chars = inner.chars();
            chars.next();
            chars.as_str().trim_start()
        }
    };
    let body = body.trim_end();

    let code = HtmlNode::parent("code", vec![HtmlNode::text(body)]);
    Ok(HtmlNode::parent("pre", vec![code]))
}

fn quote_to_html_node(block: &str) -> Result<HtmlNode> {
    let mut lines = Vec::new();
    for line in block.split('\n') {
        if !line.starts_with('>') {
            return Err(Error::format(
                BlockKind::Quote,
                "line does not start with '>'",
                line,
            ));
        }
        lines.push(line.trim_start_matches('>').trim());
    }

    let text = lines.join(" ");
    Ok(HtmlNode::parent("blockquote", text_to_children(&text)?))
}

fn list_to_html_node(block: &str, ordered: bool) -> Result<HtmlNode> {
    let lines = block.lines().map(str::trim).filter(|line| !line.is_empty());

    let mut items = Vec::new();
    for (i, line) in lines.enumerate() {
        let content = if ordered {
            ordered_item_content(line, i + 1)?
        } else {
            line.strip_prefix("- ").ok_or_else(|| {
                Error::format(BlockKind::UnorderedList, "item missing '- ' marker", line)
            })?
        };
        items.push(HtmlNode::parent("li", text_to_children(content)?));
    }

    let tag = if ordered { "ol" } else { "ul" };
    Ok(HtmlNode::parent(tag, items))
}

fn ordered_item_content(line: &str, expected: usize) -> Result<&str> {
    let caps = ORDERED_LIST_ITEM.captures(line).ok_or_else(|| {
        Error::format(BlockKind::OrderedList, "item missing '<n>. ' marker", line)
    })?;

    let number = caps[1].parse::<usize>().ok();
    if number != Some(expected) {
        return Err(Error::format(
            BlockKind::OrderedList,
            "numbering must count up from 1",
            line,
        ));
    }

    let content = caps.get(2).map_or("", |m| m.as_str());
    Ok(content)
}

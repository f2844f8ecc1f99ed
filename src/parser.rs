use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, BlockKind};

/// One or more blank lines, where a blank line may hold whitespace
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6} ").unwrap());

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\. ").unwrap());

const CODE_FENCE: &str = "```";

const INDENT: [char; 2] = [' ', '\t'];

/// Remove the whitespace prefix shared by every non-blank line.
///
/// Only spaces and tabs count as indentation. Lines holding nothing but
/// spaces and tabs are emptied and do not take part in finding the common
/// prefix. Tabs and spaces are not interchangeable.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n') {
        if is_blank(line) {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start_matches(INDENT).len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or("");

    text.split('\n')
        .map(|line| if is_blank(line) { "" } else { &line[margin.len()..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim_matches(INDENT).is_empty()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, x), _)| i + x.len_utf8());
    &a[..len]
}

/// Split a document into trimmed, non-empty blocks at blank lines.
pub fn markdown_to_blocks(markdown: &str) -> Vec<String> {
    BLANK_LINES
        .split(markdown.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a single block. The first matching kind wins; anything
/// unrecognised is a paragraph.
pub fn block_kind(block: &str) -> BlockKind {
    if HEADING.is_match(block) {
        return BlockKind::Heading;
    }

    if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        return BlockKind::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }

    if lines.iter().all(|line| line.trim().starts_with("- ")) {
        return BlockKind::UnorderedList;
    }

    if is_numbered_sequence(&lines) {
        return BlockKind::OrderedList;
    }

    BlockKind::Paragraph
}

/// Every line carries an `<n>. ` marker and the markers count 1, 2, ... n.
fn is_numbered_sequence(lines: &[&str]) -> bool {
    lines.iter().enumerate().all(|(i, line)| {
        ORDERED_ITEM
            .captures(line.trim())
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .is_some_and(|number| number == i + 1)
    })
}

/// Dedent, segment and classify a whole document. CRLF line endings are
/// read as LF.
pub fn parse(markdown: &str) -> Vec<Block> {
    let markdown = markdown.replace("\r\n", "\n");
    let blocks: Vec<Block> = markdown_to_blocks(&dedent(&markdown))
        .into_iter()
        .map(|source| Block {
            kind: block_kind(&source),
            source,
        })
        .collect();

    log::debug!("split document into {} blocks", blocks.len());
    for block in &blocks {
        log::trace!("{} block: {:?}", block.kind, block.source);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn two_paragraphs() {
        assert_eq!(markdown_to_blocks("A\n\nB"), vec!["A", "B"]);
    }

    #[test]
    fn headings_of_every_level() {
        let md = "# Heading 1\n\n## Heading 2\n\n### Heading 3\n\n\
                  #### Heading 4\n\n##### Heading 5\n\n###### Heading 6\n";
        assert_eq!(
            markdown_to_blocks(md),
            vec![
                "# Heading 1",
                "## Heading 2",
                "### Heading 3",
                "#### Heading 4",
                "##### Heading 5",
                "###### Heading 6",
            ]
        );
    }

    #[test]
    fn runs_of_blank_lines_with_whitespace() {
        let md = "\n\n  First block\nstill first  \n \t \n\n\n   Second\n\n   \n";
        assert_eq!(
            markdown_to_blocks(md),
            vec!["First block\nstill first", "Second"]
        );
    }

    #[test]
    fn code_block_stays_one_block() {
        let md = "Regular paragraph.\n\n```python\ndef hello():\n    print(\"Hello, world!\")\n```\n\nAnother paragraph.";
        assert_eq!(
            markdown_to_blocks(md),
            vec![
                "Regular paragraph.",
                "```python\ndef hello():\n    print(\"Hello, world!\")\n```",
                "Another paragraph.",
            ]
        );
    }

    #[test]
    fn empty_document_has_no_blocks() {
        assert!(markdown_to_blocks("").is_empty());
        assert!(markdown_to_blocks(" \n\n \t\n").is_empty());
    }

    #[test]
    fn dedent_removes_common_margin() {
        assert_eq!(
            dedent("    # Title\n\n      indented\n    body\n"),
            "# Title\n\n  indented\nbody\n"
        );
    }

    #[test]
    fn dedent_ignores_whitespace_only_lines() {
        assert_eq!(dedent("  a\n \n  b"), "a\n\nb");
    }

    #[test]
    fn dedent_leaves_mixed_margins_alone() {
        assert_eq!(dedent("\ta\n  b"), "\ta\n  b");
    }

    #[test]
    fn dedent_only_strips_spaces_and_tabs() {
        assert_eq!(dedent("\u{a0}a\n\u{a0}b"), "\u{a0}a\n\u{a0}b");
        assert_eq!(dedent("  \u{a0}a\n  \u{a0}b"), "\u{a0}a\n\u{a0}b");
    }

    #[rstest]
    #[case("This is a simple paragraph of text.", BlockKind::Paragraph)]
    #[case("This paragraph has **bold** and _italic_ text and `code`.", BlockKind::Paragraph)]
    #[case("This is a paragraph\nwith multiple lines", BlockKind::Paragraph)]
    #[case("# Heading 1", BlockKind::Heading)]
    #[case("###### Heading 6", BlockKind::Heading)]
    #[case("####### Seven", BlockKind::Paragraph)]
    #[case("#Invalid heading", BlockKind::Paragraph)]
    #[case("## Heading with **bold** and _italic_", BlockKind::Heading)]
    #[case("```\nfunction test() {\n  return true;\n}\n```", BlockKind::Code)]
    #[case("```python\ndef test():\n    return True\n```", BlockKind::Code)]
    #[case("```\nCode without closing backticks", BlockKind::Paragraph)]
    #[case("Code without opening backticks\n```", BlockKind::Paragraph)]
    #[case("```", BlockKind::Code)]
    #[case("> This is a quote.", BlockKind::Quote)]
    #[case("> Line one\n> Line two\n>", BlockKind::Quote)]
    #[case("> This is a quote.\nThis line doesn't start with >.", BlockKind::Paragraph)]
    #[case("- Item 1\n- Item 2\n- Item 3", BlockKind::UnorderedList)]
    #[case("- Item 1\nNot an item\n- Item 3", BlockKind::Paragraph)]
    #[case("* Item 1\n* Item 2", BlockKind::Paragraph)]
    #[case("- Outer list item\n  - Nested list item", BlockKind::UnorderedList)]
    #[case("1. First item\n2. Second item\n3. Third item", BlockKind::OrderedList)]
    #[case("2. First item\n3. Second item", BlockKind::Paragraph)]
    #[case("1. First item\n3. Second item\n4. Third item", BlockKind::Paragraph)]
    #[case("1. First item\nNot an item\n3. Third item", BlockKind::Paragraph)]
    #[case("1. Item one\n- Item two", BlockKind::Paragraph)]
    #[case("1.No space", BlockKind::Paragraph)]
    #[case("", BlockKind::Paragraph)]
    #[case("a", BlockKind::Paragraph)]
    #[case("###", BlockKind::Paragraph)]
    fn classifies(#[case] block: &str, #[case] expected: BlockKind) {
        assert_eq!(block_kind(block), expected);
    }

    #[test]
    fn heading_wins_over_other_kinds() {
        assert_eq!(block_kind("# Title\n- item"), BlockKind::Heading);
        assert_eq!(block_kind("# ```"), BlockKind::Heading);
    }

    #[test]
    fn code_wins_over_quote() {
        assert_eq!(block_kind("```\n> quoted\n```"), BlockKind::Code);
    }

    #[test]
    fn parse_pairs_blocks_with_kinds() {
        let blocks = parse("    # Title\n\n    - a\n    - b\n\n    text");
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Heading, BlockKind::UnorderedList, BlockKind::Paragraph]
        );
        assert_eq!(blocks[1].source, "- a\n- b");
    }

    #[test]
    fn parse_reads_crlf_as_lf() {
        let blocks = parse("line one\r\nline two\r\n\r\n- a\r\n- b\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].source, "line one\nline two");
        assert_eq!(blocks[1].kind, BlockKind::UnorderedList);
        assert_eq!(blocks[1].source, "- a\n- b");
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Inline formatting carried by a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A contiguous span of inline text tagged with exactly one kind.
///
/// `url` is only set for [`InlineKind::Link`] and [`InlineKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRun {
    pub text: String,
    pub kind: InlineKind,
    pub url: Option<String>,
}

impl InlineRun {
    pub fn new(text: impl Into<String>, kind: InlineKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, InlineKind::Text)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: InlineKind::Link,
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: InlineKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == InlineKind::Text
    }
}

/// Structural kind of a markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Code,
        BlockKind::Quote,
        BlockKind::UnorderedList,
        BlockKind::OrderedList,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
        }
    }
}

/// One blank-line-delimited block of a document and its classified kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub source: String,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedBlockType(s.to_string()))
    }
}

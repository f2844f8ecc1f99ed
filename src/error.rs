use thiserror::Error;

use crate::block::BlockKind;

/// Errors raised while converting markdown into an HTML node tree or
/// rendering that tree.
///
/// Every error aborts the conversion of the whole document; there is no
/// partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An inline delimiter was opened but never closed.
    #[error("Invalid delimiter usage ({delimiter}) in: {text}")]
    MalformedMarkup { delimiter: &'static str, text: String },

    /// A block failed the structural checks of the kind it was classified as.
    #[error("Invalid {kind} block ({reason}): {content}")]
    Format {
        kind: BlockKind,
        reason: &'static str,
        content: String,
    },

    #[error("Leaf node must have a value")]
    MissingValue,

    #[error("Parent node must have a tag")]
    MissingTag,

    #[error("Parent node must have children")]
    MissingChildren,

    #[error("Unsupported block type: {0}")]
    UnsupportedBlockType(String),
}

impl Error {
    pub(crate) fn format(kind: BlockKind, reason: &'static str, content: impl Into<String>) -> Self {
        Error::Format {
            kind,
            reason,
            content: content.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

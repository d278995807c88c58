//! Errors raised while reading a document.
//!
//! Every error aborts the whole parse; no partial document is returned.
//! Lenient mode reads anything left over as text, so there the only errors
//! in practice are [`ParseError::NestingTooDeep`] and
//! [`ParseError::StrayCloseTag`] under
//! [`UnmatchedClosePolicy::Fail`](crate::UnmatchedClosePolicy::Fail).

use strum_macros::Display;
use thiserror::Error;

/// A fatal problem found in the source text. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing (comment, tag, or text) could be read at `offset`.
    #[error("could not read a tag, comment, or text at offset {offset}")]
    UnparsableSegment {
        /// Where reading stopped.
        offset: usize,
    },

    /// A tag whose name was read broke the tag grammar.
    #[error("malformed tag at offset {offset}: {reason}")]
    MalformedTag {
        /// Start of the tag.
        offset: usize,
        /// Which rule was broken.
        reason: &'static str,
    },

    /// A close tag with nothing open to close.
    #[error("close tag </{name}> at offset {offset} has no matching open element")]
    StrayCloseTag {
        /// Tag name of the close tag.
        name: String,
        /// Start of the close tag.
        offset: usize,
    },

    /// An element that was still open when it had to be closed.
    #[error("element <{name}> opened at offset {offset} was not closed")]
    UnclosedElement {
        /// Tag name of the unclosed element.
        name: String,
        /// Start of the element's open tag.
        offset: usize,
    },

    /// The same attribute appeared twice on one tag.
    #[error("duplicate attribute '{name}' at offset {offset}")]
    DuplicateAttribute {
        /// The repeated attribute name.
        name: String,
        /// Start of the tag carrying it.
        offset: usize,
    },

    /// More elements were open at once than
    /// [`ParseOptions::max_nesting`](crate::ParseOptions::max_nesting) allows.
    #[error("element opened at offset {offset} nests deeper than {limit} levels")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Start of the open tag that went past the limit.
        offset: usize,
    },
}

/// The kind of a [`ParseError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ParseErrorKind {
    /// See [`ParseError::UnparsableSegment`].
    UnparsableSegment,
    /// See [`ParseError::MalformedTag`].
    MalformedTag,
    /// See [`ParseError::StrayCloseTag`].
    StrayCloseTag,
    /// See [`ParseError::UnclosedElement`].
    UnclosedElement,
    /// See [`ParseError::DuplicateAttribute`].
    DuplicateAttribute,
    /// See [`ParseError::NestingTooDeep`].
    NestingTooDeep,
}

impl ParseError {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnparsableSegment { .. } => ParseErrorKind::UnparsableSegment,
            Self::MalformedTag { .. } => ParseErrorKind::MalformedTag,
            Self::StrayCloseTag { .. } => ParseErrorKind::StrayCloseTag,
            Self::UnclosedElement { .. } => ParseErrorKind::UnclosedElement,
            Self::DuplicateAttribute { .. } => ParseErrorKind::DuplicateAttribute,
            Self::NestingTooDeep { .. } => ParseErrorKind::NestingTooDeep,
        }
    }

    /// The byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnparsableSegment { offset }
            | Self::MalformedTag { offset, .. }
            | Self::StrayCloseTag { offset, .. }
            | Self::UnclosedElement { offset, .. }
            | Self::DuplicateAttribute { offset, .. }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

/// Result alias for fallible parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

use core::fmt;
use core::ops::Range;

use webr_dom::AttributesMap;

/// A tag, open, close, or both.
///
/// `is_open` and `is_close` are independent: `<a>` is open only, `</a>` is
/// close only, and `<a />` is both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSegment {
    /// Lowercased tag name (`!doctype` for a doctype declaration).
    pub name: String,
    /// Lowercased attribute names mapped to their unquoted values, in source order.
    pub attributes: AttributesMap,
    /// The tag opens an element.
    pub is_open: bool,
    /// The tag closes an element.
    pub is_close: bool,
    /// Byte offset of the `<`.
    pub start: usize,
    /// Byte offset just past the `>`.
    pub end: usize,
}

impl ElementSegment {
    /// An open tag that is also closed, like `<br />`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.is_open && self.is_close
    }
}

/// A run of text between markup, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// The trimmed text.
    pub text: String,
    /// Byte offset where the run starts.
    pub start: usize,
    /// Byte offset where the next segment starts (or end of input).
    pub end: usize,
}

/// A `<!-- ... -->` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSegment {
    /// The comment body, trimmed.
    pub text: String,
    /// Byte offset of the `<!--`.
    pub start: usize,
    /// Byte offset just past the `-->`.
    pub end: usize,
}

/// One lexical unit read from the source.
///
/// Segments are ordered and never overlap; `start < end` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An open, close, or self-closing tag.
    Element(ElementSegment),
    /// A text run.
    Text(TextSegment),
    /// A comment.
    Comment(CommentSegment),
}

impl Segment {
    /// Byte offset where the segment starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Element(s) => s.start,
            Self::Text(s) => s.start,
            Self::Comment(s) => s.start,
        }
    }

    /// Byte offset just past the segment.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Element(s) => s.end,
            Self::Text(s) => s.end,
            Self::Comment(s) => s.end,
        }
    }

    /// The byte range the segment covers.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// The exact source text the segment was read from.
    ///
    /// `input` must be the text the segment was read from.
    #[must_use]
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span()]
    }

    /// The element segment, if this is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementSegment> {
        match self {
            Self::Element(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(tag) => {
                write!(f, "<")?;
                if !tag.is_open {
                    write!(f, "/")?;
                }
                write!(f, "{}", tag.name)?;
                for (name, value) in &tag.attributes {
                    write!(f, " {name}=\"{value}\"")?;
                }
                if tag.is_self_closing() {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::Text(text) => write!(f, "Text({})", text.text),
            Self::Comment(comment) => write!(f, "<!--{}-->", comment.text),
        }
    }
}

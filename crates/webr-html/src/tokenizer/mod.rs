//! Segment tokenizer.
//!
//! Splits source text into tags, text runs and comments. The content of
//! `script`, `style` and `block` elements is read as raw text.

/// Tokenizer state and the segment readers.
pub mod core;
/// Position-based readers for names, attributes and quoting.
mod helpers;
/// Segment types produced by the tokenizer.
pub mod segment;

pub use core::{SegmentTokenizer, tokenize};
pub use segment::{CommentSegment, ElementSegment, Segment, TextSegment};

//! HTML segment tokenizer, tree builder, and writer for the webr crates.
//!
//! # Scope
//!
//! This crate implements a simplified, well-defined HTML grammar:
//! - **Segment Tokenizer**
//!   - Tags, text runs, and comments, each with source offsets
//!   - Quoted attribute values and bare boolean attributes
//!   - `<!DOCTYPE>` as an element named `!doctype`
//!   - Raw-text reading for `script`, `style`, and `block`
//!
//! - **Tree Builder**
//!   - Recursive child passes over the segment stream
//!   - Close-tag mismatch recovery by handing the close tag up to the nearest
//!     ancestor with the same name
//!   - Strict mode (every ambiguity fails) and lenient mode (documented
//!     recoveries, recorded as [`ParseIssue`]s)
//!
//! - **Writer** for pretty or compact output
//!
//! # Not Implemented
//!
//! - The WHATWG tokenizer state machine and insertion modes
//! - Character references and encoding detection
//! - Escaping of text or attribute values on output
//!
//! # Example
//!
//! ```
//! use webr_html::{Document, ParseOptions, WriteOptions};
//!
//! let doc = Document::parse("<p>Hello <b>world</b></p>", ParseOptions::strict()).unwrap();
//! assert_eq!(doc.to_string(), "<p>Hello<b>world</b></p>");
//! assert_eq!(doc.write(&WriteOptions::default()), "<p>\n  Hello\n  <b>world</b>\n</p>");
//! ```

/// Parse errors.
pub mod error;
/// Parse and write options.
pub mod options;
/// Tree construction and the parsed document.
pub mod parser;
/// Markup output.
pub mod serializer;
/// Void, never-self-closing, and raw-text tag tables.
pub mod tags;
/// Segment tokenizer.
pub mod tokenizer;

pub use error::{ParseError, ParseErrorKind, Result};
pub use options::{
    DEFAULT_MAX_NESTING, LineEnding, ParseOptions, UnmatchedClosePolicy, WriteOptions,
};
pub use parser::{Document, ParseIssue};
pub use serializer::{inner_html, outer_html, write_nodes};
pub use tokenizer::{
    CommentSegment, ElementSegment, Segment, SegmentTokenizer, TextSegment, tokenize,
};

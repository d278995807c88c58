//! Tree construction from the segment stream.

/// Recursive tree builder and recovery reporting.
pub mod core;
/// The parsed document and its linked elements.
pub mod document;

pub use core::ParseIssue;
pub use document::Document;

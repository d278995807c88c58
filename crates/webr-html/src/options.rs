//! Parse and write configuration.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What lenient mode does with a close tag that matches no open element
/// anywhere up to the document root.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedClosePolicy {
    /// Drop the close tag and record an issue.
    #[default]
    Discard,
    /// Fail with [`ParseError::StrayCloseTag`](crate::ParseError::StrayCloseTag).
    Fail,
}

/// Deepest element nesting [`ParseOptions::default`] accepts.
pub const DEFAULT_MAX_NESTING: usize = 256;

/// Options for [`Document::parse`](crate::Document::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Reject every grammar and structural ambiguity instead of recovering.
    pub strict: bool,
    /// Keep comments as nodes in the tree.
    pub include_comments: bool,
    /// Lenient-mode handling of close tags that match nothing.
    /// Strict mode always fails.
    pub unmatched_close: UnmatchedClosePolicy,
    /// How many elements may be open at once before the parse fails with
    /// [`ParseError::NestingTooDeep`](crate::ParseError::NestingTooDeep).
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

impl ParseOptions {
    /// Lenient parsing without comments.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            strict: false,
            include_comments: false,
            unmatched_close: UnmatchedClosePolicy::Discard,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Strict parsing without comments.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    /// Enable strict mode.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Keep comments in the tree.
    #[must_use]
    pub const fn with_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }

    /// Choose how lenient mode treats close tags that match nothing.
    #[must_use]
    pub const fn with_unmatched_close(mut self, policy: UnmatchedClosePolicy) -> Self {
        self.unmatched_close = policy;
        self
    }

    /// Limit how many elements may be open at once.
    #[must_use]
    pub const fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

/// Line terminator used between nodes when pretty printing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`
    #[default]
    #[strum(serialize = "\n")]
    Lf,
    /// `\r\n`
    #[strum(serialize = "\r\n")]
    CrLf,
}

/// Options for writing a tree back to markup.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Put every node on its own line, indented by depth.
    pub pretty: bool,
    /// Spaces per indentation level. Ignored when `use_tabs` is set.
    pub indent_size: usize,
    /// Indent with one tab per level.
    pub use_tabs: bool,
    /// Write childless elements as `<x />` where that is allowed.
    pub self_closing: bool,
    /// Keep a sole short text child on its element's line.
    pub shrink_text: bool,
    /// Longest text (in characters) that `shrink_text` keeps inline.
    pub shrink_limit: usize,
    /// Line terminator for pretty output.
    pub line_ending: LineEnding,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent_size: 2,
            use_tabs: false,
            self_closing: true,
            shrink_text: true,
            shrink_limit: 20,
            line_ending: LineEnding::Lf,
        }
    }
}

impl WriteOptions {
    /// Everything on one line, nothing reflowed.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            shrink_text: false,
            ..Self::default()
        }
    }

    /// Pretty printing indented with tabs.
    #[must_use]
    pub fn tabs() -> Self {
        Self {
            use_tabs: true,
            ..Self::default()
        }
    }

    /// The indentation prefix for a node nested `depth` levels deep.
    #[must_use]
    pub fn indent(&self, depth: usize) -> String {
        if self.use_tabs {
            "\t".repeat(depth)
        } else {
            " ".repeat(depth * self.indent_size)
        }
    }
}

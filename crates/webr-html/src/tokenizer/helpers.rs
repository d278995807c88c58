//! Helper functions for the segment tokenizer.
//!
//! This module contains the small position-based readers the segment readers
//! are built from:
//! - Input/character handling (whitespace, lookahead)
//! - Tag name reading, including the doctype special case
//! - Attribute name/value reading with quoting rules per mode
//!
//! Every reader takes a byte offset and returns the offset just past what it
//! read, or `None` when nothing matching is there.

use webr_dom::AttributesMap;

use super::core::SegmentTokenizer;
use crate::error::{ParseError, Result};

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl SegmentTokenizer<'_> {
    /// Peek at the character starting at byte offset `pos`.
    #[must_use]
    pub(super) fn peek_char(&self, pos: usize) -> Option<char> {
        self.input.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Advance from `pos` while `accept` holds; returns the first rejected offset.
    pub(super) fn scan_while(&self, pos: usize, accept: impl Fn(char) -> bool) -> usize {
        self.input[pos..]
            .char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(self.input.len(), |(i, _)| pos + i)
    }

    /// Skip whitespace starting at `pos`.
    pub(super) fn skip_whitespace(&self, pos: usize) -> usize {
        self.scan_while(pos, char::is_whitespace)
    }

    /// Check if the text at `pos` matches `target` using ASCII
    /// case-insensitive comparison.
    #[must_use]
    pub(super) fn starts_with_ignore_ascii_case(&self, pos: usize, target: &str) -> bool {
        self.input
            .get(pos..pos + target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Characters that end a tag name or an unquoted attribute value.
    pub(super) fn is_tag_delimiter(c: char) -> bool {
        c.is_whitespace() || matches!(c, '/' | '>')
    }

    /// Report a grammar violation in a tag starting at `tag_start`.
    ///
    /// Strict mode fails; lenient mode treats the tag as unreadable.
    pub(super) fn malformed<T>(
        &self,
        tag_start: usize,
        reason: &'static str,
    ) -> Result<Option<T>> {
        if self.strict {
            Err(ParseError::MalformedTag {
                offset: tag_start,
                reason,
            })
        } else {
            Ok(None)
        }
    }
}

// =============================================================================
// Tag Name Helpers
// =============================================================================

impl SegmentTokenizer<'_> {
    /// Read a tag name at `pos`.
    ///
    /// A name starts with a letter or `_` and continues with letters, digits,
    /// `-`, `_` or `.`, and must be followed by whitespace, `/`, `>` or the end
    /// of input. `!DOCTYPE` is the one exception.
    pub(super) fn read_tag_name(&self, pos: usize) -> Option<usize> {
        if let Some(end) = self.read_doctype_name(pos) {
            return Some(end);
        }

        let first = self.peek_char(pos)?;
        if !(first.is_alphabetic() || first == '_') {
            return None;
        }
        let end = self.scan_while(pos + first.len_utf8(), |c| {
            c.is_alphanumeric() || matches!(c, '-' | '_' | '.')
        });

        match self.peek_char(end) {
            Some(c) if !Self::is_tag_delimiter(c) => None,
            _ => Some(end),
        }
    }

    /// Read `!DOCTYPE` (any case) at `pos`, when followed by a delimiter.
    pub(super) fn read_doctype_name(&self, pos: usize) -> Option<usize> {
        const DOCTYPE: &str = "!DOCTYPE";

        if !self.starts_with_ignore_ascii_case(pos, DOCTYPE) {
            return None;
        }
        let end = pos + DOCTYPE.len();
        self.peek_char(end)
            .filter(|&c| Self::is_tag_delimiter(c))
            .map(|_| end)
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl SegmentTokenizer<'_> {
    /// Read one `name` or `name=value` attribute at `pos` into `attributes`.
    ///
    /// Returns the offset after the attribute, or `None` when there is no
    /// attribute at `pos`. A bare name gets the value `"true"`.
    pub(super) fn read_attribute(
        &self,
        pos: usize,
        tag_start: usize,
        attributes: &mut AttributesMap,
    ) -> Result<Option<usize>> {
        let bytes = self.input.as_bytes();

        let name_end = if matches!(bytes.get(pos), Some(b'"' | b'\'')) {
            if self.strict {
                return self.malformed(tag_start, "quoted attribute name");
            }
            self.read_quoted(pos)
        } else {
            self.read_attribute_name(pos)
        };
        let Some(name_end) = name_end else {
            return Ok(None);
        };

        let name = unwrap_quotes(&self.input[pos..name_end])
            .trim()
            .to_ascii_lowercase();
        if name.is_empty() {
            return Ok(None);
        }

        let mut cursor = self.skip_whitespace(name_end);
        let value = if bytes.get(cursor) == Some(&b'=') {
            cursor += 1;
            if !self.strict {
                cursor = self.skip_whitespace(cursor);
            }
            let value_start = cursor;
            match bytes.get(cursor) {
                Some(b'"' | b'\'') => {
                    let Some(end) = self.read_quoted(cursor) else {
                        return self.malformed(tag_start, "unterminated attribute value");
                    };
                    cursor = end;
                    unwrap_quotes(&self.input[value_start..end]).to_string()
                }
                _ if self.strict => {
                    return self.malformed(tag_start, "unquoted attribute value");
                }
                _ => {
                    cursor = self.scan_while(cursor, |c| !Self::is_tag_delimiter(c));
                    self.input[value_start..cursor].to_string()
                }
            }
        } else {
            cursor = name_end;
            "true".to_string()
        };

        if self.strict && attributes.contains_key(&name) {
            return Err(ParseError::DuplicateAttribute {
                name,
                offset: tag_start,
            });
        }
        // A repeated name in lenient mode keeps its first position, last value.
        let _ = attributes.insert(name, value);

        Ok(Some(cursor))
    }

    /// Read an unquoted attribute name at `pos`.
    pub(super) fn read_attribute_name(&self, pos: usize) -> Option<usize> {
        let end = self.scan_while(pos, |c| {
            !(Self::is_tag_delimiter(c) || matches!(c, '=' | '"' | '\'' | '<'))
        });
        (end > pos).then_some(end)
    }

    /// Read a single- or double-quoted string at `pos`, quotes included.
    ///
    /// A backslash escapes the character after it.
    pub(super) fn read_quoted(&self, pos: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let quote = *bytes.get(pos)?;
        let mut i = pos + 1;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'\\' => i += 2,
                _ if b == quote => return Some(i + 1),
                _ => i += 1,
            }
        }
        None
    }
}

/// Remove one pair of surrounding quotes, if present.
fn unwrap_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

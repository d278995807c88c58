use webr_dom::AttributesMap;

use super::segment::{CommentSegment, ElementSegment, Segment, TextSegment};
use crate::error::{ParseError, Result};
use crate::tags;

/// Pull-based scanner that turns source text into [`Segment`]s.
///
/// The only state is the cursor, a one-segment lookahead, and the most
/// recently emitted segment. The lookahead exists because finding the end of
/// a text run means reading the tag or comment after it; that segment is
/// replayed on the next call instead of being read twice.
pub struct SegmentTokenizer<'a> {
    pub(super) input: &'a str,
    pub(super) strict: bool,
    pub(super) position: usize,

    /// The segment returned by the previous call. Drives raw-text reading
    /// after an open `script`/`style`/`block` tag.
    pub(super) current: Option<Segment>,

    /// A segment read while delimiting a text run, returned next.
    pub(super) lookahead: Option<Segment>,

    /// Set once an error has been returned through the iterator.
    pub(super) failed: bool,
}

impl<'a> SegmentTokenizer<'a> {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub const fn new(input: &'a str, strict: bool) -> Self {
        Self {
            input,
            strict,
            position: 0,
            current: None,
            lookahead: None,
            failed: false,
        }
    }

    /// The text being tokenized.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Whether the strict grammar is enforced.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The most recently emitted segment.
    #[must_use]
    pub const fn current(&self) -> Option<&Segment> {
        self.current.as_ref()
    }

    /// Read the next segment, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnparsableSegment`] when nothing can be read at
    /// the cursor. In strict mode, also returns the grammar errors found in a
    /// tag ([`ParseError::MalformedTag`], [`ParseError::DuplicateAttribute`])
    /// and [`ParseError::UnclosedElement`] for a raw-text element that is
    /// never closed. The cursor does not move when an error is returned.
    pub fn next_segment(&mut self) -> Result<Option<Segment>> {
        self.position = self.skip_whitespace(self.position);
        if self.position >= self.input.len() {
            return Ok(None);
        }

        let segment = if let Some(segment) = self.lookahead.take() {
            segment
        } else if let Some((context, open_start)) = self.raw_text_context() {
            match self.read_raw_text_close(self.position, &context) {
                Some(close) => Segment::Element(close),
                None => Segment::Text(self.read_raw_text(self.position, &context, open_start)?),
            }
        } else if let Some(comment) = self.read_comment(self.position) {
            Segment::Comment(comment)
        } else if let Some(tag) = self.read_tag(self.position)? {
            Segment::Element(tag)
        } else if let Some(text) = self.read_text(self.position)? {
            Segment::Text(text)
        } else {
            return Err(ParseError::UnparsableSegment {
                offset: self.position,
            });
        };

        self.position = segment.end();
        self.current = Some(segment.clone());
        Ok(Some(segment))
    }

    /// The name and start offset of the raw-text element we are inside, if any.
    fn raw_text_context(&self) -> Option<(String, usize)> {
        self.current
            .as_ref()
            .and_then(Segment::as_element)
            .filter(|tag| tag.is_open && !tag.is_close && tags::is_raw_text(&tag.name))
            .map(|tag| (tag.name.clone(), tag.start))
    }

    // =========================================================================
    // Segment readers
    //
    // Each reader either returns a segment or leaves the cursor where it was.
    // =========================================================================

    /// Read a `<!-- ... -->` comment at `start`.
    pub(super) fn read_comment(&self, start: usize) -> Option<CommentSegment> {
        if !self.input[start..].starts_with("<!--") {
            return None;
        }
        let body_start = start + "<!--".len();
        let body_end = body_start + self.input[body_start..].find("-->")?;

        Some(CommentSegment {
            text: self.input[body_start..body_end].trim().to_string(),
            start,
            end: body_end + "-->".len(),
        })
    }

    /// Read an open, close, or self-closing tag at `start`.
    ///
    /// `Ok(None)` means there is no tag here. Once a tag name has been read,
    /// grammar violations are errors in strict mode and plain `Ok(None)` in
    /// lenient mode.
    pub(super) fn read_tag(&self, start: usize) -> Result<Option<ElementSegment>> {
        let bytes = self.input.as_bytes();
        let mut pos = start;

        if bytes.get(pos) != Some(&b'<') {
            return Ok(None);
        }
        pos += 1;

        let is_open = bytes.get(pos) != Some(&b'/');
        let mut is_close = !is_open;
        if is_close {
            pos += 1;
        }

        if !self.strict {
            pos = self.skip_whitespace(pos);
        }

        let Some(name_end) = self.read_tag_name(pos) else {
            return Ok(None);
        };
        let name = self.input[pos..name_end].to_ascii_lowercase();
        pos = self.skip_whitespace(name_end);

        let mut attributes = AttributesMap::new();
        while let Some(end) = self.read_attribute(pos, start, &mut attributes)? {
            pos = self.skip_whitespace(end);
        }

        if !is_open && !attributes.is_empty() {
            return self.malformed(start, "close tag carries attributes");
        }

        if bytes.get(pos) == Some(&b'/') {
            if self.strict && is_close {
                return self.malformed(start, "close tag marked as self-closing");
            }
            is_close = true;
            pos += 1;
        }

        if !self.strict {
            pos = self.skip_whitespace(pos);
        }

        if bytes.get(pos) != Some(&b'>') {
            return self.malformed(start, "expected '>'");
        }

        Ok(Some(ElementSegment {
            name,
            attributes,
            is_open,
            is_close,
            start,
            end: pos + 1,
        }))
    }

    /// Read text from `start` up to the next comment or tag, which is kept as
    /// the lookahead.
    ///
    /// With no markup left, lenient mode takes the rest of the input as
    /// trailing text; strict mode reads nothing.
    pub(super) fn read_text(&mut self, start: usize) -> Result<Option<TextSegment>> {
        let mut search = start;
        while let Some(found) = self.input[search..].find('<') {
            let at = search + found;
            let next = match self.read_comment(at) {
                Some(comment) => Some(Segment::Comment(comment)),
                None => self.read_tag(at)?.map(Segment::Element),
            };
            if let Some(next) = next {
                self.lookahead = Some(next);
                return Ok(Some(self.text_segment(start, at)));
            }
            search = at + 1;
        }

        if self.strict {
            return Ok(None);
        }
        Ok(Some(self.text_segment(start, self.input.len())))
    }

    /// Read the close tag for raw-text element `name` at `start`.
    ///
    /// Content of a raw-text element is not markup, so a broken tag here is
    /// simply not the close tag.
    pub(super) fn read_raw_text_close(&self, start: usize, name: &str) -> Option<ElementSegment> {
        self.read_tag(start)
            .ok()
            .flatten()
            .filter(|tag| !tag.is_open && tag.is_close && tag.name == name)
    }

    /// Read everything up to the close tag of raw-text element `name`,
    /// without tokenizing it. The close tag becomes the lookahead.
    pub(super) fn read_raw_text(
        &mut self,
        start: usize,
        name: &str,
        open_start: usize,
    ) -> Result<TextSegment> {
        let mut search = start;
        while let Some(found) = self.input[search..].find("</") {
            let at = search + found;
            if let Some(close) = self.read_raw_text_close(at, name) {
                self.lookahead = Some(Segment::Element(close));
                return Ok(self.text_segment(start, at));
            }
            search = at + 1;
        }

        if self.strict {
            return Err(ParseError::UnclosedElement {
                name: name.to_string(),
                offset: open_start,
            });
        }
        Ok(self.text_segment(start, self.input.len()))
    }

    fn text_segment(&self, start: usize, end: usize) -> TextSegment {
        TextSegment {
            text: self.input[start..end].trim().to_string(),
            start,
            end,
        }
    }
}

impl Iterator for SegmentTokenizer<'_> {
    type Item = Result<Segment>;

    /// Yields segments until end of input; after an error, yields nothing more.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_segment() {
            Ok(segment) => segment.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// Tokenize all of `input` at once.
///
/// # Errors
///
/// Returns the first error [`SegmentTokenizer::next_segment`] reports.
pub fn tokenize(input: &str, strict: bool) -> Result<Vec<Segment>> {
    SegmentTokenizer::new(input, strict).collect()
}

use core::fmt;

use webr_common::warning::warn_once;
use webr_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::error::{ParseError, Result};
use crate::options::{ParseOptions, UnmatchedClosePolicy};
use crate::tags;
use crate::tokenizer::{ElementSegment, Segment, SegmentTokenizer};

/// A recovery applied while building in lenient mode.
///
/// Strict mode fails where lenient mode records one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered from.
    pub message: String,
    /// Byte offset of the segment that triggered the recovery.
    pub offset: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.offset)
    }
}

/// What a child pass tells its caller when it stops.
#[derive(Debug)]
pub(crate) enum ChildOutcome {
    /// The element was closed, explicitly or implicitly.
    Resolved,
    /// A close tag that did not match the element; an ancestor may match it.
    UnresolvedClose(Box<ElementSegment>),
}

/// An element that takes children and has been appended to the tree.
struct OpenElement {
    id: NodeId,
    name: String,
    start: usize,
}

/// A segment once [`TreeBuilder::pull`] has placed it.
enum Pulled {
    /// An open element whose child pass has not run yet.
    Opened(OpenElement),
    /// A close tag.
    Close(Box<ElementSegment>),
    /// A finished node was appended, or a comment was dropped.
    Leaf,
}

/// Builds a [`DomTree`] by pulling segments from a [`SegmentTokenizer`].
///
/// Each open element is built by a recursive child pass. A close tag that
/// does not match the innermost element travels back up the recursion as
/// [`ChildOutcome::UnresolvedClose`] until an ancestor with that name takes it.
/// The recursion is bounded by [`ParseOptions::max_nesting`].
pub(crate) struct TreeBuilder<'a> {
    tokenizer: SegmentTokenizer<'a>,
    options: ParseOptions,

    /// `NodeId::ROOT` is the Document node; its children are the root list.
    tree: DomTree,

    issues: Vec<ParseIssue>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            tokenizer: SegmentTokenizer::new(input, options.strict),
            options,
            tree: DomTree::new(),
            issues: Vec::new(),
        }
    }

    /// Consume the whole input.
    pub(crate) fn run(mut self) -> Result<(DomTree, Vec<ParseIssue>)> {
        self.root_pass()?;
        Ok((self.tree, self.issues))
    }

    /// Record a lenient-mode recovery.
    ///
    /// Logs via webr-common's warning system and stores the issue for the
    /// built document.
    fn parse_warning(&mut self, message: String, offset: usize) {
        warn_once("HTML", &message);
        self.issues.push(ParseIssue { message, offset });
    }

    fn root_pass(&mut self) -> Result<()> {
        while let Some(pulled) = self.pull(NodeId::ROOT)? {
            match pulled {
                Pulled::Leaf => {}
                Pulled::Opened(open) => {
                    if let ChildOutcome::UnresolvedClose(close) = self.child_pass(&open, 1)? {
                        self.unmatched_close(*close)?;
                    }
                }
                Pulled::Close(close) => {
                    if self.options.strict {
                        return Err(ParseError::StrayCloseTag {
                            name: close.name,
                            offset: close.start,
                        });
                    }
                    self.unmatched_close(*close)?;
                }
            }
        }
        Ok(())
    }

    /// Build the children of `open`, which is the `depth`-th element open.
    fn child_pass(&mut self, open: &OpenElement, depth: usize) -> Result<ChildOutcome> {
        if depth > self.options.max_nesting {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_nesting,
                offset: open.start,
            });
        }

        while let Some(pulled) = self.pull(open.id)? {
            match pulled {
                Pulled::Leaf => {}
                Pulled::Opened(child) => match self.child_pass(&child, depth + 1)? {
                    ChildOutcome::Resolved => {}
                    ChildOutcome::UnresolvedClose(close) if close.name == open.name => {
                        return Ok(ChildOutcome::Resolved);
                    }
                    ChildOutcome::UnresolvedClose(close) => {
                        self.implicitly_closed(&open.name, &close);
                        return Ok(ChildOutcome::UnresolvedClose(close));
                    }
                },
                Pulled::Close(close) if tags::is_void(&close.name) => self.void_close(*close)?,
                Pulled::Close(close) if close.name == open.name => {
                    return Ok(ChildOutcome::Resolved);
                }
                Pulled::Close(close) => {
                    if self.options.strict {
                        return Err(ParseError::UnclosedElement {
                            name: open.name.clone(),
                            offset: open.start,
                        });
                    }
                    self.implicitly_closed(&open.name, &close);
                    return Ok(ChildOutcome::UnresolvedClose(close));
                }
            }
        }

        if self.options.strict {
            return Err(ParseError::UnclosedElement {
                name: open.name.clone(),
                offset: open.start,
            });
        }
        let offset = self.tokenizer.position();
        self.parse_warning(format!("<{}> closed by end of input", open.name), offset);
        Ok(ChildOutcome::Resolved)
    }

    /// Read the next segment and append whatever node it makes to `parent`.
    fn pull(&mut self, parent: NodeId) -> Result<Option<Pulled>> {
        let Some(segment) = self.tokenizer.next_segment()? else {
            return Ok(None);
        };
        let pulled = match segment {
            Segment::Element(tag) if tag.is_open => self.append_element(parent, tag),
            Segment::Element(tag) => Pulled::Close(Box::new(tag)),
            leaf => {
                self.append_leaf(parent, leaf);
                Pulled::Leaf
            }
        };
        Ok(Some(pulled))
    }

    /// Append the element for the open tag `tag` to `parent`.
    fn append_element(&mut self, parent: NodeId, tag: ElementSegment) -> Pulled {
        let ElementSegment {
            name,
            attributes,
            is_close,
            start,
            ..
        } = tag;

        let leaf = is_close || tags::is_void(&name);
        let element = ElementData {
            tag_name: name.clone(),
            attrs: attributes,
        };
        let id = self.tree.alloc(NodeType::Element(element));
        self.tree.append_child(parent, id);

        if leaf {
            Pulled::Leaf
        } else {
            Pulled::Opened(OpenElement { id, name, start })
        }
    }

    fn implicitly_closed(&mut self, name: &str, close: &ElementSegment) {
        self.parse_warning(
            format!("<{name}> implicitly closed by </{}>", close.name),
            close.start,
        );
    }

    /// A close tag that reached the root without matching anything.
    fn unmatched_close(&mut self, close: ElementSegment) -> Result<()> {
        if tags::is_void(&close.name) {
            return self.void_close(close);
        }
        match self.options.unmatched_close {
            UnmatchedClosePolicy::Discard => {
                self.parse_warning(
                    format!("discarded unmatched </{}>", close.name),
                    close.start,
                );
                Ok(())
            }
            UnmatchedClosePolicy::Fail => Err(ParseError::StrayCloseTag {
                name: close.name,
                offset: close.start,
            }),
        }
    }

    /// Void elements are never open, so their close tags close nothing.
    fn void_close(&mut self, close: ElementSegment) -> Result<()> {
        if self.options.strict {
            return Err(ParseError::StrayCloseTag {
                name: close.name,
                offset: close.start,
            });
        }
        self.parse_warning(
            format!("ignored close tag for void element </{}>", close.name),
            close.start,
        );
        Ok(())
    }

    /// Append a text or comment node to `parent`.
    ///
    /// A parent never holds two adjacent text nodes: text that follows a
    /// dropped comment or an ignored close tag joins the text before it,
    /// separated by a space.
    fn append_leaf(&mut self, parent: NodeId, segment: Segment) {
        let node = match segment {
            Segment::Text(text) => {
                let last = self.tree.last_child(parent);
                if let Some(previous) = last.and_then(|id| self.tree.as_text_mut(id)) {
                    previous.push(' ');
                    previous.push_str(&text.text);
                    return;
                }
                NodeType::Text(text.text)
            }
            Segment::Comment(comment) if self.options.include_comments => {
                NodeType::Comment(comment.text)
            }
            Segment::Comment(_) | Segment::Element(_) => return,
        };
        let id = self.tree.alloc(node);
        self.tree.append_child(parent, id);
    }
}

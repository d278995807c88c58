use core::fmt;

use webr_dom::{DomTree, NodeId};

use super::core::{ParseIssue, TreeBuilder};
use crate::error::Result;
use crate::options::{ParseOptions, WriteOptions};
use crate::serializer;
use crate::tags;

/// A parsed document.
///
/// Built once from source text and never mutated afterwards; re-parse to
/// change it. The root-level nodes are the children of the tree's Document
/// node.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    options: ParseOptions,
    issues: Vec<ParseIssue>,

    doctype: Option<NodeId>,
    html: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
}

impl Document {
    /// Parse `input` with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnparsableSegment`](crate::ParseError::UnparsableSegment)
    /// in either mode, and [`ParseError::NestingTooDeep`](crate::ParseError::NestingTooDeep)
    /// when elements nest deeper than
    /// [`ParseOptions::max_nesting`](crate::ParseOptions::max_nesting). In strict mode, returns the first grammar or structural
    /// violation. In lenient mode, returns
    /// [`ParseError::StrayCloseTag`](crate::ParseError::StrayCloseTag) only when
    /// [`UnmatchedClosePolicy::Fail`](crate::UnmatchedClosePolicy::Fail) is set.
    pub fn parse(input: &str, options: ParseOptions) -> Result<Self> {
        let (tree, issues) = TreeBuilder::new(input, options).run()?;

        let mut document = Self {
            tree,
            options,
            issues,
            doctype: None,
            html: None,
            head: None,
            body: None,
        };
        document.link();
        Ok(document)
    }

    /// Parse `input` in lenient mode with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn parse_lenient(input: &str) -> Result<Self> {
        Self::parse(input, ParseOptions::lenient())
    }

    /// Cache the doctype, `html`, `head` and `body` elements.
    ///
    /// Strict mode only accepts them where a well-formed document puts them:
    /// the doctype first, `html` first or right after the doctype, and inside
    /// `html` the `head` first and `body` first or second.
    fn link(&mut self) {
        let strict = self.options.strict;
        self.doctype = find_linked(&self.tree, NodeId::ROOT, tags::DOCTYPE, 0, strict);
        self.html = find_linked(&self.tree, NodeId::ROOT, "html", 1, strict);

        if let Some(html) = self.html {
            self.head = find_linked(&self.tree, html, "head", 0, strict);
            self.body = find_linked(&self.tree, html, "body", 1, strict);
        }
    }

    /// The node arena.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The root-level nodes, in source order.
    #[must_use]
    pub fn root_nodes(&self) -> &[NodeId] {
        self.tree.children(NodeId::ROOT)
    }

    /// The `<!DOCTYPE>` element, if linked.
    #[must_use]
    pub const fn doctype(&self) -> Option<NodeId> {
        self.doctype
    }

    /// The `html` element, if linked.
    #[must_use]
    pub const fn html(&self) -> Option<NodeId> {
        self.html
    }

    /// The `head` element, if linked.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// The `body` element, if linked.
    #[must_use]
    pub const fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Recoveries applied while parsing. Always empty in strict mode.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The options the document was parsed with.
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Write the document back to markup.
    #[must_use]
    pub fn write(&self, options: &WriteOptions) -> String {
        serializer::write_nodes(&self.tree, self.root_nodes(), options)
    }
}

/// Compact markup, as written by [`WriteOptions::compact`].
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write(&WriteOptions::compact()))
    }
}

/// The first child of `parent` named `name`. Strict mode only looks at the
/// first `last_index + 1` children.
fn find_linked(
    tree: &DomTree,
    parent: NodeId,
    name: &str,
    last_index: usize,
    strict: bool,
) -> Option<NodeId> {
    tree.children(parent)
        .iter()
        .enumerate()
        .take_while(|&(index, _)| !strict || index <= last_index)
        .map(|(_, &id)| id)
        .find(|&id| tree.tag_name(id) == Some(name))
}

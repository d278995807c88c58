//! Writing a tree back to markup.
//!
//! Text and attribute values are written verbatim; nothing is escaped.

use webr_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::options::WriteOptions;
use crate::tags;

/// Write `nodes` and their descendants as siblings at depth zero.
///
/// A Document node is written as its children.
#[must_use]
pub fn write_nodes(tree: &DomTree, nodes: &[NodeId], options: &WriteOptions) -> String {
    let mut writer = Writer {
        tree,
        options,
        out: String::new(),
        first: true,
    };
    writer.write_list(nodes, 0);
    writer.out
}

/// Compact markup for `id` and its descendants.
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    write_nodes(tree, &[id], &WriteOptions::compact())
}

/// Compact markup for the children of `id`.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    write_nodes(tree, tree.children(id), &WriteOptions::compact())
}

struct Writer<'a> {
    tree: &'a DomTree,
    options: &'a WriteOptions,
    out: String,
    /// No line break goes before the first node written.
    first: bool,
}

impl Writer<'_> {
    fn write_list(&mut self, nodes: &[NodeId], depth: usize) {
        let tree = self.tree;
        for &id in nodes {
            let Some(node) = tree.get(id) else {
                continue;
            };

            if matches!(node.node_type, NodeType::Document) {
                self.write_list(&node.children, depth);
                continue;
            }

            self.start_line(depth);
            match &node.node_type {
                NodeType::Element(element) => self.write_element(element, &node.children, depth),
                NodeType::Text(text) => self.out.push_str(text),
                NodeType::Comment(comment) => {
                    self.out.push_str("<!-- ");
                    self.out.push_str(comment);
                    self.out.push_str(" -->");
                }
                NodeType::Document => {}
            }
        }
    }

    fn start_line(&mut self, depth: usize) {
        if !self.options.pretty {
            return;
        }
        if self.first {
            self.first = false;
        } else {
            self.out.push_str(self.options.line_ending.as_ref());
        }
        self.out.push_str(&self.options.indent(depth));
    }

    fn write_element(&mut self, element: &ElementData, children: &[NodeId], depth: usize) {
        let name = element.tag_name.as_str();
        let void = tags::is_void(name);
        let self_closing = !tags::is_never_self_closing(name)
            && (void || (self.options.self_closing && children.is_empty()));

        self.write_open_tag(element);
        if self_closing {
            if !void {
                if !element.attrs.is_empty() {
                    self.out.push(' ');
                }
                self.out.push('/');
            }
            self.out.push('>');
            return;
        }
        self.out.push('>');

        match children {
            [] => {}
            [only] if self.is_shrinkable(*only) => {
                if let Some(text) = self.tree.as_text(*only) {
                    self.out.push_str(text);
                }
            }
            _ => {
                self.write_list(children, depth + 1);
                if self.options.pretty {
                    self.out.push_str(self.options.line_ending.as_ref());
                    self.out.push_str(&self.options.indent(depth));
                }
            }
        }

        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    /// Everything up to, not including, the closing `>` or `/>`.
    fn write_open_tag(&mut self, element: &ElementData) {
        let doctype = element.tag_name == tags::DOCTYPE;

        self.out.push('<');
        if doctype {
            self.out.push_str(&element.tag_name.to_ascii_uppercase());
        } else {
            self.out.push_str(&element.tag_name);
        }

        for (key, value) in &element.attrs {
            self.out.push(' ');
            self.write_attribute_name(key);
            if !(doctype && value == "true") {
                self.out.push_str("=\"");
                self.out.push_str(value);
                self.out.push('"');
            }
        }
    }

    /// Names that would not read back as a bare name are quoted, like the
    /// public identifier in `<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">`.
    fn write_attribute_name(&mut self, name: &str) {
        let bare = !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '>' | '<' | '=' | '"' | '\''));
        if bare {
            self.out.push_str(name);
            return;
        }
        let quote = if name.contains('"') { '\'' } else { '"' };
        self.out.push(quote);
        self.out.push_str(name);
        self.out.push(quote);
    }

    /// A sole text child short enough to stay on the element's line.
    fn is_shrinkable(&self, child: NodeId) -> bool {
        self.options.shrink_text
            && self
                .tree
                .as_text(child)
                .is_some_and(|text| text.chars().count() <= self.options.shrink_limit)
    }
}

//! Random well-formed documents for property tests.

use quickcheck::{Arbitrary, Gen};
use webr_dom::{DomTree, NodeId, NodeType};

const TAGS: [&str; 8] = ["div", "p", "span", "ul", "li", "section", "a", "em"];
const ATTRS: [&str; 4] = ["id", "class", "title", "data-x"];
const WORDS: [&str; 6] = ["alpha", "beta", "gamma", "x1", "hello", "a-b"];

/// A piece of markup that renders to one or more discrete segments.
#[derive(Debug, Clone)]
pub enum Piece {
    /// `<name attrs>children</name>`, or `<name attrs />` when `self_closing`.
    Element {
        name: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Piece>,
        self_closing: bool,
    },
    /// A run of words with no surrounding whitespace.
    Text(String),
    /// `<!--text-->`
    Comment(String),
}

/// Root-level pieces of a generated document.
#[derive(Debug, Clone)]
pub struct Markup(pub Vec<Piece>);

fn words(g: &mut Gen) -> String {
    let count = 1 + usize::arbitrary(g) % 3;
    (0..count)
        .map(|_| *g.choose(&WORDS).unwrap_or(&"w"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pieces(g: &mut Gen, depth: usize) -> Vec<Piece> {
    let count = usize::arbitrary(g) % 4;
    let mut out: Vec<Piece> = Vec::with_capacity(count);
    for _ in 0..count {
        let piece = match usize::arbitrary(g) % 5 {
            0 | 1 => element(g, depth),
            2 | 3 => Piece::Text(words(g)),
            _ => Piece::Comment(words(g)),
        };
        // Adjacent text runs would read back as one segment.
        if matches!(piece, Piece::Text(_)) && matches!(out.last(), Some(Piece::Text(_))) {
            continue;
        }
        out.push(piece);
    }
    out
}

fn element(g: &mut Gen, depth: usize) -> Piece {
    let name = *g.choose(&TAGS).unwrap_or(&"div");
    let mut attrs = Vec::new();
    for attr in ATTRS {
        if bool::arbitrary(g) {
            attrs.push((attr, words(g)));
        }
    }
    let children = if depth < 4 { pieces(g, depth + 1) } else { Vec::new() };
    let self_closing = children.is_empty() && bool::arbitrary(g);
    Piece::Element {
        name,
        attrs,
        children,
        self_closing,
    }
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(pieces(g, 0))
    }
}

impl Markup {
    /// The source text and the exact text of every segment it contains.
    pub fn render(&self) -> (String, Vec<String>) {
        let mut segments = Vec::new();
        for piece in &self.0 {
            piece.render(&mut segments);
        }
        (segments.concat(), segments)
    }
}

impl Piece {
    fn render(&self, segments: &mut Vec<String>) {
        match self {
            Self::Element {
                name,
                attrs,
                children,
                self_closing,
            } => {
                let mut open = format!("<{name}");
                for (key, value) in attrs {
                    open.push_str(&format!(" {key}=\"{value}\""));
                }
                if *self_closing {
                    open.push_str(" />");
                    segments.push(open);
                    return;
                }
                open.push('>');
                segments.push(open);
                for child in children {
                    child.render(segments);
                }
                segments.push(format!("</{name}>"));
            }
            Self::Text(text) => segments.push(text.clone()),
            Self::Comment(text) => segments.push(format!("<!--{text}-->")),
        }
    }
}

/// A comparable description of a subtree: kind, name, attributes, children.
#[derive(Debug, PartialEq, Eq)]
pub enum Shape {
    Element(String, Vec<(String, String)>, Vec<Shape>),
    Text(String),
    Comment(String),
}

/// The shapes of the root-level nodes of `tree`.
pub fn shape(tree: &DomTree) -> Vec<Shape> {
    shapes(tree, tree.children(NodeId::ROOT))
}

fn shapes(tree: &DomTree, ids: &[NodeId]) -> Vec<Shape> {
    ids.iter()
        .filter_map(|&id| {
            let node = tree.get(id)?;
            Some(match &node.node_type {
                NodeType::Element(data) => Shape::Element(
                    data.tag_name.clone(),
                    data.attrs
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                    shapes(tree, &node.children),
                ),
                NodeType::Text(text) => Shape::Text(text.clone()),
                NodeType::Comment(text) => Shape::Comment(text.clone()),
                NodeType::Document => return None,
            })
        })
        .collect()
}

//! Depth-first searches over the tree.
//!
//! Every query is a predicate specialization of [`DomTree::search`], which
//! visits nodes in document (pre-order) order and stops as soon as either
//! limit is reached.

use std::ops::ControlFlow;

use crate::{DomTree, ElementData, Node, NodeId, NodeType};

/// Bounds for [`DomTree::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// How many generations below the starting node to visit.
    /// `Some(0)` checks the starting node only; `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Stop once this many matches have been collected. `None` is unbounded.
    pub max_results: Option<usize>,
}

impl SearchLimits {
    /// No depth or result limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_results: None,
        }
    }

    /// Limit how many generations below the starting node are visited.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Limit the number of matches returned.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl DomTree {
    /// Collect every node at or below `from` for which `predicate` holds.
    ///
    /// The starting node is tested too. Results come back in document order.
    #[must_use]
    pub fn search<F>(&self, from: NodeId, limits: SearchLimits, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        let mut results = Vec::new();
        if limits.max_results == Some(0) {
            return results;
        }
        let _ = self.search_from(from, limits.max_depth, limits, &mut predicate, &mut results);
        results
    }

    fn search_from<F>(
        &self,
        id: NodeId,
        depth_remaining: Option<usize>,
        limits: SearchLimits,
        predicate: &mut F,
        results: &mut Vec<NodeId>,
    ) -> ControlFlow<()>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        let Some(node) = self.get(id) else {
            return ControlFlow::Continue(());
        };

        if predicate(id, node) {
            results.push(id);
            if limits.max_results.is_some_and(|max| results.len() >= max) {
                return ControlFlow::Break(());
            }
        }

        let child_depth = match depth_remaining {
            None => None,
            Some(0) => return ControlFlow::Continue(()),
            Some(n) => Some(n - 1),
        };

        for &child in &node.children {
            self.search_from(child, child_depth, limits, predicate, results)?;
        }
        ControlFlow::Continue(())
    }

    /// The first element at or below `from` whose `id` attribute equals `id`.
    #[must_use]
    pub fn element_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        self.search(from, SearchLimits::unbounded().with_max_results(1), |_, node| {
            element(node).is_some_and(|e| e.id() == Some(id))
        })
        .first()
        .copied()
    }

    /// All elements whose `id` attribute equals `id`.
    /// A well-formed document has at most one.
    #[must_use]
    pub fn elements_by_id(&self, from: NodeId, id: &str) -> Vec<NodeId> {
        self.elements_by_attribute(from, "id", Some(id))
    }

    /// All elements carrying `attribute`, optionally restricted to those
    /// whose value equals `value`.
    #[must_use]
    pub fn elements_by_attribute(
        &self,
        from: NodeId,
        attribute: &str,
        value: Option<&str>,
    ) -> Vec<NodeId> {
        self.search(from, SearchLimits::unbounded(), |_, node| {
            element(node)
                .and_then(|e| e.attribute(attribute))
                .is_some_and(|found| value.is_none_or(|wanted| found == wanted))
        })
    }

    /// All elements whose class list contains `class_name` as a whole token.
    #[must_use]
    pub fn elements_by_class_name(&self, from: NodeId, class_name: &str) -> Vec<NodeId> {
        self.search(from, SearchLimits::unbounded(), |_, node| {
            element(node).is_some_and(|e| e.has_class(class_name))
        })
    }

    /// All elements whose `name` attribute equals `name`.
    #[must_use]
    pub fn elements_by_name(&self, from: NodeId, name: &str) -> Vec<NodeId> {
        self.elements_by_attribute(from, "name", Some(name))
    }

    /// All elements with the given tag name (compared case-insensitively).
    #[must_use]
    pub fn elements_by_tag_name(&self, from: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.search(from, SearchLimits::unbounded(), |_, node| {
            element(node).is_some_and(|e| e.tag_name.eq_ignore_ascii_case(tag_name))
        })
    }

    /// The content of every text node at or below `from`, depth first.
    #[must_use]
    pub fn text(&self, from: NodeId, limits: SearchLimits) -> Vec<&str> {
        self.search(from, limits, |_, node| matches!(node.node_type, NodeType::Text(_)))
            .into_iter()
            .filter_map(|id| self.as_text(id))
            .collect()
    }
}

fn element(node: &Node) -> Option<&ElementData> {
    match &node.node_type {
        NodeType::Element(data) => Some(data),
        _ => None,
    }
}

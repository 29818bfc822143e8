//! Parse tree produced by a successful match.
//!
//! The tree mirrors the tagged nodes of the grammar: every leaf match and
//! every tagged composite becomes a [`ParseNode`]; untagged composites are
//! spliced into their parent. Consumers walk the tree by [`ElementId`] to
//! reconstruct statement semantics, never by raw text.

use crate::lang::ElementId;

/// One node of the parse tree.
///
/// Spans are byte offsets into the parsed input, so `&input[start..end]`
/// recovers exactly the text a node consumed, interior trivia included.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub element_id: Option<ElementId>,
    pub start: usize,
    pub end: usize,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub(crate) fn leaf(element_id: Option<ElementId>, start: usize, end: usize) -> ParseNode {
        ParseNode {
            element_id,
            start,
            end,
            children: Vec::new(),
        }
    }

    /// `at` anchors the span when the node consumed nothing.
    pub(crate) fn branch(
        element_id: Option<ElementId>,
        at: usize,
        children: Vec<ParseNode>,
    ) -> ParseNode {
        let start = children.first().map(|c| c.start).unwrap_or(at);
        let end = children.last().map(|c| c.end).unwrap_or(start);
        ParseNode {
            element_id,
            start,
            end,
            children,
        }
    }

    /// The exact input text this node consumed.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First direct child carrying `id`.
    pub fn child(&self, id: ElementId) -> Option<&ParseNode> {
        self.children.iter().find(|c| c.element_id == Some(id))
    }

    /// Depth-first search for the first node carrying `id`, including self.
    pub fn find(&self, id: ElementId) -> Option<&ParseNode> {
        if self.element_id == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Depth-first collection of every node carrying `id`.
    pub fn find_all(&self, id: ElementId) -> Vec<&ParseNode> {
        let mut out = Vec::new();
        self.collect(id, &mut out);
        out
    }

    fn collect<'a>(&'a self, id: ElementId, out: &mut Vec<&'a ParseNode>) {
        if self.element_id == Some(id) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(id, out);
        }
    }
}

/// A complete, successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub root: ParseNode,
}

impl ParseTree {
    /// The statement node the query executor dispatches on, if the input
    /// held one (a bare `timeit` or a lone comment parses without one).
    pub fn statement(&self) -> Option<&ParseNode> {
        self.root.children.iter().find(|c| {
            !matches!(
                c.element_id,
                Some(ElementId::TimeitStmt) | Some(ElementId::RComment)
            )
        })
    }

    pub fn find(&self, id: ElementId) -> Option<&ParseNode> {
        self.root.find(id)
    }

    pub fn find_all(&self, id: ElementId) -> Vec<&ParseNode> {
        self.root.find_all(id)
    }
}

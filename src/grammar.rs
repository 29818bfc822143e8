//! Grammar node model for the SiriQL combinator engine.
//!
//! A [`Grammar`] is an immutable arena of [`GrammarNode`]s addressed by
//! [`NodeId`]. It is built once through a [`GrammarBuilder`] and afterwards
//! shared freely between concurrent parses; nothing in the arena is mutated
//! by matching. Recursive rules never hold structural self-pointers: forward
//! references go through [`GrammarBuilder::placeholder`] and [`This`] nodes
//! inside a [`Priority`] are resolved positionally by the matcher.
//!
//! [`This`]: GrammarNode::This
//! [`Priority`]: GrammarNode::Priority

use crate::lang::ElementId;
use regex::Regex;

/// Stable index of a node inside a [`Grammar`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    const UNRESOLVED: NodeId = NodeId(u32::MAX);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Anchored lexical patterns recognized by the scanner.
///
/// Each kind compiles to one anchored regular expression, applied at the
/// current cursor offset only. The quoted-string kinds accept one or more
/// adjacent quoted segments as a single literal (`'foo''bar'` is one token);
/// downstream consumers rely on this for round-trip compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Optionally signed float, e.g. `-1.5` or `42`
    Float,
    /// Optionally signed integer
    Integer,
    /// Unsigned integer
    UInteger,
    /// Integer with a time unit suffix, e.g. `12h`, `3w`
    TimeStr,
    /// One or more adjacent single-quoted segments
    SingleQuoteStr,
    /// One or more adjacent double-quoted segments
    DoubleQuoteStr,
    /// One or more adjacent backtick-quoted segments
    GraveStr,
    /// Lowercase hexadecimal UUID
    UuidStr,
    /// `/.../'-style regular expression, optional `i` flag
    RegexStr,
    /// `#` line comment
    Comment,
}

impl PatternKind {
    pub(crate) const ALL: [PatternKind; 10] = [
        PatternKind::Float,
        PatternKind::Integer,
        PatternKind::UInteger,
        PatternKind::TimeStr,
        PatternKind::SingleQuoteStr,
        PatternKind::DoubleQuoteStr,
        PatternKind::GraveStr,
        PatternKind::UuidStr,
        PatternKind::RegexStr,
        PatternKind::Comment,
    ];

    fn source(self) -> &'static str {
        match self {
            PatternKind::Float => r"^[-+]?[0-9]*\.?[0-9]+",
            PatternKind::Integer => r"^[-+]?[0-9]+",
            PatternKind::UInteger => r"^[0-9]+",
            PatternKind::TimeStr => r"^[0-9]+[smhdw]",
            PatternKind::SingleQuoteStr => r"^(?:'(?:[^']*)')+",
            PatternKind::DoubleQuoteStr => r#"^(?:"(?:[^"]*)")+"#,
            PatternKind::GraveStr => r"^(?:`(?:[^`]*)`)+",
            PatternKind::UuidStr => {
                r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
            }
            PatternKind::RegexStr => r"^(/[^/\\]*(?:\\.[^/\\]*)*/i?)",
            PatternKind::Comment => r"^#.*",
        }
    }

    /// Index into [`PatternSet`]; must agree with the order of `ALL`.
    fn index(self) -> usize {
        match self {
            PatternKind::Float => 0,
            PatternKind::Integer => 1,
            PatternKind::UInteger => 2,
            PatternKind::TimeStr => 3,
            PatternKind::SingleQuoteStr => 4,
            PatternKind::DoubleQuoteStr => 5,
            PatternKind::GraveStr => 6,
            PatternKind::UuidStr => 7,
            PatternKind::RegexStr => 8,
            PatternKind::Comment => 9,
        }
    }

    /// Human-readable description used in syntax errors.
    pub fn description(self) -> &'static str {
        match self {
            PatternKind::Float => "<float>",
            PatternKind::Integer => "<integer>",
            PatternKind::UInteger => "<unsigned integer>",
            PatternKind::TimeStr => "<time-string>",
            PatternKind::SingleQuoteStr => "<single-quoted string>",
            PatternKind::DoubleQuoteStr => "<double-quoted string>",
            PatternKind::GraveStr => "<grave-quoted name>",
            PatternKind::UuidStr => "<uuid>",
            PatternKind::RegexStr => "<regular expression>",
            PatternKind::Comment => "<comment>",
        }
    }
}

/// One typed node of the grammar graph.
#[derive(Debug, Clone)]
pub enum GrammarNode {
    /// Exact literal text, e.g. an operator or a parenthesis.
    Token(String),
    /// A set of literal alternatives, tried longest first.
    Tokens(Vec<String>),
    /// Whole-identifier-run keyword; `ci` selects case-insensitive matching.
    Keyword { text: String, ci: bool },
    /// Anchored lexical pattern.
    Pattern(PatternKind),
    /// All children must match consecutively.
    Sequence(Vec<NodeId>),
    /// Ordered alternatives. Non-greedy returns the first match; greedy
    /// evaluates every alternative and keeps the longest, ties broken by
    /// declaration order.
    Choice { alternatives: Vec<NodeId>, greedy: bool },
    /// Left-associative expression rule: `base` alternatives seed a left
    /// operand, `rec` templates (sequences led by [`This`]) extend it.
    ///
    /// [`This`]: GrammarNode::This
    Priority { base: Vec<NodeId>, rec: Vec<NodeId> },
    /// Self-reference placeholder inside a [`Priority`].
    ///
    /// [`Priority`]: GrammarNode::Priority
    This,
    /// `element (separator element)*`, with `min`/`max` bounding the
    /// element count (`max == 0` means unbounded).
    List {
        element: NodeId,
        separator: NodeId,
        min: usize,
        max: usize,
    },
    /// Like [`List`] without a separator.
    ///
    /// [`List`]: GrammarNode::List
    Repeat { element: NodeId, min: usize, max: usize },
    /// Zero or one occurrence; never fails.
    Optional(NodeId),
    /// Attaches an element identifier to the inner node's match.
    Tag { id: ElementId, node: NodeId },
    /// Indirection created by [`GrammarBuilder::placeholder`] and resolved
    /// by [`GrammarBuilder::patch`].
    Ref(NodeId),
}

/// Compiled anchored regexes, one per [`PatternKind`].
pub(crate) struct PatternSet {
    regexes: Vec<Regex>,
}

impl PatternSet {
    fn compile() -> Result<PatternSet, regex::Error> {
        let mut regexes = Vec::with_capacity(PatternKind::ALL.len());
        for kind in PatternKind::ALL {
            regexes.push(Regex::new(kind.source())?);
        }
        Ok(PatternSet { regexes })
    }

    pub(crate) fn get(&self, kind: PatternKind) -> &Regex {
        &self.regexes[kind.index()]
    }
}

/// Errors raised while finishing a grammar.
#[derive(Debug)]
pub enum GrammarError {
    /// The keyword alphabet is not a valid regular expression.
    Alphabet(regex::Error),
    /// A placeholder node was never patched.
    UnresolvedRef(NodeId),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Alphabet(e) => write!(f, "Invalid keyword alphabet: {}", e),
            GrammarError::UnresolvedRef(id) => {
                write!(f, "Unresolved forward reference at node {}", id.0)
            }
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::Alphabet(e) => Some(e),
            GrammarError::UnresolvedRef(_) => None,
        }
    }
}

/// An immutable, compiled grammar.
///
/// Safe to share across threads; every parse owns its own cursor and output
/// tree, so no locking is needed.
pub struct Grammar {
    nodes: Vec<GrammarNode>,
    start: NodeId,
    pub(crate) patterns: PatternSet,
    pub(crate) keyword: Regex,
}

impl Grammar {
    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn node(&self, id: NodeId) -> &GrammarNode {
        &self.nodes[id.index()]
    }
}

/// Bottom-up builder for a [`Grammar`].
///
/// Every constructor takes an optional [`ElementId`] first, mirroring how
/// the grammar export assigns element identifiers; passing `None` creates a
/// transparent node.
pub struct GrammarBuilder {
    nodes: Vec<GrammarNode>,
    this: Option<NodeId>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        GrammarBuilder {
            nodes: Vec::new(),
            this: None,
        }
    }

    fn push(&mut self, node: GrammarNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn insert(&mut self, id: impl Into<Option<ElementId>>, node: GrammarNode) -> NodeId {
        let inner = self.push(node);
        match id.into() {
            Some(id) => self.push(GrammarNode::Tag { id, node: inner }),
            None => inner,
        }
    }

    pub fn token(&mut self, id: impl Into<Option<ElementId>>, text: &str) -> NodeId {
        self.insert(id, GrammarNode::Token(text.to_string()))
    }

    /// A set of token alternatives given as one space-separated string,
    /// e.g. `"+ - * % /"`. Longer tokens win over shorter prefixes.
    pub fn tokens(&mut self, id: impl Into<Option<ElementId>>, texts: &str) -> NodeId {
        let mut texts: Vec<String> = texts.split_whitespace().map(str::to_string).collect();
        texts.sort_by_key(|t| std::cmp::Reverse(t.len()));
        self.insert(id, GrammarNode::Tokens(texts))
    }

    pub fn keyword(&mut self, id: impl Into<Option<ElementId>>, text: &str) -> NodeId {
        self.insert(
            id,
            GrammarNode::Keyword {
                text: text.to_string(),
                ci: false,
            },
        )
    }

    pub fn keyword_ci(&mut self, id: impl Into<Option<ElementId>>, text: &str) -> NodeId {
        self.insert(
            id,
            GrammarNode::Keyword {
                text: text.to_string(),
                ci: true,
            },
        )
    }

    pub fn pattern(&mut self, id: impl Into<Option<ElementId>>, kind: PatternKind) -> NodeId {
        self.insert(id, GrammarNode::Pattern(kind))
    }

    pub fn sequence(&mut self, id: impl Into<Option<ElementId>>, children: Vec<NodeId>) -> NodeId {
        self.insert(id, GrammarNode::Sequence(children))
    }

    pub fn choice(
        &mut self,
        id: impl Into<Option<ElementId>>,
        greedy: bool,
        alternatives: Vec<NodeId>,
    ) -> NodeId {
        self.insert(id, GrammarNode::Choice { alternatives, greedy })
    }

    /// A left-associative expression rule. `base` alternatives are tried in
    /// order to seed the left operand; `rec` templates must be sequences
    /// whose first child is [`this`](GrammarBuilder::this).
    pub fn prio(
        &mut self,
        id: impl Into<Option<ElementId>>,
        base: Vec<NodeId>,
        rec: Vec<NodeId>,
    ) -> NodeId {
        self.insert(id, GrammarNode::Priority { base, rec })
    }

    /// The shared self-reference node used inside priority rules.
    pub fn this(&mut self) -> NodeId {
        match self.this {
            Some(id) => id,
            None => {
                let id = self.push(GrammarNode::This);
                self.this = Some(id);
                id
            }
        }
    }

    pub fn list(
        &mut self,
        id: impl Into<Option<ElementId>>,
        element: NodeId,
        separator: NodeId,
        min: usize,
        max: usize,
    ) -> NodeId {
        self.insert(
            id,
            GrammarNode::List {
                element,
                separator,
                min,
                max,
            },
        )
    }

    pub fn repeat(
        &mut self,
        id: impl Into<Option<ElementId>>,
        element: NodeId,
        min: usize,
        max: usize,
    ) -> NodeId {
        self.insert(id, GrammarNode::Repeat { element, min, max })
    }

    pub fn optional(&mut self, id: impl Into<Option<ElementId>>, element: NodeId) -> NodeId {
        self.insert(id, GrammarNode::Optional(element))
    }

    /// Reserves a slot for a rule that is referenced before it can be
    /// defined. The slot must be [`patch`](GrammarBuilder::patch)ed before
    /// [`finish`](GrammarBuilder::finish) is called.
    pub fn placeholder(&mut self) -> NodeId {
        self.push(GrammarNode::Ref(NodeId::UNRESOLVED))
    }

    /// Points a placeholder at its final definition.
    pub fn patch(&mut self, slot: NodeId, target: NodeId) {
        self.nodes[slot.index()] = GrammarNode::Ref(target);
    }

    /// Compiles the lexical patterns and freezes the arena.
    ///
    /// `keyword_alphabet` is the identifier-class regex used for keyword
    /// disambiguation (SiriQL uses `[a-z_]+`); it is a grammar parameter so
    /// the engine can serve other keyword sets.
    pub fn finish(self, start: NodeId, keyword_alphabet: &str) -> Result<Grammar, GrammarError> {
        for (index, node) in self.nodes.iter().enumerate() {
            if let GrammarNode::Ref(target) = node {
                if *target == NodeId::UNRESOLVED {
                    return Err(GrammarError::UnresolvedRef(NodeId(index as u32)));
                }
            }
        }
        let keyword = Regex::new(&format!("^(?:{})", keyword_alphabet))
            .map_err(GrammarError::Alphabet)?;
        Ok(Grammar {
            nodes: self.nodes,
            start,
            patterns: PatternSet::compile().map_err(GrammarError::Alphabet)?,
            keyword,
        })
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        GrammarBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_set_indexing_matches_every_kind() {
        let set = PatternSet::compile().unwrap();
        for kind in PatternKind::ALL {
            assert_eq!(set.get(kind).as_str(), kind.source());
        }
    }
}

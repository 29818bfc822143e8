//! Combinator evaluator.
//!
//! The matcher walks the grammar arena against a scan cursor, backtracking
//! on failure. Alternatives are tried at independent entry positions, a
//! failed sequence restores its entry cursor, and every failed leaf attempt
//! records its position so the overall error surfaces the furthest point
//! reached by any alternative together with everything that was expected
//! there (the usual PEG convention).
//!
//! Priority rules are evaluated by seed extension: the base alternatives
//! produce a left operand, then the rec templates are retried from the
//! first after every successful extension until none applies. This yields
//! left-associative chains without true left recursion; recursion depth is
//! bounded by parenthesis nesting, not input length.

use crate::grammar::{Grammar, GrammarNode, NodeId, PatternKind};
use crate::scanner::Scanner;
use crate::tree::{ParseNode, ParseTree};

/// Errors produced by [`Grammar::parse`].
///
/// All positions are byte offsets into the input. No error is fatal to the
/// process; a failed parse simply returns no tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The input deviates from the grammar at `position`; `expected` holds
    /// the union of descriptions recorded at the furthest position reached.
    UnexpectedToken {
        position: usize,
        expected: Vec<String>,
    },
    /// A quoted string or regex literal is never closed.
    UnterminatedLiteral { position: usize },
    /// A valid statement is followed by unconsumed non-trivia content.
    TrailingInput { position: usize },
    /// Neither a statement nor a trailing comment was found.
    EmptyInput,
}

impl SyntaxError {
    /// Byte offset the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::UnterminatedLiteral { position }
            | SyntaxError::TrailingInput { position } => Some(*position),
            SyntaxError::EmptyInput => None,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::UnexpectedToken { position, expected } => {
                write!(
                    f,
                    "Syntax error at position {}, expecting: {}",
                    position,
                    join_expected(expected)
                )
            }
            SyntaxError::UnterminatedLiteral { position } => {
                write!(f, "Unterminated literal at position {}", position)
            }
            SyntaxError::TrailingInput { position } => {
                write!(f, "Unexpected trailing input at position {}", position)
            }
            SyntaxError::EmptyInput => write!(f, "Query contains no statement"),
        }
    }
}

impl std::error::Error for SyntaxError {}

fn join_expected(expected: &[String]) -> String {
    match expected.len() {
        0 => "end of statement".to_string(),
        1 => expected[0].clone(),
        n => format!("{} or {}", expected[..n - 1].join(", "), expected[n - 1]),
    }
}

/// How a `This` node resolves against the innermost enclosing priority.
#[derive(Clone, Copy)]
enum ThisMode {
    /// Inside a base alternative: recurse into the whole priority.
    Recurse,
    /// Inside a rec template: match a single base-level operand.
    Operand,
}

type Match = Option<(usize, Vec<ParseNode>)>;

struct Matcher<'a> {
    grammar: &'a Grammar,
    scanner: Scanner<'a>,
    furthest: usize,
    expected: Vec<String>,
    prio: Vec<(NodeId, ThisMode)>,
}

impl<'a> Matcher<'a> {
    fn new(grammar: &'a Grammar, input: &'a str) -> Self {
        Matcher {
            grammar,
            scanner: Scanner::new(input, grammar),
            furthest: 0,
            expected: Vec::new(),
            prio: Vec::new(),
        }
    }

    fn fail(&mut self, pos: usize, expected: String) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest && !self.expected.contains(&expected) {
            self.expected.push(expected);
        }
    }

    /// Collapses a multi-node result into one grouping node; single nodes
    /// pass through untouched.
    fn group(at: usize, mut nodes: Vec<ParseNode>) -> ParseNode {
        if nodes.len() == 1 {
            nodes.remove(0)
        } else {
            ParseNode::branch(None, at, nodes)
        }
    }

    fn match_node(&mut self, id: NodeId, pos: usize) -> Match {
        let grammar = self.grammar;
        match grammar.node(id) {
            GrammarNode::Token(text) => {
                let at = self.scanner.skip_trivia(pos);
                match self.scanner.token(at, text) {
                    Some(end) => Some((end, vec![ParseNode::leaf(None, at, end)])),
                    None => {
                        self.fail(at, format!("'{}'", text));
                        None
                    }
                }
            }
            GrammarNode::Tokens(texts) => {
                let at = self.scanner.skip_trivia(pos);
                for text in texts {
                    if let Some(end) = self.scanner.token(at, text) {
                        return Some((end, vec![ParseNode::leaf(None, at, end)]));
                    }
                }
                self.fail(at, format!("one of {}", texts.join(" ")));
                None
            }
            GrammarNode::Keyword { text, ci } => {
                let at = self.scanner.skip_trivia(pos);
                let matched = match self.scanner.keyword_run(at) {
                    Some((end, run)) => {
                        let hit = if *ci {
                            run.eq_ignore_ascii_case(text)
                        } else {
                            run == text
                        };
                        hit.then_some(end)
                    }
                    None => None,
                };
                match matched {
                    Some(end) => Some((end, vec![ParseNode::leaf(None, at, end)])),
                    None => {
                        self.fail(at, text.clone());
                        None
                    }
                }
            }
            GrammarNode::Pattern(kind) => {
                let at = self.scanner.skip_trivia(pos);
                match self.scanner.pattern(at, *kind) {
                    Some(end) => Some((end, vec![ParseNode::leaf(None, at, end)])),
                    None => {
                        self.fail(at, kind.description().to_string());
                        None
                    }
                }
            }
            GrammarNode::Sequence(children) => self.match_parts(children, pos),
            GrammarNode::Choice {
                alternatives,
                greedy,
            } => {
                if !greedy {
                    for alt in alternatives {
                        if let Some(result) = self.match_node(*alt, pos) {
                            return Some(result);
                        }
                    }
                    return None;
                }
                let mut best: Match = None;
                for alt in alternatives {
                    if let Some((end, nodes)) = self.match_node(*alt, pos) {
                        // Strict comparison keeps the first-declared
                        // alternative on equal length.
                        if best.as_ref().is_none_or(|(b, _)| end > *b) {
                            best = Some((end, nodes));
                        }
                    }
                }
                best
            }
            GrammarNode::Priority { base, rec } => self.match_priority(id, base, rec, pos),
            GrammarNode::This => {
                let Some(&(owner, mode)) = self.prio.last() else {
                    return None;
                };
                match mode {
                    ThisMode::Recurse => self.match_node(owner, pos),
                    ThisMode::Operand => {
                        let GrammarNode::Priority { base, .. } = grammar.node(owner) else {
                            return None;
                        };
                        self.match_base(owner, base, pos)
                            .map(|(end, seed)| (end, vec![seed]))
                    }
                }
            }
            GrammarNode::List {
                element,
                separator,
                min,
                max,
            } => {
                let mut nodes = Vec::new();
                let mut cur = pos;
                let mut count = 0;
                if let Some((end, first)) = self.match_node(*element, pos) {
                    nodes = first;
                    cur = end;
                    count = 1;
                    while *max == 0 || count < *max {
                        let Some((sep_end, sep_nodes)) = self.match_node(*separator, cur) else {
                            break;
                        };
                        let Some((el_end, el_nodes)) = self.match_node(*element, sep_end) else {
                            break;
                        };
                        nodes.extend(sep_nodes);
                        nodes.extend(el_nodes);
                        cur = el_end;
                        count += 1;
                    }
                }
                if count < *min {
                    return None;
                }
                Some((cur, nodes))
            }
            GrammarNode::Repeat { element, min, max } => {
                let mut nodes = Vec::new();
                let mut cur = pos;
                let mut count = 0;
                while *max == 0 || count < *max {
                    let Some((end, el_nodes)) = self.match_node(*element, cur) else {
                        break;
                    };
                    nodes.extend(el_nodes);
                    cur = end;
                    count += 1;
                }
                if count < *min {
                    return None;
                }
                Some((cur, nodes))
            }
            GrammarNode::Optional(element) => {
                self.match_node(*element, pos).or(Some((pos, Vec::new())))
            }
            GrammarNode::Tag { id: element, node } => {
                let (end, mut nodes) = self.match_node(*node, pos)?;
                if nodes.len() == 1 && nodes[0].element_id.is_none() {
                    nodes[0].element_id = Some(*element);
                    Some((end, nodes))
                } else {
                    Some((end, vec![ParseNode::branch(Some(*element), pos, nodes)]))
                }
            }
            GrammarNode::Ref(target) => self.match_node(*target, pos),
        }
    }

    fn match_parts(&mut self, parts: &[NodeId], pos: usize) -> Match {
        let mut nodes = Vec::new();
        let mut cur = pos;
        for part in parts {
            let (end, part_nodes) = self.match_node(*part, cur)?;
            nodes.extend(part_nodes);
            cur = end;
        }
        Some((cur, nodes))
    }

    /// Matches one base-level operand of a priority: its base alternatives
    /// in declaration order, parenthesized wraps collapsed into a grouping
    /// node so the expression shape survives splicing.
    fn match_base(&mut self, owner: NodeId, base: &[NodeId], pos: usize) -> Option<(usize, ParseNode)> {
        self.prio.push((owner, ThisMode::Recurse));
        let mut seed = None;
        for alt in base {
            if let Some((end, nodes)) = self.match_node(*alt, pos) {
                seed = Some((end, Self::group(pos, nodes)));
                break;
            }
        }
        self.prio.pop();
        seed
    }

    fn match_priority(
        &mut self,
        id: NodeId,
        base: &[NodeId],
        rec: &[NodeId],
        pos: usize,
    ) -> Match {
        let (mut end, mut seed) = self.match_base(id, base, pos)?;
        'extend: loop {
            for template in rec {
                let Some((tag, parts)) = self.template(*template) else {
                    continue;
                };
                self.prio.push((id, ThisMode::Operand));
                let rest = self.match_parts(&parts[1..], end);
                self.prio.pop();
                if let Some((new_end, rest_nodes)) = rest {
                    let mut children = vec![seed];
                    children.extend(rest_nodes);
                    seed = ParseNode::branch(tag, pos, children);
                    end = new_end;
                    continue 'extend;
                }
            }
            break;
        }
        Some((end, vec![seed]))
    }

    /// Unwraps a rec template down to its sequence parts; the template must
    /// be a sequence led by `This`, optionally behind a tag.
    fn template(&self, id: NodeId) -> Option<(Option<crate::lang::ElementId>, &'a [NodeId])> {
        let mut tag = None;
        let mut node = self.grammar.node(id);
        loop {
            match node {
                GrammarNode::Tag { id: element, node: inner } => {
                    tag = Some(*element);
                    node = self.grammar.node(*inner);
                }
                GrammarNode::Ref(target) => node = self.grammar.node(*target),
                _ => break,
            }
        }
        let GrammarNode::Sequence(parts) = node else {
            return None;
        };
        let first = parts.first()?;
        matches!(self.grammar.node(*first), GrammarNode::This).then_some((tag, parts))
    }

    /// The position of an unterminated quoted string or regex literal:
    /// a quoted pattern must have been expected at the furthest position,
    /// its opening character must sit there, and the rest of the input must
    /// never close it. A stray quote character where no literal was
    /// expected is an ordinary unexpected token.
    fn unterminated(&self) -> Option<usize> {
        let position = self.furthest;
        let input = self.scanner.input();
        let open = input[position..].chars().next()?;
        let kind = match open {
            '\'' => PatternKind::SingleQuoteStr,
            '"' => PatternKind::DoubleQuoteStr,
            '`' => PatternKind::GraveStr,
            '/' => PatternKind::RegexStr,
            _ => return None,
        };
        if !self.expected.iter().any(|e| e == kind.description()) {
            return None;
        }
        let rest = &input[position + open.len_utf8()..];
        (!rest.contains(open)).then_some(position)
    }

    fn into_error(self, trailing: usize) -> SyntaxError {
        if let Some(position) = self.unterminated() {
            return SyntaxError::UnterminatedLiteral { position };
        }
        if self.furthest >= trailing && !self.expected.is_empty() {
            SyntaxError::UnexpectedToken {
                position: self.furthest,
                expected: self.expected,
            }
        } else {
            SyntaxError::TrailingInput { position: trailing }
        }
    }
}

impl Grammar {
    /// Parses `input` against this grammar's start rule.
    ///
    /// The whole input must be consumed: after the start rule matches, only
    /// whitespace may remain. A match that consumed nothing at all is
    /// reported as [`SyntaxError::EmptyInput`].
    pub fn parse(&self, input: &str) -> Result<ParseTree, SyntaxError> {
        let mut matcher = Matcher::new(self, input);
        let Some((end, nodes)) = matcher.match_node(self.start(), 0) else {
            return Err(matcher.into_error(0));
        };
        let rest = matcher.scanner.skip_trivia(end);
        if rest < input.len() {
            return Err(matcher.into_error(rest));
        }
        let root = Matcher::group(0, nodes);
        if root.start == root.end && root.children.is_empty() {
            return Err(SyntaxError::EmptyInput);
        }
        Ok(ParseTree { root })
    }
}

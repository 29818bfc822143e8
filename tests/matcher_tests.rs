// tests/matcher_tests.rs
//
// Engine-level tests against small purpose-built grammars; the full SiriQL
// grammar is covered in tests/statement_tests.rs.

use siriql::grammar::{Grammar, GrammarBuilder, GrammarError};
use siriql::{ElementId, SyntaxError};

// ============================================================================
// Choice ordering
// ============================================================================

#[test]
fn test_non_greedy_choice_takes_first_match() {
    let mut g = GrammarBuilder::new();
    let short = g.keyword(None, "for");
    let long = g.keyword(None, "force");
    let start = g.choice(None, false, vec![short, long]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    assert!(grammar.parse("for").is_ok());
    // "force" is a distinct identifier run, so the first alternative never
    // matches it and the second one does.
    assert!(grammar.parse("force").is_ok());
}

#[test]
fn test_greedy_choice_prefers_longest() {
    let mut g = GrammarBuilder::new();
    let k_series = g.keyword(None, "series");
    let k_length = g.keyword(None, "length");
    let short = g.repeat(ElementId::CountSeries, k_series, 1, 1);
    let long = g.sequence(ElementId::CountSeriesLength, vec![k_series, k_length]);
    // The shorter alternative is declared first; greedy evaluation must
    // still pick the longer one.
    let start = g.choice(None, true, vec![short, long]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    let tree = grammar.parse("series length").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::CountSeriesLength));

    let tree = grammar.parse("series").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::CountSeries));
}

#[test]
fn test_greedy_choice_ties_break_by_declaration_order() {
    let mut g = GrammarBuilder::new();
    let a = g.keyword(ElementId::KUser, "joe");
    let b = g.keyword(ElementId::KUsers, "joe");
    let start = g.choice(None, true, vec![a, b]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    let tree = grammar.parse("joe").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::KUser));
}

// ============================================================================
// Keyword-run disambiguation
// ============================================================================

#[test]
fn test_keyword_never_matches_identifier_prefix() {
    let mut g = GrammarBuilder::new();
    let start = g.keyword(None, "group");
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    assert!(grammar.parse("group").is_ok());
    assert!(grammar.parse("groups").is_err());
    assert!(grammar.parse("group_by").is_err());
}

#[test]
fn test_sibling_keywords_sharing_a_prefix() {
    let mut g = GrammarBuilder::new();
    let singular = g.keyword(ElementId::KGroup, "group");
    let plural = g.keyword(ElementId::KGroups, "groups");
    let start = g.choice(None, false, vec![singular, plural]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    let tree = grammar.parse("groups").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::KGroups));
    let tree = grammar.parse("group").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::KGroup));
}

// ============================================================================
// Priority rules
// ============================================================================

fn arithmetic() -> Grammar {
    let mut g = GrammarBuilder::new();
    let this = g.this();
    let number = g.pattern(None, siriql::PatternKind::UInteger);
    let lparen = g.token(None, "(");
    let rparen = g.token(None, ")");
    let ops = g.tokens(None, "+ - * % /");
    let paren = g.sequence(None, vec![lparen, this, rparen]);
    let chain = g.sequence(None, vec![this, ops, this]);
    let start = g.prio(ElementId::IntExpr, vec![number, paren], vec![chain]);
    g.finish(start, "[a-z_]+").unwrap()
}

#[test]
fn test_priority_chains_are_left_associative() {
    let grammar = arithmetic();
    let input = "1 + 2 * 3";
    let tree = grammar.parse(input).unwrap();

    // ((1 + 2) * 3): a single flat tier groups strictly left to right.
    let root = &tree.root;
    assert_eq!(root.element_id, Some(ElementId::IntExpr));
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[1].text(input), "*");
    assert_eq!(root.children[2].text(input), "3");
    let left = &root.children[0];
    assert_eq!(left.children.len(), 3);
    assert_eq!(left.text(input), "1 + 2");
}

#[test]
fn test_priority_parentheses_group_the_right_operand() {
    let grammar = arithmetic();
    let input = "1 + (2 + 3)";
    let tree = grammar.parse(input).unwrap();

    let root = &tree.root;
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[0].text(input), "1");
    let wrapped = &root.children[2];
    assert_eq!(wrapped.text(input), "(2 + 3)");
    // The wrap keeps both parenthesis leaves around the inner expression.
    assert_eq!(wrapped.children.len(), 3);
    assert_eq!(wrapped.children[1].text(input), "2 + 3");
}

#[test]
fn test_priority_single_operand() {
    let grammar = arithmetic();
    let tree = grammar.parse("42").unwrap();
    assert_eq!(tree.root.element_id, Some(ElementId::IntExpr));
    assert!(tree.root.is_leaf());
}

#[test]
fn test_priority_rejects_dangling_operator() {
    let grammar = arithmetic();
    let err = grammar.parse("1 +").unwrap_err();
    assert!(matches!(err, SyntaxError::TrailingInput { .. } | SyntaxError::UnexpectedToken { .. }));
}

// ============================================================================
// Forward references
// ============================================================================

#[test]
fn test_placeholder_patching() {
    let mut g = GrammarBuilder::new();
    let expr_ref = g.placeholder();
    let lparen = g.token(None, "(");
    let rparen = g.token(None, ")");
    let wrapped = g.sequence(None, vec![lparen, expr_ref, rparen]);
    let leaf = g.keyword(None, "x");
    let expr = g.choice(None, false, vec![wrapped, leaf]);
    g.patch(expr_ref, expr);
    let grammar = g.finish(expr, "[a-z_]+").unwrap();

    assert!(grammar.parse("x").is_ok());
    assert!(grammar.parse("(( x ))").is_ok());
    assert!(grammar.parse("((x)").is_err());
}

#[test]
fn test_unpatched_placeholder_is_rejected() {
    let mut g = GrammarBuilder::new();
    let expr_ref = g.placeholder();
    let lparen = g.token(None, "(");
    let rparen = g.token(None, ")");
    let start = g.sequence(None, vec![lparen, expr_ref, rparen]);
    assert!(matches!(
        g.finish(start, "[a-z_]+"),
        Err(GrammarError::UnresolvedRef(_))
    ));
}

// ============================================================================
// Error reporting
// ============================================================================

#[test]
fn test_error_reports_furthest_failure() {
    let mut g = GrammarBuilder::new();
    let a = g.keyword(None, "alpha");
    let b = g.keyword(None, "beta");
    let start = g.sequence(None, vec![a, b]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    match grammar.parse("alpha gamma").unwrap_err() {
        SyntaxError::UnexpectedToken { position, expected } => {
            assert_eq!(position, 6);
            assert_eq!(expected, vec!["beta".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_trailing_input_after_complete_match() {
    let mut g = GrammarBuilder::new();
    let start = g.keyword(None, "x");
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    match grammar.parse("x y").unwrap_err() {
        SyntaxError::TrailingInput { position } => assert_eq!(position, 2),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_empty_match_is_reported_as_empty_input() {
    let mut g = GrammarBuilder::new();
    let x = g.keyword(None, "x");
    let start = g.optional(None, x);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    assert_eq!(grammar.parse("").unwrap_err(), SyntaxError::EmptyInput);
    assert_eq!(grammar.parse("   \t\n").unwrap_err(), SyntaxError::EmptyInput);
    assert!(grammar.parse("x").is_ok());
}

// ============================================================================
// Repetition bounds
// ============================================================================

#[test]
fn test_list_bounds() {
    let mut g = GrammarBuilder::new();
    let x = g.keyword(None, "x");
    let comma = g.token(None, ",");
    let start = g.list(None, x, comma, 2, 3);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    assert!(grammar.parse("x").is_err());
    assert!(grammar.parse("x, x").is_ok());
    assert!(grammar.parse("x, x, x").is_ok());
    assert!(grammar.parse("x, x, x, x").is_err());
}

#[test]
fn test_list_does_not_consume_a_trailing_separator() {
    let mut g = GrammarBuilder::new();
    let x = g.keyword(None, "x");
    let comma = g.token(None, ",");
    let items = g.list(None, x, comma, 1, 0);
    let stop = g.keyword(None, "end");
    let start = g.sequence(None, vec![items, comma, stop]);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    // The list must stop before "end" and leave the separator for the
    // enclosing sequence.
    assert!(grammar.parse("x, x, end").is_ok());
}

#[test]
fn test_repeat_bounds() {
    let mut g = GrammarBuilder::new();
    let x = g.keyword(None, "x");
    let start = g.repeat(None, x, 1, 0);
    let grammar = g.finish(start, "[a-z_]+").unwrap();

    assert!(grammar.parse("").is_err());
    assert!(grammar.parse("x x x x").is_ok());
}

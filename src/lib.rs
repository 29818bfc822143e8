pub mod grammar;
pub mod lang;
pub mod matcher;
pub mod output;
pub mod scanner;
pub mod tree;

#[cfg(feature = "cli")]
pub mod cli;

pub use grammar::{Grammar, GrammarBuilder, GrammarError, NodeId, PatternKind};
pub use lang::{siri_grammar, ElementId};
pub use matcher::SyntaxError;
pub use output::{to_json, to_json_pretty};
pub use tree::{ParseNode, ParseTree};

use std::sync::OnceLock;

static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

/// Parses a SiriQL query against a process-wide grammar instance.
///
/// The grammar is built on first use and shared afterwards. Callers needing
/// a custom grammar can build one with [`GrammarBuilder`] and call
/// [`Grammar::parse`] directly.
pub fn parse(input: &str) -> Result<ParseTree, SyntaxError> {
    GRAMMAR.get_or_init(siri_grammar).parse(input)
}

use crate::grammar::{Grammar, PatternKind};

/// Lexical front end of the matcher.
///
/// The scanner never tokenizes ahead: every operation applies at a byte
/// offset handed in by the matcher and reports how far it got. Positions are
/// byte offsets into the original input so parse-tree spans can be sliced
/// back out of it.
pub struct Scanner<'a> {
    input: &'a str,
    grammar: &'a Grammar,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, grammar: &'a Grammar) -> Self {
        Scanner { input, grammar }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Advances past whitespace trivia. Line comments are not trivia; the
    /// grammar matches them explicitly where they are allowed.
    pub fn skip_trivia(&self, pos: usize) -> usize {
        let mut pos = pos;
        for ch in self.input[pos..].chars() {
            if !ch.is_whitespace() {
                break;
            }
            pos += ch.len_utf8();
        }
        pos
    }

    /// True when only trivia remains at `pos`.
    pub fn at_end(&self, pos: usize) -> bool {
        self.skip_trivia(pos) == self.input.len()
    }

    /// Matches an exact literal at `pos`, returning the end offset.
    pub fn token(&self, pos: usize, text: &str) -> Option<usize> {
        if self.input[pos..].starts_with(text) {
            Some(pos + text.len())
        } else {
            None
        }
    }

    /// Applies the anchored pattern for `kind` at `pos` only, never
    /// scanning ahead.
    pub fn pattern(&self, pos: usize, kind: PatternKind) -> Option<usize> {
        let m = self.grammar.patterns.get(kind).find(&self.input[pos..])?;
        Some(pos + m.end())
    }

    /// Greedily consumes the maximal identifier-class run at `pos`.
    ///
    /// The run is computed before any keyword comparison so that keyword
    /// matching is whole-token equality against the run; a keyword never
    /// matches a prefix of a longer identifier.
    pub fn keyword_run(&self, pos: usize) -> Option<(usize, &'a str)> {
        let m = self.grammar.keyword.find(&self.input[pos..])?;
        Some((pos + m.end(), &self.input[pos..pos + m.end()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, PatternKind};

    fn grammar() -> Grammar {
        let mut g = GrammarBuilder::new();
        let start = g.token(None, "x");
        g.finish(start, "[a-z_]+").unwrap()
    }

    #[test]
    fn test_skip_trivia() {
        let g = grammar();
        let s = Scanner::new("  \t\n select", &g);
        assert_eq!(s.skip_trivia(0), 5);
        assert_eq!(s.skip_trivia(5), 5);
        assert!(!s.at_end(0));
        assert!(s.at_end(11));
    }

    #[test]
    fn test_keyword_run_is_maximal() {
        let g = grammar();
        let s = Scanner::new("groups where", &g);
        let (end, run) = s.keyword_run(0).unwrap();
        assert_eq!(run, "groups");
        assert_eq!(end, 6);
        assert!(s.keyword_run(6).is_none());
    }

    #[test]
    fn test_patterns_anchor_at_position() {
        let g = grammar();
        let s = Scanner::new("abc 123", &g);
        assert_eq!(s.pattern(0, PatternKind::UInteger), None);
        assert_eq!(s.pattern(4, PatternKind::UInteger), Some(7));
    }

    #[test]
    fn test_time_string() {
        let g = grammar();
        let s = Scanner::new("12h 5x", &g);
        assert_eq!(s.pattern(0, PatternKind::TimeStr), Some(3));
        assert_eq!(s.pattern(4, PatternKind::TimeStr), None);
    }

    #[test]
    fn test_adjacent_quoted_segments_are_one_literal() {
        let g = grammar();
        let s = Scanner::new("'foo''bar' 'baz'", &g);
        // Two adjacent segments form a single string token; the separate
        // third segment does not join because of the whitespace.
        assert_eq!(s.pattern(0, PatternKind::SingleQuoteStr), Some(10));
        assert_eq!(s.pattern(11, PatternKind::SingleQuoteStr), Some(16));
    }

    #[test]
    fn test_regex_literal() {
        let g = grammar();
        let s = Scanner::new(r"/cpu-\d+/i", &g);
        assert_eq!(s.pattern(0, PatternKind::RegexStr), Some(10));
        let s = Scanner::new("/unterminated", &g);
        assert_eq!(s.pattern(0, PatternKind::RegexStr), None);
    }

    #[test]
    fn test_uuid() {
        let g = grammar();
        let s = Scanner::new("6d6a2739-c16b-4454-8ef9-72f1b34cd36b", &g);
        assert_eq!(s.pattern(0, PatternKind::UuidStr), Some(36));
    }
}

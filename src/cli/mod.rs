//! CLI support for siriql
//!
//! Provides programmatic access to the `siriql` CLI functionality for
//! embedding in other tools.

use std::io;

use crate::matcher::SyntaxError;
use crate::output;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// The query failed to parse
    Syntax(SyntaxError),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Syntax(e) => write!(f, "Syntax error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => {
                write!(f, "No query provided. Pass one as an argument or pipe it to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Syntax(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<SyntaxError> for CliError {
    fn from(e: SyntaxError) -> Self {
        CliError::Syntax(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Options for the `check` command
pub struct CheckOptions {
    /// The query to validate
    pub query: String,
    /// Emit the parse tree as JSON instead of a validity message
    pub tree: bool,
    /// Pretty-print the parse tree
    pub pretty: bool,
}

/// Result of a successful `check`
pub enum CheckResult {
    /// The query is syntactically valid
    Valid,
    /// The rendered parse tree, when `tree` was requested
    Tree(String),
}

/// Validates a query and optionally renders its parse tree.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tree = crate::parse(&options.query)?;
    if options.tree {
        let json = if options.pretty {
            output::to_json_pretty(&tree, &options.query)
        } else {
            output::to_json(&tree, &options.query)
        };
        Ok(CheckResult::Tree(json))
    } else {
        Ok(CheckResult::Valid)
    }
}

/// Renders a syntax error with the offending line and a caret under the
/// position the matcher got stuck at.
pub fn render_error(query: &str, err: &SyntaxError) -> String {
    let pos = err.position().unwrap_or(0).min(query.len());
    let line_start = query[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = query[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(query.len());
    let column = query[line_start..pos].chars().count();
    format!(
        "{}\n{}^\n{}",
        &query[line_start..line_end],
        " ".repeat(column),
        err
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_query() {
        let options = CheckOptions {
            query: "list series".to_string(),
            tree: false,
            pretty: false,
        };
        assert!(matches!(execute_check(&options), Ok(CheckResult::Valid)));
    }

    #[test]
    fn test_check_tree_output() {
        let options = CheckOptions {
            query: "count users".to_string(),
            tree: true,
            pretty: false,
        };
        match execute_check(&options) {
            Ok(CheckResult::Tree(json)) => assert!(json.contains("count_stmt")),
            _ => panic!("expected a rendered tree"),
        }
    }

    #[test]
    fn test_check_invalid_query() {
        let options = CheckOptions {
            query: "select banana".to_string(),
            tree: false,
            pretty: false,
        };
        assert!(matches!(execute_check(&options), Err(CliError::Syntax(_))));
    }

    #[test]
    fn test_render_error_caret_position() {
        let query = "select from 'x'";
        let err = crate::parse(query).unwrap_err();
        let rendered = render_error(query, &err);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("select from 'x'"));
        let caret = lines.next().unwrap();
        let pos = err.position().unwrap();
        assert_eq!(caret.trim_end(), format!("{}^", " ".repeat(pos)));
    }
}

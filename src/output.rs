//! JSON rendering of parse trees.
//!
//! Trees serialize to nested objects carrying the element name, the byte
//! span and, for leaves, the matched text. Unnamed grouping nodes render
//! with a `null` element. Output is deterministic: keys are emitted sorted.
//!
//! # Examples
//!
//! ```
//! let tree = siriql::parse("show status").unwrap();
//! let json = siriql::to_json(&tree, "show status");
//! assert!(json.contains("\"element\":\"show_stmt\""));
//! ```

use crate::tree::{ParseNode, ParseTree};
use serde_json::{json, Value};

/// Converts a parse tree to a JSON value.
///
/// `input` must be the exact query string the tree was parsed from; spans
/// are sliced out of it to recover leaf text.
pub fn tree_value(tree: &ParseTree, input: &str) -> Value {
    node_value(&tree.root, input)
}

fn node_value(node: &ParseNode, input: &str) -> Value {
    let element = node.element_id.map(|id| id.name());
    if node.is_leaf() {
        json!({
            "element": element,
            "start": node.start,
            "end": node.end,
            "text": node.text(input),
        })
    } else {
        let children: Vec<Value> = node.children.iter().map(|c| node_value(c, input)).collect();
        json!({
            "element": element,
            "start": node.start,
            "end": node.end,
            "children": children,
        })
    }
}

/// Renders a parse tree as compact JSON.
pub fn to_json(tree: &ParseTree, input: &str) -> String {
    tree_value(tree, input).to_string()
}

/// Renders a parse tree as pretty-printed JSON with 2-space indentation.
pub fn to_json_pretty(tree: &ParseTree, input: &str) -> String {
    let value = tree_value(tree, input);
    serde_json::to_string_pretty(&value).expect("a JSON value always serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ElementId;

    #[test]
    fn test_leaf_text_round_trip() {
        let input = "show status";
        let tree = crate::parse(input).unwrap();
        let value = tree_value(&tree, input);
        let status = tree.find(ElementId::KStatus).unwrap();
        assert_eq!(status.text(input), "status");
        assert_eq!(value["element"], "start");
    }

    #[test]
    fn test_compact_and_pretty_agree() {
        let input = "count series";
        let tree = crate::parse(input).unwrap();
        let compact: Value = serde_json::from_str(&to_json(&tree, input)).unwrap();
        let pretty: Value = serde_json::from_str(&to_json_pretty(&tree, input)).unwrap();
        assert_eq!(compact, pretty);
    }
}

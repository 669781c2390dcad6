//! Translates an `AstNode` tree into a `Value` tree. A pure function: it
//! touches no `Environment` and allocates no prelude.

use crate::ast::AstNode;
use crate::value::Value;

/// A token text the surface grammar uses purely for grouping and that the
/// Reader must skip when folding a branch's children into a list.
fn is_delimiter_token(contents: &str) -> bool {
    matches!(contents, "(" | ")" | "{" | "}")
}

/// Reads a single AST node into a `Value`, per the tag-substring rules.
pub fn read(node: &AstNode) -> Value {
    if node.tag.contains("number") {
        return match node.contents.parse::<i64>() {
            Ok(n) => Value::number(n),
            Err(_) => Value::error("invalid number"),
        };
    }

    if node.tag.contains("symbol") {
        return Value::symbol(node.contents.clone());
    }

    if node.is_root() || node.tag.contains("sexpr") {
        return Value::sexpr(read_children(node));
    }

    if node.tag.contains("qexpr") {
        return Value::qexpr(read_children(node));
    }

    Value::error(format!("unrecognized AST node tag '{}'", node.tag))
}

fn read_children(node: &AstNode) -> Vec<Value> {
    node.children
        .iter()
        .filter(|child| !is_delimiter_token(&child.contents) && !is_regex_artifact(child))
        .map(read)
        .collect()
}

/// `mpc`'s parse trees interleave the grammar's own machinery (the
/// `regex`-tagged leaf nodes matched by `number`/`symbol`'s underlying
/// pattern) with the nodes that carry meaning. A node tagged exactly
/// `"regex"` with no more specific tag is one of those artifacts, not a
/// value to read. This crate's own parser (`parser.rs`) never emits one,
/// but the Reader stays defensive since the AST interface is external.
fn is_regex_artifact(node: &AstNode) -> bool {
    node.tag == "regex"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_number() {
        let node = AstNode::leaf("number", "42");
        assert_eq!(read(&node), Value::number(42));
    }

    #[test]
    fn invalid_number_is_an_error_value() {
        let node = AstNode::leaf("number", "not-a-number");
        assert_eq!(read(&node), Value::error("invalid number"));
    }

    #[test]
    fn reads_symbol() {
        let node = AstNode::leaf("symbol", "foo");
        assert_eq!(read(&node), Value::symbol("foo"));
    }

    #[test]
    fn reads_sexpr_skipping_parens() {
        let node = AstNode::branch(
            "sexpr",
            vec![
                AstNode::leaf("char", "("),
                AstNode::leaf("number", "1"),
                AstNode::leaf("number", "2"),
                AstNode::leaf("char", ")"),
            ],
        );
        assert_eq!(
            read(&node),
            Value::sexpr(vec![Value::number(1), Value::number(2)])
        );
    }

    #[test]
    fn reads_qexpr_skipping_braces() {
        let node = AstNode::branch(
            "qexpr",
            vec![
                AstNode::leaf("char", "{"),
                AstNode::leaf("symbol", "x"),
                AstNode::leaf("char", "}"),
            ],
        );
        assert_eq!(read(&node), Value::qexpr(vec![Value::symbol("x")]));
    }

    #[test]
    fn reads_root_as_sexpr() {
        let node = AstNode::branch(">", vec![AstNode::leaf("number", "7")]);
        assert_eq!(read(&node), Value::sexpr(vec![Value::number(7)]));
    }

    #[test]
    fn reads_nested_lists() {
        let node = AstNode::branch(
            "sexpr",
            vec![
                AstNode::leaf("symbol", "+"),
                AstNode::branch(
                    "sexpr",
                    vec![AstNode::leaf("symbol", "*"), AstNode::leaf("number", "1"), AstNode::leaf("number", "2")],
                ),
                AstNode::leaf("number", "3"),
            ],
        );
        assert_eq!(
            read(&node),
            Value::sexpr(vec![
                Value::symbol("+"),
                Value::sexpr(vec![Value::symbol("*"), Value::number(1), Value::number(2)]),
                Value::number(3),
            ])
        );
    }
}

//! The AST node shape the Reader consumes. This mirrors `mpc`'s untyped
//! parse tree (a tag, literal contents, and ordered children) rather than a
//! typed Rust enum per syntax form, so the Reader stays a pure function of
//! "tag substring" -> `Value` exactly as specified, independent of whichever
//! concrete parser produced the tree.

#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    /// Space-separated classifiers, e.g. `"number"`, `"symbol"`, `"sexpr"`,
    /// or `">"` for the root of a whole program.
    pub tag: String,
    /// Literal token text; only meaningful for leaves.
    pub contents: String,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn leaf(tag: impl Into<String>, contents: impl Into<String>) -> AstNode {
        AstNode {
            tag: tag.into(),
            contents: contents.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(tag: impl Into<String>, children: Vec<AstNode>) -> AstNode {
        AstNode {
            tag: tag.into(),
            contents: String::new(),
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.tag == ">"
    }
}

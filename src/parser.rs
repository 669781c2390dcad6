//! The surface-syntax parser: the external collaborator the core spec
//! assumes but does not design (§1, §6). Produces the `AstNode` tree that
//! `reader::read` folds into `Value`; this module never constructs a
//! `Value` itself.
//!
//! Grammar:
//! ```text
//! number   : optional '-' followed by one or more digits
//! symbol   : one or more of [a-zA-Z0-9_+\-*/\\=<>!&^]
//! sexpr    : '(' expr* ')'
//! qexpr    : '{' expr* '}'
//! expr     : number | symbol | sexpr | qexpr
//! program  : expr*
//! ```
//! A `;` outside of a token runs to end of line and is treated as
//! whitespace.

use nom::{
    branch::alt,
    character::complete::{char, digit1, multispace1, none_of, one_of},
    combinator::{map, opt, recognize, value},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::ast::AstNode;

const SYMBOL_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-*/\\=<>!&^";

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char(';'), many0(none_of("\n"))))(input)
}

fn whitespace0(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), line_comment))))(input)
}

fn number(input: &str) -> IResult<&str, AstNode> {
    map(recognize(pair(opt(char('-')), digit1)), |text: &str| {
        AstNode::leaf("number", text)
    })(input)
}

fn symbol(input: &str) -> IResult<&str, AstNode> {
    map(recognize(many1(one_of(SYMBOL_CHARS))), |text: &str| {
        AstNode::leaf("symbol", text)
    })(input)
}

fn sexpr(input: &str) -> IResult<&str, AstNode> {
    map(
        delimited(
            char('('),
            many0(preceded(whitespace0, expr)),
            preceded(whitespace0, char(')')),
        ),
        |children| {
            let mut all = vec![AstNode::leaf("char", "(")];
            all.extend(children);
            all.push(AstNode::leaf("char", ")"));
            AstNode::branch("sexpr", all)
        },
    )(input)
}

fn qexpr(input: &str) -> IResult<&str, AstNode> {
    map(
        delimited(
            char('{'),
            many0(preceded(whitespace0, expr)),
            preceded(whitespace0, char('}')),
        ),
        |children| {
            let mut all = vec![AstNode::leaf("char", "{")];
            all.extend(children);
            all.push(AstNode::leaf("char", "}"));
            AstNode::branch("qexpr", all)
        },
    )(input)
}

/// Number is tried before symbol: both accept a leading `-`/digit, but a
/// bare `-` (the subtraction builtin) must fall through to `symbol` since
/// `number` requires at least one digit after the optional sign.
fn expr(input: &str) -> IResult<&str, AstNode> {
    alt((number, symbol, sexpr, qexpr))(input)
}

/// Parses a whole program (zero or more top-level expressions) into a
/// single root `AstNode` tagged `">"`, matching the §6 AST interface.
pub fn parse_program(input: &str) -> Result<AstNode, String> {
    let result = terminated(many0(preceded(whitespace0, expr)), whitespace0)(input);
    match result {
        Ok((remaining, children)) if remaining.is_empty() => Ok(AstNode::branch(">", children)),
        Ok((remaining, _)) => Err(format!("unexpected input starting at: '{remaining}'")),
        Err(err) => Err(format!("parse error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_number() {
        let ast = parse_program("42").unwrap();
        assert_eq!(ast.children, vec![AstNode::leaf("number", "42")]);
    }

    #[test]
    fn parses_a_negative_number() {
        let ast = parse_program("-7").unwrap();
        assert_eq!(ast.children, vec![AstNode::leaf("number", "-7")]);
    }

    #[test]
    fn a_bare_minus_is_a_symbol_not_a_number() {
        let ast = parse_program("-").unwrap();
        assert_eq!(ast.children, vec![AstNode::leaf("symbol", "-")]);
    }

    #[test]
    fn parses_an_sexpr_with_nested_qexpr() {
        let ast = parse_program("(+ 1 {2 3})").unwrap();
        assert_eq!(ast.children.len(), 1);
        let sexpr = &ast.children[0];
        assert_eq!(sexpr.tag, "sexpr");
        // '(' + 1 {2 3} ')'
        assert_eq!(sexpr.children.len(), 5);
        assert_eq!(sexpr.children[3].tag, "qexpr");
    }

    #[test]
    fn skips_comments_as_whitespace() {
        let ast = parse_program("; a comment\n42 ; trailing\n").unwrap();
        assert_eq!(ast.children, vec![AstNode::leaf("number", "42")]);
    }

    #[test]
    fn parses_multiple_top_level_forms() {
        let ast = parse_program("1 2 3").unwrap();
        assert_eq!(ast.children.len(), 3);
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert!(parse_program("(+ 1 2").is_err());
    }

    #[test]
    fn parses_lambda_literal() {
        let ast = parse_program(r"\ {x y} {+ x y}").unwrap();
        assert_eq!(ast.children.len(), 3);
        assert_eq!(ast.children[0], AstNode::leaf("symbol", r"\"));
    }
}

//! Syntax highlighting and multi-line input validation for the REPL line
//! editor. Tokenizes against Lispy's actual grammar (§6) rather than a
//! generic Lisp's — there are no strings or booleans in this language, and
//! the "keywords" are ordinary symbols bound to builtins in the prelude.

use lazy_static::lazy_static;
use regex::Regex;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Context;

use owo_colors::{OwoColorize, Style as OwoStyle};
use rustyline::Helper as RustylineHelperTrait;
use std::borrow::Cow::{self, Owned};

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r";.*").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"-?\d+").unwrap();
    // Builtins that read as control/binding forms rather than plain
    // arithmetic, styled distinctly so `if`/`def`/`\`/`=` stand out.
    static ref KEYWORD_RE: Regex = Regex::new(r"(\\|&|\bif\b|\bdef\b|\benv\b|\bexit\b)").unwrap();
    static ref PARENS_RE: Regex = Regex::new(r"[(){}]").unwrap();
    static ref SYMBOL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9_+\-*/\\=<>!&^]+").unwrap();
}

#[derive(Default)]
pub struct LispHighlighter;

impl Highlighter for LispHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut out = String::with_capacity(line.len() * 2);
        let mut pos = 0;

        let comment_style = OwoStyle::new().truecolor(128, 128, 128);
        let number_style = OwoStyle::new().magenta();
        let keyword_style = OwoStyle::new().cyan().bold();
        let parens_style = OwoStyle::new().blue();

        // Ordered so more specific tokens (comments, keywords, numbers) win
        // over the catch-all symbol class at the same start position.
        let tokens: [(&Regex, Option<OwoStyle>); 4] = [
            (&COMMENT_RE, Some(comment_style)),
            (&NUMBER_RE, Some(number_style)),
            (&KEYWORD_RE, Some(keyword_style)),
            (&PARENS_RE, Some(parens_style)),
        ];

        while pos < line.len() {
            let mut matched = false;
            for (regex, style) in &tokens {
                if let Some(m) = regex.find_at(line, pos) {
                    if m.start() == pos {
                        let text = &line[m.start()..m.end()];
                        match style {
                            Some(s) => out.push_str(&text.style(*s).to_string()),
                            None => out.push_str(text),
                        }
                        pos = m.end();
                        matched = true;
                        break;
                    }
                }
            }
            if !matched {
                let end = line[pos..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| pos + i)
                    .unwrap_or(line.len());
                out.push_str(&line[pos..end]);
                pos = end;
            }
        }
        Owned(out)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

pub struct ReplHelper {
    highlighter: LispHighlighter,
}

impl ReplHelper {
    pub fn new() -> Self {
        Self {
            highlighter: LispHighlighter,
        }
    }
}

impl Completer for ReplHelper {
    type Candidate = String;

    fn complete(
        &self,
        _line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        Ok((0, Vec::new()))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for ReplHelper {
    fn validate(
        &self,
        ctx: &mut rustyline::validate::ValidationContext,
    ) -> Result<rustyline::validate::ValidationResult, ReadlineError> {
        let input = ctx.input();
        let mut depth = 0i32;
        let mut in_comment = false;

        for ch in input.chars() {
            if in_comment {
                if ch == '\n' {
                    in_comment = false;
                }
                continue;
            }
            match ch {
                ';' => in_comment = true,
                '(' | '{' => depth += 1,
                ')' | '}' => depth -= 1,
                _ => {}
            }
        }

        if depth > 0 {
            Ok(rustyline::validate::ValidationResult::Incomplete)
        } else {
            Ok(rustyline::validate::ValidationResult::Valid(None))
        }
    }
}

impl RustylineHelperTrait for ReplHelper {}

impl Default for ReplHelper {
    fn default() -> Self {
        Self::new()
    }
}

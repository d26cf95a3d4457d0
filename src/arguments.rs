//! Restricted parsing of directive arguments.
//!
//! The webpack implementation evaluates the raw argument text as live
//! code. Here each parameter is parsed as an ECMAScript expression and
//! only literals are accepted: strings, booleans and regular
//! expressions, optionally wrapped in parentheses. Anything else is an
//! error that fails the whole file's transform.
use anyhow::{bail, Result};
use regex::RegexBuilder;

use swc_core::common::BytePos;
use swc_core::ecma::ast::{Expr, Lit};
use swc_core::ecma::parser::{lexer::Lexer, Parser, StringInput, Syntax};

use crate::options::Pattern;

/// A literal argument value.
#[derive(Debug, Clone)]
pub enum Literal {
    /// A string literal, eg: `'./modules'`.
    Str(String),
    /// A boolean literal.
    Bool(bool),
    /// A regular expression literal, eg: `/\.json$/`.
    Regex(Pattern),
}

/// Split argument text on top-level commas.
///
/// Commas inside string quotes or nested brackets do not split. A comma
/// inside an unbracketed regular expression literal is not recognized.
pub fn split(args: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in args.chars() {
        if let Some(q) = quote {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                params.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    params.push(current.trim().to_string());
    params
}

/// Parse a single parameter expression into a literal value.
pub fn parse_literal(src: &str) -> Result<Literal> {
    let input = StringInput::new(src, BytePos(0), BytePos(src.len() as u32));
    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        Default::default(),
        input,
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let expr = match parser.parse_expr() {
        Ok(expr) => expr,
        Err(e) => bail!("Failed to parse argument `{}`: {:?}", src, e.kind()),
    };
    if let Some(e) = parser.take_errors().into_iter().next() {
        bail!("Failed to parse argument `{}`: {:?}", src, e.kind());
    }

    literal(&expr, src)
}

fn literal(expr: &Expr, src: &str) -> Result<Literal> {
    match expr {
        Expr::Paren(paren) => literal(&paren.expr, src),
        Expr::Lit(Lit::Str(value)) => Ok(Literal::Str(value.value.to_string())),
        Expr::Lit(Lit::Bool(value)) => Ok(Literal::Bool(value.value)),
        Expr::Lit(Lit::Regex(value)) => {
            Ok(Literal::Regex(compile_regex(&value.exp, &value.flags)?))
        }
        _ => bail!(
            "Argument `{}` is not a string, boolean or regex literal",
            src
        ),
    }
}

fn compile_regex(exp: &str, flags: &str) -> Result<Pattern> {
    let mut builder = RegexBuilder::new(exp);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            // global, sticky and unicode flags have no meaning for a
            // plain match test
            'g' | 'u' | 'y' => {}
            _ => bail!("Unsupported flag `{}` in /{}/{}", flag, exp, flags),
        }
    }
    Ok(Pattern::from(builder.build()?))
}

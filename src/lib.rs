#![allow(clippy::module_inception)]

pub mod analysis;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod visitor;

extern crate regex;

use crate::analysis::analysis::{analyze, Diagnostic};
use crate::ast::ast::Ast;
use crate::errors::errors::Error;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;
use crate::symbols::builder::build_scopes;

/// Runs the whole front end over a source string: lex, parse, decorate,
/// analyze.
///
/// A fatal lexing or parsing error comes back as `Err`. Otherwise the
/// result is the decorated tree and its semantic diagnostics; an empty
/// diagnostics list means the program was accepted.
pub fn check(source: String) -> Result<(Ast, Vec<Diagnostic>), Error> {
    let tokens = tokenize(source)?;
    let mut ast = parse(tokens)?;
    build_scopes(&mut ast);
    let diagnostics = analyze(&mut ast);
    Ok((ast, diagnostics))
}

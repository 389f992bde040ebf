use std::{env, fs, process};

use decaf::analysis::analysis::analyze;
use decaf::errors::errors::{Error, ErrorTip};
use decaf::lexer::lexer::tokenize;
use decaf::parser::parser::parse;
use decaf::symbols::builder::build_scopes;
use decaf::visitor::passes::PrintVisitor;
use decaf::visitor::visitor::run_pass;

fn display_error(error: &Error) {
    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("Error: {} ({})", error, error.get_tip());
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: decaf <file>");
        process::exit(1);
    }

    let source = match fs::read_to_string(&args[1]) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Could not read {}: {}", args[1], error);
            process::exit(1);
        }
    };

    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error);
            process::exit(1);
        }
    };

    let mut ast = match parse(tokens) {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error);
            process::exit(1);
        }
    };

    build_scopes(&mut ast);
    let diagnostics = analyze(&mut ast);

    if diagnostics.is_empty() {
        let mut output = String::new();
        run_pass(PrintVisitor::new(&mut output), &mut ast);
        print!("{}", output);
    } else {
        for diagnostic in &diagnostics {
            println!("{}", diagnostic);
        }
        process::exit(1);
    }
}

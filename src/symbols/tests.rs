//! Unit tests for symbols, scopes, and lookup.

use crate::ast::ast::{Ast, NodeId, NodeKind, Param};
use crate::ast::attributes::SYMBOL_TABLE;
use crate::ast::types::DecafType;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

use super::builder::build_scopes;
use super::symbols::{lookup_symbol, Symbol, SymbolKind};

fn build_source(source: &str) -> Ast {
    let tokens = tokenize(source.to_string()).unwrap();
    let mut ast = parse(tokens).unwrap();
    build_scopes(&mut ast);
    ast
}

fn find_func(ast: &Ast, name: &str) -> NodeId {
    let NodeKind::Program { functions, .. } = &ast.node(ast.root()).kind else {
        panic!("root is not a program");
    };
    for func in functions {
        if let NodeKind::FuncDecl { name: func_name, .. } = &ast.node(*func).kind {
            if func_name == name {
                return *func;
            }
        }
    }
    panic!("no function named {}", name);
}

fn func_body(ast: &Ast, func: NodeId) -> NodeId {
    match &ast.node(func).kind {
        NodeKind::FuncDecl { body, .. } => *body,
        other => panic!("not a function: {:?}", other),
    }
}

#[test]
fn test_symbol_display() {
    assert_eq!(Symbol::scalar("x", DecafType::Int).to_string(), "x : int");
    assert_eq!(
        Symbol::array("data", DecafType::Bool, 10).to_string(),
        "data : bool [10]"
    );
    let func = Symbol::function(
        "foo",
        DecafType::Void,
        vec![
            Param {
                name: String::from("i"),
                ty: DecafType::Int,
            },
            Param {
                name: String::from("b"),
                ty: DecafType::Bool,
            },
        ],
    );
    assert_eq!(func.to_string(), "foo : (int, bool) -> void");
}

#[test]
fn test_root_scope_contains_builtins() {
    let ast = build_source("def int main() { return 0; }");
    let root = ast.root();

    let print_int = lookup_symbol(&ast, root, "print_int").unwrap();
    assert!(print_int.is_function());
    assert_eq!(print_int.ty, DecafType::Void);
    let SymbolKind::Function { parameters } = &print_int.kind else {
        panic!("builtin is not a function");
    };
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].ty, DecafType::Int);

    assert!(lookup_symbol(&ast, root, "print_bool").is_some());
    assert!(lookup_symbol(&ast, root, "print_str").is_some());
}

#[test]
fn test_function_signatures_registered_before_bodies() {
    // "second" must be visible from inside "first" even though it is
    // declared later.
    let ast = build_source(
        "def int first() { return second(); }\ndef int second() { return 1; }\ndef int main() { return first(); }",
    );
    let first_body = func_body(&ast, find_func(&ast, "first"));

    let second = lookup_symbol(&ast, first_body, "second").unwrap();
    assert!(second.is_function());
    assert_eq!(second.ty, DecafType::Int);
}

#[test]
fn test_parameters_in_function_scope() {
    let ast = build_source("def int add(int a, int b) { return a; }\ndef int main() { return 0; }");
    let add = find_func(&ast, "add");
    let body = func_body(&ast, add);

    let a = lookup_symbol(&ast, body, "a").unwrap();
    assert_eq!(a.kind, SymbolKind::Scalar);
    assert_eq!(a.ty, DecafType::Int);

    // Parameters are not visible from the root scope
    assert!(lookup_symbol(&ast, ast.root(), "a").is_none());
}

#[test]
fn test_global_variables_in_root_scope() {
    let ast = build_source("int counter;\nbool flag;\ndef int main() { return 0; }");
    let root = ast.root();

    let counter = lookup_symbol(&ast, root, "counter").unwrap();
    assert_eq!(counter.kind, SymbolKind::Scalar);
    assert_eq!(counter.ty, DecafType::Int);

    let flag = lookup_symbol(&ast, root, "flag").unwrap();
    assert_eq!(flag.ty, DecafType::Bool);
}

#[test]
fn test_array_symbol_keeps_length() {
    let ast = build_source("int data[32];\ndef int main() { return 0; }");
    let data = lookup_symbol(&ast, ast.root(), "data").unwrap();
    assert_eq!(data.kind, SymbolKind::Array { length: 32 });
}

#[test]
fn test_shadowing_inner_scope_wins() {
    let ast = build_source("int x;\ndef int main() { int x; x = 1; return x; }");
    let body = func_body(&ast, find_func(&ast, "main"));

    // From inside main the local x shadows the global; both are ints here,
    // so distinguish them by which table holds the first match.
    let scope = *ast.node(body).attributes.expect(SYMBOL_TABLE);
    assert!(ast.scope(scope).lookup_local("x").is_some());

    let resolved = lookup_symbol(&ast, body, "x").unwrap();
    let local = ast.scope(scope).lookup_local("x").unwrap();
    assert_eq!(resolved, local);
}

#[test]
fn test_lookup_climbs_from_leaf_node() {
    let ast = build_source("int g;\ndef int main() { int l; l = g; return l; }");
    let body = func_body(&ast, find_func(&ast, "main"));
    let NodeKind::Block { statements, .. } = &ast.node(body).kind else {
        panic!("not a block");
    };
    // The assignment's value is a leaf Location with no scope of its own
    let NodeKind::Assignment { value, .. } = &ast.node(statements[0]).kind else {
        panic!("not an assignment");
    };

    let g = lookup_symbol(&ast, *value, "g").unwrap();
    assert_eq!(g.ty, DecafType::Int);
    assert!(lookup_symbol(&ast, *value, "l").is_some());
    assert!(lookup_symbol(&ast, *value, "missing").is_none());
}

#[test]
fn test_nested_block_scopes() {
    let ast = build_source(
        "def int main() { int outer; if (true) { int inner; inner = outer; } return 0; }",
    );
    let body = func_body(&ast, find_func(&ast, "main"));
    let NodeKind::Block { statements, .. } = &ast.node(body).kind else {
        panic!("not a block");
    };
    let NodeKind::Conditional { if_block, .. } = &ast.node(statements[0]).kind else {
        panic!("not a conditional");
    };

    // inner is visible inside the if block but not from the function body
    assert!(lookup_symbol(&ast, *if_block, "inner").is_some());
    assert!(lookup_symbol(&ast, *if_block, "outer").is_some());
    assert!(lookup_symbol(&ast, body, "inner").is_none());
}

#[test]
fn test_scope_attached_to_scope_owners_only() {
    let ast = build_source("def int main() { int a; a = 1; return a; }");
    let root = ast.root();
    assert!(ast.node(root).attributes.has(SYMBOL_TABLE));

    let main = find_func(&ast, "main");
    assert!(ast.node(main).attributes.has(SYMBOL_TABLE));

    let body = func_body(&ast, main);
    let NodeKind::Block { statements, .. } = &ast.node(body).kind else {
        panic!("not a block");
    };
    assert!(ast.node(body).attributes.has(SYMBOL_TABLE));
    assert!(!ast.node(statements[0]).attributes.has(SYMBOL_TABLE));
}

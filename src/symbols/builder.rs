//! Symbol table construction.
//!
//! `SymbolTableBuilder` is a visitor that attaches a scope to every
//! Program, FuncDecl, and Block node. The root scope is pre-populated with
//! the built-in print functions and one Function symbol per declared
//! function (headers only, before any body is visited, so forward and
//! mutual references resolve). `build_scopes` runs the whole decoration
//! pipeline in order.

use crate::ast::ast::{Ast, NodeId, NodeKind};
use crate::ast::attributes::SYMBOL_TABLE;
use crate::ast::types::DecafType;
use crate::symbols::symbols::{ScopeId, Symbol, SymbolTable};
use crate::visitor::passes::{CalcDepthVisitor, SetParentVisitor};
use crate::visitor::visitor::{run_pass, Visitor};

pub struct SymbolTableBuilder {
    current: Option<ScopeId>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        SymbolTableBuilder { current: None }
    }

    fn open_scope(&mut self, ast: &mut Ast, node: NodeId, table: SymbolTable) {
        let scope = ast.add_scope(table);
        ast.node_mut(node).attributes.set(SYMBOL_TABLE, scope);
        self.current = Some(scope);
    }

    fn close_scope(&mut self, ast: &Ast) {
        self.current = self.current.and_then(|scope| ast.scope(scope).parent);
    }

    fn child_table(&self) -> SymbolTable {
        match self.current {
            Some(parent) => SymbolTable::with_parent(parent),
            None => SymbolTable::new(),
        }
    }
}

impl Default for SymbolTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_print(name: &str, ty: DecafType) -> Symbol {
    Symbol::function(
        name,
        DecafType::Void,
        vec![crate::ast::ast::Param {
            name: String::from("value"),
            ty,
        }],
    )
}

impl Visitor for SymbolTableBuilder {
    fn previsit_program(&mut self, ast: &mut Ast, node: NodeId) {
        let mut table = SymbolTable::new();
        table.insert(builtin_print("print_int", DecafType::Int));
        table.insert(builtin_print("print_bool", DecafType::Bool));
        table.insert(builtin_print("print_str", DecafType::Str));

        // Register every function header up front so that calls can be
        // resolved before the callee's body has been visited.
        let NodeKind::Program { functions, .. } = &ast.node(node).kind else {
            return;
        };
        for func in functions.clone() {
            let NodeKind::FuncDecl {
                name,
                return_type,
                parameters,
                ..
            } = &ast.node(func).kind
            else {
                continue;
            };
            table.insert(Symbol::function(name, *return_type, parameters.clone()));
        }

        self.open_scope(ast, node, table);
    }

    fn postvisit_program(&mut self, ast: &mut Ast, _node: NodeId) {
        self.close_scope(ast);
    }

    fn previsit_func_decl(&mut self, ast: &mut Ast, node: NodeId) {
        let mut table = self.child_table();
        let NodeKind::FuncDecl { parameters, .. } = &ast.node(node).kind else {
            return;
        };
        for param in parameters {
            table.insert(Symbol::scalar(&param.name, param.ty));
        }
        self.open_scope(ast, node, table);
    }

    fn postvisit_func_decl(&mut self, ast: &mut Ast, _node: NodeId) {
        self.close_scope(ast);
    }

    fn previsit_block(&mut self, ast: &mut Ast, node: NodeId) {
        let table = self.child_table();
        self.open_scope(ast, node, table);
    }

    fn postvisit_block(&mut self, ast: &mut Ast, _node: NodeId) {
        self.close_scope(ast);
    }

    fn previsit_var_decl(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::VarDecl {
            name,
            ty,
            is_array,
            array_length,
        } = &ast.node(node).kind
        else {
            return;
        };
        let symbol = if *is_array {
            Symbol::array(name, *ty, *array_length)
        } else {
            Symbol::scalar(name, *ty)
        };
        let Some(scope) = self.current else {
            return;
        };
        ast.scope_mut(scope).insert(symbol);
    }
}

/// Decorates the tree with parent links, depths, and symbol tables.
/// Must run before `analyze`.
pub fn build_scopes(ast: &mut Ast) {
    run_pass(SetParentVisitor, ast);
    run_pass(CalcDepthVisitor, ast);
    run_pass(SymbolTableBuilder::new(), ast);
}

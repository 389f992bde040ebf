//! Tree-decoration passes.
//!
//! - `SetParentVisitor` - writes PARENT on every child
//! - `CalcDepthVisitor` - writes DEPTH (root is 0, child = parent + 1)
//! - `PrintVisitor` - indented dump of the decorated tree, including
//!   symbol tables and inferred types where present

use crate::ast::ast::{Ast, Node, NodeId, NodeKind};
use crate::ast::attributes::{DEPTH, INFERRED_TYPE, PARENT, SYMBOL_TABLE};
use crate::visitor::visitor::Visitor;

pub struct SetParentVisitor;

impl Visitor for SetParentVisitor {
    fn previsit_default(&mut self, ast: &mut Ast, node: NodeId) {
        for child in ast.children(node) {
            ast.node_mut(child).attributes.set(PARENT, node);
        }
    }
}

/// Requires `SetParentVisitor` to have run first.
pub struct CalcDepthVisitor;

impl Visitor for CalcDepthVisitor {
    fn previsit_default(&mut self, ast: &mut Ast, node: NodeId) {
        let parent = ast.node(node).attributes.get(PARENT).copied();
        let depth = match parent {
            Some(parent) => *ast.node(parent).attributes.expect(DEPTH) + 1,
            None => 0,
        };
        ast.node_mut(node).attributes.set(DEPTH, depth);
    }
}

/// Renders the decorated tree into a string buffer.
pub struct PrintVisitor<'a> {
    output: &'a mut String,
}

impl<'a> PrintVisitor<'a> {
    pub fn new(output: &'a mut String) -> Self {
        PrintVisitor { output }
    }
}

fn describe(node: &Node) -> String {
    match &node.kind {
        NodeKind::Program { .. } => String::from("Program"),
        NodeKind::VarDecl {
            name,
            ty,
            is_array,
            array_length,
        } => {
            if *is_array {
                format!("VarDecl {} : {} [{}]", name, ty, array_length)
            } else {
                format!("VarDecl {} : {}", name, ty)
            }
        }
        NodeKind::FuncDecl {
            name,
            return_type,
            parameters,
            ..
        } => {
            let params = parameters
                .iter()
                .map(|param| format!("{} {}", param.ty, param.name))
                .collect::<Vec<String>>()
                .join(", ");
            format!("FuncDecl {} ({}) -> {}", name, params, return_type)
        }
        NodeKind::Block { .. } => String::from("Block"),
        NodeKind::Assignment { .. } => String::from("Assignment"),
        NodeKind::Conditional { .. } => String::from("Conditional"),
        NodeKind::WhileLoop { .. } => String::from("WhileLoop"),
        NodeKind::Return { .. } => String::from("Return"),
        NodeKind::Break => String::from("Break"),
        NodeKind::Continue => String::from("Continue"),
        NodeKind::BinaryOp { op, .. } => format!("BinaryOp {}", op),
        NodeKind::UnaryOp { op, .. } => format!("UnaryOp {}", op),
        NodeKind::Location { name, .. } => format!("Location {}", name),
        NodeKind::FuncCall { name, .. } => format!("FuncCall {}", name),
        NodeKind::Literal { value } => format!("Literal {}", value),
    }
}

impl Visitor for PrintVisitor<'_> {
    fn previsit_default(&mut self, ast: &mut Ast, node: NodeId) {
        let depth = ast.node(node).attributes.get(DEPTH).copied().unwrap_or(0);
        let indent = "  ".repeat(depth as usize);

        let current = ast.node(node);
        self.output.push_str(&indent);
        self.output.push_str(&describe(current));
        if let Some(inferred) = current.attributes.get(INFERRED_TYPE) {
            self.output.push_str(&format!(" : {}", inferred));
        }
        self.output
            .push_str(&format!(" [line {}]\n", current.source_line));

        if let Some(scope) = current.attributes.get(SYMBOL_TABLE).copied() {
            for symbol in &ast.scope(scope).symbols {
                self.output.push_str(&format!("{}  [{}]\n", indent, symbol));
            }
        }
    }
}

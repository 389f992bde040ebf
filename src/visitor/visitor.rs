//! The traversal protocol.
//!
//! A pass implements `Visitor` and overrides only the hooks it needs; every
//! hook defaults to the shared `previsit_default`/`postvisit_default`
//! no-ops. `traverse` drives a single-threaded depth-first walk, calling
//! the previsit hook, the children in order (with `invisit_binary_op`
//! between the two operands of a binary operator), then the postvisit hook.
//! Passes never change the tree's structure, only its attributes.

use crate::ast::ast::{Ast, NodeId, NodeType};

pub trait Visitor {
    fn previsit_default(&mut self, _ast: &mut Ast, _node: NodeId) {}
    fn postvisit_default(&mut self, _ast: &mut Ast, _node: NodeId) {}

    fn previsit_program(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_program(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_var_decl(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_var_decl(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_func_decl(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_func_decl(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_block(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_block(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_assignment(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_assignment(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_conditional(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_conditional(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_while_loop(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_while_loop(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_return(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_return(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_break(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_break(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_continue(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_continue(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_binary_op(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    /// Called between the left and right operands of a binary operator.
    fn invisit_binary_op(&mut self, _ast: &mut Ast, _node: NodeId) {}
    fn postvisit_binary_op(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_unary_op(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_unary_op(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_location(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_location(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_func_call(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_func_call(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }

    fn previsit_literal(&mut self, ast: &mut Ast, node: NodeId) {
        self.previsit_default(ast, node);
    }
    fn postvisit_literal(&mut self, ast: &mut Ast, node: NodeId) {
        self.postvisit_default(ast, node);
    }
}

fn dispatch_previsit<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, node: NodeId) {
    match ast.node(node).kind.node_type() {
        NodeType::Program => visitor.previsit_program(ast, node),
        NodeType::VarDecl => visitor.previsit_var_decl(ast, node),
        NodeType::FuncDecl => visitor.previsit_func_decl(ast, node),
        NodeType::Block => visitor.previsit_block(ast, node),
        NodeType::Assignment => visitor.previsit_assignment(ast, node),
        NodeType::Conditional => visitor.previsit_conditional(ast, node),
        NodeType::WhileLoop => visitor.previsit_while_loop(ast, node),
        NodeType::Return => visitor.previsit_return(ast, node),
        NodeType::Break => visitor.previsit_break(ast, node),
        NodeType::Continue => visitor.previsit_continue(ast, node),
        NodeType::BinaryOp => visitor.previsit_binary_op(ast, node),
        NodeType::UnaryOp => visitor.previsit_unary_op(ast, node),
        NodeType::Location => visitor.previsit_location(ast, node),
        NodeType::FuncCall => visitor.previsit_func_call(ast, node),
        NodeType::Literal => visitor.previsit_literal(ast, node),
    }
}

fn dispatch_postvisit<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, node: NodeId) {
    match ast.node(node).kind.node_type() {
        NodeType::Program => visitor.postvisit_program(ast, node),
        NodeType::VarDecl => visitor.postvisit_var_decl(ast, node),
        NodeType::FuncDecl => visitor.postvisit_func_decl(ast, node),
        NodeType::Block => visitor.postvisit_block(ast, node),
        NodeType::Assignment => visitor.postvisit_assignment(ast, node),
        NodeType::Conditional => visitor.postvisit_conditional(ast, node),
        NodeType::WhileLoop => visitor.postvisit_while_loop(ast, node),
        NodeType::Return => visitor.postvisit_return(ast, node),
        NodeType::Break => visitor.postvisit_break(ast, node),
        NodeType::Continue => visitor.postvisit_continue(ast, node),
        NodeType::BinaryOp => visitor.postvisit_binary_op(ast, node),
        NodeType::UnaryOp => visitor.postvisit_unary_op(ast, node),
        NodeType::Location => visitor.postvisit_location(ast, node),
        NodeType::FuncCall => visitor.postvisit_func_call(ast, node),
        NodeType::Literal => visitor.postvisit_literal(ast, node),
    }
}

/// Depth-first walk of the subtree rooted at `node`.
pub fn traverse<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, node: NodeId) {
    let node_type = ast.node(node).kind.node_type();
    dispatch_previsit(visitor, ast, node);

    let children = ast.children(node);
    if node_type == NodeType::BinaryOp {
        traverse(visitor, ast, children[0]);
        visitor.invisit_binary_op(ast, node);
        traverse(visitor, ast, children[1]);
    } else {
        for child in children {
            traverse(visitor, ast, child);
        }
    }

    dispatch_postvisit(visitor, ast, node);
}

/// Runs a full traversal from the root and drops the visitor.
pub fn run_pass<V: Visitor>(mut visitor: V, ast: &mut Ast) {
    let root = ast.root();
    traverse(&mut visitor, ast, root);
}

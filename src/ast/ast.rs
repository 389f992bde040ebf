//! The arena-backed Abstract Syntax Tree.
//!
//! All nodes live in one `Vec` owned by the `Ast`; every cross-reference
//! (children, parent attribute, scope attachment) is a plain index. This
//! keeps ownership single-rooted: dropping the `Ast` releases every node,
//! attribute, and scope exactly once, and no back-edge can dangle.

use std::fmt::Display;

use crate::ast::attributes::Attributes;
use crate::ast::types::{BinaryOp, DecafType, UnaryOp};
use crate::symbols::symbols::{ScopeId, SymbolTable};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A formal parameter: always a scalar by grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: DecafType,
}

/// A literal value; the variant doubles as the type discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    Bool(bool),
    Str(String),
}

impl LiteralValue {
    pub fn ty(&self) -> DecafType {
        match self {
            LiteralValue::Int(_) => DecafType::Int,
            LiteralValue::Bool(_) => DecafType::Bool,
            LiteralValue::Str(_) => DecafType::Str,
        }
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{}", value),
            LiteralValue::Bool(value) => write!(f, "{}", value),
            LiteralValue::Str(value) => write!(f, "{:?}", value),
        }
    }
}

/// The kind-specific payload of a node. Child links are `NodeId`s; matching
/// on this enum is exhaustive, so adding a kind breaks every dispatch site
/// at compile time instead of falling through at runtime.
#[derive(Debug)]
pub enum NodeKind {
    Program {
        variables: Vec<NodeId>,
        functions: Vec<NodeId>,
    },
    VarDecl {
        name: String,
        ty: DecafType,
        is_array: bool,
        array_length: i32,
    },
    FuncDecl {
        name: String,
        return_type: DecafType,
        parameters: Vec<Param>,
        body: NodeId,
    },
    Block {
        variables: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Assignment {
        location: NodeId,
        value: NodeId,
    },
    Conditional {
        condition: NodeId,
        if_block: NodeId,
        else_block: Option<NodeId>,
    },
    WhileLoop {
        condition: NodeId,
        body: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    Break,
    Continue,
    BinaryOp {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    UnaryOp {
        op: UnaryOp,
        child: NodeId,
    },
    Location {
        name: String,
        index: Option<NodeId>,
    },
    FuncCall {
        name: String,
        arguments: Vec<NodeId>,
    },
    Literal {
        value: LiteralValue,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Program { .. } => NodeType::Program,
            NodeKind::VarDecl { .. } => NodeType::VarDecl,
            NodeKind::FuncDecl { .. } => NodeType::FuncDecl,
            NodeKind::Block { .. } => NodeType::Block,
            NodeKind::Assignment { .. } => NodeType::Assignment,
            NodeKind::Conditional { .. } => NodeType::Conditional,
            NodeKind::WhileLoop { .. } => NodeType::WhileLoop,
            NodeKind::Return { .. } => NodeType::Return,
            NodeKind::Break => NodeType::Break,
            NodeKind::Continue => NodeType::Continue,
            NodeKind::BinaryOp { .. } => NodeType::BinaryOp,
            NodeKind::UnaryOp { .. } => NodeType::UnaryOp,
            NodeKind::Location { .. } => NodeType::Location,
            NodeKind::FuncCall { .. } => NodeType::FuncCall,
            NodeKind::Literal { .. } => NodeType::Literal,
        }
    }
}

/// Fieldless tag mirroring `NodeKind`, used for dispatch and debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Program,
    VarDecl,
    FuncDecl,
    Block,
    Assignment,
    Conditional,
    WhileLoop,
    Return,
    Break,
    Continue,
    BinaryOp,
    UnaryOp,
    Location,
    FuncCall,
    Literal,
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub source_line: u32,
    pub attributes: Attributes,
}

/// The tree: a node arena, a scope arena, and the root id.
///
/// Scopes live here rather than in a separate structure so that symbol
/// lookup needs nothing but `&Ast`.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    scopes: Vec<SymbolTable>,
    root: NodeId,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: vec![],
            scopes: vec![],
            root: NodeId(0),
        }
    }

    /// Appends a node and returns its id.
    pub fn add_node(&mut self, kind: NodeKind, source_line: u32) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            source_line,
            attributes: Attributes::new(),
        });
        id
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a scope and returns its id.
    pub fn add_scope(&mut self, table: SymbolTable) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(table);
        id
    }

    pub fn scope(&self, id: ScopeId) -> &SymbolTable {
        &self.scopes[id.index()]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut SymbolTable {
        &mut self.scopes[id.index()]
    }

    /// The children of a node in traversal order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).kind {
            NodeKind::Program {
                variables,
                functions,
            } => variables.iter().chain(functions.iter()).copied().collect(),
            NodeKind::VarDecl { .. } => vec![],
            NodeKind::FuncDecl { body, .. } => vec![*body],
            NodeKind::Block {
                variables,
                statements,
            } => variables.iter().chain(statements.iter()).copied().collect(),
            NodeKind::Assignment { location, value } => vec![*location, *value],
            NodeKind::Conditional {
                condition,
                if_block,
                else_block,
            } => {
                let mut children = vec![*condition, *if_block];
                if let Some(else_block) = else_block {
                    children.push(*else_block);
                }
                children
            }
            NodeKind::WhileLoop { condition, body } => vec![*condition, *body],
            NodeKind::Return { value } => value.iter().copied().collect(),
            NodeKind::Break => vec![],
            NodeKind::Continue => vec![],
            NodeKind::BinaryOp { left, right, .. } => vec![*left, *right],
            NodeKind::UnaryOp { child, .. } => vec![*child],
            NodeKind::Location { index, .. } => index.iter().copied().collect(),
            NodeKind::FuncCall { arguments, .. } => arguments.clone(),
            NodeKind::Literal { .. } => vec![],
        }
    }
}

//! Symbols, scopes, and name lookup.
//!
//! A `SymbolTable` is one lexical scope; scopes live in the tree's arena
//! and chain to their parent by `ScopeId`. `lookup_symbol` resolves a name
//! from any node in two phases: climb parent links to the nearest node that
//! owns a scope, then walk the scope chain outward.

use std::fmt::Display;

use crate::ast::ast::{Ast, NodeId, Param};
use crate::ast::attributes::{PARENT, SYMBOL_TABLE};
use crate::ast::types::DecafType;

/// Index of a scope in the tree's scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub(crate) fn new(index: usize) -> Self {
        ScopeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Scalar,
    Array { length: i32 },
    Function { parameters: Vec<Param> },
}

/// Where a later allocation stage will place the symbol. Everything starts
/// `Unknown`; analysis never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Unknown,
    StaticVar,
    StackParam,
    StackLocal,
}

/// A named declaration. `ty` is the variable type, or the return type for
/// functions. `storage` and `offset` are the only fields mutated after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: DecafType,
    pub kind: SymbolKind,
    pub storage: StorageClass,
    pub offset: i32,
}

impl Symbol {
    pub fn scalar(name: &str, ty: DecafType) -> Self {
        Symbol {
            name: String::from(name),
            ty,
            kind: SymbolKind::Scalar,
            storage: StorageClass::Unknown,
            offset: 0,
        }
    }

    pub fn array(name: &str, ty: DecafType, length: i32) -> Self {
        Symbol {
            name: String::from(name),
            ty,
            kind: SymbolKind::Array { length },
            storage: StorageClass::Unknown,
            offset: 0,
        }
    }

    pub fn function(name: &str, return_type: DecafType, parameters: Vec<Param>) -> Self {
        Symbol {
            name: String::from(name),
            ty: return_type,
            kind: SymbolKind::Function { parameters },
            storage: StorageClass::Unknown,
            offset: 0,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            SymbolKind::Scalar => write!(f, "{} : {}", self.name, self.ty),
            SymbolKind::Array { length } => {
                write!(f, "{} : {} [{}]", self.name, self.ty, length)
            }
            SymbolKind::Function { parameters } => {
                let params = parameters
                    .iter()
                    .map(|param| param.ty.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{} : ({}) -> {}", self.name, params, self.ty)
            }
        }
    }
}

/// One lexical scope: symbols in insertion order plus a link to the
/// enclosing scope.
#[derive(Debug, Default)]
pub struct SymbolTable {
    pub symbols: Vec<Symbol>,
    pub parent: Option<ScopeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: vec![],
            parent: None,
        }
    }

    pub fn with_parent(parent: ScopeId) -> Self {
        SymbolTable {
            symbols: vec![],
            parent: Some(parent),
        }
    }

    /// Inserts unconditionally; duplicate names are an analysis-time
    /// diagnostic, not an insertion failure.
    pub fn insert(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Exact-name scan in insertion order; first match wins.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }
}

/// Resolves a name starting from a scope, walking the parent chain.
pub fn scope_lookup<'a>(ast: &'a Ast, scope: ScopeId, name: &str) -> Option<&'a Symbol> {
    let table = ast.scope(scope);
    if let Some(symbol) = table.lookup_local(name) {
        return Some(symbol);
    }
    match table.parent {
        Some(parent) => scope_lookup(ast, parent, name),
        None => None,
    }
}

/// Resolves a name from an arbitrary node: climb PARENT links to the
/// nearest node carrying a symbol table, then search the scope chain.
pub fn lookup_symbol<'a>(ast: &'a Ast, node: NodeId, name: &str) -> Option<&'a Symbol> {
    let mut current = Some(node);
    while let Some(id) = current {
        if let Some(scope) = ast.node(id).attributes.get(SYMBOL_TABLE) {
            return scope_lookup(ast, *scope, name);
        }
        current = ast.node(id).attributes.get(PARENT).copied();
    }
    None
}

//! Per-node attribute store with typed keys.
//!
//! Passes decorate the tree by writing attributes instead of mutating its
//! structure. An `AttrKey<T>` names an attribute and carries its value type,
//! so reads come back as `&T` with no casting at the call site. Values are
//! stored as `Box<dyn Any>` and downcast through the key.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::ast::ast::NodeId;
use crate::ast::types::DecafType;
use crate::symbols::symbols::ScopeId;

/// Id of the syntactic parent, written by `SetParentVisitor`.
pub const PARENT: AttrKey<NodeId> = AttrKey::new("parent");

/// Distance from the root (root is 0), written by `CalcDepthVisitor`.
pub const DEPTH: AttrKey<u32> = AttrKey::new("depth");

/// Scope owned by this node, written by `SymbolTableBuilder` on
/// Program/FuncDecl/Block nodes.
pub const SYMBOL_TABLE: AttrKey<ScopeId> = AttrKey::new("symbolTable");

/// Type inferred for this expression, written by the analyzer.
pub const INFERRED_TYPE: AttrKey<DecafType> = AttrKey::new("type");

/// A typed attribute name. Two keys refer to the same attribute exactly
/// when their names are equal.
pub struct AttrKey<T> {
    name: &'static str,
    _marker: PhantomData<T>,
}

impl<T> AttrKey<T> {
    pub const fn new(name: &'static str) -> Self {
        AttrKey {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for AttrKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AttrKey<T> {}

/// The attribute list carried by every node.
#[derive(Default)]
pub struct Attributes {
    entries: Vec<(&'static str, Box<dyn Any>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes { entries: vec![] }
    }

    /// Stores a value under the key, replacing (and dropping) any value the
    /// key already held.
    pub fn set<T: 'static>(&mut self, key: AttrKey<T>, value: T) {
        for entry in self.entries.iter_mut() {
            if entry.0 == key.name {
                entry.1 = Box::new(value);
                return;
            }
        }
        self.entries.push((key.name, Box::new(value)));
    }

    pub fn has<T>(&self, key: AttrKey<T>) -> bool {
        self.entries.iter().any(|entry| entry.0 == key.name)
    }

    pub fn get<T: 'static>(&self, key: AttrKey<T>) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.0 == key.name)
            .and_then(|entry| entry.1.downcast_ref::<T>())
    }

    /// Like `get`, but a missing key is a contract violation between passes
    /// (e.g. reading DEPTH before `CalcDepthVisitor` ran) and panics rather
    /// than producing an input diagnostic.
    pub fn expect<T: 'static>(&self, key: AttrKey<T>) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("missing required attribute '{}'", key.name),
        }
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.0))
            .finish()
    }
}

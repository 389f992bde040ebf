//! Abstract Syntax Tree module for the front end.
//!
//! This module contains the tree itself and everything nodes carry:
//!
//! - The node arena, node kinds, and child ordering
//! - The language types and operator sets
//! - The typed per-node attribute store that passes decorate

pub mod ast;
pub mod attributes;
pub mod types;

//! Symbol and scope module.
//!
//! This module contains:
//!
//! - Symbols (scalars, arrays, functions) and their scopes
//! - Two-phase name lookup from any node in the tree
//! - The visitor pass that builds and attaches the scopes

pub mod builder;
pub mod symbols;

#[cfg(test)]
mod tests;

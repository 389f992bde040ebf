//! Semantic analysis module.
//!
//! This module contains the type checker: the analyzer visitor, the
//! diagnostic type it accumulates, and the `analyze` entry point.

pub mod analysis;

#[cfg(test)]
mod tests;

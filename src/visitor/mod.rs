//! Tree traversal module.
//!
//! This module contains the visitor protocol used by every pass over the
//! tree, plus the basic decoration passes (parent links, depths, and the
//! debug printer).

pub mod passes;
pub mod visitor;

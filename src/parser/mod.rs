//! Syntax analysis module for the front end.
//!
//! This module contains the parser that converts a stream of tokens into
//! the Abstract Syntax Tree. Declarations and statements use recursive
//! descent; expressions use Pratt parsing driven by lookup tables of
//! handler functions and binding powers.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

//! Error handling module for the front end.
//!
//! This module defines the fatal error type raised by the lexer and parser,
//! including the error name and tip text shown by the driver.

pub mod errors;

#[cfg(test)]
mod tests;

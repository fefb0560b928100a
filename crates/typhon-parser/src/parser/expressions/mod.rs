//! Expression parsing module
//!
//! This module implements expression parsing using Pratt parsing for correct
//! operator precedence and associativity.

mod comprehensions;
mod containers;
mod core;
mod helpers;
mod literals;
mod operators;
mod special;

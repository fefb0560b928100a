//! Abstract Syntax Tree (AST) definitions for the Typhon programming language.

#[macro_use]
pub mod macros;

pub mod ast;
pub mod nodes;
pub mod visitor;

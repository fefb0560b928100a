//! Control flow and semantic validation analysis.
//!
//! This module provides the infrastructure for semantic validation including:
//! - Control flow graph construction and analysis
//! - Definite assignment checking
//! - Dead code detection

mod cfg_builder;
mod control_flow;
mod dead_code;
mod definite_assignment;

pub use cfg_builder::build_module_cfg;
pub use control_flow::*;
pub use dead_code::*;
pub use definite_assignment::*;

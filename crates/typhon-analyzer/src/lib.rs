//! Control-flow graph construction for the Typhon programming language.
//!
//! This crate walks a parsed module and builds a [`ControlFlowGraph`] per
//! scope (module, function, class), along with two analyses that consume a
//! built graph:
//!
//! - **Graph construction** ([`analysis::build_module_cfg`]): desugars loops,
//!   branches, comprehensions, and generator expressions into basic blocks
//!   and guarded edges.
//! - **Dead code detection** ([`analysis::DeadCodeDetector`]): flags
//!   unreachable blocks and unused variables.
//! - **Definite assignment** ([`analysis::DefiniteAssignmentAnalyzer`]):
//!   flags variables read before they are assigned on some path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use typhon_analyzer::analysis::build_module_cfg;
//!
//! let cfg = build_module_cfg(&mut ast, module_id)?;
//! println!("{} blocks", cfg.block_count());
//! ```

pub mod analysis;
pub mod error;

pub use analysis::{build_module_cfg, ControlFlowGraph};
pub use error::CfgError;

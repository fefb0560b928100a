//! Errors raised by control-flow construction and the analyses built on it.
//!
//! [`analysis::build_module_cfg`](crate::analysis::build_module_cfg) itself
//! only ever fails on one class of structurally invalid input: a
//! `break`/`continue` with no enclosing loop. Everything else it
//! encounters — unsupported constructs, malformed comprehensions — is
//! logged and otherwise tolerated, not raised. The remaining variant here is
//! raised by the definite-assignment analysis that consumes a built CFG.

use thiserror::Error;
use typhon_source::types::Span;

/// Errors that can occur while building or analyzing a control-flow graph.
#[derive(Debug, Error, Clone)]
pub enum CfgError {
    /// `break` encountered with an empty loop-exit stack.
    #[error("'break' statement outside loop")]
    BreakOutsideLoop {
        /// The location of the break statement.
        span: Span,
    },

    /// `continue` encountered with an empty loop-guard stack.
    #[error("'continue' statement outside loop")]
    ContinueOutsideLoop {
        /// The location of the continue statement.
        span: Span,
    },

    /// A variable was read on some path before it was assigned on that path.
    #[error("Variable '{name}' used before assignment")]
    UseBeforeAssignment {
        /// The variable name.
        name: String,
        /// The location of the use.
        span: Span,
    },
}

impl CfgError {
    /// Returns the span associated with this error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::BreakOutsideLoop { span }
            | Self::ContinueOutsideLoop { span }
            | Self::UseBeforeAssignment { span, .. } => *span,
        }
    }
}

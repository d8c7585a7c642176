//! The analysis core: wires the resolver, symbol collector, and
//! validator pipeline into the public `analyze` entry points (§6) and
//! the `Program` they return (§3, §4.4).

mod analyze;
mod collector;
mod program;

pub use analyze::{analyze, analyze_ast, analyze_ast_with_cancellation, analyze_with_cancellation};
pub use program::{Program, ProgramFile};
pub use vdl_diagnostic::CancellationToken;

//! Positions, spans, and diagnostics shared across the VDL analysis core.
//!
//! Kept dependency-free (beyond `serde`) so every other crate in the
//! workspace — the resolver, the validators, the LSP driver — can sit
//! on top of it without pulling in unrelated machinery.

mod cancel;
mod codes;
mod position;
mod suggest;

pub use cancel::CancellationToken;
pub use codes::*;
pub use position::{offset_to_line_column, Position, Span};
pub use suggest::{fuzzy_suggestions, Candidate};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single diagnostic produced anywhere in the pipeline.
///
/// Ordering among diagnostics is never guaranteed and uniqueness is
/// never enforced: a validator may legitimately emit the same `code`
/// at several different positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub start: Position,
    pub end: Position,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: Span, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            file: span.start.filename.clone(),
            start: span.start,
            end: span.end,
            code,
            message: message.into(),
        }
    }

    pub fn at(pos: Position, code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Span::point(pos), code, message)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl std::fmt::Display for Diagnostic {
    /// The human-readable wire format: `file:line:column: error[CODE]: message`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: error[{}]: {}",
            self.file.display(),
            self.start.line,
            self.start.column,
            self.code,
            self.message
        )
    }
}

/// Append `did you mean "X", "Y", or "Z"?` to a message when `candidates`
/// is non-empty; otherwise return `message` unchanged.
pub fn with_suggestion(message: impl Into<String>, candidates: &[Candidate]) -> String {
    let mut message = message.into();
    if candidates.is_empty() {
        return message;
    }
    let names: Vec<String> = candidates.iter().map(|c| format!("\"{}\"", c.name)).collect();
    message.push_str(" (did you mean ");
    match names.len() {
        1 => message.push_str(&names[0]),
        _ => {
            let (last, rest) = names.split_last().unwrap();
            message.push_str(&rest.join(", "));
            message.push_str(" or ");
            message.push_str(last);
        }
    }
    message.push_str("?)");
    message
}

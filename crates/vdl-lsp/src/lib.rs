//! LSP-facing glue around the analysis core (§4.5, §6, §7): wire-format
//! conversions, advertised server capabilities, and the document-sync
//! driver that decides when to (re)analyze. No transport or JSON-RPC
//! dispatch lives here — that belongs to whatever binary embeds this
//! crate.

mod capabilities;
mod driver;
mod wire;

pub use capabilities::server_capabilities;
pub use driver::{AnalysisResult, LspDriver};
pub use wire::{path_to_uri, to_lsp_diagnostic, uri_to_path};

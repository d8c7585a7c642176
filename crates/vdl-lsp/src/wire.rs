//! Diagnostic and path conversion to the LSP wire format (§6).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use lsp_types::{Diagnostic as LspDiagnostic, DiagnosticSeverity, Position as LspPosition, Range, Uri};

/// Convert a domain [`vdl_diagnostic::Diagnostic`] to its LSP wire
/// shape: zero-based `{line, character}` positions, severity `Error`,
/// and `source: "vdl"`.
pub fn to_lsp_diagnostic(diag: &vdl_diagnostic::Diagnostic) -> LspDiagnostic {
    let (start_line, start_col) = diag.start.to_zero_based();
    let (end_line, end_col) = diag.end.to_zero_based();

    LspDiagnostic {
        range: Range {
            start: LspPosition { line: start_line, character: start_col },
            end: LspPosition { line: end_line, character: end_col },
        },
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(lsp_types::NumberOrString::String(diag.code.to_string())),
        code_description: None,
        source: Some("vdl".to_string()),
        message: diag.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

/// Convert a file `file://` URI to an absolute filesystem path.
///
/// `lsp-types`' `Uri` (a thin `fluent_uri` newtype) has no
/// path-conversion helpers of its own, so this routes through `url`'s
/// RFC 3986 file-URI handling and re-parses the result.
pub fn uri_to_path(uri: &Uri) -> Option<PathBuf> {
    let url = url::Url::parse(uri.as_str()).ok()?;
    url.to_file_path().ok()
}

/// Convert an absolute filesystem path to a `file://` URI.
pub fn path_to_uri(path: &Path) -> Option<Uri> {
    let url = url::Url::from_file_path(path).ok()?;
    Uri::from_str(url.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vdl_diagnostic::{Diagnostic, Position, Span};

    #[test]
    fn converts_one_based_positions_to_zero_based() {
        let span = Span::new(Position::new("/a.vdl", 4, 10, 0), Position::new("/a.vdl", 4, 15, 0));
        let diag = Diagnostic::new(span, vdl_diagnostic::E201_TYPE_NOT_DECLARED, "type \"Usr\" is not declared");
        let lsp = to_lsp_diagnostic(&diag);
        assert_eq!(lsp.range.start, LspPosition { line: 3, character: 9 });
        assert_eq!(lsp.range.end, LspPosition { line: 3, character: 14 });
        assert_eq!(lsp.source.as_deref(), Some("vdl"));
        assert_eq!(lsp.code, Some(lsp_types::NumberOrString::String("E201".to_string())));
    }

    #[test]
    fn path_uri_round_trips() {
        let path = PathBuf::from("/tmp/main.vdl");
        let uri = path_to_uri(&path).expect("valid uri");
        assert_eq!(uri_to_path(&uri).as_deref(), Some(path.as_path()));
    }
}

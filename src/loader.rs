use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::document::{Document, LineEnding};
use crate::error::PipelineError;

const BOM: char = '\u{FEFF}';

/// Classify the line ending by the first terminator in the text.
///
/// Text without any `\n` (including empty text) is treated as LF.
pub fn detect_line_ending(text: &str) -> LineEnding {
    match text.find('\n') {
        Some(idx) if text[..idx].ends_with('\r') => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}

/// Read the file at `path` into a fresh [`Document`].
pub fn load(path: &Path) -> Result<Document, PipelineError> {
    let read_error = |source: io::Error| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(read_error)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| read_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let text = match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    };

    let line_ending = detect_line_ending(&text);
    debug!(path = %path.display(), bytes = text.len(), ?line_ending, "loaded");

    Ok(Document::new(text, line_ending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_lf() {
        assert_eq!(detect_line_ending("a=1\nb=2\n"), LineEnding::Lf);
    }

    #[test]
    fn test_detect_crlf() {
        assert_eq!(detect_line_ending("a=1\r\nb=2\r\n"), LineEnding::CrLf);
    }

    #[test]
    fn test_detect_uses_first_terminator() {
        assert_eq!(detect_line_ending("a=1\nb=2\r\n"), LineEnding::Lf);
        assert_eq!(detect_line_ending("a=1\r\nb=2\n"), LineEnding::CrLf);
    }

    #[test]
    fn test_detect_defaults_to_lf() {
        assert_eq!(detect_line_ending(""), LineEnding::Lf);
        assert_eq!(detect_line_ending("single line"), LineEnding::Lf);
        // A lone CR is not a terminator
        assert_eq!(detect_line_ending("a=1\rb=2"), LineEnding::Lf);
    }

    #[test]
    fn test_load_reads_text_and_eol() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.ini");
        fs::write(&path, "[a]\r\nx=1\r\n").unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(doc.original, "[a]\r\nx=1\r\n");
        assert_eq!(doc.line_ending, LineEnding::CrLf);
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_load_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.ini");
        fs::write(&path, "\u{FEFF}[a]\nx=1\n").unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(doc.original, "[a]\nx=1\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ini");

        let err = load(&path).unwrap_err();
        match err {
            PipelineError::Read { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.ini");
        fs::write(&path, b"key=caf\xe9\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Read { ref source, .. } if source.kind() == io::ErrorKind::InvalidData
        ));
    }
}

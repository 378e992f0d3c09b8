//! Document loading.
//!
//! Sniffs the surface syntax (JSON vs YAML), decodes once into a neutral
//! tree to find out which dialect the input is written in, then decodes
//! strictly into exactly one of the two models.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::LoadError;
use crate::legacy::{LegacySpec, LEGACY_MARKER};
use crate::types::Document;

/// Surface syntax of the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
    Json,
    Yaml,
}

impl SurfaceFormat {
    /// JSON if the first non-whitespace byte is `{`, YAML otherwise.
    pub fn sniff(data: &[u8]) -> Self {
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => SurfaceFormat::Json,
            _ => SurfaceFormat::Yaml,
        }
    }

    fn decode<T: DeserializeOwned>(&self, content: &str) -> Result<T, LoadError> {
        match self {
            SurfaceFormat::Json => {
                serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
            }
            SurfaceFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml { source })
            }
        }
    }
}

/// Which document model the input is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Swagger 2.0, operations indexed by path then verb.
    Legacy,
    /// The flat endpoint list of [`Document`].
    Internal,
}

impl Dialect {
    /// Inspect a decoded root mapping for the legacy marker key.
    pub fn detect(root: &Map<String, Value>) -> Self {
        if root.contains_key(LEGACY_MARKER) {
            Dialect::Legacy
        } else {
            Dialect::Internal
        }
    }
}

/// Load a document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read, or a decode variant if the
/// content is malformed or has the wrong shape.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_bytes(&data)
}

/// Load a document from raw bytes.
///
/// # Errors
///
/// Returns `LoadError::InvalidUtf8` for non-UTF-8 input, otherwise as
/// [`load_document_str`].
pub fn load_document_bytes(data: &[u8]) -> Result<Document, LoadError> {
    let content = std::str::from_utf8(data).map_err(|source| LoadError::InvalidUtf8 { source })?;
    load_document_str(content)
}

/// Load a document from a string in either surface syntax and either dialect.
///
/// Empty or all-whitespace input yields an empty [`Document`].
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` / `LoadError::InvalidYaml` on malformed
/// syntax, a non-mapping root, or a field of the wrong type.
pub fn load_document_str(content: &str) -> Result<Document, LoadError> {
    if is_blank(content) {
        return Ok(Document::default());
    }

    let format = SurfaceFormat::sniff(content.as_bytes());

    // `~` or `null` as the whole YAML document
    let Some(root) = format.decode::<Option<Map<String, Value>>>(content)? else {
        return Ok(Document::default());
    };

    let dialect = Dialect::detect(&root);
    debug!(?format, ?dialect, "detected input shape");

    match dialect {
        Dialect::Legacy => {
            let spec: LegacySpec = format.decode(content)?;
            Ok(Document::from(spec))
        }
        Dialect::Internal => format.decode(content),
    }
}

/// Nothing but whitespace and `#` comment lines.
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn sniff_json_after_whitespace() {
        assert_eq!(SurfaceFormat::sniff(b"  \n\t{\"a\":1}"), SurfaceFormat::Json);
    }

    #[test]
    fn sniff_yaml_otherwise() {
        assert_eq!(SurfaceFormat::sniff(b"title: x"), SurfaceFormat::Yaml);
        assert_eq!(SurfaceFormat::sniff(b"---\n{}"), SurfaceFormat::Yaml);
        assert_eq!(SurfaceFormat::sniff(b"[1, 2]"), SurfaceFormat::Yaml);
        assert_eq!(SurfaceFormat::sniff(b""), SurfaceFormat::Yaml);
    }

    #[test]
    fn detect_legacy_marker() {
        let root: Map<String, Value> = serde_json::from_str(r#"{"swagger": "2.0"}"#).unwrap();
        assert_eq!(Dialect::detect(&root), Dialect::Legacy);

        let root: Map<String, Value> = serde_json::from_str(r#"{"openapi": "3.0.0"}"#).unwrap();
        assert_eq!(Dialect::detect(&root), Dialect::Internal);
    }

    #[test]
    fn empty_input_is_empty_document() {
        assert_eq!(load_document_str("").unwrap(), Document::default());
        assert_eq!(load_document_str(" \n\t ").unwrap(), Document::default());
    }

    #[test]
    fn comment_only_yaml_is_empty_document() {
        assert_eq!(
            load_document_str("# nothing here\n").unwrap(),
            Document::default()
        );
    }

    #[test]
    fn null_yaml_root_is_empty_document() {
        assert_eq!(load_document_str("~\n").unwrap(), Document::default());
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let result = load_document_str("{\"title\": ");
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn malformed_yaml_is_decode_error() {
        let result = load_document_str("title: [unclosed\n");
        assert!(matches!(result, Err(LoadError::InvalidYaml { .. })));
    }

    #[test]
    fn non_mapping_root_is_decode_error() {
        let result = load_document_str("- a\n- b\n");
        assert!(matches!(result, Err(LoadError::InvalidYaml { .. })));
    }

    #[test]
    fn type_mismatch_is_decode_error() {
        let result = load_document_str(r#"{"endpoints": "nope"}"#);
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));

        let result = load_document_str(r#"{"swagger": "2.0", "paths": []}"#);
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc = load_document_str(r#"{"title": "T", "x-extra": {"deep": [1, 2]}}"#).unwrap();
        assert_eq!(doc.title, "T");
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let result = load_document_bytes(&[b'{', 0xff, 0xfe, b'}']);
        assert!(matches!(result, Err(LoadError::InvalidUtf8 { .. })));
    }

    #[test]
    fn load_document_file_not_found() {
        let result = load_document(Path::new("/nonexistent/swagger.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_document_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "title: Pets\nversion: \"2\"").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.title, "Pets");
        assert_eq!(doc.version, "2");
    }

    #[test]
    fn load_document_zero_byte_file() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(load_document(file.path()).unwrap(), Document::default());
    }
}

//! Error types for loading, resolving and digesting API documents.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ComponentKind;

/// Errors while reading and decoding an API document.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Decode errors (exit code 2)
    #[error("input is not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// A reference descriptor whose name is missing from the components table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved {} reference: {reference}", .kind.singular())]
pub struct ReferenceError {
    /// Components sub-table the descriptor was looked up in.
    pub kind: ComponentKind,
    /// The descriptor exactly as written in the document.
    pub reference: String,
}

impl ReferenceError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Any failure of the load → resolve pipeline.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

impl DigestError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DigestError::Load(e) => e.exit_code(),
            DigestError::Reference(e) => e.exit_code(),
        }
    }
}

//! API Digest
//!
//! Turns an API description into a flat text summary suited for reading by
//! humans and language models.
//!
//! The pipeline has three stages:
//!
//! 1. **Load** - sniff JSON vs YAML, detect whether the document is Swagger 2.0
//!    (top-level `swagger` key) or already the flat endpoint-list form, and
//!    decode into a [`Document`]. Swagger paths are expanded to one
//!    [`Endpoint`] per HTTP verb.
//! 2. **Resolve** - replace every `#/components/<category>/<name>` reference
//!    with the component it names.
//! 3. **Render** - produce the text digest.
//!
//! # Example
//!
//! ```
//! use api_digest::{load_document_str, render, resolve};
//!
//! let input = r##"{
//!     "title": "Pets",
//!     "version": "1",
//!     "endpoints": [{
//!         "path": "/pets",
//!         "method": "get",
//!         "parameters": [{ "$ref": "#/components/parameters/Page" }]
//!     }],
//!     "components": {
//!         "parameters": {
//!             "Page": { "name": "page", "in": "query", "type": "integer" }
//!         }
//!     }
//! }"##;
//!
//! let doc = resolve(load_document_str(input).unwrap()).unwrap();
//! let text = render(&doc);
//!
//! assert!(text.contains("ENDPOINT: GET /pets"));
//! assert!(text.contains("  - page (integer, query, required=false)"));
//! ```
//!
//! # Reference Categories
//!
//! | Descriptor prefix | Looked up in |
//! |-------------------|--------------|
//! | `#/components/schemas/` | `components.schemas` |
//! | `#/components/parameters/` | `components.parameters` |
//! | `#/components/requestBodies/` | `components.requestBodies` |
//! | `#/components/responses/` | `components.responses` |
//!
//! Resolution is one level deep: a component that itself contains a
//! reference is copied as-is, apart from the schema nested in a resolved
//! parameter, request body or response.

mod de_util;
mod error;
mod legacy;
mod loader;
mod render;
mod resolver;
mod types;

use std::path::Path;

pub use error::{DigestError, LoadError, ReferenceError};
pub use legacy::{convert_legacy, LegacyInfo, LegacySpec, Operation, PathItem, LEGACY_MARKER};
pub use loader::{load_document, load_document_bytes, load_document_str, Dialect, SurfaceFormat};
pub use render::{collapse_whitespace, render, render_with};
pub use resolver::{resolve, resolve_in_place};
pub use types::{
    ComponentKind, Components, Document, Endpoint, MediaType, Parameter, RenderOptions,
    RequestBody, Response, Schema, DEFAULT_TRUNCATE_LENGTH, DEFAULT_TRUNCATE_THRESHOLD,
};

/// Load a file and resolve its references.
///
/// # Errors
///
/// Returns `DigestError::Load` if the file can't be read or decoded, or
/// `DigestError::Reference` if a reference can't be resolved.
pub fn load_and_resolve(path: &Path) -> Result<Document, DigestError> {
    let document = load_document(path)?;
    Ok(resolve(document)?)
}

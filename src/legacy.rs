//! Swagger 2.0 model and its conversion to the internal [`Document`].
//!
//! Swagger indexes operations by path, then by HTTP verb. Conversion walks
//! every path in document order and emits one [`Endpoint`] per verb that is
//! present, in a fixed verb order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::de_util::null_is_default;
use crate::types::{Document, Endpoint, Parameter, Response};

/// Top-level key whose presence marks a Swagger 2.0 document.
pub const LEGACY_MARKER: &str = "swagger";

/// A Swagger 2.0 specification, reduced to what the digest uses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacySpec {
    #[serde(deserialize_with = "null_is_default")]
    pub swagger: String,
    #[serde(deserialize_with = "null_is_default")]
    pub info: LegacyInfo,
    /// Parsed but not carried into the internal model.
    #[serde(deserialize_with = "null_is_default")]
    pub base_path: String,
    #[serde(deserialize_with = "null_is_default")]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyInfo {
    #[serde(deserialize_with = "null_is_default")]
    pub title: String,
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    #[serde(deserialize_with = "null_is_default")]
    pub version: String,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Present operations paired with their upper-case method, in emission order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("GET", &self.get),
            ("POST", &self.post),
            ("PUT", &self.put),
            ("DELETE", &self.delete),
            ("PATCH", &self.patch),
            ("HEAD", &self.head),
            ("OPTIONS", &self.options),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    #[serde(deserialize_with = "null_is_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    #[serde(deserialize_with = "null_is_default")]
    pub operation_id: String,
    /// Body parameters live here too; Swagger has no separate request body.
    #[serde(deserialize_with = "null_is_default")]
    pub parameters: Vec<Option<Parameter>>,
    #[serde(deserialize_with = "null_is_default")]
    pub responses: BTreeMap<String, Option<Response>>,
}

impl Operation {
    fn to_endpoint(&self, path: &str, method: &str) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method: method.to_string(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            request_body: None,
            responses: self.responses.clone(),
        }
    }
}

/// Convert a Swagger 2.0 spec into the internal model.
///
/// Every endpoint gets its own copies of parameters and responses. `servers`
/// is left empty and `basePath` is dropped.
pub fn convert_legacy(spec: &LegacySpec) -> Document {
    let endpoints: Vec<Endpoint> = spec
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| op.to_endpoint(path, method))
        })
        .collect();

    tracing::debug!(
        paths = spec.paths.len(),
        endpoints = endpoints.len(),
        "converted swagger document"
    );

    Document {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        description: spec.info.description.clone(),
        endpoints,
        servers: Vec::new(),
        components: None,
    }
}

impl From<LegacySpec> for Document {
    fn from(spec: LegacySpec) -> Self {
        convert_legacy(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> LegacySpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn one_endpoint_per_present_method() {
        let spec = spec(
            r#"{
                "swagger": "2.0",
                "paths": {
                    "/pets": {
                        "get": {"summary": "list"},
                        "post": {"summary": "create"}
                    },
                    "/pets/{id}": {
                        "delete": {"summary": "remove"}
                    }
                }
            }"#,
        );
        let doc = convert_legacy(&spec);
        let pairs: Vec<(&str, &str)> = doc
            .endpoints
            .iter()
            .map(|e| (e.method.as_str(), e.path.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("GET", "/pets"), ("POST", "/pets"), ("DELETE", "/pets/{id}")]
        );
    }

    #[test]
    fn method_order_is_fixed() {
        let spec = spec(
            r#"{"paths": {"/x": {
                "options": {}, "head": {}, "patch": {}, "delete": {},
                "put": {}, "post": {}, "get": {}
            }}}"#,
        );
        let methods: Vec<String> = convert_legacy(&spec)
            .endpoints
            .into_iter()
            .map(|e| e.method)
            .collect();
        assert_eq!(
            methods,
            ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"]
        );
    }

    #[test]
    fn info_copied_and_servers_empty() {
        let spec = spec(
            r#"{"swagger": "2.0", "basePath": "/v1",
                "info": {"title": "Petstore", "version": "1.0.0", "description": "Pets"}}"#,
        );
        let doc = Document::from(spec);
        assert_eq!(doc.title, "Petstore");
        assert_eq!(doc.version, "1.0.0");
        assert_eq!(doc.description, "Pets");
        assert!(doc.servers.is_empty());
        assert!(doc.endpoints.is_empty());
        assert!(doc.components.is_none());
    }

    #[test]
    fn request_body_left_empty() {
        let spec = spec(
            r#"{"paths": {"/pets": {"post": {
                "parameters": [{"name": "body", "in": "body", "required": true}]
            }}}}"#,
        );
        let doc = convert_legacy(&spec);
        let ep = &doc.endpoints[0];
        assert!(ep.request_body.is_none());
        assert_eq!(ep.parameters[0].as_ref().unwrap().location, "body");
    }

    #[test]
    fn endpoints_own_independent_parameters() {
        let spec = spec(
            r#"{"paths": {"/a": {
                "get": {"parameters": [{"name": "q", "in": "query"}]},
                "put": {"parameters": [{"name": "q", "in": "query"}]}
            }}}"#,
        );
        let mut doc = convert_legacy(&spec);
        doc.endpoints[0].parameters[0].as_mut().unwrap().name = "changed".into();
        assert_eq!(doc.endpoints[1].parameters[0].as_ref().unwrap().name, "q");
        // Source is untouched too
        let source = spec.paths["/a"].get.as_ref().unwrap();
        assert_eq!(source.parameters[0].as_ref().unwrap().name, "q");
    }

    #[test]
    fn paths_keep_document_order() {
        let spec = spec(r#"{"paths": {"/z": {"get": {}}, "/a": {"get": {}}, "/m": {"get": {}}}}"#);
        let paths: Vec<String> = convert_legacy(&spec)
            .endpoints
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, ["/z", "/a", "/m"]);
    }
}

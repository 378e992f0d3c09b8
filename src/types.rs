//! Internal document model and rendering options.
//!
//! This is the uniform, flat-endpoint-list shape every input ends up in,
//! whether it arrived in this form directly or was converted from a
//! Swagger 2.0 document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de_util::{empty_string_is_none, null_is_default};

/// Root of the internal document model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "null_is_default")]
    pub title: String,
    #[serde(deserialize_with = "null_is_default")]
    pub version: String,
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    #[serde(deserialize_with = "null_is_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_is_default")]
    pub servers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

/// A single (path, method) operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(deserialize_with = "null_is_default")]
    pub path: String,
    #[serde(deserialize_with = "null_is_default")]
    pub method: String,
    #[serde(deserialize_with = "null_is_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    /// Slots may be `None` when the input lists `null`.
    #[serde(deserialize_with = "null_is_default")]
    pub parameters: Vec<Option<Parameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Keyed by response code, iterated in sorted order.
    #[serde(deserialize_with = "null_is_default")]
    pub responses: BTreeMap<String, Option<Response>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "null_is_default")]
    pub name: String,
    /// "path", "query", "header" or "cookie"; not validated.
    #[serde(rename = "in", deserialize_with = "null_is_default")]
    pub location: String,
    #[serde(deserialize_with = "null_is_default")]
    pub required: bool,
    /// Inline type, as Swagger 2.0 non-body parameters carry it.
    #[serde(
        rename = "type",
        deserialize_with = "null_is_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(
        deserialize_with = "null_is_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        rename = "$ref",
        deserialize_with = "empty_string_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    /// Keyed by media type, e.g. `application/json`.
    #[serde(deserialize_with = "null_is_default")]
    pub content: BTreeMap<String, Option<MediaType>>,
    #[serde(
        rename = "$ref",
        deserialize_with = "empty_string_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "null_is_default")]
    pub description: String,
    #[serde(deserialize_with = "null_is_default")]
    pub content: BTreeMap<String, Option<MediaType>>,
    #[serde(
        rename = "$ref",
        deserialize_with = "empty_string_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Minimal schema: a type name or a reference, nothing nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type", deserialize_with = "null_is_default")]
    pub type_name: String,
    #[serde(
        rename = "$ref",
        deserialize_with = "empty_string_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
}

/// Shared definitions addressed by `#/components/<category>/<name>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
    #[serde(deserialize_with = "null_is_default")]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(deserialize_with = "null_is_default")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(deserialize_with = "null_is_default")]
    pub request_bodies: BTreeMap<String, RequestBody>,
    #[serde(deserialize_with = "null_is_default")]
    pub responses: BTreeMap<String, Response>,
}

impl Components {
    /// Look up the parameter a descriptor points at.
    pub fn lookup_parameter(&self, reference: &str) -> Option<&Parameter> {
        self.parameters
            .get(ComponentKind::Parameters.component_name(reference))
    }

    pub fn lookup_request_body(&self, reference: &str) -> Option<&RequestBody> {
        self.request_bodies
            .get(ComponentKind::RequestBodies.component_name(reference))
    }

    pub fn lookup_response(&self, reference: &str) -> Option<&Response> {
        self.responses
            .get(ComponentKind::Responses.component_name(reference))
    }

    pub fn lookup_schema(&self, reference: &str) -> Option<&Schema> {
        self.schemas
            .get(ComponentKind::Schemas.component_name(reference))
    }
}

/// The four sub-tables of [`Components`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    RequestBodies,
    Responses,
}

impl ComponentKind {
    /// Key of the sub-table, as it appears in a reference descriptor.
    pub fn category(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Responses => "responses",
        }
    }

    /// Name of a single entry, for error messages.
    pub fn singular(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schema",
            ComponentKind::Parameters => "parameter",
            ComponentKind::RequestBodies => "requestBody",
            ComponentKind::Responses => "response",
        }
    }

    /// Returns `#/components/<category>/`.
    pub fn prefix(&self) -> String {
        format!("#/components/{}/", self.category())
    }

    /// Extract the name segment from a descriptor.
    ///
    /// A descriptor without the expected prefix is returned verbatim, so a
    /// pointer into the wrong category only matches a component literally
    /// named after the whole string.
    pub fn component_name<'a>(&self, reference: &'a str) -> &'a str {
        reference
            .strip_prefix(self.prefix().as_str())
            .unwrap_or(reference)
    }
}

/// Default pre-truncation limit for endpoint descriptions.
pub const DEFAULT_TRUNCATE_THRESHOLD: usize = 20_000;

/// Default length an over-long description is cut down to.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 2_000;

/// Options for text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Descriptions longer than this (after whitespace collapsing) are truncated.
    pub truncate_threshold: usize,
    /// Byte length kept when truncating; cut on a character boundary.
    pub truncate_length: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            truncate_threshold: DEFAULT_TRUNCATE_THRESHOLD,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate_threshold(mut self, threshold: usize) -> Self {
        self.truncate_threshold = threshold;
        self
    }

    pub fn truncate_length(mut self, length: usize) -> Self {
        self.truncate_length = length;
        self
    }
}

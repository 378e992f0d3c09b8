//! Reference resolution - swaps `$ref` descriptors for the component they name.
//!
//! Resolution is a single pass over the endpoints. Each referencing object is
//! replaced wholesale by a copy of the component (fields are never merged),
//! and the copy's own `$ref` is cleared so the slot is spent. Components are
//! not re-scanned for references of their own.

use tracing::debug;

use crate::error::ReferenceError;
use crate::types::{ComponentKind, Components, Document, Endpoint, MediaType, Schema};

/// Resolve every component reference in a document.
///
/// A document without a components table is returned unchanged.
///
/// # Errors
///
/// Returns `ReferenceError` for the first descriptor whose name is missing
/// from its sub-table. Processing stops there and the document is dropped.
pub fn resolve(mut document: Document) -> Result<Document, ReferenceError> {
    resolve_in_place(&mut document)?;
    Ok(document)
}

/// Resolve references in a document the caller already owns.
///
/// On error the document may be partially resolved and should be discarded.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_in_place(document: &mut Document) -> Result<(), ReferenceError> {
    let Document {
        endpoints,
        components,
        ..
    } = document;

    let Some(components) = components.as_ref() else {
        return Ok(());
    };

    for endpoint in endpoints.iter_mut() {
        resolve_endpoint(endpoint, components)?;
    }

    Ok(())
}

// --- Internal implementation ---

fn resolve_endpoint(
    endpoint: &mut Endpoint,
    components: &Components,
) -> Result<(), ReferenceError> {
    for param in endpoint.parameters.iter_mut().flatten() {
        if let Some(reference) = &param.reference {
            let resolved = components
                .lookup_parameter(reference)
                .ok_or_else(|| unresolved(ComponentKind::Parameters, reference))?;
            debug!(%reference, path = %endpoint.path, "resolved parameter");
            *param = resolved.clone();
            param.reference = None;
        }
        resolve_schema(&mut param.schema, components)?;
    }

    if let Some(body) = endpoint.request_body.as_mut() {
        if let Some(reference) = &body.reference {
            let resolved = components
                .lookup_request_body(reference)
                .ok_or_else(|| unresolved(ComponentKind::RequestBodies, reference))?;
            debug!(%reference, path = %endpoint.path, "resolved requestBody");
            *body = resolved.clone();
            body.reference = None;
        }
        for media in body.content.values_mut().flatten() {
            resolve_media_type(media, components)?;
        }
    }

    // Sorted by code, so the lowest broken code is the one reported
    for (code, response) in endpoint.responses.iter_mut() {
        let Some(response) = response else {
            continue;
        };
        if let Some(reference) = &response.reference {
            let resolved = components
                .lookup_response(reference)
                .ok_or_else(|| unresolved(ComponentKind::Responses, reference))?;
            debug!(%reference, %code, path = %endpoint.path, "resolved response");
            *response = resolved.clone();
            response.reference = None;
        }
        for media in response.content.values_mut().flatten() {
            resolve_media_type(media, components)?;
        }
    }

    Ok(())
}

fn resolve_media_type(
    media: &mut MediaType,
    components: &Components,
) -> Result<(), ReferenceError> {
    resolve_schema(&mut media.schema, components)
}

fn resolve_schema(
    schema: &mut Option<Schema>,
    components: &Components,
) -> Result<(), ReferenceError> {
    let Some(schema) = schema else {
        return Ok(());
    };
    if let Some(reference) = &schema.reference {
        let resolved = components
            .lookup_schema(reference)
            .ok_or_else(|| unresolved(ComponentKind::Schemas, reference))?;
        debug!(%reference, "resolved schema");
        *schema = resolved.clone();
        schema.reference = None;
    }
    Ok(())
}

fn unresolved(kind: ComponentKind, reference: &str) -> ReferenceError {
    ReferenceError {
        kind,
        reference: reference.to_string(),
    }
}

//! Flattened text rendering of a resolved document.

use crate::types::{Document, Endpoint, Parameter, RenderOptions};

const NO_DOCUMENT_DESCRIPTION: &str = "(None or your description here)";
const NONE: &str = "(None)";
const UNKNOWN_TYPE: &str = "(unknown)";

/// Render a document with default options.
pub fn render(document: &Document) -> String {
    render_with(document, &RenderOptions::default())
}

/// Render a document as line-oriented text.
///
/// Output is deterministic: endpoints in document order, responses sorted
/// by code.
pub fn render_with(document: &Document, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "API: {} (v{})\n\n",
        document.title, document.version
    ));
    out.push_str("DESCRIPTION:\n");
    if document.description.is_empty() {
        out.push_str(NO_DOCUMENT_DESCRIPTION);
    } else {
        out.push_str(&document.description);
    }
    out.push_str("\n\n");

    for endpoint in &document.endpoints {
        render_endpoint(&mut out, endpoint, options);
    }

    out
}

/// Collapse every run of whitespace, line breaks included, to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_endpoint(out: &mut String, endpoint: &Endpoint, options: &RenderOptions) {
    out.push_str(&format!(
        "ENDPOINT: {} {}\n",
        endpoint.method.to_uppercase(),
        endpoint.path
    ));
    out.push_str(&format!("SUMMARY: {}\n", endpoint.summary));

    let description = truncate(collapse_whitespace(&endpoint.description), options);
    if description.is_empty() {
        out.push_str(&format!("DESCRIPTION: {}\n", NONE));
    } else {
        out.push_str(&format!("DESCRIPTION: {}\n", description));
    }

    // Absent slots count as no parameter at all
    out.push_str("PARAMETERS:\n");
    let mut params = endpoint.parameters.iter().flatten().peekable();
    if params.peek().is_none() {
        out.push_str(&format!("  {}\n", NONE));
    }
    for param in params {
        render_parameter(out, param);
    }

    out.push_str("REQUEST BODY: ");
    match &endpoint.request_body {
        Some(body) if !body.description.is_empty() => out.push_str(&body.description),
        _ => out.push_str("None"),
    }
    out.push('\n');

    out.push_str("RESPONSES:\n");
    let mut responses = endpoint
        .responses
        .iter()
        .filter_map(|(code, response)| response.as_ref().map(|r| (code, r)))
        .peekable();
    if responses.peek().is_none() {
        out.push_str(&format!("  {}\n", NONE));
    }
    for (code, response) in responses {
        out.push_str(&format!("  - {}: {}\n", code, response.description));
    }

    out.push_str("END\n");
}

fn render_parameter(out: &mut String, param: &Parameter) {
    out.push_str(&format!(
        "  - {} ({}, {}, required={})",
        param.name,
        parameter_type(param),
        param.location,
        param.required
    ));
    if !param.description.is_empty() {
        out.push_str(&format!(" : {}", param.description));
    }
    out.push('\n');
}

/// Inline type, then schema type, then a placeholder.
fn parameter_type(param: &Parameter) -> &str {
    if !param.type_name.is_empty() {
        &param.type_name
    } else if let Some(schema) = &param.schema {
        &schema.type_name
    } else {
        UNKNOWN_TYPE
    }
}

fn truncate(mut text: String, options: &RenderOptions) -> String {
    if text.len() > options.truncate_threshold {
        // Never keep more than the threshold itself
        let mut end = options
            .truncate_length
            .min(options.truncate_threshold)
            .min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    #[test]
    fn collapse_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a\n\n  b\tc"), "a b c");
        assert_eq!(collapse_whitespace("  \n\t "), "");
        assert_eq!(collapse_whitespace("single"), "single");
    }

    #[test]
    fn parameter_type_preference() {
        let mut param = Parameter {
            type_name: "string".into(),
            schema: Some(Schema {
                type_name: "integer".into(),
                reference: None,
            }),
            ..Default::default()
        };
        assert_eq!(parameter_type(&param), "string");

        param.type_name.clear();
        assert_eq!(parameter_type(&param), "integer");

        param.schema = None;
        assert_eq!(parameter_type(&param), "(unknown)");
    }

    #[test]
    fn truncate_over_threshold() {
        let options = RenderOptions::new().truncate_threshold(10).truncate_length(4);
        assert_eq!(truncate("abcdefghijk".into(), &options), "abcd...");
        assert_eq!(truncate("abcdefghij".into(), &options), "abcdefghij");
    }

    #[test]
    fn truncate_length_clamped_to_threshold() {
        let options = RenderOptions::new().truncate_threshold(5).truncate_length(10);
        assert_eq!(truncate("abcdefg".into(), &options), "abcde...");
    }

    #[test]
    fn truncate_respects_char_boundary() {
        let options = RenderOptions::new().truncate_threshold(3).truncate_length(2);
        // 'é' is two bytes; cutting at byte 2 would split it
        assert_eq!(truncate("aéb".into(), &options), "a...");
    }

    #[test]
    fn method_upper_cased() {
        let doc = Document {
            endpoints: vec![Endpoint {
                path: "/x".into(),
                method: "get".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(render(&doc).contains("ENDPOINT: GET /x\n"));
    }
}

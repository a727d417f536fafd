#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for splitting and following `$ref` strings.
//!
//! A reference whose document part is an absolute URL is classified as remote;
//! anything else with a document part is relative to the referencing document.

use percent_encoding::percent_decode_str;
use serde_json::Value;
use url::Url;

/// Where a reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReferenceKind {
    /// `#/...` inside the current document.
    Local,
    /// A path relative to the current document (e.g. `pet.yaml#/Pet`).
    Relative,
    /// An absolute URL.
    Remote,
}

/// A `$ref` split into document and fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedReference<'a> {
    /// Classification of the document part.
    pub kind: ReferenceKind,
    /// Document part (empty for local references).
    pub document: &'a str,
    /// Fragment without the leading `#` (empty when absent).
    pub fragment: &'a str,
}

/// Splits a reference string into its document and fragment parts.
pub(crate) fn parse_reference(ref_str: &str) -> ParsedReference<'_> {
    let (document, fragment) = match ref_str.split_once('#') {
        Some((doc, frag)) => (doc, frag),
        None => (ref_str, ""),
    };

    let kind = if document.is_empty() {
        ReferenceKind::Local
    } else if is_remote(document) {
        ReferenceKind::Remote
    } else {
        ReferenceKind::Relative
    };

    ParsedReference {
        kind,
        document,
        fragment,
    }
}

fn is_remote(document: &str) -> bool {
    match Url::parse(document) {
        Ok(url) => url.scheme() != "file" && url.has_host(),
        Err(_) => false,
    }
}

/// Decodes a JSON Pointer segment taken from a URI fragment.
///
/// Percent-decoding comes first, then `~1` -> `/` and `~0` -> `~` (RFC 6901 §6).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Follows a JSON Pointer fragment (`/definitions/Pet`) inside `root`.
pub(crate) fn resolve_pointer<'a>(root: &'a Value, fragment: &str) -> Option<&'a Value> {
    let pointer = fragment.trim_start_matches('/');
    if pointer.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for raw in pointer.split('/') {
        let segment = decode_pointer_segment(raw);
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Extracts the simple name from a reference string.
/// e.g. `#/definitions/Pet` -> `Pet`
pub(crate) fn extract_ref_name(ref_loc: &str) -> String {
    ref_loc
        .rsplit('/')
        .next()
        .map(decode_pointer_segment)
        .unwrap_or_else(|| "Unknown".to_string())
}

//! Canonical form of a JSON:API document, for golden comparisons and diffing.
//!
//! Two documents that differ only in member order, or in the order of their
//! `included` resources, have the same canonical form. Everything whose order
//! carries meaning stays as produced: the `data` array and to-many linkage.

use std::cmp::Ordering;

use japi_core::model::Document;
use serde_json::Value;

/// `(type, id)` of a resource object value.
fn identity(resource: &Value) -> (Option<&str>, Option<&str>) {
    (resource["type"].as_str(), resource["id"].as_str())
}

fn by_identity(a: &Value, b: &Value) -> Ordering {
    identity(a).cmp(&identity(b))
}

/// The canonical value of `document`: every object's members sorted by key,
/// `included` sorted by `(type, id)`.
pub fn canonical_document(document: &Document) -> Result<Value, serde_json::Error> {
    let mut v = serde_json::to_value(document)?;
    if let Some(Value::Array(included)) = v.get_mut("included") {
        included.sort_by(by_identity);
    }
    v.sort_all_objects();
    Ok(v)
}

/// Minified canonical JSON text of `document`.
pub fn to_canonical_document_string(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(&canonical_document(document)?)
}

/// Whether two documents carry the same content up to insignificant ordering.
pub fn equivalent(a: &Document, b: &Document) -> Result<bool, serde_json::Error> {
    Ok(canonical_document(a)? == canonical_document(b)?)
}

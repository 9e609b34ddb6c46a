//! Glue between serde-capable domain types and flat records.
//!
//! The codec itself only consumes and produces `FlatRecord`s. These helpers
//! stand in for the attribute extractor (and its inverse) when the domain type
//! already derives `Serialize` / `Deserialize`.

use japi_core::record::{FlatRecord, INCLUDED_KEY, LINKS_KEY};
use japi_core::schema::ResourceSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract the declared fields of `object` into a flat record, in declaration
/// order. The reserved `links` / `included` side channels are kept when the
/// object provides them.
///
/// A schema with no declared attributes keeps every field of the object.
pub fn to_record<T: Serialize + ?Sized>(
    object: &T,
    schema: &ResourceSchema,
) -> Result<FlatRecord, serde_json::Error> {
    let mut all = match serde_json::to_value(object)? {
        Value::Object(map) => map,
        _ => {
            return Err(serde::ser::Error::custom(
                "domain object must serialize to a JSON object",
            ));
        }
    };

    if schema.attributes().is_empty() {
        return Ok(all);
    }

    let mut record = FlatRecord::new();
    for field in schema
        .declared_fields()
        .into_iter()
        .chain([LINKS_KEY, INCLUDED_KEY])
    {
        if let Some(v) = all.remove(field) {
            record.insert(field.to_string(), v);
        }
    }
    Ok(record)
}

/// Build a domain object from a flat record produced by deserialization.
pub fn from_record<T: DeserializeOwned>(record: FlatRecord) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(record))
}

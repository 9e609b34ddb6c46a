//! Folding relationship references out of a flat record, and back.

use japi_core::error::CodecError;
use japi_core::model::{RelationshipData, RelationshipObject, ResourceIdentifier};
use japi_core::ordered::OrderedMap;
use japi_core::record::FlatRecord;
use japi_core::schema::{Cardinality, ResourceSchema};
use serde_json::{Map, Value};
use tracing::trace;

/// Split declared relationships out of `record`.
///
/// Returns the remaining fields and the `relationships` section, in the
/// record's field order. Declared names missing from the record are skipped.
///
/// Accepted reference shapes per field:
/// - `null`: to-one `null`, or `[]` when declared to-many
/// - `{type, id, links?}`: to-one; `links` moves to the relationship object
/// - `[{type, id}, ..]`: to-many, order preserved
/// - an already-wrapped `{data: ..}` entry, or a bare sequence of them (see
///   [`RelationshipObject::from_wire`])
pub fn fold(
    record: FlatRecord,
    schema: &ResourceSchema,
) -> Result<(FlatRecord, OrderedMap<RelationshipObject>), CodecError> {
    let mut rest = FlatRecord::new();
    let mut relationships = OrderedMap::new();
    for (k, v) in record {
        let Some(cardinality) = schema.cardinality(&k) else {
            rest.insert(k, v);
            continue;
        };
        let rel = fold_value(&k, cardinality, &v)?;
        trace!(relationship = %k, linkage = rel.data.len(), "folded relationship");
        relationships.insert(k, rel);
    }

    Ok((rest, relationships))
}

fn fold_value(
    name: &str,
    cardinality: Cardinality,
    value: &Value,
) -> Result<RelationshipObject, CodecError> {
    let rel = match value {
        Value::Null => RelationshipObject::to_one(None),

        Value::Object(obj) if obj.contains_key("data") => {
            RelationshipObject::from_wire(name, value)?
        }

        Value::Object(obj) => {
            let (id, links) = ResourceIdentifier::from_reference(name, obj)?;
            RelationshipObject {
                data: RelationshipData::ToOne(Some(id)),
                links,
            }
        }

        Value::Array(items) if items.first().is_some_and(is_fragment) => {
            RelationshipObject::from_wire(name, value)?
        }

        Value::Array(_) => {
            let mut wrapped = Map::new();
            wrapped.insert("data".to_string(), value.clone());
            RelationshipObject::from_wire(name, &Value::Object(wrapped))?
        }

        _ => {
            return Err(CodecError::malformed_relationship(
                name,
                "expected a reference object, a sequence of references or null",
            ));
        }
    };

    Ok(empty_to_many(cardinality, rel))
}

fn is_fragment(v: &Value) -> bool {
    v.as_object().is_some_and(|o| o.contains_key("data"))
}

/// A `null` linkage on a declared to-many relationship means "no members".
fn empty_to_many(cardinality: Cardinality, rel: RelationshipObject) -> RelationshipObject {
    match (cardinality, &rel.data) {
        (Cardinality::Many, RelationshipData::ToOne(None)) => RelationshipObject {
            data: RelationshipData::ToMany(Vec::new()),
            links: rel.links,
        },
        _ => rel,
    }
}

/// Flatten a `relationships` section into record fields.
///
/// To-one entries become a `{type, id}` object or `null`; to-many entries
/// become a sequence of them in wire order. A `null` linkage on a relationship
/// declared to-many becomes an empty sequence. Relationship `links` are not
/// carried into the record.
pub fn unfold(
    relationships: &OrderedMap<RelationshipObject>,
    schema: &ResourceSchema,
) -> FlatRecord {
    let mut out = FlatRecord::new();
    for (name, rel) in relationships.iter() {
        let value = match &rel.data {
            RelationshipData::ToOne(None) => match schema.cardinality(name) {
                Some(Cardinality::Many) => Value::Array(Vec::new()),
                _ => Value::Null,
            },
            RelationshipData::ToOne(Some(id)) => reference(id),
            RelationshipData::ToMany(ids) => Value::Array(ids.iter().map(reference).collect()),
        };
        trace!(relationship = %name, "unfolded relationship");
        out.insert(name.to_string(), value);
    }
    out
}

/// `{type, id}` as a record value.
pub fn reference(id: &ResourceIdentifier) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(id.kind.clone()));
    obj.insert("id".to_string(), Value::String(id.id.clone()));
    Value::Object(obj)
}

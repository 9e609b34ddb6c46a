//! One flat record <-> one resource object.

use japi_core::error::CodecError;
use japi_core::model::{Document, ResourceObject};
use japi_core::ordered::NonEmpty;
use japi_core::record::{FlatRecord, ID_KEY, INCLUDED_KEY, LINKS_KEY, id_string};
use japi_core::schema::{Represented, ResourceSchema};
use serde_json::Value;
use tracing::debug;

use crate::compound::{CompoundSet, parse_included};
use crate::envelope::{self, RenderOptions};
use crate::links_meta::{parse_supplied_links, render_meta, resource_links};
use crate::relationships::{fold, unfold};
use crate::transform::ResourceTransform;

/// A resource object plus the compound contributions that travelled with its
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResource {
    pub resource: ResourceObject,
    pub included: Vec<ResourceObject>,
}

/// Render one record as a resource object.
///
/// - `type` comes from the schema; no declared type is `TypeMismatch`.
/// - `id` is taken out of the record and rendered as a string.
/// - declared relationships are folded into `relationships`.
/// - the reserved `links` and `included` fields are consumed as side channels.
/// - every other field is an attribute; `attributes` is absent when none are
///   left.
pub fn serialize_resource(
    record: FlatRecord,
    schema: &ResourceSchema,
) -> Result<RenderedResource, CodecError> {
    let kind = schema.kind().ok_or(CodecError::TypeMismatch)?.to_string();

    let mut id = None;
    let mut supplied_links = Value::Null;
    let mut included = Value::Null;
    let mut fields = FlatRecord::new();
    for (k, v) in record {
        if k == ID_KEY {
            id = Some(v);
        } else if k == LINKS_KEY {
            supplied_links = v;
        } else if k == INCLUDED_KEY {
            included = v;
        } else {
            fields.insert(k, v);
        }
    }
    let id = id_string(id.as_ref());

    let (attributes, relationships) = fold(fields, schema)?;
    let links = resource_links(schema, &id, parse_supplied_links(supplied_links)?);
    let included = parse_included(included)?;

    debug!(
        kind = %kind,
        id = %id,
        attributes = attributes.len(),
        relationships = relationships.len(),
        included = included.len(),
        "serialized resource"
    );

    Ok(RenderedResource {
        resource: ResourceObject {
            kind,
            id,
            attributes: if attributes.is_empty() { None } else { Some(attributes) },
            relationships: relationships.non_empty(),
            links,
            meta: None,
        },
        included,
    })
}

/// Read one resource object back into a flat record.
///
/// Fails with `UnknownType` unless `resource.type` equals the schema's declared
/// type. The result is `attributes` followed by the unfolded relationships; a
/// missing `relationships` section simply contributes nothing. `id` is not put
/// back into the record (read it from the resource object).
pub fn deserialize_resource(
    resource: &ResourceObject,
    schema: &ResourceSchema,
) -> Result<FlatRecord, CodecError> {
    let expected = schema.kind().unwrap_or_default();
    if resource.kind != expected {
        return Err(CodecError::UnknownType {
            expected: expected.to_string(),
            found: resource.kind.clone(),
        });
    }

    let mut record = resource.attributes.clone().unwrap_or_default();
    if let Some(relationships) = &resource.relationships {
        for (k, v) in unfold(relationships, schema) {
            record.insert(k, v);
        }
    }
    Ok(record)
}

/// Singular documents for one schema.
#[derive(Debug, Clone, Copy)]
pub struct ResourceCodec<'s> {
    schema: &'s ResourceSchema,
}

impl<'s> ResourceCodec<'s> {
    pub fn new(schema: &'s ResourceSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s ResourceSchema {
        self.schema
    }
}

impl ResourceTransform for ResourceCodec<'_> {
    type Value = FlatRecord;

    fn serialize(&self, record: FlatRecord, options: &RenderOptions) -> Result<Document, CodecError> {
        let meta = render_meta(
            options.meta.as_ref(),
            self.schema.meta_representer(),
            Represented::One(&record),
        );
        let rendered = serialize_resource(record, self.schema)?;
        let compound = CompoundSet::collect([rendered.included]);
        Ok(envelope::wrap(
            rendered.resource,
            compound,
            options.links.clone(),
            meta,
        ))
    }

    fn deserialize(&self, document: &Document) -> Result<FlatRecord, CodecError> {
        envelope::unwrap(document, self.schema)
    }
}

//! Top-level document assembly and disassembly.

use japi_core::error::CodecError;
use japi_core::model::{Document, DocumentBody, ResourceObject};
use japi_core::ordered::{NonEmpty, OrderedMap};
use japi_core::record::FlatRecord;
use japi_core::schema::ResourceSchema;
use serde_json::{Map, Value};

use crate::compound::CompoundSet;
use crate::resource::deserialize_resource;

/// Per-call rendering inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Explicit meta payload. Takes precedence over the schema's representer.
    pub meta: Option<Map<String, Value>>,
    /// Explicit top-level links. For collections these are merged over the
    /// declared `self` link.
    pub links: Option<OrderedMap<String>>,
}

impl RenderOptions {
    pub fn with_meta(meta: Map<String, Value>) -> Self {
        Self {
            meta: Some(meta),
            ..Self::default()
        }
    }
}

/// Assemble a single-resource document.
///
/// Sections that would be empty are left out.
pub fn wrap(
    resource: ResourceObject,
    compound: CompoundSet,
    links: Option<OrderedMap<String>>,
    meta: Option<Map<String, Value>>,
) -> Document {
    Document {
        data: DocumentBody::Single(Box::new(resource)),
        links: links.and_then(NonEmpty::non_empty),
        meta: meta.filter(|m| !m.is_empty()),
        included: compound.render(),
    }
}

/// Validate and unwrap a single-resource document into a flat record.
///
/// The `data.type` check runs before anything else is read.
pub fn unwrap(document: &Document, schema: &ResourceSchema) -> Result<FlatRecord, CodecError> {
    match &document.data {
        DocumentBody::Single(resource) => deserialize_resource(resource, schema),
        DocumentBody::Many(_) => Err(CodecError::ShapeMismatch {
            expected: "single",
            found: "collection",
        }),
    }
}

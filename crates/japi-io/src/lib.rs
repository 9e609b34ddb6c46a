//! `japi-io` is the single supported public entrypoint for the JSON:API document
//! codec: wire types, the singular and collection codecs, and JSON text helpers.
//!
//! This crate intentionally contains **no** HTTP, routing or persistence.
//! Those belong in higher layers. `japi-io` focuses on:
//! - stable wire types
//! - record <-> document transformation
//! - parsing with diagnostics
//! - canonical JSON

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `japi_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

// Re-export the wire model and schema.
#[doc(hidden)]
pub mod core {
    pub use japi_core::error::CodecError;
    pub use japi_core::model::{
        Document, DocumentBody, RelationshipData, RelationshipObject, ResourceIdentifier,
        ResourceObject,
    };
    pub use japi_core::ordered::{NonEmpty, OrderedMap};
    pub use japi_core::record::{FlatRecord, Link, id_string};
    pub use japi_core::schema::{
        Cardinality, LinkTemplate, MetaRepresenter, Represented, ResourceSchema,
        ResourceSchemaBuilder, SchemaConfig,
    };
}

// Re-export the codec.
#[doc(hidden)]
pub mod codec {
    pub use japi_codec::envelope::{RenderOptions, unwrap, wrap};
    pub use japi_codec::extract::{from_record, to_record};
    pub use japi_codec::links_meta::{render_links, render_meta};
    pub use japi_codec::{
        CodecTelemetry, CollectionCodec, CompoundSet, RenderedResource, ResourceCodec,
        ResourceTransform, deserialize_resource, fold, serialize_resource, unfold,
    };
}

/// Canonical form of documents for comparison.
pub mod canonical_json;

/// Parsing documents, records and schema files with diagnostics.
pub mod document_json;

/// Pretty / minified / canonical output.
pub mod output;

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::codec::{
        CodecTelemetry, CollectionCodec, RenderOptions, ResourceCodec, ResourceTransform,
        from_record, to_record,
    };
    pub use crate::core::{
        Cardinality, CodecError, Document, DocumentBody, FlatRecord, Link, MetaRepresenter,
        NonEmpty, OrderedMap, RelationshipData, RelationshipObject, Represented, ResourceIdentifier,
        ResourceObject, ResourceSchema, SchemaConfig,
    };
    pub use crate::document_json::{DocumentJsonError, Records};
    pub use crate::output::OutputFormat;
    pub use crate::{canonical_json, document_json};
}

//! Collection documents (`data` is an array).

use japi_core::error::CodecError;
use japi_core::model::{Document, DocumentBody};
use japi_core::ordered::NonEmpty;
use japi_core::record::FlatRecord;
use japi_core::schema::{Represented, ResourceSchema};
use tracing::debug;

use crate::compound::CompoundSet;
use crate::envelope::RenderOptions;
use crate::links_meta::{collection_links, render_meta};
use crate::resource::{deserialize_resource, serialize_resource};
use crate::transform::ResourceTransform;

/// Collection documents for one schema.
///
/// Items are rendered in input order without the per-document envelope; each
/// item gets its own `meta` (explicit per-call meta, else the schema's
/// representer over that item) and all compound contributions land in one
/// `included` set for the whole document. The top-level `meta` follows the same
/// precedence with the representer applied to the whole collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionCodec<'s> {
    schema: &'s ResourceSchema,
}

impl<'s> CollectionCodec<'s> {
    pub fn new(schema: &'s ResourceSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s ResourceSchema {
        self.schema
    }
}

impl ResourceTransform for CollectionCodec<'_> {
    type Value = Vec<FlatRecord>;

    fn serialize(
        &self,
        items: Vec<FlatRecord>,
        options: &RenderOptions,
    ) -> Result<Document, CodecError> {
        let representer = self.schema.meta_representer();
        let meta = render_meta(options.meta.as_ref(), representer, Represented::Many(&items));

        let mut compound = CompoundSet::new();
        let mut data = Vec::with_capacity(items.len());
        for item in items {
            let item_meta =
                render_meta(options.meta.as_ref(), representer, Represented::One(&item));
            let rendered = serialize_resource(item, self.schema)?;
            compound.extend(rendered.included);

            let mut resource = rendered.resource;
            resource.meta = item_meta;
            data.push(resource);
        }

        let mut links = collection_links(self.schema).unwrap_or_default();
        for (rel, href) in options.links.clone().into_iter().flatten() {
            links.insert(rel, href);
        }

        debug!(
            items = data.len(),
            included = compound.len(),
            duplicates_dropped = compound.dropped(),
            "serialized collection"
        );

        Ok(Document {
            data: DocumentBody::Many(data),
            links: links.non_empty(),
            meta,
            included: compound.render(),
        })
    }

    /// Any element with the wrong type fails the whole call; there are no
    /// partial results.
    fn deserialize(&self, document: &Document) -> Result<Vec<FlatRecord>, CodecError> {
        let DocumentBody::Many(items) = &document.data else {
            return Err(CodecError::ShapeMismatch {
                expected: "collection",
                found: "single",
            });
        };
        items
            .iter()
            .map(|resource| deserialize_resource(resource, self.schema))
            .collect()
    }
}

#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the japi workspace.

Do NOT depend on this crate directly.
Use `japi-io` instead.
"#]

pub mod collection;
pub mod compound;
pub mod envelope;
pub mod extract;
pub mod links_meta;
pub mod relationships;
pub mod resource;
pub mod telemetry;
pub mod transform;

pub use collection::CollectionCodec;
pub use compound::CompoundSet;
pub use envelope::{RenderOptions, unwrap, wrap};
pub use relationships::{fold, unfold};
pub use resource::{RenderedResource, ResourceCodec, deserialize_resource, serialize_resource};
pub use telemetry::CodecTelemetry;
pub use transform::ResourceTransform;

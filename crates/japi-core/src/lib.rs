#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the japi workspace.

Do NOT depend on this crate directly.
Use `japi-io` instead.
"#]

pub mod error;
pub mod model;
pub mod ordered;
pub mod record;
pub mod schema;

pub use error::CodecError;
pub use ordered::{NonEmpty, OrderedMap};
pub use record::FlatRecord;

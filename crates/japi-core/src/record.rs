//! The flat field-to-value mapping exchanged with the domain layer.
//!
//! A `FlatRecord` is what the attribute extractor produces for one domain
//! object: scalars for attributes, `{type, id}` objects for to-one references
//! and arrays of them for to-many references. Three keys are reserved as side
//! channels and never become attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered field name -> value mapping (insertion order is preserved).
pub type FlatRecord = Map<String, Value>;

/// Primary key field.
pub const ID_KEY: &str = "id";

/// Per-resource links, as a sequence of `{rel, href}` pairs.
pub const LINKS_KEY: &str = "links";

/// Already-rendered resource objects contributed to the compound document.
pub const INCLUDED_KEY: &str = "included";

/// One `{rel, href}` pair from a resource's link declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Render a primary key as its wire string.
///
/// Strings pass through unquoted, numbers and booleans use their JSON text,
/// and a missing or null key renders as the empty string.
pub fn id_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

use thiserror::Error;

/// Failures raised by the document codec.
///
/// All variants are raised synchronously to the immediate caller. The codec has
/// no notion of partial success: a collection fails as a whole when any element
/// fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Serialization was attempted with a schema that declares no wire type.
    #[error("cannot serialize: no resource type declared on the schema")]
    TypeMismatch,

    /// Incoming `data.type` does not match the receiving schema.
    #[error("Unknown Type: expected '{expected}', got '{found}'")]
    UnknownType { expected: String, found: String },

    /// A relationship entry has neither a singular nor a sequence `data` shape.
    #[error("malformed relationship '{name}': {reason}")]
    MalformedRelationship { name: String, reason: String },

    /// The document body is singular where a collection was expected, or the
    /// other way around.
    #[error("document shape mismatch: expected {expected} `data`, got {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An entry of the `included` side channel is not a resource object.
    #[error("included[{index}] is not a resource object: {reason}")]
    MalformedIncluded { index: usize, reason: String },

    /// The `links` side channel of a record is neither `{rel, href}` pairs nor
    /// a `{rel: href}` object.
    #[error("malformed `links`: {reason}")]
    MalformedLinks { reason: String },
}

impl CodecError {
    /// Stable, machine-readable code for CI and tooling.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::TypeMismatch => "type_mismatch",
            CodecError::UnknownType { .. } => "unknown_type",
            CodecError::MalformedRelationship { .. } => "malformed_relationship",
            CodecError::ShapeMismatch { .. } => "shape_mismatch",
            CodecError::MalformedIncluded { .. } => "malformed_included",
            CodecError::MalformedLinks { .. } => "malformed_links",
        }
    }

    pub fn malformed_relationship(name: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedRelationship {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

use japi_core::error::CodecError;
use japi_core::model::Document;
use japi_core::schema::ResourceSchema;
use serde::{Deserialize, Serialize};

/// Deterministic, machine-readable summary of one codec call.
///
/// Notes:
/// - Contains *no* wall-clock timestamps (to preserve determinism).
/// - Counts describe the document produced or consumed, not the work done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecTelemetry {
    /// Operation category, e.g. "serialize" or "deserialize".
    pub op: String,

    /// Whether the operation succeeded.
    pub ok: bool,

    /// Declared type of the schema used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// "single" or "collection" (when a document was involved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,

    /// Primary resources.
    pub resources: usize,

    /// Relationship entries across primary resources.
    pub relationships: usize,

    /// Resource identifiers referenced by those relationships.
    pub linkage: usize,

    /// Entries of the `included` section.
    pub included: usize,

    /// Machine-readable error code (when failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CodecTelemetry {
    pub fn for_document(op: &str, schema: &ResourceSchema, document: &Document) -> Self {
        let resources = document.data.resources();
        let (relationships, linkage) = resources
            .iter()
            .flat_map(|r| r.relationships.iter().flat_map(|rels| rels.iter()))
            .fold((0, 0), |(n, ids), (_, rel)| (n + 1, ids + rel.data.len()));

        Self {
            op: op.to_string(),
            ok: true,
            resource_type: schema.kind().map(str::to_string),
            shape: Some(document.data.shape().to_string()),
            resources: resources.len(),
            relationships,
            linkage,
            included: document.included().len(),
            error_code: None,
        }
    }

    pub fn for_error(op: &str, schema: &ResourceSchema, err: &CodecError) -> Self {
        Self {
            op: op.to_string(),
            ok: false,
            resource_type: schema.kind().map(str::to_string),
            shape: None,
            resources: 0,
            relationships: 0,
            linkage: 0,
            included: 0,
            error_code: Some(err.code().to_string()),
        }
    }
}

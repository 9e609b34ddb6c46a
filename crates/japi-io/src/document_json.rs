//! Parsing documents, flat records and schema files from JSON text with
//! actionable diagnostics.
//!
//! serde's default "missing field X" / "did not match any variant" messages are
//! technically correct but unhelpful to people hand-writing fixtures. These
//! helpers keep strict behavior and say which top-level member is missing.

use japi_codec::envelope::RenderOptions;
use japi_codec::{CollectionCodec, ResourceCodec, ResourceTransform};
use japi_core::error::CodecError;
use japi_core::model::{Document, DocumentBody};
use japi_core::record::FlatRecord;
use japi_core::schema::{ResourceSchema, SchemaConfig};
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const REQUIRED_TOP_LEVEL_FIELDS: &[&str] = &["data"];

#[derive(Debug, Error)]
pub enum DocumentJsonError {
    /// The input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The input JSON was valid, but missing required top-level members.
    #[error(
        "Invalid document JSON: missing required top-level member(s): {}. Required top-level members: {}.",
        .missing.join(", "),
        .required.join(", ")
    )]
    MissingRequiredTopLevelFields {
        missing: Vec<&'static str>,
        required: Vec<&'static str>,
    },

    /// JSON was valid, but did not have the expected shape.
    #[error("Invalid {what} JSON shape: {source}")]
    InvalidShape {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but the codec rejected it.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl DocumentJsonError {
    /// Codec failures are rejections of well-formed input; everything else is
    /// a parse failure.
    pub fn is_codec(&self) -> bool {
        matches!(self, DocumentJsonError::Codec(_))
    }
}

/// Flat records as exchanged with the domain layer: one record for a singular
/// document, an ordered sequence for a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Records {
    One(FlatRecord),
    Many(Vec<FlatRecord>),
}

fn shape_error(what: &'static str, msg: &str) -> DocumentJsonError {
    DocumentJsonError::InvalidShape {
        what,
        source: serde_json::Error::custom(msg),
    }
}

fn parse_value(s: &str) -> Result<Value, DocumentJsonError> {
    serde_json::from_str(s).map_err(DocumentJsonError::InvalidJson)
}

fn require_top_level(v: &Value) -> Result<(), DocumentJsonError> {
    let obj = v
        .as_object()
        .ok_or_else(|| shape_error("document", "expected a JSON object"))?;

    let missing: Vec<&'static str> = REQUIRED_TOP_LEVEL_FIELDS
        .iter()
        .copied()
        .filter(|k| !obj.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        return Err(DocumentJsonError::MissingRequiredTopLevelFields {
            missing,
            required: REQUIRED_TOP_LEVEL_FIELDS.to_vec(),
        });
    }
    Ok(())
}

/// Parse a JSON:API document.
pub fn parse_document_json_str(s: &str) -> Result<Document, DocumentJsonError> {
    let v = parse_value(s)?;
    require_top_level(&v)?;
    serde_json::from_value(v).map_err(|source| DocumentJsonError::InvalidShape {
        what: "document",
        source,
    })
}

/// Parse one flat record (object) or a sequence of them (array of objects).
pub fn parse_records_json_str(s: &str) -> Result<Records, DocumentJsonError> {
    match parse_value(s)? {
        Value::Object(record) => Ok(Records::One(record)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(shape_error("record", "collection entries must be JSON objects")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Records::Many),
        _ => Err(shape_error(
            "record",
            "expected a JSON object or an array of objects",
        )),
    }
}

/// Parse a schema configuration file.
pub fn parse_schema_json_str(s: &str) -> Result<ResourceSchema, DocumentJsonError> {
    let v = parse_value(s)?;
    let cfg: SchemaConfig =
        serde_json::from_value(v).map_err(|source| DocumentJsonError::InvalidShape {
            what: "schema",
            source,
        })?;
    Ok(ResourceSchema::from(cfg))
}

/// Render records with the codec matching their shape.
pub fn serialize_records(
    records: Records,
    schema: &ResourceSchema,
    options: &RenderOptions,
) -> Result<Document, CodecError> {
    match records {
        Records::One(record) => ResourceCodec::new(schema).serialize(record, options),
        Records::Many(items) => CollectionCodec::new(schema).serialize(items, options),
    }
}

/// Read records back out of a parsed document with the codec matching its
/// shape.
pub fn deserialize_document(
    document: &Document,
    schema: &ResourceSchema,
) -> Result<Records, CodecError> {
    match document.data {
        DocumentBody::Single(_) => ResourceCodec::new(schema).deserialize(document).map(Records::One),
        DocumentBody::Many(_) => CollectionCodec::new(schema).deserialize(document).map(Records::Many),
    }
}

/// Parse and deserialize an untrusted document in one step.
///
/// `data.type` is checked against the schema before the rest of the document is
/// parsed, so a foreign document fails with `UnknownType` even when other parts
/// of it are malformed.
pub fn deserialize_document_json_str(
    s: &str,
    schema: &ResourceSchema,
) -> Result<Records, DocumentJsonError> {
    let v = parse_value(s)?;
    require_top_level(&v)?;
    check_type_tags(&v["data"], schema)?;

    let document: Document =
        serde_json::from_value(v).map_err(|source| DocumentJsonError::InvalidShape {
            what: "document",
            source,
        })?;
    debug!(shape = document.data.shape(), "parsed incoming document");
    Ok(deserialize_document(&document, schema)?)
}

fn check_type_tags(data: &Value, schema: &ResourceSchema) -> Result<(), CodecError> {
    let expected = schema.kind().unwrap_or_default();
    let tags: Vec<&Value> = match data {
        Value::Array(items) => items.iter().map(|item| &item["type"]).collect(),
        other => vec![&other["type"]],
    };
    for tag in tags {
        // Shape problems (non-string or missing tags) are left to the parser.
        if let Some(found) = tag.as_str() {
            if found != expected {
                return Err(CodecError::UnknownType {
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
    }
    Ok(())
}

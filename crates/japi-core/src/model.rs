//! JSON:API wire model.
//!
//! Every optional section is an `Option` and is skipped on output when `None`.
//! Constructors in the codec only ever produce `Some` for non-empty sections, so
//! an empty `{}` or `[]` never reaches the wire.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::ordered::{NonEmpty, OrderedMap};
use crate::record::id_string;

/// `{type, id}` pair identifying one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Read an identifier out of a reference object, lifting any nested
    /// `links` sub-map out alongside it.
    ///
    /// `name` is the relationship being read and only feeds error messages.
    pub fn from_reference(
        name: &str,
        obj: &Map<String, Value>,
    ) -> Result<(Self, Option<OrderedMap<String>>), CodecError> {
        let kind = match obj.get("type") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(_) => {
                return Err(CodecError::malformed_relationship(
                    name,
                    "identifier `type` must be a non-empty string",
                ));
            }
            None => {
                return Err(CodecError::malformed_relationship(
                    name,
                    "identifier is missing `type`",
                ));
            }
        };

        let id = match obj.get("id") {
            None | Some(Value::Null) => {
                return Err(CodecError::malformed_relationship(
                    name,
                    "identifier is missing `id`",
                ));
            }
            Some(Value::Object(_)) | Some(Value::Array(_)) => {
                return Err(CodecError::malformed_relationship(
                    name,
                    "identifier `id` must be a scalar",
                ));
            }
            v => id_string(v),
        };

        let links = match obj.get("links") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_links(name, v)?),
        };

        Ok((Self { kind, id }, links))
    }
}

/// Linkage of one relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// Renders as the identifier object, or `null`.
    ToOne(Option<ResourceIdentifier>),
    ToMany(Vec<ResourceIdentifier>),
}

impl RelationshipData {
    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationshipData::ToMany(_))
    }

    pub fn len(&self) -> usize {
        match self {
            RelationshipData::ToOne(Some(_)) => 1,
            RelationshipData::ToOne(None) => 0,
            RelationshipData::ToMany(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `{data, links?}` entry of the `relationships` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipObject {
    pub data: RelationshipData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<OrderedMap<String>>,
}

impl RelationshipObject {
    pub fn to_one(id: Option<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::ToOne(id),
            links: None,
        }
    }

    pub fn to_many(ids: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::ToMany(ids),
            links: None,
        }
    }

    /// Parse one relationship entry as it appears on the wire.
    ///
    /// Accepted shapes:
    /// - `{"data": null | {..} | [{..}, ..], "links"?: {..}}`
    /// - `[{"data": ..}, {"data": ..}, ..]`, a bare sequence of fragments as
    ///   emitted by some producers. All `data` payloads are merged in encounter
    ///   order into one to-many entry, and fragment links are merged with later
    ///   fragments winning.
    ///
    /// An absent `data` key reads as `null`.
    pub fn from_wire(name: &str, value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Object(obj) => {
                let (data, lifted) = match obj.get("data") {
                    None | Some(Value::Null) => (RelationshipData::ToOne(None), None),
                    Some(Value::Object(reference)) => {
                        let (id, lifted) = ResourceIdentifier::from_reference(name, reference)?;
                        (RelationshipData::ToOne(Some(id)), lifted)
                    }
                    Some(Value::Array(items)) => {
                        let mut ids = Vec::with_capacity(items.len());
                        let mut lifted = OrderedMap::new();
                        for item in items {
                            let (id, item_links) = identifier_in_sequence(name, item)?;
                            ids.push(id);
                            merge_links(&mut lifted, item_links);
                        }
                        (RelationshipData::ToMany(ids), lifted.non_empty())
                    }
                    Some(_) => {
                        return Err(CodecError::malformed_relationship(
                            name,
                            "`data` must be an object, an array or null",
                        ));
                    }
                };

                let mut links = lifted.unwrap_or_default();
                if let Some(v) = obj.get("links").filter(|v| !v.is_null()) {
                    merge_links(&mut links, Some(parse_links(name, v)?));
                }

                Ok(Self {
                    data,
                    links: links.non_empty(),
                })
            }

            Value::Array(fragments) => {
                let mut ids = Vec::new();
                let mut links = OrderedMap::new();
                for fragment in fragments {
                    if !fragment.is_object() {
                        return Err(CodecError::malformed_relationship(
                            name,
                            "relationship fragments must be objects",
                        ));
                    }
                    let part = Self::from_wire(name, fragment)?;
                    match part.data {
                        RelationshipData::ToOne(Some(id)) => ids.push(id),
                        RelationshipData::ToOne(None) => {}
                        RelationshipData::ToMany(more) => ids.extend(more),
                    }
                    merge_links(&mut links, part.links);
                }
                Ok(Self {
                    data: RelationshipData::ToMany(ids),
                    links: links.non_empty(),
                })
            }

            _ => Err(CodecError::malformed_relationship(
                name,
                "expected an object or a sequence of `{data}` fragments",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for RelationshipObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        RelationshipObject::from_wire("", &v).map_err(D::Error::custom)
    }
}

fn identifier_in_sequence(
    name: &str,
    item: &Value,
) -> Result<(ResourceIdentifier, Option<OrderedMap<String>>), CodecError> {
    match item {
        Value::Object(reference) => ResourceIdentifier::from_reference(name, reference),
        _ => Err(CodecError::malformed_relationship(
            name,
            "to-many `data` entries must be identifier objects",
        )),
    }
}

fn parse_links(name: &str, v: &Value) -> Result<OrderedMap<String>, CodecError> {
    let Value::Object(obj) = v else {
        return Err(CodecError::malformed_relationship(name, "`links` must be an object"));
    };
    obj.iter()
        .map(|(rel, href)| match href {
            Value::String(s) => Ok((rel.clone(), s.clone())),
            _ => Err(CodecError::malformed_relationship(
                name,
                format!("link '{rel}' must be a string"),
            )),
        })
        .collect()
}

fn merge_links(into: &mut OrderedMap<String>, from: Option<OrderedMap<String>>) {
    for (rel, href) in from.into_iter().flatten() {
        into.insert(rel, href);
    }
}

/// One resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    /// Client-created resources may arrive without an id.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_relationships"
    )]
    pub relationships: Option<OrderedMap<RelationshipObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<OrderedMap<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ResourceObject {
    /// A bare `{type, id}` resource with every optional section absent.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes: None,
            relationships: None,
            links: None,
            meta: None,
        }
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.kind.clone(), self.id.clone())
    }
}

fn deserialize_relationships<'de, D>(
    deserializer: D,
) -> Result<Option<OrderedMap<RelationshipObject>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<OrderedMap<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.iter()
        .map(|(name, v)| {
            RelationshipObject::from_wire(name, v).map(|rel| (name.to_string(), rel))
        })
        .collect::<Result<OrderedMap<_>, _>>()
        .map(Some)
        .map_err(D::Error::custom)
}

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentBody {
    Single(Box<ResourceObject>),
    Many(Vec<ResourceObject>),
}

impl DocumentBody {
    pub fn shape(&self) -> &'static str {
        match self {
            DocumentBody::Single(_) => "single",
            DocumentBody::Many(_) => "collection",
        }
    }

    pub fn resources(&self) -> &[ResourceObject] {
        match self {
            DocumentBody::Single(res) => std::slice::from_ref(&**res),
            DocumentBody::Many(items) => items,
        }
    }
}

impl<'de> Deserialize<'de> for DocumentBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Dispatch on the JSON shape directly so nested errors keep their
        // messages (an untagged derive would collapse them).
        match Value::deserialize(deserializer)? {
            v @ Value::Object(_) => serde_json::from_value(v)
                .map(|res| DocumentBody::Single(Box::new(res)))
                .map_err(D::Error::custom),
            v @ Value::Array(_) => serde_json::from_value(v)
                .map(DocumentBody::Many)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "`data` must be a resource object or an array of resource objects",
            )),
        }
    }
}

/// A complete JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: DocumentBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<OrderedMap<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl Document {
    pub fn single(resource: ResourceObject) -> Self {
        Self {
            data: DocumentBody::Single(Box::new(resource)),
            links: None,
            meta: None,
            included: None,
        }
    }

    pub fn many(resources: Vec<ResourceObject>) -> Self {
        Self {
            data: DocumentBody::Many(resources),
            links: None,
            meta: None,
            included: None,
        }
    }

    pub fn included(&self) -> &[ResourceObject] {
        self.included.as_deref().unwrap_or_default()
    }
}

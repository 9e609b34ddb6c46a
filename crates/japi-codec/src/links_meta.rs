//! Optional `links` and `meta` sections.
//!
//! Both follow the absent-not-empty rule: an empty result is `None`, never an
//! empty map.

use japi_core::error::CodecError;
use japi_core::ordered::{NonEmpty, OrderedMap};
use japi_core::record::Link;
use japi_core::schema::{MetaRepresenter, Represented, ResourceSchema};
use serde_json::{Map, Value};

/// Fold `{rel, href}` pairs into a `{rel: href}` map. A repeated `rel` keeps its
/// first position and takes the last href.
pub fn render_links(raw: &[Link]) -> Option<OrderedMap<String>> {
    raw.iter()
        .map(|l| (l.rel.clone(), l.href.clone()))
        .collect::<OrderedMap<String>>()
        .non_empty()
}

/// Links for one resource: declared templates first, then the links the
/// extractor supplied for this record.
pub fn resource_links(
    schema: &ResourceSchema,
    id: &str,
    supplied: Vec<Link>,
) -> Option<OrderedMap<String>> {
    let raw: Vec<Link> = schema
        .link_templates()
        .iter()
        .map(|t| Link::new(t.rel.clone(), t.render(id)))
        .chain(supplied)
        .collect();
    render_links(&raw)
}

/// `{self: href}` for a collection document, when the schema declares an href.
pub fn collection_links(schema: &ResourceSchema) -> Option<OrderedMap<String>> {
    let href = schema.href()?;
    let mut links = OrderedMap::new();
    links.insert("self".to_string(), href.to_string());
    Some(links)
}

/// Compute the `meta` payload.
///
/// Explicit per-call meta always wins over the declared representer.
pub fn render_meta(
    explicit: Option<&Map<String, Value>>,
    representer: Option<&dyn MetaRepresenter>,
    represented: Represented<'_>,
) -> Option<Map<String, Value>> {
    let payload = match (explicit, representer) {
        (Some(meta), _) => meta.clone(),
        (None, Some(rep)) => rep.meta(&represented),
        (None, None) => return None,
    };
    if payload.is_empty() { None } else { Some(payload) }
}

/// Read the reserved `links` side channel of a record.
///
/// Accepts a sequence of `{rel, href}` pairs or a `{rel: href}` object with
/// string hrefs. Any other shape fails with `MalformedLinks`, like a malformed
/// `included` side channel does.
pub(crate) fn parse_supplied_links(value: Value) -> Result<Vec<Link>, CodecError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .into_iter()
            .map(|(rel, href)| match href {
                Value::String(href) => Ok(Link { rel, href }),
                _ => Err(CodecError::MalformedLinks {
                    reason: format!("href for '{rel}' must be a string"),
                }),
            })
            .collect(),
        v @ Value::Array(_) => {
            serde_json::from_value(v).map_err(|e| CodecError::MalformedLinks {
                reason: e.to_string(),
            })
        }
        _ => Err(CodecError::MalformedLinks {
            reason: "`links` must be an array of {rel, href} or an object".to_string(),
        }),
    }
}

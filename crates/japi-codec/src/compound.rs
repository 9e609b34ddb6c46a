//! The top-level `included` section of a compound document.

use std::collections::HashSet;

use japi_core::error::CodecError;
use japi_core::model::{ResourceIdentifier, ResourceObject};
use serde_json::Value;
use tracing::debug;

/// Deduplicated, order-preserving set of included resources keyed by
/// `(type, id)`. The first occurrence of a key wins.
///
/// One set is owned by the call producing one document; it is never shared
/// across documents.
#[derive(Debug, Clone, Default)]
pub struct CompoundSet {
    entries: Vec<ResourceObject>,
    seen: HashSet<ResourceIdentifier>,
    dropped: usize,
}

impl CompoundSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate every contribution in order into one set.
    pub fn collect<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = Vec<ResourceObject>>,
    {
        let mut set = Self::new();
        for contribution in contributions {
            set.extend(contribution);
        }
        set
    }

    /// Returns `false` (and drops `resource`) when its key is already present.
    pub fn insert(&mut self, resource: ResourceObject) -> bool {
        let key = resource.identifier();
        if !self.seen.insert(key) {
            debug!(kind = %resource.kind, id = %resource.id, "dropping duplicate included resource");
            self.dropped += 1;
            return false;
        }
        self.entries.push(resource);
        true
    }

    pub fn contains(&self, id: &ResourceIdentifier) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Duplicates dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceObject> {
        self.entries.iter()
    }

    /// `None` when empty: the wire format never carries `"included": []`.
    pub fn render(self) -> Option<Vec<ResourceObject>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries)
        }
    }
}

impl Extend<ResourceObject> for CompoundSet {
    fn extend<I: IntoIterator<Item = ResourceObject>>(&mut self, iter: I) {
        for resource in iter {
            self.insert(resource);
        }
    }
}

/// Read the reserved `included` side channel of a record.
pub(crate) fn parse_included(value: Value) -> Result<Vec<ResourceObject>, CodecError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| CodecError::MalformedIncluded {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect(),
        _ => Err(CodecError::MalformedIncluded {
            index: 0,
            reason: "`included` must be an array".to_string(),
        }),
    }
}

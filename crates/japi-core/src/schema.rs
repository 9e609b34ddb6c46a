//! Declared shape of one resource type.
//!
//! A `ResourceSchema` is built once at startup and then only read: every codec
//! call borrows it, so concurrent calls against one schema need no locking.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::{FlatRecord, ID_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// to-one
    One,
    /// to-many
    Many,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDecl {
    pub name: String,
    pub cardinality: Cardinality,
}

/// Per-resource link declaration. `{id}` in `href` is replaced with the
/// rendered resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    pub rel: String,
    pub href: String,
}

impl LinkTemplate {
    pub fn render(&self, id: &str) -> String {
        self.href.replace("{id}", id)
    }
}

/// What a meta representer is invoked against.
#[derive(Debug, Clone, Copy)]
pub enum Represented<'a> {
    One(&'a FlatRecord),
    Many(&'a [FlatRecord]),
}

/// Computes the `meta` payload for a represented record or collection.
///
/// Returning an empty map means "no meta".
pub trait MetaRepresenter: Send + Sync {
    fn meta(&self, represented: &Represented<'_>) -> Map<String, Value>;
}

impl<F> MetaRepresenter for F
where
    F: Fn(&Represented<'_>) -> Map<String, Value> + Send + Sync,
{
    fn meta(&self, represented: &Represented<'_>) -> Map<String, Value> {
        self(represented)
    }
}

#[derive(Clone, Default)]
pub struct ResourceSchema {
    kind: Option<String>,
    href: Option<String>,
    attributes: Vec<String>,
    relationships: Vec<RelationshipDecl>,
    links: Vec<LinkTemplate>,
    meta: Option<Arc<dyn MetaRepresenter>>,
}

impl ResourceSchema {
    /// Shorthand for `builder().kind(kind).build()`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self::builder().kind(kind).build()
    }

    pub fn builder() -> ResourceSchemaBuilder {
        ResourceSchemaBuilder::default()
    }

    /// Declared wire type. An empty name counts as undeclared: the wire
    /// `type` member is never empty.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn relationships(&self) -> &[RelationshipDecl] {
        &self.relationships
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDecl> {
        self.relationships.iter().find(|r| r.name == name)
    }

    pub fn is_relationship(&self, name: &str) -> bool {
        self.relationship(name).is_some()
    }

    pub fn cardinality(&self, name: &str) -> Option<Cardinality> {
        self.relationship(name).map(|r| r.cardinality)
    }

    pub fn link_templates(&self) -> &[LinkTemplate] {
        &self.links
    }

    pub fn meta_representer(&self) -> Option<&dyn MetaRepresenter> {
        self.meta.as_deref()
    }

    /// Field names handed to the attribute extractor: the primary key, then
    /// declared attributes, then relationships, in declaration order.
    pub fn declared_fields(&self) -> Vec<&str> {
        std::iter::once(ID_KEY)
            .chain(self.attributes.iter().map(String::as_str))
            .chain(self.relationships.iter().map(|r| r.name.as_str()))
            .collect()
    }
}

impl fmt::Debug for ResourceSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSchema")
            .field("kind", &self.kind)
            .field("href", &self.href)
            .field("attributes", &self.attributes)
            .field("relationships", &self.relationships)
            .field("links", &self.links)
            .field("meta", &self.meta.as_ref().map(|_| "<representer>"))
            .finish()
    }
}

#[derive(Default)]
pub struct ResourceSchemaBuilder {
    inner: ResourceSchema,
}

impl ResourceSchemaBuilder {
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.inner.kind = Some(kind.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.inner.href = Some(href.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.inner.attributes.push(name.into());
        self
    }

    pub fn has_one(self, name: impl Into<String>) -> Self {
        self.relationship(name, Cardinality::One)
    }

    pub fn has_many(self, name: impl Into<String>) -> Self {
        self.relationship(name, Cardinality::Many)
    }

    /// Redeclaring a relationship replaces its cardinality.
    pub fn relationship(mut self, name: impl Into<String>, cardinality: Cardinality) -> Self {
        let name = name.into();
        match self.inner.relationships.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.cardinality = cardinality,
            None => self
                .inner
                .relationships
                .push(RelationshipDecl { name, cardinality }),
        }
        self
    }

    pub fn link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.inner.links.push(LinkTemplate {
            rel: rel.into(),
            href: href.into(),
        });
        self
    }

    pub fn meta(mut self, representer: impl MetaRepresenter + 'static) -> Self {
        self.inner.meta = Some(Arc::new(representer));
        self
    }

    pub fn build(self) -> ResourceSchema {
        self.inner
    }
}

/// On-disk schema configuration.
///
/// ```json
/// { "type": "articles", "href": "/articles",
///   "attributes": ["title"], "has_one": ["author"], "has_many": ["comments"],
///   "links": [{ "rel": "self", "href": "/articles/{id}" }] }
/// ```
///
/// Meta representers are code, so they cannot be configured here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub has_one: Vec<String>,
    #[serde(default)]
    pub has_many: Vec<String>,
    #[serde(default)]
    pub links: Vec<LinkTemplate>,
}

impl From<SchemaConfig> for ResourceSchema {
    fn from(cfg: SchemaConfig) -> Self {
        let mut b = ResourceSchema::builder();
        if let Some(kind) = cfg.kind {
            b = b.kind(kind);
        }
        if let Some(href) = cfg.href {
            b = b.href(href);
        }
        for a in cfg.attributes {
            b = b.attribute(a);
        }
        for r in cfg.has_one {
            b = b.has_one(r);
        }
        for r in cfg.has_many {
            b = b.has_many(r);
        }
        for l in cfg.links {
            b = b.link(l.rel, l.href);
        }
        b.build()
    }
}

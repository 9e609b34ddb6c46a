//! How a rendered document is written out.

use japi_core::model::Document;

use crate::canonical_json;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented, members in produced order.
    #[default]
    Pretty,
    /// No whitespace, members in produced order. This is the wire form.
    Minified,
    /// No whitespace, see [`canonical_json`].
    Canonical,
}

impl OutputFormat {
    /// `canonical` wins over `min`.
    pub fn from_flags(min: bool, canonical: bool) -> Self {
        match (min, canonical) {
            (_, true) => OutputFormat::Canonical,
            (true, false) => OutputFormat::Minified,
            (false, false) => OutputFormat::Pretty,
        }
    }

    pub fn write(self, document: &Document) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(document),
            OutputFormat::Minified => serde_json::to_string(document),
            OutputFormat::Canonical => canonical_json::to_canonical_document_string(document),
        }
    }
}

use japi_core::error::CodecError;
use japi_core::model::Document;

use crate::envelope::RenderOptions;

/// Serialize/deserialize capability shared by the singular and collection
/// codecs. Callers pick the implementation explicitly; nothing inspects the
/// value at runtime to decide between document shapes.
pub trait ResourceTransform {
    /// `FlatRecord` for a singular document, `Vec<FlatRecord>` for a collection.
    type Value;

    fn serialize(&self, value: Self::Value, options: &RenderOptions) -> Result<Document, CodecError>;

    fn deserialize(&self, document: &Document) -> Result<Self::Value, CodecError>;
}

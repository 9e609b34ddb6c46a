mod util;

use japi_io::document_json::{
    deserialize_document_json_str, parse_document_json_str, parse_records_json_str,
    parse_schema_json_str, serialize_records,
};
use japi_io::prelude::*;
use serde_json::{Value, json};

fn articles_schema() -> ResourceSchema {
    parse_schema_json_str(&util::read_demo("articles.schema.json")).expect("schema must parse")
}

#[test]
fn golden_article_document_minified() {
    let schema = articles_schema();
    let records = parse_records_json_str(&util::read_demo("article.record.json")).unwrap();

    let doc = serialize_records(records, &schema, &RenderOptions::default()).unwrap();
    let min = OutputFormat::Minified.write(&doc).unwrap();

    let expected = r#"{"data":{"type":"articles","id":"1","attributes":{"title":"Ember Hamster"},"relationships":{"author":{"data":{"type":"people","id":"9"}},"comments":{"data":[{"type":"comments","id":"5"},{"type":"comments","id":"12"}]}},"links":{"self":"http://example.com/articles/1"}},"included":[{"type":"people","id":"9","attributes":{"first-name":"Dan","last-name":"Gebhardt"}},{"type":"comments","id":"5","attributes":{"body":"First!"}},{"type":"comments","id":"12","attributes":{"body":"I like XML better"}}]}"#;
    assert_eq!(min, expected);
}

#[test]
fn golden_collection_document_pretty() {
    let schema = articles_schema();
    let records = parse_records_json_str(&util::read_demo("articles.records.json")).unwrap();

    let doc = serialize_records(records, &schema, &RenderOptions::default()).unwrap();
    let pretty = OutputFormat::Pretty.write(&doc).unwrap();

    let expected = r#"{
  "data": [
    {
      "type": "articles",
      "id": "1",
      "attributes": {
        "title": "Ember Hamster"
      },
      "relationships": {
        "author": {
          "data": {
            "type": "people",
            "id": "9"
          }
        }
      },
      "links": {
        "self": "http://example.com/articles/1"
      }
    },
    {
      "type": "articles",
      "id": "2",
      "attributes": {
        "title": "Rails is Omakase"
      },
      "relationships": {
        "author": {
          "data": {
            "type": "people",
            "id": "9"
          }
        }
      },
      "links": {
        "self": "http://example.com/articles/2"
      }
    }
  ],
  "links": {
    "self": "http://example.com/articles"
  },
  "included": [
    {
      "type": "people",
      "id": "9",
      "attributes": {
        "first-name": "Dan"
      }
    }
  ]
}"#;
    assert_eq!(pretty, expected);
}

#[test]
fn incoming_document_with_mixed_relationship_shapes_deserializes() {
    let schema = articles_schema();
    let records =
        deserialize_document_json_str(&util::read_demo("article.document.json"), &schema).unwrap();

    let Records::One(record) = records else {
        panic!("expected a singular document");
    };
    assert_eq!(
        Value::Object(record),
        json!({
            "title": "Ember Hamster",
            "author": { "type": "people", "id": "9" },
            "comments": [
                { "type": "comments", "id": "5" },
                { "type": "comments", "id": "12" }
            ]
        })
    );
}

#[test]
fn foreign_type_is_rejected_before_shape_parsing() {
    let schema = articles_schema();
    let input = r#"{"data":{"type":"people","id":"9","relationships":{"boss":{"data":"bad"}}}}"#;

    let err = deserialize_document_json_str(input, &schema).unwrap_err();
    assert!(err.is_codec());
    assert_eq!(err.to_string(), "Unknown Type: expected 'articles', got 'people'");
}

#[test]
fn foreign_element_in_a_collection_is_rejected() {
    let schema = articles_schema();
    let input = r#"{"data":[{"type":"articles","id":"1"},{"type":"people","id":"9"}]}"#;

    let err = deserialize_document_json_str(input, &schema).unwrap_err();
    assert!(matches!(
        err,
        DocumentJsonError::Codec(CodecError::UnknownType { .. })
    ));
}

#[test]
fn malformed_relationship_is_a_shape_error() {
    let schema = articles_schema();
    let input = r#"{"data":{"type":"articles","id":"1","relationships":{"author":{"data":"9"}}}}"#;

    let err = deserialize_document_json_str(input, &schema).unwrap_err();
    assert!(!err.is_codec());
    assert!(err.to_string().contains("malformed relationship 'author'"), "{err}");
}

#[test]
fn missing_data_member_is_reported_by_name() {
    let err = parse_document_json_str(r#"{"meta":{"total":0}}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid document JSON: missing required top-level member(s): data. Required top-level members: data."
    );
}

#[test]
fn invalid_json_is_reported_as_such() {
    let err = parse_document_json_str("{").unwrap_err();
    assert!(matches!(err, DocumentJsonError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON:"));
}

#[test]
fn records_must_be_objects() {
    assert!(matches!(
        parse_records_json_str(r#"{"id":1}"#).unwrap(),
        Records::One(_)
    ));
    assert!(matches!(
        parse_records_json_str(r#"[{"id":1},{"id":2}]"#).unwrap(),
        Records::Many(ref items) if items.len() == 2
    ));

    let err = parse_records_json_str(r#"[{"id":1}, 2]"#).unwrap_err();
    assert!(err.to_string().contains("collection entries must be JSON objects"));

    assert!(parse_records_json_str("3").is_err());
}

#[test]
fn schema_without_type_fails_serialization() {
    let schema = parse_schema_json_str(r#"{"has_one":["author"]}"#).unwrap();
    let err = serialize_records(
        Records::One(json!({ "id": 1 }).as_object().cloned().unwrap()),
        &schema,
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, CodecError::TypeMismatch);
}

#[test]
fn schema_with_unknown_keys_is_a_shape_error() {
    let err = parse_schema_json_str(r#"{"type":"a","belongs_to":["b"]}"#).unwrap_err();
    assert!(err.to_string().starts_with("Invalid schema JSON shape:"), "{err}");
}

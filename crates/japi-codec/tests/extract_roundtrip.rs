use japi_codec::envelope::RenderOptions;
use japi_codec::extract::{from_record, to_record};
use japi_codec::{CodecTelemetry, ResourceCodec, ResourceTransform};
use japi_core::schema::ResourceSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reference {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    title: String,
    #[serde(default, skip_serializing)]
    draft: bool,
    author: Option<Reference>,
    comments: Vec<Reference>,
}

fn schema() -> ResourceSchema {
    ResourceSchema::builder()
        .kind("articles")
        .attribute("title")
        .has_one("author")
        .has_many("comments")
        .build()
}

fn article() -> Article {
    Article {
        id: Some(1),
        title: "Ember Hamster".to_string(),
        draft: false,
        author: Some(Reference {
            kind: "people".to_string(),
            id: "9".to_string(),
        }),
        comments: vec![Reference {
            kind: "comments".to_string(),
            id: "5".to_string(),
        }],
    }
}

#[test]
fn extracts_only_declared_fields_in_declaration_order() {
    #[derive(Serialize)]
    struct WithSecret<'a> {
        secret: &'a str,
        #[serde(flatten)]
        article: Article,
    }

    let record = to_record(
        &WithSecret {
            secret: "hunter2",
            article: article(),
        },
        &schema(),
    )
    .unwrap();

    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "title", "author", "comments"]);
}

#[test]
fn domain_object_round_trips_through_a_document() {
    let schema = schema();
    let codec = ResourceCodec::new(&schema);

    let doc = codec
        .serialize(to_record(&article(), &schema).unwrap(), &RenderOptions::default())
        .unwrap();
    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({
            "data": {
                "type": "articles",
                "id": "1",
                "attributes": { "title": "Ember Hamster" },
                "relationships": {
                    "author": { "data": { "type": "people", "id": "9" } },
                    "comments": { "data": [{ "type": "comments", "id": "5" }] }
                }
            }
        })
    );

    let telemetry = CodecTelemetry::for_document("serialize", &schema, &doc);
    assert_eq!(telemetry.resources, 1);
    assert_eq!(telemetry.relationships, 2);
    assert_eq!(telemetry.linkage, 2);
    assert_eq!(telemetry.included, 0);

    let back: Article = from_record(codec.deserialize(&doc).unwrap()).unwrap();
    assert_eq!(back, Article { id: None, ..article() });
}

#[test]
fn non_object_domain_values_are_rejected() {
    assert!(to_record(&vec![1, 2, 3], &schema()).is_err());
    assert!(to_record(&Value::Null, &schema()).is_err());
}

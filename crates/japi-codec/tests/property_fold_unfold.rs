use japi_codec::envelope::RenderOptions;
use japi_codec::{CollectionCodec, ResourceTransform, fold, unfold};
use japi_core::record::FlatRecord;
use japi_core::schema::{Cardinality, ResourceSchema};
use proptest::prelude::*;
use serde_json::{Value, json};

fn identifier() -> impl Strategy<Value = Value> {
    ("[a-z]{1,8}", "[a-z0-9]{1,6}").prop_map(|(t, id)| json!({ "type": t, "id": id }))
}

/// A declared relationship with a value of matching shape.
fn relationship() -> impl Strategy<Value = (Cardinality, Value)> {
    prop_oneof![
        identifier().prop_map(|v| (Cardinality::One, v)),
        Just((Cardinality::One, Value::Null)),
        prop::collection::vec(identifier(), 0..5).prop_map(|v| (Cardinality::Many, Value::Array(v))),
    ]
}

/// Declared relationships plus the order their fields appear in the record.
fn declared_and_record_order() -> impl Strategy<Value = (Vec<(Cardinality, Value)>, Vec<usize>)> {
    prop::collection::vec(relationship(), 0..6).prop_flat_map(|rels| {
        let order: Vec<usize> = (0..rels.len()).collect();
        (Just(rels), Just(order).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn unfold_inverts_fold((rels, order) in declared_and_record_order()) {
        let mut builder = ResourceSchema::builder().kind("things");
        for (i, (cardinality, _)) in rels.iter().enumerate() {
            builder = builder.relationship(format!("r{i}"), *cardinality);
        }
        let schema = builder.build();

        let mut record = FlatRecord::new();
        for i in order {
            record.insert(format!("r{i}"), rels[i].1.clone());
        }

        let (rest, folded) = fold(record.clone(), &schema).unwrap();
        prop_assert!(rest.is_empty());

        let back = unfold(&folded, &schema);
        prop_assert_eq!(
            back.iter().collect::<Vec<_>>(),
            record.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn collection_preserves_item_order(ids in prop::collection::vec(0u32..10_000, 0..20)) {
        let schema = ResourceSchema::new("things");
        let items: Vec<FlatRecord> = ids
            .iter()
            .map(|id| json!({ "id": id }).as_object().cloned().unwrap())
            .collect();

        let doc = CollectionCodec::new(&schema).serialize(items, &RenderOptions::default()).unwrap();
        let rendered: Vec<String> = doc.data.resources().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = ids.iter().map(u32::to_string).collect();
        prop_assert_eq!(rendered, expected);
    }
}

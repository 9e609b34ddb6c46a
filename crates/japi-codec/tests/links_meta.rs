use japi_codec::links_meta::{collection_links, render_links, render_meta, resource_links};
use japi_core::record::{FlatRecord, Link};
use japi_core::schema::{MetaRepresenter, Represented, ResourceSchema};
use serde_json::{Map, Value, json};

struct PageMeta;

impl MetaRepresenter for PageMeta {
    fn meta(&self, represented: &Represented<'_>) -> Map<String, Value> {
        let mut meta = Map::new();
        if let Represented::Many(items) = represented {
            meta.insert("count".to_string(), json!(items.len()));
        }
        meta
    }
}

#[test]
fn no_links_renders_as_absent() {
    assert_eq!(render_links(&[]), None);
}

#[test]
fn links_fold_into_a_rel_map_in_order() {
    let links = render_links(&[
        Link::new("self", "/songs/1"),
        Link::new("album", "/albums/3"),
    ])
    .unwrap();

    assert_eq!(
        serde_json::to_string(&links).unwrap(),
        r#"{"self":"/songs/1","album":"/albums/3"}"#
    );
}

#[test]
fn templates_substitute_the_rendered_id() {
    let schema = ResourceSchema::builder()
        .kind("songs")
        .link("self", "/songs/{id}")
        .build();

    let links = resource_links(&schema, "42", Vec::new()).unwrap();
    assert_eq!(links.get("self").map(String::as_str), Some("/songs/42"));

    assert_eq!(resource_links(&ResourceSchema::new("songs"), "42", Vec::new()), None);
}

#[test]
fn collection_self_link_requires_href() {
    assert_eq!(collection_links(&ResourceSchema::new("songs")), None);

    let schema = ResourceSchema::builder().kind("songs").href("/songs").build();
    let links = collection_links(&schema).unwrap();
    assert_eq!(links.get("self").map(String::as_str), Some("/songs"));
}

#[test]
fn meta_precedence_and_absence() {
    let items: Vec<FlatRecord> = vec![FlatRecord::new(), FlatRecord::new()];
    let explicit: Map<String, Value> = [("page".to_string(), json!(1))].into_iter().collect();

    // explicit wins
    assert_eq!(
        render_meta(Some(&explicit), Some(&PageMeta), Represented::Many(&items)),
        Some(explicit.clone())
    );

    // representer when nothing explicit
    let from_rep = render_meta(None, Some(&PageMeta), Represented::Many(&items)).unwrap();
    assert_eq!(from_rep.get("count"), Some(&json!(2)));

    // representer producing nothing, or no representer at all
    let one = FlatRecord::new();
    assert_eq!(render_meta(None, Some(&PageMeta), Represented::One(&one)), None);
    assert_eq!(render_meta(None, None, Represented::One(&one)), None);

    // explicit but empty is still absent
    assert_eq!(render_meta(Some(&Map::new()), None, Represented::One(&one)), None);
}

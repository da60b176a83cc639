use std::cell::Cell;

use link_ledger::ingest::{IngestError, Ingestor};
use link_ledger::registry::{CategorySpec, Registry, RegistryError};
use link_ledger::types::CategoryKey;

fn link(key: &str, n: u32) -> String {
    format!("https://example.com/channels/42/{key}/{n}")
}

#[test]
fn new_category_is_resolved_once() {
    let mut registry = Registry::new();
    let calls = Cell::new(0);
    let resolver = |key: &CategoryKey| {
        calls.set(calls.get() + 1);
        Some(CategorySpec::new(8, format!("{key} posts"), false).unwrap())
    };

    let mut ingestor = Ingestor::new(&mut registry, resolver);
    ingestor.add_reference(&link("general", 1)).unwrap();
    ingestor.add_reference(&link("general", 2)).unwrap();

    assert_eq!(calls.get(), 1);
    let general = registry.get("general").unwrap();
    assert_eq!(general.items().len(), 2);
    assert_eq!(general.description(), "general posts");
    assert!(general.items()[0].added_at() <= general.items()[1].added_at());
}

#[test]
fn blank_description_defaults_to_key() {
    let mut registry = Registry::new();
    let mut ingestor = Ingestor::new(&mut registry, |_: &CategoryKey| {
        Some(CategorySpec::new(3, "   ", true).unwrap())
    });
    ingestor.add_reference(&link("digest", 1)).unwrap();

    let digest = registry.get("digest").unwrap();
    assert_eq!(digest.description(), "Category: digest");
    assert!(digest.is_news());
}

#[test]
fn declined_category_records_nothing() {
    let mut registry = Registry::new();
    let mut ingestor = Ingestor::new(&mut registry, |_: &CategoryKey| -> Option<CategorySpec> { None });

    let err = ingestor.add_reference(&link("general", 1)).unwrap_err();
    assert!(matches!(err, IngestError::UnknownCategory(ref k) if k == "general"));
    assert!(registry.is_empty());
}

#[test]
fn negative_points_are_rejected() {
    assert!(matches!(
        CategorySpec::new(-1, "bad", false),
        Err(RegistryError::InvalidPoints(-1))
    ));
}

#[test]
fn duplicate_reference_in_category_is_rejected() {
    let mut registry = Registry::new();
    let mut ingestor = Ingestor::new(&mut registry, |_: &CategoryKey| {
        Some(CategorySpec::new(5, "", false).unwrap())
    });
    ingestor.add_reference(&link("general", 1)).unwrap();

    let err = ingestor.add_reference(&link("general", 1)).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Registry(RegistryError::DuplicateReference { .. })
    ));
}

#[test]
fn block_skips_bad_lines() {
    let mut registry = Registry::new();
    let mut ingestor = Ingestor::new(&mut registry, |_: &CategoryKey| {
        Some(CategorySpec::new(5, "", false).unwrap())
    });

    let block = format!(
        "{}\n\n   not a link  \n{}\nhttps://example.com/channels/42\n{}\n",
        link("general", 1),
        link("offtopic", 1),
        link("general", 2),
    );
    let outcome = ingestor.add_block(&block);

    assert_eq!(outcome.added, 3);
    assert_eq!(
        outcome.rejected,
        vec!["not a link", "https://example.com/channels/42"]
    );
    let keys: Vec<&str> = registry.categories().map(|c| c.key().as_str()).collect();
    assert_eq!(keys, vec!["general", "offtopic"]);
}

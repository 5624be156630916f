use super::*;
use crate::{foundation::core::ElementRef, host::memory::MemoryDocument};

fn doc_with(tags: &[(&str, Option<&str>)]) -> (MemoryDocument, Vec<ElementRef>) {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let els = tags
        .iter()
        .map(|&(id, value)| match value {
            Some(v) => doc.append(root, "div", &[("data-entry-id", id), ("data-entry-value", v)]),
            None => doc.append(root, "div", &[("data-entry-id", id)]),
        })
        .collect();
    (doc, els)
}

#[test]
fn index_keeps_first_occurrence_of_each_id() {
    let (doc, _) = doc_with(&[("1", Some("20")), ("2", Some("90")), ("1", Some("55"))]);
    let entries = index_from_host(&doc, &HeatmapConfig::default());
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key(), &EntryKey::from("1"));
    assert_eq!(entries[0].value(), Some(&Value::from("20")));
    assert_eq!(entries[1].key(), &EntryKey::from("2"));
}

#[test]
fn index_honors_container_scope() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let inside = doc.append(root, "section", &[]);
    doc.append(inside, "div", &[("data-entry-id", "in")]);
    doc.append(root, "div", &[("data-entry-id", "out")]);
    let cfg = HeatmapConfig {
        container: Some(inside),
        ..HeatmapConfig::default()
    };
    let entries = index_from_host(&doc, &cfg);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key(), &EntryKey::from("in"));
    assert_eq!(entries[0].value(), None);
}

#[test]
fn build_binds_every_element_sharing_an_id() {
    let (doc, els) = doc_with(&[("1", Some("5")), ("2", None), ("1", None)]);
    let mut entry = Entry::new(1);
    build_entry(&doc, &HeatmapConfig::default(), &mut entry);
    let hosts: Vec<_> = entry.plots().iter().map(Plot::host).collect();
    assert_eq!(hosts, vec![els[0], els[2]]);
    assert_eq!(entry.value(), Some(&Value::from("5")));
}

#[test]
fn build_keeps_explicit_value_and_is_repeatable() {
    let (doc, els) = doc_with(&[("1", Some("5"))]);
    let mut entry = Entry::new(els[0]).with_value(42);
    let cfg = HeatmapConfig::default();
    build_entry(&doc, &cfg, &mut entry);
    build_entry(&doc, &cfg, &mut entry);
    assert_eq!(entry.plots().len(), 1);
    assert_eq!(entry.value(), Some(&Value::from(42)));
}

#[test]
fn build_without_matching_elements_leaves_no_plots() {
    let (doc, _) = doc_with(&[]);
    let mut entry = Entry::new(1001).with_value(90);
    build_entry(&doc, &HeatmapConfig::default(), &mut entry);
    assert!(entry.plots().is_empty());
    assert_eq!(tagged_count(&doc, &HeatmapConfig::default()), 0);
}

use super::*;
use crate::{foundation::core::ElementRef, host::memory::MemoryDocument};

fn tagged_doc(ids: &[&str]) -> (MemoryDocument, Vec<ElementRef>) {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let els = ids
        .iter()
        .map(|&id| doc.append(root, "div", &[("data-entry-id", id)]))
        .collect();
    (doc, els)
}

fn collection(pairs: &[(i32, i32)]) -> Vec<Entry> {
    pairs
        .iter()
        .map(|&(id, v)| Entry::new(id).with_value(v))
        .collect()
}

fn options(pairs: &[(i32, i32)]) -> HeatmapOptions {
    HeatmapOptions::default().collection(collection(pairs))
}

#[test]
fn construction_without_collection_indexes_the_document() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    doc.append(root, "div", &[("data-entry-id", "1"), ("data-entry-value", "20")]);
    doc.append(root, "div", &[("data-entry-id", "2"), ("data-entry-value", "90")]);

    let heatmap = Heatmap::new(doc, HeatmapOptions::default());
    assert_eq!(heatmap.entries().len(), 2);
    assert_eq!(heatmap.range().max, Some(90.0));
    assert_eq!(heatmap.document().figure_count(), 2);
    assert_eq!(heatmap.entry_value("1"), Some(&Value::from("20")));
}

#[test]
fn scoped_repaint_keeps_range() {
    let (doc, _) = tagged_doc(&["1", "2", "3"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90), (2, 259), (3, 950)]));
    heatmap.update_entry_value(1, 100);
    // 90 was not the max and 100 does not exceed it: no recalibration.
    assert_eq!(heatmap.range().rank_order, vec![950.0, 259.0, 90.0]);
    assert_eq!(heatmap.entry_value(1), Some(&Value::from(100)));
    assert_eq!(heatmap.rank_of(1), Some(0));
}

#[test]
fn lowering_the_max_forces_a_rebuild() {
    let (doc, _) = tagged_doc(&["1", "2", "3"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90), (2, 259), (3, 950)]));
    heatmap.update_entry_value(3, 10);
    assert_eq!(heatmap.range().max, Some(259.0));
    assert_eq!(heatmap.rank_of(3), Some(3));
}

#[test]
fn untracked_elements_trigger_a_rebuild() {
    let (doc, _) = tagged_doc(&["1"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90), (2, 259)]));
    assert_eq!(heatmap.document().figure_count(), 1);

    let root = heatmap.document().root();
    heatmap
        .document_mut()
        .append(root, "div", &[("data-entry-id", "2")]);
    heatmap.refresh(None, false);
    assert_eq!(heatmap.document().figure_count(), 2);

    heatmap
        .document_mut()
        .append(root, "div", &[("data-entry-id", "1")]);
    heatmap.refresh(None, false);
    assert_eq!(heatmap.document().figure_count(), 3);
    assert_eq!(heatmap.entries()[0].plots().len(), 2);
}

#[test]
fn add_entry_ignores_existing_keys() {
    let (doc, _) = tagged_doc(&["1", "2"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90)]));
    heatmap.add_entry(Entry::new(1).with_value(5000));
    assert_eq!(heatmap.entry_value(1), Some(&Value::from(90)));

    heatmap.add_entry(Entry::new(2).with_value(5000));
    assert_eq!(heatmap.entries().len(), 2);
    assert_eq!(heatmap.range().max, Some(5000.0));
    assert_eq!(heatmap.document().figure_count(), 2);
}

#[test]
fn add_entry_below_max_is_painted_without_rebuild() {
    let (doc, _) = tagged_doc(&["1", "2"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90)]));
    heatmap.add_entry(Entry::new(2).with_value(10));
    assert_eq!(heatmap.range().rank_order, vec![90.0]);
    assert_eq!(heatmap.document().figure_count(), 2);
    assert_eq!(heatmap.rank_of(2), Some(0));
}

#[test]
fn removing_the_max_recalibrates() {
    let (doc, els) = tagged_doc(&["1", "2", "3"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90), (2, 259), (3, 950)]));
    heatmap.remove_entry(3);
    assert_eq!(heatmap.entries().len(), 2);
    assert_eq!(heatmap.range().max, Some(259.0));
    assert!(heatmap.document().surface(els[2]).unwrap().figure().is_none());

    heatmap.remove_entry(1);
    assert_eq!(heatmap.range().max, Some(259.0));
    assert_eq!(heatmap.range().rank_order, vec![259.0, 90.0]);
}

#[test]
fn unknown_keys_are_silent_no_ops() {
    let (doc, _) = tagged_doc(&["1"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90)]));
    let before = heatmap.range().clone();
    heatmap.update_entry_value(42, 1);
    heatmap.remove_entry(42);
    heatmap.refresh(Some(EntryKey::from(42)), false);
    assert_eq!(heatmap.entry_value(42), None);
    assert_eq!(heatmap.rank_of(42), None);
    assert_eq!(heatmap.range(), &before);
    assert_eq!(heatmap.entries().len(), 1);
}

#[test]
fn element_bound_entries_are_looked_up_by_handle() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let a = doc.append(root, "div", &[("class", "story")]);
    let b = doc.append(root, "div", &[("class", "story")]);
    let heatmap = Heatmap::new(
        doc,
        HeatmapOptions::default()
            .collection(vec![Entry::new(a).with_value(200), Entry::new(b).with_value(105)]),
    );
    assert_eq!(heatmap.entry_value(a), Some(&Value::from(200)));
    assert_eq!(heatmap.rank_of(b), Some(2));
    assert_eq!(heatmap.document().figure_count(), 2);
}

#[test]
fn entries_with_element_and_id_answer_to_both() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let el = doc.append(root, "div", &[]);
    let entry = Entry::new(el).with_id("1").with_value(50);
    let mut heatmap = Heatmap::new(doc, HeatmapOptions::default().collection(vec![entry]));

    assert_eq!(heatmap.entry_value(el), Some(&Value::from(50)));
    assert_eq!(heatmap.entry_value(1), Some(&Value::from(50)));
    assert_eq!(heatmap.rank_of(1), Some(1));

    heatmap.add_entry(Entry::new(1).with_value(7));
    heatmap.add_entry(Entry::new(el));
    assert_eq!(heatmap.entries().len(), 1);

    heatmap.update_entry_value(1, 80);
    assert_eq!(heatmap.entry_value(el), Some(&Value::from(80)));

    heatmap.remove_entry("1");
    assert!(heatmap.entries().is_empty());
    assert_eq!(heatmap.document().figure_count(), 0);
}

#[test]
fn add_entry_ignores_an_element_entry_sharing_an_existing_id() {
    let (mut doc, _) = tagged_doc(&["1"]);
    let root = doc.root();
    let other = doc.append(root, "div", &[]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90)]));
    heatmap.add_entry(Entry::new(other).with_id("1").with_value(5));
    assert_eq!(heatmap.entries().len(), 1);
    assert_eq!(heatmap.entry_value(other), None);
}

#[test]
fn moving_the_container_clears_figures_left_out_of_scope() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let a = doc.append(root, "section", &[]);
    let b = doc.append(root, "section", &[]);
    let in_a = doc.append(a, "div", &[("data-entry-id", "1"), ("data-entry-value", "10")]);
    let in_b = doc.append(b, "div", &[("data-entry-id", "1"), ("data-entry-value", "20")]);
    let mut heatmap = Heatmap::new(doc, HeatmapOptions::default().container(a));
    assert_eq!(heatmap.document().figure_count(), 1);

    heatmap.update_config(ConfigPatch::default().container(Some(b)));
    let doc = heatmap.document();
    assert!(doc.surface(in_a).unwrap().figure().is_none());
    assert!(doc.surface(in_b).unwrap().figure().is_some());
    assert_eq!(doc.figure_count(), 1);
}

#[test]
fn destroyed_heatmap_ignores_every_operation() {
    let (doc, _) = tagged_doc(&["1", "2"]);
    let mut heatmap = Heatmap::new(doc, options(&[(1, 90), (2, 5)]));
    heatmap.destroy();
    assert!(heatmap.is_destroyed());
    assert_eq!(heatmap.document().figure_count(), 0);

    heatmap.set_collection(collection(&[(1, 1)]));
    heatmap.add_entry(Entry::new(2).with_value(3));
    heatmap.update_config(ConfigPatch::default().opacity(0.1));
    heatmap.refresh(None, true);
    assert!(heatmap.entries().is_empty());
    assert_eq!(heatmap.config(), &HeatmapConfig::default());
    assert_eq!(heatmap.document().figure_count(), 0);
}

#[test]
fn borrowed_documents_work_as_hosts() {
    let (mut doc, _) = tagged_doc(&["1"]);
    {
        let heatmap = Heatmap::new(&mut doc, options(&[(1, 3)]));
        assert_eq!(heatmap.entries().len(), 1);
    }
    assert_eq!(doc.figure_count(), 1);
}

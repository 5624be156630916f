use std::collections::HashSet;

use crate::{
    collection::entry::{Entry, EntryKey, Plot, Value},
    foundation::config::HeatmapConfig,
    host::document::HostDocument,
};

/// Collect one entry per distinct id found on tagged elements in scope.
///
/// Later elements repeating an id are skipped; `build_entry` binds every element of that id
/// to the single entry afterwards.
pub(crate) fn index_from_host<D: HostDocument + ?Sized>(
    doc: &D,
    config: &HeatmapConfig,
) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for el in doc.tagged(config.container, &config.content_selector) {
        let Some(id) = doc.attribute(el, &config.content_selector) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        let mut entry = Entry::new(id);
        entry.set_value(doc.attribute(el, &config.value_selector).map(Value::Text));
        entries.push(entry);
    }
    tracing::debug!(entries = entries.len(), "indexed entries from host");
    entries
}

/// Resolve the entry's plots, replacing any previous ones.
///
/// A missing value is read from the first resolved element's value attribute.
pub(crate) fn build_entry<D: HostDocument + ?Sized>(
    doc: &D,
    config: &HeatmapConfig,
    entry: &mut Entry,
) {
    // The element wins over an identity carried next to it.
    let hosts = match entry.key() {
        EntryKey::Element(el) => vec![*el],
        EntryKey::Id(id) => doc.tagged_with(config.container, &config.content_selector, id),
    };

    if entry.value().is_none()
        && let Some(&first) = hosts.first()
    {
        entry.set_value(doc.attribute(first, &config.value_selector).map(Value::Text));
    }

    let plots = entry.plots_mut();
    plots.clear();
    plots.extend(hosts.into_iter().map(Plot::new));
}

/// Number of tagged elements currently in scope.
pub(crate) fn tagged_count<D: HostDocument + ?Sized>(doc: &D, config: &HeatmapConfig) -> usize {
    doc.tagged(config.container, &config.content_selector).len()
}

#[cfg(test)]
#[path = "../../tests/unit/collection/index.rs"]
mod tests;

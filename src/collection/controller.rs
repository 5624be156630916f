use crate::{
    collection::{
        entry::{Entry, EntryKey, Value},
        index::{build_entry, index_from_host, tagged_count},
    },
    color::ramp::{ColorRamp, LabRamp},
    foundation::config::{ConfigPatch, HeatmapConfig, HeatmapOptions},
    host::document::HostDocument,
    overlay::binder::{PaintCtx, render, set_display, teardown},
    scale::calibrate::{Range, calibrate},
};

/// A heatmap drawn over the elements of one host document.
///
/// Owns its document, collection, range and configuration. Lookups on unknown keys return
/// `None` and mutations on unknown keys are no-ops. After [`Heatmap::destroy`] every
/// operation is a no-op.
pub struct Heatmap<D, R = LabRamp> {
    doc: D,
    ramp: R,
    config: HeatmapConfig,
    entries: Vec<Entry>,
    range: Range,
    destroyed: bool,
}

impl<D: HostDocument> Heatmap<D, LabRamp> {
    /// Build and paint a heatmap with the default color ramp.
    pub fn new(doc: D, options: HeatmapOptions) -> Self {
        Self::with_ramp(doc, options, LabRamp::default())
    }
}

impl<D: HostDocument, R: ColorRamp> Heatmap<D, R> {
    /// Build and paint a heatmap. Without an explicit collection, entries are indexed from
    /// the document.
    pub fn with_ramp(doc: D, mut options: HeatmapOptions, ramp: R) -> Self {
        let config = HeatmapConfig::from_options(&options);
        let entries = options.collection.take().unwrap_or_default();
        let mut heatmap = Self {
            doc,
            ramp,
            config,
            entries,
            range: Range::default(),
            destroyed: false,
        };
        heatmap.rebuild_all();
        heatmap
    }

    /// Active configuration.
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Current collection, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Range the plots were last painted against.
    pub fn range(&self) -> &Range {
        &self.range
    }

    /// The host document.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable access to the host, e.g. to add elements before a [`Heatmap::refresh`].
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// Give the host document back, leaving the overlays in place.
    pub fn into_document(self) -> D {
        self.doc
    }

    /// Whether [`Heatmap::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Merge `patch` into the configuration and rebuild.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        if self.destroyed {
            return;
        }
        self.config.apply(patch);
        self.rebuild_all();
    }

    /// Replace the collection, tearing down every current entry first, then rebuild.
    pub fn set_collection(&mut self, collection: Vec<Entry>) -> &[Entry] {
        if self.destroyed {
            return &self.entries;
        }
        for mut entry in std::mem::take(&mut self.entries) {
            teardown(&mut self.doc, &mut entry);
        }
        self.entries = collection;
        self.rebuild_all()
    }

    /// Rebuild the whole map: bind entries (indexing the document if the collection is
    /// empty), recalibrate the range and repaint every plot.
    ///
    /// Previous plots are cleared first, so elements that left the scope lose their figure.
    #[tracing::instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn rebuild_all(&mut self) -> &[Entry] {
        if self.destroyed {
            return &self.entries;
        }
        if self.entries.is_empty() {
            self.entries = index_from_host(&self.doc, &self.config);
        }
        for entry in &mut self.entries {
            teardown(&mut self.doc, entry);
        }
        for entry in &mut self.entries {
            build_entry(&self.doc, &self.config, entry);
        }
        self.range = calibrate(&self.entries);
        tracing::debug!(
            max = ?self.range.max,
            min = ?self.range.min,
            entries = self.entries.len(),
            "recalibrated range"
        );
        self.repaint_all();
        &self.entries
    }

    /// Repaint after a change to `key`'s entry.
    ///
    /// Falls back to a full rebuild when the entry's value exceeds the current max, when
    /// `force_reset` is set, or when the document holds more tagged elements than there
    /// are plots. Otherwise only the entry's plots are repainted, or every plot when `key`
    /// is `None` or unknown.
    pub fn refresh(&mut self, key: Option<EntryKey>, force_reset: bool) {
        if self.destroyed {
            return;
        }
        let index = key.as_ref().and_then(|k| self.position(k));
        let value = index.and_then(|i| self.entries[i].value());
        let exceeds_max = self.range.exceeds_max(value);
        let tagged = tagged_count(&self.doc, &self.config);
        let plotted: usize = self.entries.iter().map(|e| e.plots().len()).sum();

        if exceeds_max || force_reset || tagged > plotted {
            tracing::debug!(
                exceeds_max,
                force_reset,
                tagged,
                plotted,
                "refresh needs a full rebuild"
            );
            self.rebuild_all();
            return;
        }

        match index {
            Some(i) => self.repaint_one(i),
            None => self.repaint_all(),
        }
    }

    /// Value of the entry matching `key` by element or identity.
    pub fn entry_value(&self, key: impl Into<EntryKey>) -> Option<&Value> {
        let key = key.into();
        self.entries[self.position(&key)?].value()
    }

    /// Rank currently drawn for `key`'s entry.
    pub fn rank_of(&self, key: impl Into<EntryKey>) -> Option<usize> {
        let key = key.into();
        let index = self.position(&key)?;
        Some(self.range.rank_of(self.entries[index].value()))
    }

    /// Set a new value for `key`'s entry and refresh. Changing the current max forces a
    /// full rebuild.
    pub fn update_entry_value(&mut self, key: impl Into<EntryKey>, value: impl Into<Value>) {
        let key = key.into();
        let Some(index) = self.position(&key) else {
            return;
        };
        let reset = self.range.is_max(self.entries[index].value());
        self.entries[index].set_value(Some(value.into()));
        self.refresh(Some(key), reset);
    }

    /// Bind and add a new entry, then refresh. Entries sharing an element or identity with
    /// an existing one are ignored.
    pub fn add_entry(&mut self, mut entry: Entry) {
        if self.destroyed || self.entries.iter().any(|e| e.overlaps(&entry)) {
            return;
        }
        build_entry(&self.doc, &self.config, &mut entry);
        let key = entry.key().clone();
        self.entries.push(entry);
        self.refresh(Some(key), false);
    }

    /// Tear down and drop `key`'s entry. Removing the max holder triggers a full rebuild.
    pub fn remove_entry(&mut self, key: impl Into<EntryKey>) {
        let key = key.into();
        let Some(index) = self.position(&key) else {
            return;
        };
        let mut entry = self.entries.remove(index);
        teardown(&mut self.doc, &mut entry);
        if self.range.is_max(entry.value()) {
            self.rebuild_all();
        }
    }

    /// Hide every figure without unbinding it.
    pub fn hide(&mut self) {
        set_display(&mut self.doc, &self.entries, "none");
    }

    /// Show figures hidden by [`Heatmap::hide`].
    pub fn show(&mut self) {
        set_display(&mut self.doc, &self.entries, "block");
    }

    /// Clear every overlay and drop all state. The heatmap cannot be used again.
    pub fn destroy(&mut self) {
        for entry in &mut self.entries {
            teardown(&mut self.doc, entry);
        }
        self.entries.clear();
        self.config = HeatmapConfig::default();
        self.range = Range::default();
        self.destroyed = true;
        tracing::debug!("heatmap destroyed");
    }

    fn position(&self, key: &EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(key))
    }

    fn repaint_one(&mut self, index: usize) {
        let ctx = PaintCtx {
            config: &self.config,
            range: &self.range,
            ramp: &self.ramp,
        };
        render(&mut self.doc, &ctx, &mut self.entries[index]);
    }

    fn repaint_all(&mut self) {
        let ctx = PaintCtx {
            config: &self.config,
            range: &self.range,
            ramp: &self.ramp,
        };
        for entry in &mut self.entries {
            render(&mut self.doc, &ctx, entry);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collection/controller.rs"]
mod tests;

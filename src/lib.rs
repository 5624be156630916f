//! heatveil draws data-driven heatmap overlays on top of the elements of a host document.
//!
//! Every tracked element gets a translucent figure whose color encodes the element's value
//! relative to the range of the current dataset. The crate does not own a document model;
//! it draws into anything implementing [`HostDocument`], and ships [`MemoryDocument`] for
//! headless use and tests.
//!
//! # Update model
//!
//! - **Rebuild** ([`Heatmap::rebuild_all`], [`Heatmap::set_collection`]): rebind every entry
//!   to its elements, recalibrate the [`Range`] and repaint all plots.
//! - **Scoped repaint** ([`Heatmap::refresh`]): repaint one entry against the current range.
//!   A refresh escalates to a rebuild whenever the range could be stale: a value above the
//!   max, a changed max, or tagged elements that no entry is bound to yet.
//!
//! Lookups on unknown keys return `None` and mutations on unknown keys do nothing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod collection;
mod color;
mod foundation;
mod host;
mod overlay;
mod scale;

pub use collection::controller::Heatmap;
pub use collection::entry::{Entry, EntryKey, EntrySpec, Plot, Value, entries_from_json};
pub use color::ramp::{ColorRamp, HEAT_STOPS, LabRamp};
pub use foundation::config::{
    ConfigPatch, DEFAULT_CONTENT_SELECTOR, DEFAULT_GLOW, DEFAULT_OPACITY, DEFAULT_VALUE_SELECTOR,
    HeatmapConfig, HeatmapOptions, ScaleKind,
};
pub use foundation::core::{ElementRef, Rgb8};
pub use foundation::error::{HeatError, HeatResult};
pub use host::document::{FIGURE_CLASS, Figure, HostDocument, InlineStyle, ScopedStyle, Surface};
pub use host::memory::MemoryDocument;
pub use scale::calibrate::{Range, calibrate};

use crate::{
    collection::entry::Entry,
    color::ramp::ColorRamp,
    foundation::{config::HeatmapConfig, core::ElementRef},
    host::document::{Figure, HostDocument, ScopedStyle},
    overlay::colorize::{colorize, heat_rate},
    scale::calibrate::Range,
};

/// Everything a repaint reads besides the document and the entry.
pub(crate) struct PaintCtx<'a, R: ?Sized> {
    pub(crate) config: &'a HeatmapConfig,
    pub(crate) range: &'a Range,
    pub(crate) ramp: &'a R,
}

/// Paint every plot of `entry`.
///
/// Unpainted plots get their surface mounted (style block, figure, passthrough); painted
/// plots only get fresh `data-rank`/`data-score`. Plots whose host is gone are skipped.
pub(crate) fn render<D, R>(doc: &mut D, ctx: &PaintCtx<'_, R>, entry: &mut Entry)
where
    D: HostDocument + ?Sized,
    R: ColorRamp + ?Sized,
{
    let rank = ctx.range.rank_of(entry.value());
    let score = entry.value().map(ToString::to_string).unwrap_or_default();
    let rate = heat_rate(entry.value(), ctx.range.max);

    for plot in entry.plots_mut().iter_mut() {
        let host = plot.host();
        let mounted = plot.painted
            && doc
                .surface(host)
                .is_some_and(|surface| surface.figure().is_some());

        if mounted {
            if let Some(figure) = doc.surface_mut(host).and_then(|s| s.figure_mut()) {
                figure.rank = rank;
                figure.score.clone_from(&score);
            }
        } else if mount(doc, ctx.config, host, rank, &score) {
            plot.painted = true;
        } else {
            tracing::trace!(host = host.0, "host element is gone, skipping plot");
            continue;
        }

        if let Some(figure) = doc.surface_mut(host).and_then(|s| s.figure_mut()) {
            colorize(figure, rate, ctx.config, ctx.ramp);
        }
    }
}

fn mount<D: HostDocument + ?Sized>(
    doc: &mut D,
    config: &HeatmapConfig,
    host: ElementRef,
    rank: usize,
    score: &str,
) -> bool {
    let Some(position) = doc.computed_position(host) else {
        return false;
    };
    if position.is_empty() || position == "static" {
        doc.set_inline_style(host, "position", "relative");
    }
    let Some(surface) = doc.attach_surface(host) else {
        return false;
    };
    surface.mount(
        ScopedStyle {
            opacity: config.opacity,
            border_radius_pct: config.border_radius_pct(),
        },
        Figure::new(rank, score),
    );
    true
}

/// Un-render every plot of `entry`, leaving only the passthrough marker on each host.
pub(crate) fn teardown<D: HostDocument + ?Sized>(doc: &mut D, entry: &mut Entry) {
    for plot in entry.plots_mut().iter_mut() {
        if let Some(surface) = doc.surface_mut(plot.host()) {
            surface.clear();
        }
        plot.painted = false;
    }
}

/// Set the CSS `display` of every figure drawn for `entries`.
pub(crate) fn set_display<D: HostDocument + ?Sized>(doc: &mut D, entries: &[Entry], display: &str) {
    for plot in entries.iter().flat_map(Entry::plots) {
        if let Some(figure) = doc.surface_mut(plot.host()).and_then(|s| s.figure_mut()) {
            figure.style.set("display", display);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/binder.rs"]
mod tests;

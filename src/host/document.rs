use std::collections::BTreeMap;

use crate::foundation::core::ElementRef;

/// Class carried by every overlay figure.
pub const FIGURE_CLASS: &str = "heatveil";

/// Ordered inline style declarations (`property -> value`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    decls: BTreeMap<String, String>,
}

impl InlineStyle {
    /// Value declared for `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls.get(property).map(String::as_str)
    }

    /// Declare `property`, replacing any previous value.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.decls.insert(property.to_owned(), value.into());
    }

    /// Drop the declaration of `property`, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.decls.remove(property)
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Render as a `style` attribute value.
    pub fn to_css(&self) -> String {
        self.decls
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Style block injected into a surface, sizing the figure to cover its host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScopedStyle {
    /// Figure opacity.
    pub opacity: f64,
    /// Corner rounding in percent.
    pub border_radius_pct: f64,
}

impl ScopedStyle {
    /// Render the `figure` rule.
    pub fn to_css(&self) -> String {
        format!(
            "figure.{FIGURE_CLASS} {{ display: block; width: 100%; height: 100%; opacity: {}; \
             position: absolute; z-index: 20; border-radius: {}%; margin: 0; left: 0; top: 0; \
             pointer-events: none; }}",
            self.opacity, self.border_radius_pct
        )
    }
}

/// The overlay marker drawn over a host element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Figure {
    /// `data-rank`: 1-based position of the score in the descending rank order, 0 if unranked.
    pub rank: usize,
    /// `data-score`: the entry value as text.
    pub score: String,
    /// Inline style: heat color, glow and display.
    pub style: InlineStyle,
}

impl Figure {
    /// Unstyled figure.
    pub fn new(rank: usize, score: impl Into<String>) -> Self {
        Self {
            rank,
            score: score.into(),
            style: InlineStyle::default(),
        }
    }
}

/// Isolated rendering scope attached to one host element.
///
/// A fresh surface, or one that was cleared, holds only the passthrough marker that keeps
/// the host's own content visible.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    style: Option<ScopedStyle>,
    figure: Option<Figure>,
    passthrough: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            style: None,
            figure: None,
            passthrough: true,
        }
    }
}

impl Surface {
    /// Replace the content with a style block, one figure and the passthrough marker.
    pub fn mount(&mut self, style: ScopedStyle, figure: Figure) {
        self.style = Some(style);
        self.figure = Some(figure);
        self.passthrough = true;
    }

    /// Replace the content with only the passthrough marker.
    pub fn clear(&mut self) {
        self.style = None;
        self.figure = None;
        self.passthrough = true;
    }

    /// Mounted style block.
    pub fn style(&self) -> Option<&ScopedStyle> {
        self.style.as_ref()
    }

    /// Mounted figure.
    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Mounted figure, for in-place updates.
    pub fn figure_mut(&mut self) -> Option<&mut Figure> {
        self.figure.as_mut()
    }

    /// Whether the host's own content is still projected.
    pub fn has_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Effective opacity of the figure: inline declaration first, then the style block.
    pub fn figure_opacity(&self) -> Option<f64> {
        let figure = self.figure.as_ref()?;
        figure
            .style
            .get("opacity")
            .and_then(|v| v.trim().parse().ok())
            .or_else(|| self.style.map(|s| s.opacity))
    }

    /// Serialized markup, mirroring what a browser host would hold in the shadow root.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        if let Some(style) = &self.style {
            out.push_str("<style>");
            out.push_str(&style.to_css());
            out.push_str("</style>");
        }
        if let Some(figure) = &self.figure {
            out.push_str(&format!(
                "<figure class=\"{FIGURE_CLASS}\" data-rank=\"{}\" data-score=\"{}\"",
                figure.rank, figure.score
            ));
            if !figure.style.is_empty() {
                out.push_str(&format!(" style=\"{}\"", figure.style.to_css()));
            }
            out.push_str("></figure>");
        }
        if self.passthrough {
            out.push_str("<content></content>");
        }
        out
    }
}

/// Element store the heatmap draws into.
///
/// Queries walk the descendants of `scope` (or the whole document when `scope` is `None`)
/// in document order. Every method tolerates handles of elements that no longer exist.
pub trait HostDocument {
    /// All elements in scope carrying attribute `attr`.
    fn tagged(&self, scope: Option<ElementRef>, attr: &str) -> Vec<ElementRef>;

    /// All elements in scope whose attribute `attr` equals `value`.
    fn tagged_with(&self, scope: Option<ElementRef>, attr: &str, value: &str) -> Vec<ElementRef> {
        self.tagged(scope, attr)
            .into_iter()
            .filter(|&el| self.attribute(el, attr).as_deref() == Some(value))
            .collect()
    }

    /// Value of attribute `name`, `None` if unset or the element is gone.
    fn attribute(&self, element: ElementRef, name: &str) -> Option<String>;

    /// Computed CSS `position` of the element, `None` if the element is gone.
    fn computed_position(&self, element: ElementRef) -> Option<String>;

    /// Set an inline style declaration on the element.
    fn set_inline_style(&mut self, element: ElementRef, property: &str, value: &str);

    /// Surface of the element, created on first use. `None` if the element is gone.
    fn attach_surface(&mut self, element: ElementRef) -> Option<&mut Surface>;

    /// Surface of the element, if one was attached.
    fn surface(&self, element: ElementRef) -> Option<&Surface>;

    /// Mutable counterpart of [`HostDocument::surface`].
    fn surface_mut(&mut self, element: ElementRef) -> Option<&mut Surface>;
}

impl<D: HostDocument + ?Sized> HostDocument for &mut D {
    fn tagged(&self, scope: Option<ElementRef>, attr: &str) -> Vec<ElementRef> {
        (**self).tagged(scope, attr)
    }

    fn tagged_with(&self, scope: Option<ElementRef>, attr: &str, value: &str) -> Vec<ElementRef> {
        (**self).tagged_with(scope, attr, value)
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn computed_position(&self, element: ElementRef) -> Option<String> {
        (**self).computed_position(element)
    }

    fn set_inline_style(&mut self, element: ElementRef, property: &str, value: &str) {
        (**self).set_inline_style(element, property, value)
    }

    fn attach_surface(&mut self, element: ElementRef) -> Option<&mut Surface> {
        (**self).attach_surface(element)
    }

    fn surface(&self, element: ElementRef) -> Option<&Surface> {
        (**self).surface(element)
    }

    fn surface_mut(&mut self, element: ElementRef) -> Option<&mut Surface> {
        (**self).surface_mut(element)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/document.rs"]
mod tests;

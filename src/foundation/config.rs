use serde::{Deserialize, Serialize};

use crate::{
    collection::entry::Entry,
    foundation::core::ElementRef,
    foundation::error::{HeatError, HeatResult},
};

/// Attribute naming an element's entry.
pub const DEFAULT_CONTENT_SELECTOR: &str = "data-entry-id";
/// Attribute holding an element's value.
pub const DEFAULT_VALUE_SELECTOR: &str = "data-entry-value";
/// Figure opacity.
pub const DEFAULT_OPACITY: f64 = 0.7;
/// Glow radius in pixels; 0 disables the glow.
pub const DEFAULT_GLOW: f64 = 0.0;

/// Distribution used when mapping a normalized rate onto the color ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ScaleKind {
    /// Rates map linearly within each ramp segment.
    #[default]
    Linear,
    /// Rates map logarithmically within each ramp segment.
    Log,
}

impl ScaleKind {
    /// Lowercase name, as accepted in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    /// Parse a scale name. Unrecognized names fall back to [`ScaleKind::Linear`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "log" => Self::Log,
            _ => Self::Linear,
        }
    }
}

impl From<String> for ScaleKind {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<&str> for ScaleKind {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

/// Construction input for a heatmap. Every field is optional and unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    /// Scope for element queries. `None` means the whole document.
    pub container: Option<ElementRef>,
    /// Attribute carrying an element's entry id.
    pub content_selector: Option<String>,
    /// Attribute carrying an element's value.
    pub value_selector: Option<String>,
    /// Figure opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Glow radius in pixels.
    pub glow: Option<f64>,
    /// Ramp distribution.
    pub scale: Option<ScaleKind>,
    /// Explicit dataset. When absent, entries are indexed from the document.
    pub collection: Option<Vec<Entry>>,
}

impl HeatmapOptions {
    /// Parse options from JSON and validate the configuration they resolve to.
    pub fn from_json(json: &str) -> HeatResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        HeatmapConfig::from_options(&options).validate()?;
        Ok(options)
    }

    /// Set `container`.
    pub fn container(mut self, container: ElementRef) -> Self {
        self.container = Some(container);
        self
    }

    /// Set `opacity`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set `glow`.
    pub fn glow(mut self, glow: f64) -> Self {
        self.glow = Some(glow);
        self
    }

    /// Set `scale`.
    pub fn scale(mut self, scale: ScaleKind) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set `collection`.
    pub fn collection(mut self, collection: Vec<Entry>) -> Self {
        self.collection = Some(collection);
        self
    }
}

/// Active rendering options of a heatmap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatmapConfig {
    /// Scope for element queries. `None` means the whole document.
    pub container: Option<ElementRef>,
    /// Attribute carrying an element's entry id.
    pub content_selector: String,
    /// Attribute carrying an element's value.
    pub value_selector: String,
    /// Figure opacity.
    pub opacity: f64,
    /// Glow radius in pixels.
    pub glow: f64,
    /// Ramp distribution.
    pub scale: ScaleKind,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            container: None,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_owned(),
            value_selector: DEFAULT_VALUE_SELECTOR.to_owned(),
            opacity: DEFAULT_OPACITY,
            glow: DEFAULT_GLOW,
            scale: ScaleKind::Linear,
        }
    }
}

impl HeatmapConfig {
    /// Resolve options against defaults. Empty selectors and a zero opacity or glow count as
    /// unset and take the default.
    pub fn from_options(options: &HeatmapOptions) -> Self {
        fn non_empty(value: &Option<String>, default: &str) -> String {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_owned()
        }

        fn non_zero(value: Option<f64>, default: f64) -> f64 {
            value.filter(|v| *v != 0.0 && !v.is_nan()).unwrap_or(default)
        }

        Self {
            container: options.container,
            content_selector: non_empty(&options.content_selector, DEFAULT_CONTENT_SELECTOR),
            value_selector: non_empty(&options.value_selector, DEFAULT_VALUE_SELECTOR),
            opacity: non_zero(options.opacity, DEFAULT_OPACITY),
            glow: non_zero(options.glow, DEFAULT_GLOW),
            scale: options.scale.unwrap_or_default(),
        }
    }

    /// Shallow-merge the fields present in `patch`.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(container) = patch.container {
            self.container = container;
        }
        if let Some(selector) = patch.content_selector {
            self.content_selector = selector;
        }
        if let Some(selector) = patch.value_selector {
            self.value_selector = selector;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(glow) = patch.glow {
            self.glow = glow;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
    }

    /// Reject empty selectors, an opacity outside `[0, 1]` and a negative or non-finite glow.
    pub fn validate(&self) -> HeatResult<()> {
        if self.content_selector.trim().is_empty() {
            return Err(HeatError::validation("content_selector must be non-empty"));
        }
        if self.value_selector.trim().is_empty() {
            return Err(HeatError::validation("value_selector must be non-empty"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(HeatError::validation(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        if !self.glow.is_finite() || self.glow < 0.0 {
            return Err(HeatError::validation(format!(
                "glow must be a finite radius >= 0, got {}",
                self.glow
            )));
        }
        Ok(())
    }

    /// Corner rounding of the overlay figure, in percent.
    pub(crate) fn border_radius_pct(&self) -> f64 {
        if self.glow > 0.0 { self.glow * 0.2 } else { 0.0 }
    }
}

/// Partial configuration update. `None` fields keep their current value.
///
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// New scope; `Some(None)` clears it.
    #[serde(with = "double_option")]
    pub container: Option<Option<ElementRef>>,
    /// New id attribute.
    pub content_selector: Option<String>,
    /// New value attribute.
    pub value_selector: Option<String>,
    /// New opacity.
    pub opacity: Option<f64>,
    /// New glow radius.
    pub glow: Option<f64>,
    /// New ramp distribution.
    pub scale: Option<ScaleKind>,
}

impl ConfigPatch {
    /// Parse a patch from a JSON object.
    pub fn from_json(json: &str) -> HeatResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set `opacity`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set `glow`.
    pub fn glow(mut self, glow: f64) -> Self {
        self.glow = Some(glow);
        self
    }

    /// Set `scale`.
    pub fn scale(mut self, scale: ScaleKind) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set `container`.
    pub fn container(mut self, container: Option<ElementRef>) -> Self {
        self.container = Some(container);
        self
    }
}

// Distinguishes `"container": null` (clear the scope) from an absent field (keep it).
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

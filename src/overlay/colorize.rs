use crate::{
    collection::entry::Value,
    color::ramp::ColorRamp,
    foundation::config::HeatmapConfig,
    host::document::Figure,
};

/// Normalized intensity of `score` against `max`.
///
/// A falsy score (missing, `0`, NaN, empty text) counts as 1, so entries without data paint
/// at the intensity of a score of one rather than disappearing.
pub(crate) fn heat_rate(score: Option<&Value>, max: Option<f64>) -> f64 {
    let score = match score {
        Some(v) if v.is_truthy() => v.as_number(),
        _ => 1.0,
    };
    max.map_or(f64::NAN, |m| score / m)
}

/// Fill the figure with the ramp color for `rate`, plus a matching glow when configured.
///
/// Non-finite rates paint at full intensity.
pub(crate) fn colorize<R: ColorRamp + ?Sized>(
    figure: &mut Figure,
    rate: f64,
    config: &HeatmapConfig,
    ramp: &R,
) {
    let rate = if rate.is_finite() { rate } else { 1.0 };
    let color = ramp.color_at(rate, config.scale).to_css();
    if config.glow > 0.0 {
        let glow = config.glow;
        figure
            .style
            .set("box-shadow", format!("0px 0px {glow}px {glow}px {color}"));
    } else {
        figure.style.remove("box-shadow");
    }
    figure.style.set("background-color", color);
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/colorize.rs"]
mod tests;

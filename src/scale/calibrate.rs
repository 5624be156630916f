use std::cmp::Ordering;

use serde::Serialize;

use crate::collection::entry::{Entry, Value};

/// Value range of the current collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Range {
    /// Largest numeric value, `None` when no value is numeric.
    pub max: Option<f64>,
    /// Smallest numeric value, `None` when no value is numeric.
    pub min: Option<f64>,
    /// Every value's numeric coercion, descending, NaN last.
    pub rank_order: Vec<f64>,
}

impl Range {
    /// 1-based position of the first match of `value` in the rank order, 0 when absent.
    ///
    /// Missing and non-numeric values coerce to NaN and share the first NaN slot.
    pub fn rank_of(&self, value: Option<&Value>) -> usize {
        let x = coerce(value);
        self.rank_order
            .iter()
            .position(|&v| same(v, x))
            .map_or(0, |i| i + 1)
    }

    /// Whether `value` is numerically equal to the current maximum.
    pub fn is_max(&self, value: Option<&Value>) -> bool {
        self.max.is_some_and(|m| coerce(value) == m)
    }

    /// Whether `value` lies above the current maximum. Any number exceeds an empty range.
    pub fn exceeds_max(&self, value: Option<&Value>) -> bool {
        let x = coerce(value);
        match self.max {
            Some(m) => x > m,
            None => !x.is_nan(),
        }
    }
}

/// Derive `{max, min, rank_order}` from the collection's values.
pub fn calibrate(entries: &[Entry]) -> Range {
    let mut values: Vec<f64> = entries.iter().map(|e| coerce(e.value())).collect();

    let numeric = values.iter().copied().filter(|v| !v.is_nan());
    let (max, min) = numeric.fold((None, None), |(max, min): (Option<f64>, Option<f64>), v| {
        (
            Some(max.map_or(v, |m| m.max(v))),
            Some(min.map_or(v, |m| m.min(v))),
        )
    });

    values.sort_by(descending_nan_last);
    Range {
        max,
        min,
        rank_order: values,
    }
}

fn coerce(value: Option<&Value>) -> f64 {
    value.map_or(f64::NAN, Value::as_number)
}

fn same(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn descending_nan_last(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/calibrate.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::{
    core::ElementRef,
    error::{HeatError, HeatResult},
};

/// Raw entry value. Values indexed from the document keep their attribute text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value.
    Number(f64),
    /// Text, coerced to a number where one is needed.
    Text(String),
}

impl Value {
    /// Numeric coercion. Text that does not parse as a number yields NaN.
    ///
    /// Infinities are only read from the spelled-out `Infinity` forms; `inf` and `nan` are
    /// not numbers.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => parse_number(s.trim()),
        }
    }

    /// `false` for `0`, NaN and empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }
}

fn parse_number(text: &str) -> f64 {
    match text {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => text
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(f64::NAN),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Number(f64::from(v))
            }
        })*
    };
}

value_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Lookup key of an entry: an identity matched against the id attribute, or a bound element.
///
/// Identities compare by their text form, so `EntryKey::from(1) == EntryKey::from("1")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// Identity, matched against the content selector attribute.
    Id(String),
    /// Element the entry is drawn on.
    Element(ElementRef),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            Self::Element(el) => write!(f, "element:{}", el.0),
        }
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for EntryKey {
            fn from(v: $t) -> Self {
                Self::Id(v.to_string())
            }
        })*
    };
}

key_from_int!(i32, i64, u32, u64, usize);

impl From<&str> for EntryKey {
    fn from(v: &str) -> Self {
        Self::Id(v.to_owned())
    }
}

impl From<String> for EntryKey {
    fn from(v: String) -> Self {
        Self::Id(v)
    }
}

impl From<ElementRef> for EntryKey {
    fn from(v: ElementRef) -> Self {
        Self::Element(v)
    }
}

impl From<&EntryKey> for EntryKey {
    fn from(v: &EntryKey) -> Self {
        v.clone()
    }
}

/// Binding between an entry and one host element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plot {
    host: ElementRef,
    // Set once the host's surface content has been mounted for this plot.
    pub(crate) painted: bool,
}

impl Plot {
    pub(crate) fn new(host: ElementRef) -> Self {
        Self {
            host,
            painted: false,
        }
    }

    /// Element this plot draws on.
    pub fn host(&self) -> ElementRef {
        self.host
    }
}

/// One logical data point, drawn on every element it resolves to.
///
/// An entry is keyed by its element when it has one, by its identity otherwise. An entry
/// bound to an element may carry an identity as well; lookups match either.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "EntrySpec")]
pub struct Entry {
    key: EntryKey,
    // Identity of an element-keyed entry.
    alias: Option<String>,
    value: Option<Value>,
    plots: SmallVec<[Plot; 1]>,
}

impl Entry {
    /// Entry without a value. The value is read from the document when the entry is bound.
    pub fn new(key: impl Into<EntryKey>) -> Self {
        Self {
            key: key.into(),
            alias: None,
            value: None,
            plots: SmallVec::new(),
        }
    }

    /// Set the entry's value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach an identity. On an identity-keyed entry this replaces the key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        match self.key {
            EntryKey::Element(_) => self.alias = Some(id.into()),
            EntryKey::Id(_) => self.key = EntryKey::Id(id.into()),
        }
        self
    }

    /// Binding key: the element when there is one, the identity otherwise.
    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    /// Identity of the entry, whether it is the key or carried next to an element.
    pub fn id(&self) -> Option<&str> {
        match &self.key {
            EntryKey::Id(id) => Some(id),
            EntryKey::Element(_) => self.alias.as_deref(),
        }
    }

    /// Whether `key` names this entry, by element or by identity.
    pub fn matches(&self, key: &EntryKey) -> bool {
        match key {
            EntryKey::Id(id) => self.id() == Some(id.as_str()),
            EntryKey::Element(_) => &self.key == key,
        }
    }

    /// Whether both entries would answer to a common key.
    pub fn overlaps(&self, other: &Entry) -> bool {
        self.matches(other.key()) || other.id().is_some_and(|id| self.id() == Some(id))
    }

    /// Current value, `None` until set or read from the document.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Elements the entry is currently bound to.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub(crate) fn set_value(&mut self, value: Option<Value>) {
        self.value = value;
    }

    pub(crate) fn plots_mut(&mut self) -> &mut SmallVec<[Plot; 1]> {
        &mut self.plots
    }
}

/// Entry-like input: `{ id?, element?, value? }` with at least one of `id` / `element`.
///
/// When both are given the entry is drawn on the element and still answers to the id.
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntrySpec {
    /// Identity; JSON numbers are read as their decimal text.
    #[serde(default, deserialize_with = "id_repr")]
    pub id: Option<String>,
    /// Element to draw on.
    #[serde(default)]
    pub element: Option<ElementRef>,
    /// Initial value.
    #[serde(default)]
    pub value: Option<Value>,
}

fn id_repr<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|r| match r {
        Repr::Text(s) => s,
        Repr::Int(i) => i.to_string(),
        Repr::Float(f) => f.to_string(),
    }))
}

impl TryFrom<EntrySpec> for Entry {
    type Error = HeatError;

    fn try_from(input: EntrySpec) -> HeatResult<Self> {
        let (key, alias) = match (input.element, input.id) {
            (Some(el), alias) => (EntryKey::Element(el), alias),
            (None, Some(id)) => (EntryKey::Id(id), None),
            (None, None) => {
                return Err(HeatError::validation(
                    "entry needs an `id` or an `element`",
                ));
            }
        };
        Ok(Self {
            key,
            alias,
            value: input.value,
            plots: SmallVec::new(),
        })
    }
}

/// Parse a JSON array of entry-like objects.
pub fn entries_from_json(json: &str) -> HeatResult<Vec<Entry>> {
    let specs: Vec<EntrySpec> = serde_json::from_str(json)?;
    specs.into_iter().map(Entry::try_from).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/collection/entry.rs"]
mod tests;
